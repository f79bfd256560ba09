//! # Hazard Math
//!
//! Root finding for hazard-rate calibration.
//!
//! The solver reproduces the ISDA standard model's hybrid procedure: a secant
//! phase started from an initial guess, a switch to Brent's method once a
//! bracket is found, and a last-resort evaluation at the search bounds.
//!
//! ## Example
//!
//! ```rust
//! use hazard_math::prelude::*;
//!
//! let f = |x: f64| Ok::<_, MathError>(x * x - 0.04);
//! let solution = find_root(f, 0.5, &SolverConfig::default()).unwrap();
//! assert!((solution.root - 0.2).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{find_root, RootMethod, RootSolution, SolverConfig};
}

pub use error::{MathError, MathResult};
