//! CLI command implementations.

pub mod calibrate;
pub mod template;

pub use calibrate::CalibrateArgs;
pub use template::TemplateArgs;
