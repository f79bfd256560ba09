//! Calibrate command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hazard_core::Date;
use hazard_curves::BootstrapResult;

use crate::cli::OutputFormat;
use crate::config::CalibrationFile;
use crate::error::CliError;
use crate::output::{print_header, print_output, print_success, print_warning};

/// Arguments for the calibrate command.
#[derive(Args, Debug)]
pub struct CalibrateArgs {
    /// Calibration file (TOML)
    pub file: PathBuf,

    /// Report repricing failures as warnings instead of errors
    #[arg(long)]
    pub allow_repricing_errors: bool,
}

/// One curve node in the output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct NodeRow {
    /// Node index.
    #[tabled(rename = "Node")]
    pub node: usize,
    /// Calibration maturity; empty for the time-zero node.
    #[tabled(rename = "Maturity", display_with = "display_date")]
    pub maturity: Option<Date>,
    /// Node time in years.
    #[tabled(rename = "Time", display_with = "display_f64_4")]
    pub time: f64,
    /// Quoted spread.
    #[tabled(rename = "Spread (bp)", display_with = "display_opt_2")]
    pub spread_bps: Option<f64>,
    /// Hazard rate.
    #[tabled(rename = "Hazard", display_with = "display_f64_8")]
    pub hazard_rate: f64,
    /// Survival probability to the node.
    #[tabled(rename = "Survival", display_with = "display_f64_6")]
    pub survival: f64,
    /// Repricing residual.
    #[tabled(rename = "Residual", display_with = "display_opt_exp")]
    pub residual: Option<f64>,
}

fn display_date(d: &Option<Date>) -> String {
    d.map_or_else(String::new, |d| d.to_string())
}

fn display_f64_4(v: &f64) -> String {
    format!("{v:.4}")
}

fn display_f64_6(v: &f64) -> String {
    format!("{v:.6}")
}

fn display_f64_8(v: &f64) -> String {
    format!("{v:.8}")
}

fn display_opt_2(v: &Option<f64>) -> String {
    v.map_or_else(String::new, |v| format!("{v:.2}"))
}

fn display_opt_exp(v: &Option<f64>) -> String {
    v.map_or_else(String::new, |v| format!("{v:.2e}"))
}

/// Flattens a calibration result into output rows.
pub fn node_rows(result: &BootstrapResult) -> Vec<NodeRow> {
    let curve = &result.curve;
    let checks = result.repricing_report.checks();
    curve
        .times()
        .iter()
        .zip(curve.rates())
        .enumerate()
        .map(|(node, (&time, &hazard_rate))| {
            let check = node.checked_sub(1).and_then(|i| checks.get(i));
            NodeRow {
                node,
                maturity: check.map(|c| c.maturity),
                time,
                spread_bps: check.map(|c| c.spread_bps),
                hazard_rate,
                survival: curve.survival_probability(time),
                residual: check.map(|c| c.residual),
            }
        })
        .collect()
}

/// Execute the calibrate command.
pub fn execute(args: CalibrateArgs, format: OutputFormat) -> Result<()> {
    let file = CalibrationFile::from_file(&args.file)?;
    let maturities = file.maturities()?;
    let spreads = file.spreads_bps();
    let discount = file.discount_curve()?;
    let template = file.template()?;

    tracing::info!(
        "calibrating {} quotes from {}",
        maturities.len(),
        args.file.display()
    );
    let result = file
        .bootstrapper()
        .bootstrap_validated(file.valuation_date, &template, &maturities, &spreads, discount.as_ref())
        .map_err(CliError::from)?;
    tracing::info!("calibration took {:?}", result.build_duration);

    let report = &result.repricing_report;
    if format == OutputFormat::Table {
        print_header(&format!("Hazard curve as of {}", file.valuation_date));
    }
    print_output(&node_rows(&result), format)?;

    if !report.is_valid() {
        let err = CliError::RepricingFailed {
            failed: report.failed_count(),
            total: report.checks().len(),
        };
        if !args.allow_repricing_errors {
            return Err(err.into());
        }
        print_warning(&err.to_string());
    } else if format == OutputFormat::Table {
        print_success(&format!(
            "{} quotes repriced, max residual {:.2e}",
            report.passed_count(),
            report.max_error()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TEMPLATE;

    #[test]
    fn test_node_rows() {
        let file: CalibrationFile = toml::from_str(TEMPLATE).unwrap();
        let discount = file.discount_curve().unwrap();
        let result = file
            .bootstrapper()
            .bootstrap_validated(
                file.valuation_date,
                &file.template().unwrap(),
                &file.maturities().unwrap(),
                &file.spreads_bps(),
                discount.as_ref(),
            )
            .unwrap();

        let rows = node_rows(&result);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].maturity, None);
        assert_eq!(rows[0].survival, 1.0);
        assert_eq!(rows[0].hazard_rate, rows[1].hazard_rate);
        assert_eq!(rows[4].spread_bps, Some(150.0));
        assert!(rows.windows(2).all(|w| w[1].survival < w[0].survival));
        assert!(rows[1..].iter().all(|r| r.residual.is_some_and(|x| x.abs() <= 1e-10)));
    }
}
