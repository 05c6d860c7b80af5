use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use brf_avgift_core::analysis::sensitivity::{
    parameter_sensitivity, ParameterSensitivityInput, SensitivityMetric,
};
use brf_avgift_core::analysis::{analyze_fee, AnalysisInput, Parameters};
use brf_avgift_core::types::{SensitivityVariable, Year};

use crate::input;

/// Arguments for the full fee analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a JSON/YAML analysis input (property, balance sheet, income
    /// statement, maintenance plan, optional parameters)
    #[arg(long)]
    pub input: Option<String>,

    /// Price index file (SCB response or {"year": value} map)
    #[arg(long)]
    pub index: Option<String>,

    /// Override expected inflation, percent
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Override expected nominal interest rate, percent
    #[arg(long)]
    pub nominal_rate: Option<Decimal>,
}

/// Arguments for the inflation x nominal rate sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to a JSON/YAML analysis input
    #[arg(long)]
    pub input: Option<String>,

    /// Price index file (SCB response or {"year": value} map)
    #[arg(long)]
    pub index: Option<String>,

    /// Inflation sweep as min:max:step, percent
    #[arg(long, default_value = "0:5:1")]
    pub inflation: String,

    /// Nominal rate sweep as min:max:step, percent
    #[arg(long, default_value = "2:8:1")]
    pub nominal_rate: String,

    /// Metric recorded at each grid point
    #[arg(long, value_enum, default_value = "surplus-per-area")]
    pub metric: Metric,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Metric {
    SurplusPerArea,
    AdjustmentPercent,
    Tier,
    LongTermResult,
}

impl From<Metric> for SensitivityMetric {
    fn from(m: Metric) -> Self {
        match m {
            Metric::SurplusPerArea => SensitivityMetric::SurplusPerArea,
            Metric::AdjustmentPercent => SensitivityMetric::AdjustmentPercent,
            Metric::Tier => SensitivityMetric::Tier,
            Metric::LongTermResult => SensitivityMetric::LongTermResult,
        }
    }
}

fn parse_sweep(name: &str, spec: &str) -> Result<SensitivityVariable, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("--{name} must be min:max:step, got '{spec}'").into());
    }
    Ok(SensitivityVariable {
        name: name.replace('-', "_"),
        min: parts[0].trim().parse()?,
        max: parts[1].trim().parse()?,
        step: parts[2].trim().parse()?,
    })
}

fn apply_overrides(
    input: AnalysisInput,
    inflation: Option<Decimal>,
    nominal_rate: Option<Decimal>,
) -> AnalysisInput {
    let parameters = Parameters {
        expected_inflation: inflation.unwrap_or(input.parameters.expected_inflation),
        expected_nominal_rate: nominal_rate.unwrap_or(input.parameters.expected_nominal_rate),
    };
    AnalysisInput { parameters, ..input }
}

pub fn run_analyze(args: AnalyzeArgs, year: Year) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis: AnalysisInput = input::read_input(args.input.as_deref(), "An analysis input")?;
    let analysis = apply_overrides(analysis, args.inflation, args.nominal_rate);
    let index = input::index::load_index(args.index.as_deref())?;

    let result = analyze_fee(&analysis, &index, year)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_sensitivity(args: SensitivityArgs, year: Year) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis: AnalysisInput = input::read_input(args.input.as_deref(), "An analysis input")?;
    let index = input::index::load_index(args.index.as_deref())?;

    let sweep = ParameterSensitivityInput {
        analysis,
        inflation: parse_sweep("inflation", &args.inflation)?,
        nominal_rate: parse_sweep("nominal-rate", &args.nominal_rate)?,
        metric: args.metric.into(),
    };
    let result = parameter_sensitivity(&sweep, &index, year)?;
    Ok(serde_json::to_value(result)?)
}
