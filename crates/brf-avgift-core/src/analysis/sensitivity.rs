use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::engine::{run_full_calculation, CalculationResult};
use super::input::{AnalysisInput, Parameters};
use super::validation::validate_input;
use crate::error::AvgiftError;
use crate::price_index::PriceIndexTable;
use crate::types::*;
use crate::AvgiftResult;

/// Output quantity recorded at each grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityMetric {
    #[default]
    SurplusPerArea,
    AdjustmentPercent,
    Tier,
    LongTermResult,
}

impl SensitivityMetric {
    fn pick(self, result: &CalculationResult) -> Decimal {
        match self {
            SensitivityMetric::SurplusPerArea => result.surplus_per_area,
            SensitivityMetric::AdjustmentPercent => result.recommendation.adjustment_percent,
            SensitivityMetric::Tier => Decimal::from(result.recommendation.tier),
            SensitivityMetric::LongTermResult => result.long_term_result,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SensitivityMetric::SurplusPerArea => "surplus_per_area",
            SensitivityMetric::AdjustmentPercent => "adjustment_percent",
            SensitivityMetric::Tier => "tier",
            SensitivityMetric::LongTermResult => "long_term_result",
        }
    }
}

/// Input for a two-way sweep of the macro assumptions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSensitivityInput {
    /// Base analysis; its parameters locate the base case in the grid
    pub analysis: AnalysisInput,
    /// Expected inflation sweep (rows), percent
    pub inflation: SensitivityVariable,
    /// Expected nominal rate sweep (columns), percent
    pub nominal_rate: SensitivityVariable,
    #[serde(default)]
    pub metric: SensitivityMetric,
}

/// Output of the two-way sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub variable_1_name: String,
    pub variable_2_name: String,
    pub variable_1_values: Vec<Decimal>,
    pub variable_2_values: Vec<Decimal>,
    pub output_metric: String,
    /// matrix[i][j] = metric at inflation = variable_1_values[i], nominal = variable_2_values[j]
    pub matrix: Vec<Vec<Decimal>>,
    pub base_case_value: Decimal,
    /// (row, col) of the grid point closest to the input parameters
    pub base_case_position: (usize, usize),
}

/// Most points one sweep axis may produce.
pub const MAX_SWEEP_POINTS: usize = 101;

/// Sweep values from min to max with step; max is always included.
fn generate_sweep_values(var: &SensitivityVariable) -> AvgiftResult<Vec<Decimal>> {
    if var.step <= Decimal::ZERO {
        return Err(AvgiftError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Step must be positive".into(),
        });
    }
    if var.min > var.max {
        return Err(AvgiftError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: "Min must be <= max".into(),
        });
    }

    let mut values = Vec::new();
    let mut current = var.min;
    while current <= var.max {
        values.push(current);
        current += var.step;
        if values.len() > MAX_SWEEP_POINTS {
            break;
        }
    }
    if let Some(&last) = values.last() {
        if last < var.max {
            values.push(var.max);
        }
    }
    if values.len() > MAX_SWEEP_POINTS {
        return Err(AvgiftError::InvalidInput {
            field: format!("variable:{}", var.name),
            reason: format!("Sweep exceeds {MAX_SWEEP_POINTS} points; widen the step"),
        });
    }

    Ok(values)
}

fn closest_index(values: &[Decimal], target: Decimal) -> usize {
    values
        .iter()
        .enumerate()
        .min_by_key(|(_, v)| (**v - target).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Run the full calculation at every (inflation, nominal rate) grid point.
///
/// Grid points that fail (for instance parameters outside 0..=20 %) are
/// zero-filled and reported as warnings rather than aborting the sweep.
pub fn parameter_sensitivity(
    input: &ParameterSensitivityInput,
    index: &PriceIndexTable,
    evaluation_year: Year,
) -> AvgiftResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(&input.analysis, evaluation_year)?;
    let rows = generate_sweep_values(&input.inflation)?;
    let cols = generate_sweep_values(&input.nominal_rate)?;

    let mut matrix = Vec::with_capacity(rows.len());
    for inflation in &rows {
        let mut row = Vec::with_capacity(cols.len());
        for nominal in &cols {
            let analysis = input.analysis.with_parameters(Parameters {
                expected_inflation: *inflation,
                expected_nominal_rate: *nominal,
            });
            match run_full_calculation(&analysis, index, evaluation_year) {
                Ok(result) => row.push(input.metric.pick(&result)),
                Err(e) => {
                    warnings.push(format!("Evaluation failed at ({inflation}, {nominal}): {e}"));
                    row.push(Decimal::ZERO);
                }
            }
        }
        matrix.push(row);
    }

    let base = input.analysis.parameters;
    let base_row = closest_index(&rows, base.expected_inflation);
    let base_col = closest_index(&cols, base.expected_nominal_rate);
    let base_case_value = matrix[base_row][base_col];
    tracing::debug!(
        rows = rows.len(),
        cols = cols.len(),
        failures = warnings.len(),
        "parameter sweep complete"
    );

    let output = SensitivityOutput {
        variable_1_name: input.inflation.name.clone(),
        variable_2_name: input.nominal_rate.name.clone(),
        variable_1_values: rows,
        variable_2_values: cols,
        output_metric: input.metric.label().into(),
        matrix,
        base_case_value,
        base_case_position: (base_row, base_col),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "2-Way Sensitivity: expected inflation x expected nominal rate",
        &serde_json::json!({
            "base_parameters": base,
            "output_metric": input.metric,
            "evaluation_year": evaluation_year,
        }),
        warnings,
        elapsed,
        evaluation_year,
        output,
    ))
}
