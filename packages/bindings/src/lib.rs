use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use brf_avgift_core::price_index::{resolve_or_fallback, ScbResponseBody};
use brf_avgift_core::types::{current_year, Money, SquareMetres, Year};
use brf_avgift_core::{AnalysisInput, PriceIndexTable};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// SCB body fetched by the caller if any, falling back to the bundled KPIF table.
fn price_index(scb_response: Option<&str>) -> PriceIndexTable {
    match scb_response {
        Some(body) => resolve_or_fallback(&ScbResponseBody(body)),
        None => PriceIndexTable::kpif_fallback(),
    }
}

fn evaluation_year(year: Option<i32>) -> Year {
    year.unwrap_or_else(current_year)
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[napi]
pub fn run_full_calculation(
    input_json: String,
    scb_response: Option<String>,
    year: Option<i32>,
) -> NapiResult<String> {
    let input: AnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let index = price_index(scb_response.as_deref());
    let output =
        brf_avgift_core::run_full_calculation(&input, &index, evaluation_year(year))
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_fee(
    input_json: String,
    scb_response: Option<String>,
    year: Option<i32>,
) -> NapiResult<String> {
    let input: AnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let index = price_index(scb_response.as_deref());
    let output = brf_avgift_core::analyze_fee(&input, &index, evaluation_year(year))
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn parameter_sensitivity(
    input_json: String,
    scb_response: Option<String>,
    year: Option<i32>,
) -> NapiResult<String> {
    let input: brf_avgift_core::analysis::sensitivity::ParameterSensitivityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let index = price_index(scb_response.as_deref());
    let output = brf_avgift_core::analysis::sensitivity::parameter_sensitivity(
        &input,
        &index,
        evaluation_year(year),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RecommendationRequest {
    surplus_per_area: Money,
    total_fees: Money,
    residential_area: SquareMetres,
}

#[napi]
pub fn calculate_recommendation(input_json: String) -> NapiResult<String> {
    let req: RecommendationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = brf_avgift_core::calculate_recommendation(
        req.surplus_per_area,
        req.total_fees,
        req.residential_area,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Price index
// ---------------------------------------------------------------------------

#[napi]
pub fn kpif_fallback() -> NapiResult<String> {
    serde_json::to_string(&PriceIndexTable::kpif_fallback()).map_err(to_napi_error)
}

/// Parse an SCB PxWeb KPIF body into a `{"year": value}` map.
#[napi]
pub fn parse_scb_kpif(response_body: String) -> NapiResult<String> {
    let table = PriceIndexTable::from_scb_response(&response_body).map_err(to_napi_error)?;
    serde_json::to_string(&table).map_err(to_napi_error)
}
