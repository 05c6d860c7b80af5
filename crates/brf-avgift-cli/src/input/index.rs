use serde_json::Value;

use brf_avgift_core::PriceIndexTable;

use super::file;

/// Price index for a command: `--index <file>` if given, else the bundled KPIF table.
///
/// The file may be a saved SCB PxWeb response (an object with a `data` array)
/// or a plain `{"<year>": value}` map.
pub fn load_index(path: Option<&str>) -> Result<PriceIndexTable, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let table = parse_index(file::read_json_value(path)?)?;
            tracing::debug!(
                path,
                observations = table.len(),
                first = ?table.first_year(),
                last = ?table.last_year(),
                "loaded price index"
            );
            Ok(table)
        }
        None => Ok(PriceIndexTable::kpif_fallback()),
    }
}

fn parse_index(value: Value) -> Result<PriceIndexTable, Box<dyn std::error::Error>> {
    let table = if value.get("data").is_some_and(Value::is_array) {
        PriceIndexTable::from_scb_value(value)?
    } else {
        serde_json::from_value::<PriceIndexTable>(value)?
    };
    if table.is_empty() {
        return Err("Price index file contains no observations".into());
    }
    Ok(table)
}
