use serde_json::{Map, Value};
use std::io::{self, Write};

use super::{result_of, scalar};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV output error: {e}");
    }
}

fn write_csv<W: Write>(out: W, value: &Value) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(out);

    match result_of(value) {
        Value::Object(res) if res.contains_key("matrix") => write_matrix(&mut wtr, res)?,
        // Per-item tables are what spreadsheets want from an analysis
        Value::Object(res) if res.contains_key("maintenance_items") => {
            if let Some(Value::Array(items)) = res.get("maintenance_items") {
                write_rows(&mut wtr, items)?;
            }
        }
        Value::Object(res) => write_fields(&mut wtr, res)?,
        Value::Array(arr) => write_rows(&mut wtr, arr)?,
        other => wtr.write_record([scalar(other)])?,
    }

    wtr.flush()?;
    Ok(())
}

fn write_fields<W: Write>(
    wtr: &mut csv::Writer<W>,
    map: &Map<String, Value>,
) -> Result<(), csv::Error> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), scalar(val).as_str()])?;
    }
    Ok(())
}

fn write_rows<W: Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> Result<(), csv::Error> {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            wtr.write_record([scalar(item)])?;
        }
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    wtr.write_record(&headers)?;
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(scalar).unwrap_or_default())
            .collect();
        wtr.write_record(&row)?;
    }
    Ok(())
}

fn write_matrix<W: Write>(
    wtr: &mut csv::Writer<W>,
    res: &Map<String, Value>,
) -> Result<(), csv::Error> {
    let empty = Vec::new();
    let rows = res.get("variable_1_values").and_then(Value::as_array).unwrap_or(&empty);
    let cols = res.get("variable_2_values").and_then(Value::as_array).unwrap_or(&empty);
    let matrix = res.get("matrix").and_then(Value::as_array).unwrap_or(&empty);

    let mut header = vec![res.get("variable_1_name").map(scalar).unwrap_or_default()];
    header.extend(cols.iter().map(scalar));
    wtr.write_record(&header)?;

    for (label, row) in rows.iter().zip(matrix) {
        let mut record = vec![scalar(label)];
        if let Some(cells) = row.as_array() {
            record.extend(cells.iter().map(scalar));
        }
        wtr.write_record(&record)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_analysis_writes_item_rows() {
        let out = render(&json!({"result": {
            "maintenance_items": [
                {"description": "Tak", "annuity": 100},
                {"description": "Fasad", "annuity": 200}
            ],
            "real_rate": 2.9
        }}));
        // serde_json orders object keys alphabetically
        assert_eq!(out, "annuity,description\n100,Tak\n200,Fasad\n");
    }

    #[test]
    fn test_flat_result_as_field_value() {
        let out = render(&json!({"result": {"real_rate": 2.5}}));
        assert_eq!(out, "field,value\nreal_rate,2.5\n");
    }

    #[test]
    fn test_matrix_grid() {
        let out = render(&json!({"result": {
            "variable_1_name": "inflation",
            "variable_1_values": [1, 2],
            "variable_2_values": [4, 5],
            "matrix": [[10, 11], [12, 13]]
        }}));
        assert_eq!(out, "inflation,4,5\n1,10,11\n2,12,13\n");
    }
}
