use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::scalar;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render(value));
}

fn render(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => render_envelope(result, map),
            None => render_object(map),
        },
        Value::Array(arr) => render_rows(arr),
        _ => scalar(value),
    }
}

fn render_envelope(result: &Value, envelope: &Map<String, Value>) -> String {
    let mut out = match result {
        Value::Object(res) if res.contains_key("matrix") => render_matrix(res),
        Value::Object(res) => render_object(res),
        Value::Array(arr) => render_rows(arr),
        other => scalar(other),
    };

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            out.push_str("\n\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                out.push_str(&format!("\n  - {w}"));
            }
        }
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        out.push_str(&format!("\n\nMethodology: {meth}"));
    }
    out
}

/// Scalars go in a Field/Value table; nested lists of records and nested
/// objects get their own titled table below it.
fn render_object(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut sections = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {
                sections.push(format!("{key}:\n{}", render_rows(arr)));
            }
            Value::Object(inner) => {
                sections.push(format!("{key}:\n{}", render_object(inner)));
            }
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(scalar).collect();
                builder.push_record([key.clone(), items.join("\n")]);
            }
            _ => builder.push_record([key.clone(), scalar(val)]),
        }
    }

    let mut out = Table::from(builder).to_string();
    for section in sections {
        out.push_str("\n\n");
        out.push_str(&section);
    }
    out
}

fn render_rows(arr: &[Value]) -> String {
    let Some(Value::Object(first)) = arr.first() else {
        return arr.iter().map(scalar).collect::<Vec<_>>().join("\n");
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for map in arr.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| map.get(h).map(scalar).unwrap_or_default()),
        );
    }
    Table::from(builder).to_string()
}

/// Two-way sensitivity grid: rows are variable 1, columns variable 2.
fn render_matrix(res: &Map<String, Value>) -> String {
    let empty = Vec::new();
    let rows = res.get("variable_1_values").and_then(Value::as_array).unwrap_or(&empty);
    let cols = res.get("variable_2_values").and_then(Value::as_array).unwrap_or(&empty);
    let matrix = res.get("matrix").and_then(Value::as_array).unwrap_or(&empty);

    let corner = format!(
        "{} \\ {}",
        res.get("variable_1_name").map(scalar).unwrap_or_default(),
        res.get("variable_2_name").map(scalar).unwrap_or_default()
    );
    let mut builder = Builder::default();
    builder.push_record(std::iter::once(corner).chain(cols.iter().map(scalar)));
    for (label, row) in rows.iter().zip(matrix) {
        let cells = row.as_array().map(|r| r.iter().map(scalar).collect::<Vec<_>>());
        builder.push_record(std::iter::once(scalar(label)).chain(cells.unwrap_or_default()));
    }

    format!(
        "metric: {}\n{}",
        res.get("output_metric").map(scalar).unwrap_or_default(),
        Table::from(builder)
    )
}
