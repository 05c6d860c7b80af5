use serde_json::Value;

use super::{result_of, scalar};

/// Fields that answer "what should we do" for each command, most specific first.
const PRIORITY_KEYS: [&str; 9] = [
    "adjustment_percent",
    "present_day_cost",
    "total_annuity",
    "annual_ground_rent",
    "base_case_value",
    "real_rate",
    "long_term_result",
    "value",
    "tier",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result = result_of(value);

    if let Value::Object(map) = result {
        // A full analysis answers with tier and adjustment
        if let Some(Value::Object(rec)) = map.get("recommendation") {
            if let (Some(tier), Some(adj)) = (rec.get("tier"), rec.get("adjustment_percent")) {
                return format!("tier {} {:+}%", scalar(tier), adj.as_f64().unwrap_or_default());
            }
        }

        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return scalar(val);
            }
        }

        if let Some((key, val)) = map.iter().next() {
            return format!("{key}: {}", scalar(val));
        }
    }

    scalar(result)
}
