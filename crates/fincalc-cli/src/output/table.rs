use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_money;

/// Render the computation as a summary table followed by the schedule rows.
pub fn print_table(value: &Value) {
    let Some(envelope) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match envelope.get("result") {
        Some(Value::Object(result)) => {
            print_summary(result);
            if let Some(Value::Array(rows)) = result.get("schedule") {
                println!();
                print_schedule(rows);
            }
        }
        _ => print_summary(envelope),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

/// Summary scalars as a two-column table, schedule excluded.
fn print_summary(result: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in result {
        if key == "schedule" {
            continue;
        }
        builder.push_record([key.as_str(), &format_cell(key, val)]);
    }
    println!("{}", Table::from(builder));
}

/// Schedule rows as a table, one column per row field.
fn print_schedule(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().copied());

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(|v| format_cell(h, v)).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    println!("{}", Table::from(builder));
}

/// Format one cell by field name: percentages get one decimal and a sign,
/// multiples keep two decimals, counts pass through, and every other decimal
/// string is treated as currency.
fn format_cell(key: &str, value: &Value) -> String {
    match value {
        Value::String(s) => {
            if key.ends_with("_pct") {
                match s.parse::<rust_decimal::Decimal>() {
                    Ok(pct) => format!("{:.1}%", pct),
                    Err(_) => s.clone(),
                }
            } else if key == "growth_multiple" {
                match s.parse::<rust_decimal::Decimal>() {
                    Ok(multiple) => format!("x{:.2}", multiple),
                    Err(_) => s.clone(),
                }
            } else if key == "years_to_double" {
                s.clone()
            } else {
                format_money(s).unwrap_or_else(|| s.clone())
            }
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
