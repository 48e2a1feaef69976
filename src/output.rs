//! Terminal output
//!
//! Results go to stdout as pretty JSON or as aligned text tables built from
//! the same serde representation.

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::AnalysisError;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, AnalysisError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> Result<(), AnalysisError> {
    println!("{}", render(value, format)?);
    Ok(())
}

/// Render titled tables one after another
pub fn render_sections(sections: &[(&str, Value)]) -> String {
    sections
        .iter()
        .map(|(title, value)| format!("{}\n{}\n{}", title, "=".repeat(title.len()), render_table(value)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn to_value<T: Serialize>(value: &T) -> Result<Value, AnalysisError> {
    Ok(serde_json::to_value(value)?)
}

fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) => render_array_table(items),
        Value::Object(map) => {
            let rows: Vec<Vec<String>> = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect();
            render_rows(&["key".to_string(), "value".to_string()], &rows)
        }
        scalar => value_to_cell(scalar),
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows: Vec<Vec<String>> = items.iter().map(|item| vec![value_to_cell(item)]).collect();
        return render_rows(&["value".to_string()], &rows);
    }

    // Column order follows first appearance
    let mut headers = Vec::<String>::new();
    for item in items {
        if let Some(map) = item.as_object() {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map(value_to_cell).unwrap_or_else(|| "-".to_string()))
                .collect()
        })
        .collect();

    render_rows(&headers, &rows)
}

fn render_rows(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let format_line = |cells: &[String]| {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| {
                if looks_numeric(cell) {
                    format!("{:>width$}", cell, width = *width)
                } else {
                    format!("{:<width$}", cell, width = *width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = format_line(headers);
    let divider = "-".repeat(header_line.chars().count());

    let mut lines = vec![header_line, divider];
    lines.extend(rows.iter().map(|row| format_line(row.as_slice())));
    lines.join("\n")
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
            (None, Some(f)) => format!("{:.4}", f),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        nested => nested.to_string(),
    }
}

fn looks_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json() {
        let rendered = render(&json!({"lroma": 3.5}), OutputFormat::Json).unwrap();
        assert!(rendered.contains("\"lroma\": 3.5"));
    }

    #[test]
    fn test_render_array_table() {
        let rows = json!([
            {"parameter": "capex", "value": 4800000.0, "lroma": 3.44729},
            {"parameter": "freight_rate", "value": 30.0, "lroma": 8.44729}
        ]);
        let rendered = render(&rows, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("parameter"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("4800000"));
        assert!(lines[3].contains("8.4473"));
    }

    #[test]
    fn test_render_object_as_key_value() {
        let rendered = render(&json!({"scenario": "base_case", "fmip": null}), OutputFormat::Table).unwrap();
        assert!(rendered.contains("scenario"));
        assert!(rendered.contains("base_case"));
        // Null (including non-finite numbers) shows as a dash
        assert!(rendered.lines().any(|l| l.starts_with("fmip") && l.trim_end().ends_with('-')));
    }

    #[test]
    fn test_render_empty_array() {
        assert_eq!(render(&json!([]), OutputFormat::Table).unwrap(), "(no rows)");
    }

    #[test]
    fn test_render_sections() {
        let rendered = render_sections(&[("LROMA", json!([{"vehicle": "fcev"}]))]);
        assert!(rendered.starts_with("LROMA\n=====\n"));
        assert!(rendered.contains("fcev"));
    }

    #[test]
    fn test_value_to_cell() {
        assert_eq!(value_to_cell(&json!(8)), "8");
        assert_eq!(value_to_cell(&json!(25.0)), "25");
        assert_eq!(value_to_cell(&json!(3.447291)), "3.4473");
        assert_eq!(value_to_cell(&json!(null)), "-");
    }
}
