use std::io::{BufRead, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::types::Page;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    error_code: Option<i64>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = error_code {
                response["error_code"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

/// Output an empty collection in the appropriate format
pub fn output_empty_collection(
    output_format: &OutputFormat,
    collection_name: &str,
    message: &str,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: [],
                "total": 0
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", message);
        }
    }
    Ok(())
}

/// Output a single record: pretty JSON, or `key: value` lines for text.
pub fn output_record<T: Serialize>(output_format: &OutputFormat, record: &T) -> anyhow::Result<()> {
    let value = serde_json::to_value(record)?;
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&value)?),
        OutputFormat::Text => match &value {
            Value::Object(fields) => {
                for (key, field) in fields {
                    if !field.is_null() {
                        println!("{}: {}", key, display_value(field));
                    }
                }
            }
            other => println!("{}", display_value(other)),
        },
    }
    Ok(())
}

/// Output one page of a collection; text mode prints the chosen columns tab-separated.
pub fn output_page<T: Serialize>(
    output_format: &OutputFormat,
    collection_name: &str,
    page: &Page<T>,
    columns: &[&str],
) -> anyhow::Result<()> {
    if page.is_empty() {
        return output_empty_collection(
            output_format,
            collection_name,
            &format!("No {} found", collection_name),
        );
    }

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({
                collection_name: page.list,
                "total": page.total
            }))?);
        }
        OutputFormat::Text => {
            println!("{}", columns.join("\t"));
            for item in &page.list {
                let row = serde_json::to_value(item)?;
                let cells: Vec<String> = columns
                    .iter()
                    .map(|column| row.get(*column).map(display_value).unwrap_or_default())
                    .collect();
                println!("{}", cells.join("\t"));
            }
            println!("({} of {})", page.list.len(), page.total);
        }
    }
    Ok(())
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(","),
        Value::Object(fields) => fields
            .get("casbinRole")
            .or_else(|| fields.get("name"))
            .map(display_value)
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

/// Read a JSON request body from stdin.
pub fn read_json_stdin<T: DeserializeOwned>() -> anyhow::Result<T> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    if input.trim().is_empty() {
        return Err(anyhow::anyhow!("expected a JSON object on stdin"));
    }
    serde_json::from_str(&input).map_err(|e| anyhow::anyhow!("invalid JSON on stdin: {}", e))
}

/// Use the given value or ask for it on the terminal.
pub fn prompt_if_missing(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    eprint!("{}: ", prompt);
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    let value = line.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        return Err(anyhow::anyhow!("{} is required", prompt));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_roles_render_as_casbin_names() {
        let roles = json!([{"name": "Admin", "casbinRole": "admin"}, {"name": "Ops", "casbinRole": "operator"}]);
        assert_eq!(display_value(&roles), "admin,operator");
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&json!(true)), "true");
    }
}
