use std::collections::BTreeSet;

use anyhow::Result;
use clap::ValueEnum;
use colored::{ColoredString, Colorize};
use ghrest_api::ApiResponse;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Table,
    Quiet,
}

pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Prints an envelope's payload. With `include_meta` the status line and
    /// the sorted response headers come first, separated by a blank line.
    pub fn render_response(&self, response: &ApiResponse<Value>, include_meta: bool) -> Result<()> {
        if include_meta {
            println!("{}", Self::status_line(response.status));
            for line in Self::header_lines(response) {
                println!("{line}");
            }
            println!();
        }

        self.render(&response.data)
    }

    pub fn render<T: Serialize>(&self, value: &T) -> Result<()> {
        let json_value = serde_json::to_value(value)?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json_value)?);
            }
            OutputFormat::Yaml => {
                print!("{}", serde_yaml::to_string(&json_value)?);
            }
            OutputFormat::Table => {
                if !self.render_table(&json_value) {
                    println!("{}", serde_json::to_string_pretty(&json_value)?);
                }
            }
            OutputFormat::Quiet => {
                for line in Self::quiet_lines(&json_value) {
                    println!("{line}");
                }
            }
        }

        Ok(())
    }

    fn render_table(&self, value: &Value) -> bool {
        let (headers, rows) = match Self::coerce_rows(value) {
            Some(data) => data,
            None => return false,
        };

        let mut builder = Builder::default();
        builder.push_record(headers);
        for row in rows {
            builder.push_record(row);
        }

        let table = builder.build().with(Style::rounded()).to_string();
        println!("{}", table);
        true
    }

    fn status_line(status: u16) -> ColoredString {
        let text = format!("HTTP {status}");
        match status {
            200..=299 => text.green(),
            300..=499 => text.yellow(),
            _ => text.red(),
        }
    }

    fn header_lines(response: &ApiResponse<Value>) -> Vec<String> {
        let mut names: Vec<&String> = response.headers.keys().collect();
        names.sort();
        names
            .into_iter()
            .map(|name| format!("{}: {}", name.bold(), response.headers[name]))
            .collect()
    }

    /// One identifier per line: `id` when present, otherwise `number`, `name`
    /// or the first field.
    fn quiet_lines(value: &Value) -> Vec<String> {
        match value {
            Value::Array(rows) => rows.iter().filter_map(Self::identifier).collect(),
            other => Self::identifier(other).into_iter().collect(),
        }
    }

    fn identifier(value: &Value) -> Option<String> {
        match value {
            Value::Object(obj) => ["id", "number", "name"]
                .iter()
                .find_map(|key| obj.get(*key))
                .or_else(|| obj.values().next())
                .map(Self::value_to_string),
            Value::Null => None,
            other => Some(Self::value_to_string(other)),
        }
    }

    fn coerce_rows(value: &Value) -> Option<(Vec<String>, Vec<Vec<String>>)> {
        let rows = match value {
            Value::Array(rows) if !rows.is_empty() => rows,
            _ => return None,
        };

        let mut headers = BTreeSet::new();
        for row in rows {
            if let Value::Object(obj) = row {
                headers.extend(obj.keys().cloned());
            }
        }

        if headers.is_empty() {
            return None;
        }

        let headers_vec: Vec<String> = headers.into_iter().collect();
        let mut data = Vec::with_capacity(rows.len());
        for row in rows {
            let mut record = Vec::with_capacity(headers_vec.len());
            if let Value::Object(obj) = row {
                for header in &headers_vec {
                    let cell = obj
                        .get(header)
                        .map(Self::value_to_string)
                        .unwrap_or_default();
                    record.push(cell);
                }
            }
            data.push(record);
        }

        Some((headers_vec, data))
    }

    fn value_to_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            other => serde_json::to_string(other).unwrap_or_default(),
        }
    }
}
