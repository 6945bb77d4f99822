//! Result records for text and JSON output

use serde::Serialize;
use unitr_core::{FormatOptions, UnitExpression};

/// Column at which text-mode results are aligned
const RESULT_COLUMN: usize = 40;

/// Structured evaluation result, one per input line
#[derive(Debug, Serialize)]
pub struct Record {
    pub input: String,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    /// Non-finite values serialize as null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub candidates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub display: String,
}

impl Record {
    pub fn expression(
        input: &str,
        expr: &UnitExpression,
        candidates: Vec<String>,
        options: &FormatOptions,
    ) -> Self {
        Self {
            input: input.to_string(),
            record_type: "expression",
            value: Some(expr.value()),
            unit: Some(expr.unit().render(options.pretty)),
            candidates,
            message: None,
            display: expr.format_with(options),
        }
    }

    pub fn error(input: &str, err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        Self {
            input: input.to_string(),
            record_type: "error",
            value: None,
            unit: None,
            candidates: Vec::new(),
            display: format!("error: {message}"),
            message: Some(message),
        }
    }

    pub fn is_error(&self) -> bool {
        self.message.is_some()
    }

    /// `input = display`, padded so results line up; `quiet` prints the display only
    pub fn to_text(&self, quiet: bool) -> String {
        let mut out = if quiet {
            self.display.clone()
        } else {
            let padding = RESULT_COLUMN.saturating_sub(self.input.chars().count());
            format!("{}{:>width$} = {}", self.input, "", self.display, width = padding)
        };
        if !self.candidates.is_empty() {
            out.push_str(&format!("  [{}]", self.candidates.join(", ")));
        }
        out
    }
}
