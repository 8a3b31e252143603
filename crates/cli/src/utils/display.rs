//! Display utilities for the simterm CLI

use std::fmt::{self, Display};

use colored::Colorize;
use simterm_apdu_core::{ApduResponse, Response};

/// A formatted section title
pub(crate) struct SectionTitle(pub(crate) &'static str);

impl Display for SectionTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}", self.0.bold().underline())
    }
}

/// Format a section header
pub(crate) const fn section_title(title: &'static str) -> SectionTitle {
    SectionTitle(title)
}

/// Format a success message
pub(crate) fn success(message: &str) -> String {
    format!("✅ {}", message.green().bold())
}

/// Format a warning message
pub(crate) fn warning(message: &str) -> String {
    format!("⚠️  {}", message.yellow().bold())
}

/// Format a key-value section
pub(crate) fn key_value_box(title: &str, items: Vec<(&str, String)>) -> String {
    let mut result = format!("{}", title.bold().underline());

    for (key, value) in items {
        result.push_str(&format!("\n  {}: {}", key.bold(), value));
    }

    result
}

/// Describe a raw response APDU: status word, its meaning and any payload
pub(crate) fn response_lines(response: &[u8]) -> Vec<(&'static str, String)> {
    match Response::try_from(response) {
        Ok(parsed) => {
            let status = parsed.status();
            let mut items = vec![(
                "Status",
                format!("{} ({})", status, status.description()),
            )];
            if let Some(payload) = parsed.payload() {
                items.push(("Data", hex::encode_upper(payload)));
            }
            items
        }
        Err(_) => vec![("Raw", hex::encode_upper(response))],
    }
}
