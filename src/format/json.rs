//! JSON output formatter

use crate::coord::ResultSet;
use crate::error::Result;
use crate::format::{OutputFormatter, ResultSetView};

/// JSON formatter - outputs the result set as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON result set"
    }

    fn format(&self, results: &ResultSet) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ResultSetView::from(results))?)
    }
}
