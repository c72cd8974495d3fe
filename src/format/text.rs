//! Human-readable text output formatter
//!
//! One card per facility, nearest first.

use crate::coord::ResultSet;
use crate::error::Result;
use crate::format::OutputFormatter;

/// Text formatter - outputs a card list
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable card list"
    }

    fn format(&self, results: &ResultSet) -> Result<String> {
        let mut output = String::new();

        let origin = results.origin.coordinate;
        output.push_str(&format!(
            "My location: ({:.6}, {:.6}) via {}\n\n",
            origin.lat, origin.lng, results.origin.source
        ));

        if results.is_empty() {
            output.push_str("No hospitals found nearby.\n");
            return Ok(output);
        }

        output.push_str("Hospitals Near You:\n");
        for (index, facility) in results.iter().enumerate() {
            output.push_str(&format!("\n{}. {}\n", index + 1, facility.name));
            output.push_str(&format!(
                "   {} km away from you\n",
                facility.display_distance()
            ));
            output.push_str(&format!("   {}\n", facility.address));
            output.push_str(&format!("   id: {}\n", facility.id));
        }

        Ok(output)
    }
}
