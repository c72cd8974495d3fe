//! GPX output formatter
//!
//! Waypoints for the user's position and each facility, for loading into
//! map tools.

use crate::coord::ResultSet;
use crate::error::Result;
use crate::format::OutputFormatter;

/// GPX formatter - outputs GPX waypoint file
pub struct GpxFormatter;

/// Escape the five XML special characters
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, results: &ResultSet) -> Result<String> {
        let mut gpx = String::new();

        // XML header
        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="hospital-locator">"#);
        gpx.push('\n');

        // Metadata
        gpx.push_str("  <metadata>\n");
        gpx.push_str("    <name>Nearby hospitals</name>\n");
        gpx.push_str(&format!("    <time>{}</time>\n", escape_xml(&results.generated_at)));
        gpx.push_str("  </metadata>\n");

        // Origin waypoint
        let origin = results.origin.coordinate;
        gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, origin.lat, origin.lng));
        gpx.push('\n');
        gpx.push_str("    <name>My Location</name>\n");
        gpx.push_str("    <sym>flag</sym>\n");
        gpx.push_str("  </wpt>\n");

        for facility in results.iter() {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                facility.location.lat, facility.location.lng
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&facility.name)));
            gpx.push_str(&format!(
                "    <desc>{} km away from you. {}</desc>\n",
                facility.display_distance(),
                escape_xml(&facility.address)
            ));
            gpx.push_str("    <sym>medical</sym>\n");
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}
