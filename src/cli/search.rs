//! Search command handler
//!
//! Finds hospitals near an address, the current position or given coordinates.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::search::{HttpLocator, Search, SearchRequest};
use crate::state::Store;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address to search around (forward geocoded)
    #[arg(long, short = 'a', conflicts_with_all = ["here", "lat", "lng"])]
    pub address: Option<String>,

    /// Use the current device position
    #[arg(long, conflicts_with_all = ["address", "lat", "lng"])]
    pub here: bool,

    /// Latitude of a position to search around
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of a position to search around
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Maximum number of hospitals
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl SearchArgs {
    /// Fold command-line overrides into the loaded config and pick the request
    fn apply(&self, config: &mut Config) -> Result<SearchRequest> {
        if let Some(radius) = self.radius {
            config.search.radius_meters = radius;
        }
        if let Some(limit) = self.limit {
            config.search.limit = limit;
        }

        if let Some(address) = &self.address {
            return Ok(SearchRequest::Address(address.clone()));
        }

        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            Coordinates::new(lat, lng).validate()?;
            config.location.provider = "fixed".to_string();
            config.location.fixed_lat = Some(lat);
            config.location.fixed_lng = Some(lng);
            return Ok(SearchRequest::Device);
        }

        if self.here {
            return Ok(SearchRequest::Device);
        }

        Err(Error::Config(
            "No location specified. Use --address, --here, or --lat/--lng".to_string(),
        ))
    }
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let mut config = Config::load()?.with_env_overrides();
    let request = args.apply(&mut config)?;

    let format = args.format.clone().unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let locator = HttpLocator::from_config(&config)?;
    let store = Store::new();
    let state = locator.search(&store, request).await;

    if let Some(message) = state.failure() {
        return Err(Error::Search(message.to_string()));
    }

    let Some(results) = state.results.as_ref() else {
        // only a blank address ends a search without results or an error
        return Err(Error::Search("Address must not be empty".to_string()));
    };

    let output = formatter.format(results)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
