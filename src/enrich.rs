//! Result enrichment
//!
//! Attaches a distance and an address to every raw facility. Address lookups
//! run concurrently as one batch; each lookup settles to an address or a
//! placeholder on its own, so a failure never removes a facility or cancels
//! its siblings.

use crate::constants::messages::{ADDRESS_NOT_AVAILABLE, ERROR_FETCHING_ADDRESS};
use crate::coord::distance::distance_km;
use crate::coord::{Facility, RawFacility, ResultSet, SearchOrigin};
use crate::geo::AddressResolver;
use futures::future::join_all;
use tracing::{debug, warn};

/// Enrich raw facilities and sort them by distance from `origin`
///
/// The output always has one entry per input facility. Facilities at equal
/// distance keep their input order.
pub async fn enrich<A: AddressResolver>(
    origin: &SearchOrigin,
    raw: Vec<RawFacility>,
    resolver: &A,
) -> ResultSet {
    let center = origin.coordinate;

    let lookups = raw.into_iter().map(|facility| async move {
        let distance = distance_km(center, facility.location);
        let address = resolve_address(resolver, &facility).await;
        Facility::enriched(facility, distance, address)
    });

    let mut facilities = join_all(lookups).await;
    // Vec::sort_by is stable
    facilities.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    debug!(count = facilities.len(), "enriched facilities");

    ResultSet {
        origin: *origin,
        facilities,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

async fn resolve_address<A: AddressResolver>(resolver: &A, facility: &RawFacility) -> String {
    match resolver.reverse_geocode(facility.location).await {
        Ok(Some(address)) if !address.trim().is_empty() => address,
        Ok(_) => ADDRESS_NOT_AVAILABLE.to_string(),
        Err(e) => {
            warn!(facility = %facility.id, error = %e, "address lookup failed");
            ERROR_FETCHING_ADDRESS.to_string()
        }
    }
}
