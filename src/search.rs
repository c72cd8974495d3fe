//! Search driver
//!
//! A search resolves an origin (device position or address lookup), finds
//! hospitals around it and enriches them. Every outcome, including failures,
//! ends up in the [`Store`]; nothing is propagated to the caller.

use crate::config::Config;
use crate::constants::messages::{
    ERROR_FETCHING_HOSPITALS, ERROR_FETCHING_LOCATION, LOCATION_NOT_FOUND,
};
use crate::coord::{OriginSource, SearchOrigin};
use crate::enrich::enrich;
use crate::error::Result;
use crate::geo::device::DevicePosition;
use crate::geo::geoapify::GeoapifyBackend;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::opencage::OpenCageBackend;
use crate::geo::{AddressResolver, HospitalFinder, LocationResolver, PositionProvider};
use crate::state::{Action, SearchState, Store};
use std::future::Future;
use tracing::{info, warn};

/// What the user asked to search around
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    /// The device's current position
    Device,
    /// A free-text address
    Address(String),
}

impl SearchRequest {
    pub fn source(&self) -> OriginSource {
        match self {
            Self::Device => OriginSource::Device,
            Self::Address(_) => OriginSource::AddressLookup,
        }
    }
}

/// Anything that can run a search against a [`Store`]
pub trait Search: Send + Sync + 'static {
    /// Run one search to completion and return the resulting state
    fn search(&self, store: &Store, request: SearchRequest) -> impl Future<Output = SearchState> + Send;
}

/// Search driver over its four provider collaborators
#[derive(Debug)]
pub struct Locator<P, L, F, A> {
    position: P,
    geocoder: L,
    finder: F,
    addresses: A,
}

/// Locator wired to the real HTTP providers
pub type HttpLocator = Locator<DevicePosition, OpenCageBackend, GeoapifyBackend, NominatimBackend>;

impl HttpLocator {
    /// Build every provider from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Locator::new(
            DevicePosition::from_config(config)?,
            OpenCageBackend::new(config)?,
            GeoapifyBackend::new(config)?,
            NominatimBackend::new(config)?,
        ))
    }
}

impl<P, L, F, A> Locator<P, L, F, A>
where
    P: PositionProvider,
    L: LocationResolver,
    F: HospitalFinder,
    A: AddressResolver,
{
    pub fn new(position: P, geocoder: L, finder: F, addresses: A) -> Self {
        Self {
            position,
            geocoder,
            finder,
            addresses,
        }
    }

    /// Resolve the origin, reporting failures to the store
    async fn resolve_origin(
        &self,
        store: &Store,
        generation: u64,
        request: &SearchRequest,
    ) -> Option<SearchOrigin> {
        match request {
            SearchRequest::Device => match self.position.current_position().await {
                Ok(position) => Some(SearchOrigin::new(position, OriginSource::Device)),
                Err(e) => {
                    warn!(error = %e, "device position unavailable");
                    store
                        .dispatch(Action::LocationFailed {
                            generation,
                            message: e.user_message().to_string(),
                        })
                        .await;
                    None
                }
            },
            SearchRequest::Address(query) => {
                let message = match self.geocoder.geocode(query).await {
                    Ok(Some(location)) if location.coordinates().is_valid() => {
                        info!(query = %query, resolved = %location.display_name, "address located");
                        return Some(SearchOrigin::new(
                            location.coordinates(),
                            OriginSource::AddressLookup,
                        ));
                    }
                    Ok(_) => LOCATION_NOT_FOUND,
                    Err(e) => {
                        warn!(query = %query, error = %e, "address lookup failed");
                        ERROR_FETCHING_LOCATION
                    }
                };
                store
                    .dispatch(Action::SearchFailed {
                        generation,
                        message: message.to_string(),
                    })
                    .await;
                None
            }
        }
    }

    async fn run(&self, store: &Store, request: SearchRequest) -> SearchState {
        if let SearchRequest::Address(query) = &request {
            if query.trim().is_empty() {
                return store.snapshot().await;
            }
        }

        let generation = store.begin(request.source()).await;

        let Some(origin) = self.resolve_origin(store, generation, &request).await else {
            return store.snapshot().await;
        };
        store
            .dispatch(Action::OriginResolved { generation, origin })
            .await;

        let raw = match self.finder.find_nearby(origin.coordinate).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "hospital lookup failed");
                store
                    .dispatch(Action::SearchFailed {
                        generation,
                        message: ERROR_FETCHING_HOSPITALS.to_string(),
                    })
                    .await;
                return store.snapshot().await;
            }
        };

        let results = enrich(&origin, raw, &self.addresses).await;
        info!(
            generation,
            count = results.len(),
            lat = origin.coordinate.lat,
            lng = origin.coordinate.lng,
            "search complete"
        );
        store
            .dispatch(Action::ResultsLoaded { generation, results })
            .await;
        store.snapshot().await
    }
}

impl<P, L, F, A> Search for Locator<P, L, F, A>
where
    P: PositionProvider + 'static,
    L: LocationResolver + 'static,
    F: HospitalFinder + 'static,
    A: AddressResolver + 'static,
{
    async fn search(&self, store: &Store, request: SearchRequest) -> SearchState {
        self.run(store, request).await
    }
}
