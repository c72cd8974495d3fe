//! Deterministic provider fakes for tests

use crate::coord::{Coordinates, RawFacility};
use crate::error::{Error, PositionError, Result};
use crate::geo::{AddressResolver, GeoLocation, HospitalFinder, LocationResolver, PositionProvider};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted reply of a fake lookup
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Found(T),
    Empty,
    Fail,
}

/// Reverse geocoder answering from a table keyed by coordinates
#[derive(Debug, Default)]
pub struct FakeAddresses {
    replies: Vec<(Coordinates, Reply<String>)>,
    delays: Vec<(Coordinates, Duration)>,
    calls: AtomicUsize,
}

impl FakeAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, at: Coordinates, reply: Reply<String>) -> Self {
        self.replies.push((at, reply));
        self
    }

    /// Hold the answer for one point back by `delay`
    pub fn slow_at(mut self, at: Coordinates, delay: Duration) -> Self {
        self.delays.push((at, delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AddressResolver for FakeAddresses {
    async fn reverse_geocode(&self, at: Coordinates) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((_, delay)) = self.delays.iter().find(|(point, _)| *point == at) {
            tokio::time::sleep(*delay).await;
        }
        let reply = self
            .replies
            .iter()
            .find(|(point, _)| *point == at)
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Empty);

        match reply {
            Reply::Found(address) => Ok(Some(address)),
            Reply::Empty => Ok(None),
            Reply::Fail => Err(Error::Geo("reverse lookup failed".to_string())),
        }
    }
}

/// Forward geocoder answering from a table keyed by query
#[derive(Debug, Default)]
pub struct FakeGeocoder {
    replies: Vec<(String, Reply<GeoLocation>)>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, reply: Reply<Coordinates>) -> Self {
        let reply = match reply {
            Reply::Found(at) => Reply::Found(GeoLocation {
                lat: at.lat,
                lng: at.lng,
                display_name: query.to_string(),
            }),
            Reply::Empty => Reply::Empty,
            Reply::Fail => Reply::Fail,
        };
        self.replies.push((query.to_string(), reply));
        self
    }
}

impl LocationResolver for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let reply = self
            .replies
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Empty);

        match reply {
            Reply::Found(location) => Ok(Some(location)),
            Reply::Empty => Ok(None),
            Reply::Fail => Err(Error::Geo("geocoder unreachable".to_string())),
        }
    }
}

/// Places lookup returning a fixed list, or failing when given none
#[derive(Debug, Default)]
pub struct FakeFinder {
    facilities: Option<Vec<RawFacility>>,
    slow_origin: Option<(Coordinates, Duration)>,
    calls: AtomicUsize,
}

impl FakeFinder {
    pub fn returning(facilities: Vec<RawFacility>) -> Self {
        Self {
            facilities: Some(facilities),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Delay answers for one origin, to make a search finish late
    pub fn slow_for(mut self, origin: Coordinates, delay: Duration) -> Self {
        self.slow_origin = Some((origin, delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl HospitalFinder for FakeFinder {
    async fn find_nearby(&self, origin: Coordinates) -> Result<Vec<RawFacility>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((slow, delay)) = self.slow_origin {
            if slow == origin {
                tokio::time::sleep(delay).await;
            }
        }
        self.facilities
            .clone()
            .ok_or_else(|| Error::Geo("places lookup failed".to_string()))
    }
}

/// Position provider with a scripted outcome
#[derive(Debug, Clone)]
pub struct FakePosition(pub std::result::Result<Coordinates, PositionError>);

impl PositionProvider for FakePosition {
    async fn current_position(&self) -> std::result::Result<Coordinates, PositionError> {
        self.0.clone()
    }
}
