use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::geo;

#[derive(Debug, Clone, Serialize)]
pub struct ActiveZone {
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lon: f64,
}

/// Active zones keyed by originating camera, at most one per camera.
/// Callers must run `expire_older_than` before `contains_point` so the
/// point test never consults a stale zone.
#[derive(Default)]
pub struct ZoneStore {
    zones: HashMap<String, ActiveZone>,
}

impl ZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every zone older than `max_age` and returns the camera ids
    /// of the removed zones.
    pub fn expire_older_than(&mut self, now: DateTime<Utc>, max_age: Duration) -> Vec<String> {
        let expired: Vec<String> = self
            .zones
            .iter()
            .filter(|(_, zone)| zone.timestamp < now - max_age)
            .map(|(camera_id, _)| camera_id.clone())
            .collect();
        for camera_id in &expired {
            self.zones.remove(camera_id);
        }
        expired
    }

    /// Inserts or replaces the zone for `camera_id` with a fresh timestamp.
    pub fn upsert(&mut self, camera_id: &str, lat: f64, lon: f64, now: DateTime<Utc>) {
        self.zones.insert(
            camera_id.to_string(),
            ActiveZone {
                timestamp: now,
                lat,
                lon,
            },
        );
    }

    pub fn contains_point(&self, lon: f64, lat: f64, radius_km: f64) -> bool {
        self.zones
            .values()
            .any(|zone| geo::distance_km(lon, lat, zone.lon, zone.lat) <= radius_km)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActiveZone)> {
        self.zones.iter()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.zones.len()
    }

    #[cfg(test)]
    fn get(&self, camera_id: &str) -> Option<&ActiveZone> {
        self.zones.get(camera_id)
    }
}
