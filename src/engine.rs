use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::{Config, ZoneConfig};
use crate::state::{
    ActiveZone, Alert, BoundedLog, Camera, CameraRegistry, Event, ZoneStore, ALERT_LOG_CAP,
    EVENT_LOG_CAP,
};

/// Labels that open an active zone around the reporting camera.
const PREDATOR_LABELS: [&str; 4] = ["elephant", "tiger", "wolf", "leopard"];
/// Labels that are suspicious inside an active zone.
const INTRUDER_LABELS: [&str; 2] = ["human", "vehicle"];

enum Classification {
    Predator,
    Intruder,
    Unknown,
}

fn classify(label: &str) -> Classification {
    if PREDATOR_LABELS.contains(&label) {
        Classification::Predator
    } else if INTRUDER_LABELS.contains(&label) {
        Classification::Intruder
    } else {
        Classification::Unknown
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

struct WatchState {
    cameras: CameraRegistry,
    zones: ZoneStore,
    events: BoundedLog<Event>,
    alerts: BoundedLog<Alert>,
}

/// All mutable watch state behind one lock. A detection holds the write
/// lock for its whole expire/classify/log sequence, so snapshot readers
/// never observe a half-applied detection or a torn log.
pub struct Engine {
    state: Arc<RwLock<WatchState>>,
    zone_config: ZoneConfig,
}

impl Clone for Engine {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            zone_config: self.zone_config.clone(),
        }
    }
}

/// Point-in-time copy of the full watch state for external rendering.
#[derive(Serialize)]
pub struct StateSnapshot {
    pub cameras: HashMap<String, Camera>,
    pub active_zones: HashMap<String, ActiveZone>,
    pub alerts: Vec<Alert>,
    pub events: Vec<Event>,
}

impl Engine {
    pub fn new(config: &Config) -> Self {
        Self {
            state: Arc::new(RwLock::new(WatchState {
                cameras: CameraRegistry::new(&config.cameras),
                zones: ZoneStore::new(),
                events: BoundedLog::new(EVENT_LOG_CAP),
                alerts: BoundedLog::new(ALERT_LOG_CAP),
            })),
            zone_config: config.zones.clone(),
        }
    }

    fn zone_max_age(&self) -> Duration {
        Duration::hours(self.zone_config.duration_hours as i64)
    }

    /// Processes one incoming detection. Unknown cameras and empty labels
    /// are dropped without touching any state; the ingest layer reports
    /// success either way (best-effort ingestion).
    pub fn process(&self, camera_id: &str, label: &str) {
        self.process_at(camera_id, label, Utc::now());
    }

    pub fn process_at(&self, camera_id: &str, label: &str, now: DateTime<Utc>) {
        if label.is_empty() {
            tracing::debug!(camera = %camera_id, "dropping detection without label");
            return;
        }

        let mut state = self.state.write().unwrap();

        let (cam_name, cam_lat, cam_lon) = match state.cameras.get(camera_id) {
            Some(cam) => (cam.name.clone(), cam.lat, cam.lon),
            None => {
                tracing::debug!(camera = %camera_id, "dropping detection from unknown camera");
                return;
            }
        };
        let location = format!("{cam_name} ({camera_id})");

        state.cameras.set_last_detection(camera_id, label, now);

        // Lazy expiry sweep. Stale zones must never influence the
        // classification below.
        let expired = state.zones.expire_older_than(now, self.zone_max_age());
        for expired_id in expired {
            // Zones are only ever created for registered cameras.
            let name = match state.cameras.get(&expired_id) {
                Some(cam) => cam.name.clone(),
                None => panic!("active zone references unknown camera {expired_id}"),
            };
            tracing::info!(camera = %expired_id, "active zone expired");
            state
                .events
                .push(Event::new(format!("Active Zone at {name} has expired."), false, now));
        }

        match classify(label) {
            Classification::Predator => {
                state.zones.upsert(camera_id, cam_lat, cam_lon, now);
                tracing::info!(camera = %camera_id, label = %label, "predator sighted, opening active zone");
                state.events.push(Event::new(
                    format!(
                        "🐾 {} spotted at {location}. Area is now an Active Zone.",
                        capitalize(label)
                    ),
                    false,
                    now,
                ));
            }
            Classification::Intruder => {
                let in_zone =
                    state
                        .zones
                        .contains_point(cam_lon, cam_lat, self.zone_config.radius_km);
                if in_zone {
                    let message = format!(
                        "🚨 THREAT: Human/Vehicle detected at {location} inside an active animal zone. Potential poacher."
                    );
                    tracing::warn!(camera = %camera_id, label = %label, "intruder inside active zone");
                    state.alerts.push(Alert::new(message.clone(), camera_id, now));
                    state.events.push(Event::new(message, true, now));
                } else {
                    tracing::info!(camera = %camera_id, label = %label, "intruder outside active zones, monitoring");
                    state.events.push(Event::new(
                        format!(
                            "🚶‍♂️ Human/Vehicle detected at {location} (not in active zone). Monitoring."
                        ),
                        true,
                        now,
                    ));
                }
            }
            Classification::Unknown => {
                tracing::debug!(camera = %camera_id, label = %label, "unrecognized label");
            }
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Read-only view. Logically expired zones are filtered out rather
    /// than removed; their expiry events are still emitted lazily by the
    /// next detection.
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> StateSnapshot {
        let state = self.state.read().unwrap();
        let max_age = self.zone_max_age();

        StateSnapshot {
            cameras: state
                .cameras
                .iter()
                .map(|(id, cam)| (id.clone(), cam.clone()))
                .collect(),
            active_zones: state
                .zones
                .iter()
                .filter(|(_, zone)| zone.timestamp >= now - max_age)
                .map(|(id, zone)| (id.clone(), zone.clone()))
                .collect(),
            alerts: state.alerts.to_vec(),
            events: state.events.to_vec(),
        }
    }
}
