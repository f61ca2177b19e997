use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::CameraConfig;

#[derive(Debug, Clone, Serialize)]
pub struct LastDetection {
    #[serde(rename = "type")]
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    #[serde(skip)]
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub last_detection: Option<LastDetection>,
}

/// Static camera table, built once from config. Only `last_detection`
/// changes after startup; cameras are never added or removed.
pub struct CameraRegistry {
    cameras: HashMap<String, Camera>,
}

impl CameraRegistry {
    pub fn new(configs: &[CameraConfig]) -> Self {
        let cameras = configs
            .iter()
            .map(|c| {
                (
                    c.id.clone(),
                    Camera {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        lat: c.lat,
                        lon: c.lon,
                        last_detection: None,
                    },
                )
            })
            .collect();
        Self { cameras }
    }

    pub fn get(&self, camera_id: &str) -> Option<&Camera> {
        self.cameras.get(camera_id)
    }

    pub fn set_last_detection(&mut self, camera_id: &str, label: &str, now: DateTime<Utc>) {
        if let Some(camera) = self.cameras.get_mut(camera_id) {
            camera.last_detection = Some(LastDetection {
                label: label.to_string(),
                timestamp: now,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Camera)> {
        self.cameras.iter()
    }
}
