use rand::distributions::WeightedIndex;
use rand::prelude::*;
use serde::Serialize;

use crate::config::Config;

const LABELS: [&str; 6] = ["elephant", "tiger", "wolf", "leopard", "human", "vehicle"];
// Human/vehicle detections are weighted down so alerts stay rare.
const LABEL_WEIGHTS: [f64; 6] = [1.0, 1.0, 1.0, 1.0, 0.5, 0.5];

const MIN_SLEEP_SECS: f64 = 5.0;
const MAX_SLEEP_SECS: f64 = 15.0;

#[derive(Serialize)]
struct DetectionPayload<'a> {
    camera_id: &'a str,
    detection: &'a str,
}

/// Posts randomly generated detections to a running ingest endpoint
/// until interrupted. Cameras are drawn from the configured table.
pub async fn run(config: &Config, url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let weights = WeightedIndex::new(LABEL_WEIGHTS)?;

    tracing::info!(url = %url, cameras = config.cameras.len(), "starting camera trap simulator");

    loop {
        let (camera_id, detection, sleep_secs) = {
            let mut rng = rand::thread_rng();
            let camera = config
                .cameras
                .choose(&mut rng)
                .ok_or("no cameras configured")?;
            let detection = LABELS[weights.sample(&mut rng)];
            let sleep_secs = rng.gen_range(MIN_SLEEP_SECS..MAX_SLEEP_SECS);
            (camera.id.clone(), detection, sleep_secs)
        };

        let payload = DetectionPayload {
            camera_id: &camera_id,
            detection,
        };

        match client.post(url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(camera = %camera_id, detection = %detection, "event sent");
            }
            Ok(response) => {
                tracing::warn!(
                    camera = %camera_id,
                    status = %response.status(),
                    "server rejected event"
                );
            }
            Err(e) => {
                tracing::error!("failed to send event, is the server running? {}", e);
            }
        }

        tracing::debug!(sleep_secs = format!("{sleep_secs:.1}"), "sleeping");
        tokio::time::sleep(std::time::Duration::from_secs_f64(sleep_secs)).await;
    }
}
