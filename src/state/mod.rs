mod log;
mod registry;
mod zones;

pub use log::{Alert, BoundedLog, Event, ALERT_LOG_CAP, EVENT_LOG_CAP};
pub use registry::{Camera, CameraRegistry, LastDetection};
pub use zones::{ActiveZone, ZoneStore};
