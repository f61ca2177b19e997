const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points via the haversine formula.
/// Argument order matches the lon/lat convention used in camera configs.
pub fn distance_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let lon1 = lon1.to_radians();
    let lat1 = lat1.to_radians();
    let lon2 = lon2.to_radians();
    let lat2 = lat2.to_radians();

    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    c * EARTH_RADIUS_KM
}
