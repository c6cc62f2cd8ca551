use crate::geo::{LonLat, wrap_lon_deg};

/// Mean Earth radius (meters), used for geodesic offsets on the sphere.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_008.8;

/// Destination point at `distance_m` from `origin` along `bearing_deg`
/// (clockwise from north), on the spherical Earth.
pub fn destination_point(origin: LonLat, bearing_deg: f64, distance_m: f64) -> LonLat {
    let lat1 = origin.lat_deg.to_radians();
    let lon1 = origin.lon_deg.to_radians();
    let bearing = bearing_deg.to_radians();
    let delta = distance_m / EARTH_MEAN_RADIUS_M;

    let sin_lat2 = lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos();
    let lat2 = sin_lat2.asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * sin_lat2);

    LonLat::new(wrap_lon_deg(lon2.to_degrees()), lat2.to_degrees())
}

/// Great-circle distance between two points (meters).
pub fn haversine_distance_m(a: LonLat, b: LonLat) -> f64 {
    let lat_a = a.lat_deg.to_radians();
    let lat_b = b.lat_deg.to_radians();
    let d_lat = (b.lat_deg - a.lat_deg).to_radians();
    let d_lon = (b.lon_deg - a.lon_deg).to_radians();

    let h = (d_lat * 0.5).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * EARTH_MEAN_RADIUS_M * h.sqrt().asin()
}
