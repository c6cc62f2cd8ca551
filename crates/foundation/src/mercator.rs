use crate::geo::{LonLat, clamp, wrap_lon_deg};

/// Spherical Web Mercator (EPSG:3857) radius, meters.
pub const MERCATOR_RADIUS_M: f64 = 6_378_137.0;
/// Latitude beyond which the Mercator projection diverges.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;
/// Full world width in projected meters.
pub const WORLD_WIDTH_M: f64 = 2.0 * std::f64::consts::PI * MERCATOR_RADIUS_M;

pub fn mercator_x_m(lon_deg: f64) -> f64 {
    MERCATOR_RADIUS_M * lon_deg.to_radians()
}

pub fn mercator_y_m(lat_deg: f64) -> f64 {
    let lat = clamp(lat_deg, -MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG).to_radians();
    MERCATOR_RADIUS_M * (std::f64::consts::FRAC_PI_4 + lat * 0.5).tan().ln()
}

pub fn inverse_mercator_lon_deg(x_m: f64) -> f64 {
    (x_m / MERCATOR_RADIUS_M).to_degrees()
}

pub fn inverse_mercator_lat_deg(y_m: f64) -> f64 {
    (2.0 * (y_m / MERCATOR_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees()
}

/// Projects a geographic coordinate to (x, y) in Mercator meters.
pub fn project(p: LonLat) -> (f64, f64) {
    (mercator_x_m(p.lon_deg), mercator_y_m(p.lat_deg))
}

/// Unprojects Mercator meters back to a geographic coordinate.
///
/// Longitude is wrapped into [-180, 180) and latitude clamped to the
/// projection's valid range.
pub fn unproject(x_m: f64, y_m: f64) -> LonLat {
    LonLat::new(
        wrap_lon_deg(inverse_mercator_lon_deg(x_m)),
        clamp(
            inverse_mercator_lat_deg(y_m),
            -MERCATOR_MAX_LAT_DEG,
            MERCATOR_MAX_LAT_DEG,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::{mercator_y_m, project, unproject};
    use crate::geo::LonLat;

    #[test]
    fn equator_prime_meridian_is_origin() {
        let (x, y) = project(LonLat::new(0.0, 0.0));
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn round_trips_at_view_center() {
        let p = LonLat::new(16.37, 48.2);
        let (x, y) = project(p);
        let back = unproject(x, y);
        assert!((back.lon_deg - p.lon_deg).abs() < 1e-9);
        assert!((back.lat_deg - p.lat_deg).abs() < 1e-9);
    }

    #[test]
    fn clamps_polar_latitudes() {
        assert!(mercator_y_m(90.0).is_finite());
        assert_eq!(mercator_y_m(90.0), mercator_y_m(86.0));
    }
}
