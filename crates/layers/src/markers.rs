use foundation::geo::LonLat;
use foundation::geodesy::destination_point;

/// Closed ring approximating the geodesic circle of `radius_m` around
/// `center`, used as the positional-accuracy disc of the location marker.
///
/// Returns `segments + 1` points with the first repeated at the end.
pub fn accuracy_ring(center: LonLat, radius_m: f64, segments: usize) -> Vec<LonLat> {
    let segments = segments.max(3);
    let mut ring = Vec::with_capacity(segments + 1);
    for i in 0..segments {
        let bearing_deg = 360.0 * (i as f64) / (segments as f64);
        ring.push(destination_point(center, bearing_deg, radius_m.max(0.0)));
    }
    ring.push(ring[0]);
    ring
}

/// A device-location fix as delivered by the position stream.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LocationFix {
    pub position: LonLat,
    pub accuracy_m: f64,
}
