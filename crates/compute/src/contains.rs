use foundation::geo::LonLat;

// Collinearity tolerance in degrees; roughly a tenth of a millimeter at
// the equator, far below the precision of any feedback coordinate.
const EDGE_EPS_DEG: f64 = 1e-9;

/// Boundary-inclusive point-in-polygon test.
///
/// `rings` is one polygon: outer ring first, holes after. A point on any
/// ring's boundary (outer or hole) counts as inside; otherwise the point
/// must lie in the outer ring's interior and in no hole's interior.
pub fn point_in_polygon(p: LonLat, rings: &[Vec<LonLat>]) -> bool {
    let Some(outer) = rings.first() else {
        return false;
    };

    for ring in rings {
        if point_on_ring(p, ring) {
            return true;
        }
    }

    if !point_in_ring_interior(p, outer) {
        return false;
    }
    for hole in &rings[1..] {
        if point_in_ring_interior(p, hole) {
            return false;
        }
    }
    true
}

/// Boundary-inclusive test across a multipolygon.
pub fn point_in_multipolygon(p: LonLat, polygons: &[Vec<Vec<LonLat>>]) -> bool {
    polygons.iter().any(|rings| point_in_polygon(p, rings))
}

fn point_on_ring(p: LonLat, ring: &[LonLat]) -> bool {
    if ring.len() < 2 {
        return false;
    }
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        if point_on_segment(p, ring[j], ring[i]) {
            return true;
        }
        j = i;
    }
    false
}

fn point_on_segment(p: LonLat, a: LonLat, b: LonLat) -> bool {
    let cross = (b.lon_deg - a.lon_deg) * (p.lat_deg - a.lat_deg)
        - (b.lat_deg - a.lat_deg) * (p.lon_deg - a.lon_deg);
    if cross.abs() > EDGE_EPS_DEG {
        return false;
    }
    p.lon_deg >= a.lon_deg.min(b.lon_deg) - EDGE_EPS_DEG
        && p.lon_deg <= a.lon_deg.max(b.lon_deg) + EDGE_EPS_DEG
        && p.lat_deg >= a.lat_deg.min(b.lat_deg) - EDGE_EPS_DEG
        && p.lat_deg <= a.lat_deg.max(b.lat_deg) + EDGE_EPS_DEG
}

// Even-odd ray cast; tolerates both open and closed rings since the
// closing duplicate contributes a degenerate horizontal-free edge.
fn point_in_ring_interior(p: LonLat, ring: &[LonLat]) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.lat_deg > p.lat_deg) != (b.lat_deg > p.lat_deg) {
            let x_cross = (b.lon_deg - a.lon_deg) * (p.lat_deg - a.lat_deg)
                / (b.lat_deg - a.lat_deg)
                + a.lon_deg;
            if p.lon_deg < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
