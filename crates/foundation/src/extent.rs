use crate::geo::LonLat;

/// Geographic bounding box in degrees, boundary inclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoExtent {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl GeoExtent {
    pub fn of_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a LonLat>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut extent = Self {
            min_lon: first.lon_deg,
            min_lat: first.lat_deg,
            max_lon: first.lon_deg,
            max_lat: first.lat_deg,
        };
        for p in iter {
            extent.expand(*p);
        }
        Some(extent)
    }

    pub fn expand(&mut self, p: LonLat) {
        self.min_lon = self.min_lon.min(p.lon_deg);
        self.min_lat = self.min_lat.min(p.lat_deg);
        self.max_lon = self.max_lon.max(p.lon_deg);
        self.max_lat = self.max_lat.max(p.lat_deg);
    }

    pub fn contains(&self, p: LonLat) -> bool {
        p.lon_deg >= self.min_lon
            && p.lon_deg <= self.max_lon
            && p.lat_deg >= self.min_lat
            && p.lat_deg <= self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::GeoExtent;
    use crate::geo::LonLat;

    #[test]
    fn extent_of_points_is_inclusive() {
        let pts = [LonLat::new(0.0, 0.0), LonLat::new(2.0, 1.0)];
        let e = GeoExtent::of_points(&pts).unwrap();
        assert!(e.contains(LonLat::new(1.0, 0.5)));
        assert!(e.contains(LonLat::new(2.0, 1.0)));
        assert!(!e.contains(LonLat::new(2.1, 0.5)));
    }

    #[test]
    fn empty_input_has_no_extent() {
        assert!(GeoExtent::of_points(&[]).is_none());
    }
}
