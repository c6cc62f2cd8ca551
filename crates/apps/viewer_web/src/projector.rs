use foundation::geo::LonLat;
use foundation::mercator::{WORLD_WIDTH_M, project, unproject};

/// Maps between geographic coordinates and canvas pixels for one view.
///
/// Zoom follows the slippy-map convention: at zoom z the world is
/// `256 * 2^z` pixels wide in Mercator meters.
#[derive(Debug, Copy, Clone)]
pub struct ViewProjector {
    center_x_m: f64,
    center_y_m: f64,
    scale_px_per_m: f64,
    width_px: f64,
    height_px: f64,
}

impl ViewProjector {
    pub fn new(center: LonLat, zoom: f64, width_px: f64, height_px: f64) -> Self {
        let (center_x_m, center_y_m) = project(center);
        let world_px = 256.0 * zoom.exp2();
        Self {
            center_x_m,
            center_y_m,
            scale_px_per_m: world_px / WORLD_WIDTH_M,
            width_px: width_px.max(1.0),
            height_px: height_px.max(1.0),
        }
    }

    pub fn meters_per_pixel(&self) -> f64 {
        1.0 / self.scale_px_per_m
    }

    pub fn to_screen(&self, p: LonLat) -> (f64, f64) {
        let (x_m, y_m) = project(p);
        let x = self.width_px * 0.5 + (x_m - self.center_x_m) * self.scale_px_per_m;
        let y = self.height_px * 0.5 - (y_m - self.center_y_m) * self.scale_px_per_m;
        (x, y)
    }

    pub fn to_lon_lat(&self, x_px: f64, y_px: f64) -> LonLat {
        let x_m = self.center_x_m + (x_px - self.width_px * 0.5) / self.scale_px_per_m;
        let y_m = self.center_y_m + (self.height_px * 0.5 - y_px) / self.scale_px_per_m;
        unproject(x_m, y_m)
    }
}

#[cfg(test)]
mod tests {
    use super::ViewProjector;
    use foundation::geo::LonLat;

    #[test]
    fn view_center_maps_to_canvas_center() {
        let center = LonLat::new(16.37, 48.2);
        let proj = ViewProjector::new(center, 13.0, 800.0, 600.0);
        let (x, y) = proj.to_screen(center);
        assert!((x - 400.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn screen_round_trips_to_geographic() {
        let proj = ViewProjector::new(LonLat::new(16.37, 48.2), 13.0, 800.0, 600.0);
        let p = proj.to_lon_lat(132.0, 471.0);
        let (x, y) = proj.to_screen(p);
        assert!((x - 132.0).abs() < 1e-6);
        assert!((y - 471.0).abs() < 1e-6);
    }

    #[test]
    fn zoom_13_resolution_matches_the_tile_pyramid() {
        let proj = ViewProjector::new(LonLat::new(0.0, 0.0), 13.0, 800.0, 600.0);
        // 156543.0339... / 2^13 meters per pixel at the equator.
        assert!((proj.meters_per_pixel() - 19.109_257_071_294_063).abs() < 1e-9);
    }
}
