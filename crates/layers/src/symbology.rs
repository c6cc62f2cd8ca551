/// 8-bit color with fractional alpha, rendered as a CSS rgba() string.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_css(self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Choropleth band for a district's feedback count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChoroplethBand {
    Pale,
    Medium,
    Dark,
}

impl ChoroplethBand {
    /// Classification is a pure function of the count: at most one
    /// feedback is pale, two to four medium, five or more dark.
    pub fn for_count(count: u32) -> Self {
        if count <= 1 {
            ChoroplethBand::Pale
        } else if count < 5 {
            ChoroplethBand::Medium
        } else {
            ChoroplethBand::Dark
        }
    }

    pub fn fill(self) -> Rgba {
        match self {
            ChoroplethBand::Pale => Rgba::new(247, 252, 185, 0.7),
            ChoroplethBand::Medium => Rgba::new(173, 221, 142, 0.7),
            ChoroplethBand::Dark => Rgba::new(49, 163, 84, 0.7),
        }
    }
}

/// Fixed circle-marker style.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius_px: f64,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width_px: f64,
}

pub const DISTRICT_STROKE: Rgba = Rgba::new(4, 4, 4, 1.0);
pub const DISTRICT_STROKE_WIDTH_PX: f64 = 1.0;

pub const FEEDBACK_MARKER: MarkerStyle = MarkerStyle {
    radius_px: 7.0,
    fill: Rgba::new(232, 12, 12, 1.0),
    stroke: Rgba::new(127, 127, 127, 1.0),
    stroke_width_px: 1.0,
};

pub const LOCATION_MARKER: MarkerStyle = MarkerStyle {
    radius_px: 5.0,
    fill: Rgba::new(255, 255, 255, 0.4),
    stroke: Rgba::new(51, 153, 204, 1.0),
    stroke_width_px: 1.25,
};

/// Fill for the positional-accuracy disc around the location marker.
pub const ACCURACY_FILL: Rgba = Rgba::new(51, 153, 204, 0.2);

#[cfg(test)]
mod tests {
    use super::{ChoroplethBand, Rgba};

    #[test]
    fn band_is_a_pure_function_of_count() {
        assert_eq!(ChoroplethBand::for_count(0), ChoroplethBand::Pale);
        assert_eq!(ChoroplethBand::for_count(1), ChoroplethBand::Pale);
        assert_eq!(ChoroplethBand::for_count(2), ChoroplethBand::Medium);
        assert_eq!(ChoroplethBand::for_count(4), ChoroplethBand::Medium);
        assert_eq!(ChoroplethBand::for_count(5), ChoroplethBand::Dark);
        assert_eq!(ChoroplethBand::for_count(100), ChoroplethBand::Dark);
    }

    #[test]
    fn css_colors_format_with_alpha() {
        assert_eq!(
            Rgba::new(247, 252, 185, 0.7).to_css(),
            "rgba(247, 252, 185, 0.7)"
        );
        assert_eq!(Rgba::new(4, 4, 4, 1.0).to_css(), "rgba(4, 4, 4, 1)");
    }
}
