use features::records::{DistrictRecord, FeedbackRecord};
use foundation::geo::LonLat;
use layers::markers::{LocationFix, accuracy_ring};
use layers::symbology::{
    ACCURACY_FILL, ChoroplethBand, DISTRICT_STROKE, DISTRICT_STROKE_WIDTH_PX, FEEDBACK_MARKER,
    LOCATION_MARKER, MarkerStyle,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule, HtmlCanvasElement};

use crate::constants::ACCURACY_RING_SEGMENTS;
use crate::projector::ViewProjector;

const BASEMAP_FILL: &str = "rgba(222, 222, 214, 1)";

/// Redraws the whole view: basemap background, choropleth districts,
/// feedback markers, then the device-location marker on top.
pub fn draw_map(
    canvas_id: &str,
    proj: &ViewProjector,
    districts: &[DistrictRecord],
    feedbacks: &[FeedbackRecord],
    location: Option<LocationFix>,
) -> Result<(), JsValue> {
    let canvas = canvas_by_id(canvas_id)?;
    let ctx = context_2d(&canvas)?;
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.set_fill_style_str(BASEMAP_FILL);
    ctx.fill_rect(0.0, 0.0, width, height);

    for district in districts {
        draw_district(&ctx, proj, district);
    }
    for feedback in feedbacks {
        if let Some(point) = feedback.point {
            draw_circle_marker(&ctx, proj, point, FEEDBACK_MARKER);
        }
    }
    if let Some(fix) = location {
        draw_location(&ctx, proj, fix);
    }

    Ok(())
}

fn draw_district(ctx: &CanvasRenderingContext2d, proj: &ViewProjector, district: &DistrictRecord) {
    let band = ChoroplethBand::for_count(district.feedback_count);
    ctx.begin_path();
    for rings in &district.polygons {
        for ring in rings {
            trace_ring(ctx, proj, ring);
        }
    }
    ctx.set_fill_style_str(&band.fill().to_css());
    // Even-odd keeps holes open regardless of ring winding.
    ctx.fill_with_canvas_winding_rule(CanvasWindingRule::Evenodd);
    ctx.set_stroke_style_str(&DISTRICT_STROKE.to_css());
    ctx.set_line_width(DISTRICT_STROKE_WIDTH_PX);
    ctx.stroke();
}

fn draw_location(ctx: &CanvasRenderingContext2d, proj: &ViewProjector, fix: LocationFix) {
    let ring = accuracy_ring(fix.position, fix.accuracy_m, ACCURACY_RING_SEGMENTS);
    ctx.begin_path();
    trace_ring(ctx, proj, &ring);
    ctx.set_fill_style_str(&ACCURACY_FILL.to_css());
    ctx.fill();
    ctx.set_stroke_style_str(&LOCATION_MARKER.stroke.to_css());
    ctx.set_line_width(LOCATION_MARKER.stroke_width_px);
    ctx.stroke();

    draw_circle_marker(ctx, proj, fix.position, LOCATION_MARKER);
}

fn draw_circle_marker(
    ctx: &CanvasRenderingContext2d,
    proj: &ViewProjector,
    point: LonLat,
    style: MarkerStyle,
) {
    let (x, y) = proj.to_screen(point);
    ctx.begin_path();
    let _ = ctx.arc(x, y, style.radius_px, 0.0, std::f64::consts::TAU);
    ctx.set_fill_style_str(&style.fill.to_css());
    ctx.fill();
    ctx.set_stroke_style_str(&style.stroke.to_css());
    ctx.set_line_width(style.stroke_width_px);
    ctx.stroke();
}

fn trace_ring(ctx: &CanvasRenderingContext2d, proj: &ViewProjector, ring: &[LonLat]) {
    let mut points = ring.iter();
    let Some(first) = points.next() else {
        return;
    };
    let (x, y) = proj.to_screen(*first);
    ctx.move_to(x, y);
    for p in points {
        let (x, y) = proj.to_screen(*p);
        ctx.line_to(x, y);
    }
    ctx.close_path();
}

fn canvas_by_id(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(canvas_id))
        .ok_or_else(|| JsValue::from_str("map canvas not found"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("element is not a canvas"))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("unexpected context type"))
}
