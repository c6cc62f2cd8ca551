use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use compute::aggregate::aggregate;
use features::geojson::{Feature, parse_feature_collection};
use features::records::{districts_from_features, feedbacks_from_features};
use features::store::MapData;
use foundation::geo::{LonLat, clamp};
use layers::markers::LocationFix;
use layers::query::{attribute_table_html, feedback_hits};
use layers::submit::submission_url;
use layers::symbology::FEEDBACK_MARKER;

pub mod constants;
mod geolocation;
mod projector;
mod render;

use constants::{
    CANVAS_ID, DISTRICTS_URL, FEEDBACK_URL, INITIAL_CENTER, INITIAL_ZOOM, POPUP_CONTAINER_ID,
    POPUP_CONTENT_ID, SUBMIT_BASE_URL,
};
use geolocation::{LocationWatch, current_position};
use projector::ViewProjector;
use render::draw_map;

pub struct ViewerState {
    pub center: LonLat,
    pub zoom: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub data: MapData,
    pub location: Option<LocationFix>,
    watch: Option<LocationWatch>,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new(ViewerState {
        center: INITIAL_CENTER,
        zoom: INITIAL_ZOOM,
        canvas_width: 1280.0,
        canvas_height: 720.0,
        data: MapData::new(),
        location: None,
        watch: None,
    });
}

fn view_projector(state: &ViewerState) -> ViewProjector {
    ViewProjector::new(
        state.center,
        state.zoom,
        state.canvas_width,
        state.canvas_height,
    )
}

fn render_map() -> Result<(), JsValue> {
    STATE.with(|state| {
        let s = state.borrow();
        draw_map(
            CANVAS_ID,
            &view_projector(&s),
            s.data.districts.records(),
            s.data.feedbacks.records(),
            s.location,
        )
    })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Kicks off both asynchronous layer loads.
///
/// The aggregation re-runs after each completion: with one collection
/// still empty it leaves all counts at zero, and the run after the second
/// completion recomputes the final counts from scratch.
#[wasm_bindgen]
pub fn load_layers() {
    spawn_local(async move {
        match fetch_features(DISTRICTS_URL).await {
            Ok(features) => STATE.with(|state| {
                state
                    .borrow_mut()
                    .data
                    .districts
                    .complete_load(districts_from_features(&features));
            }),
            Err(err) => {
                log(&format!("Failed to load districts: {err:?}"));
                STATE.with(|state| state.borrow_mut().data.districts.fail_load());
            }
        }
        on_load_completed();
    });

    spawn_local(async move {
        match fetch_features(FEEDBACK_URL).await {
            Ok(features) => STATE.with(|state| {
                state
                    .borrow_mut()
                    .data
                    .feedbacks
                    .complete_load(feedbacks_from_features(&features));
            }),
            Err(err) => {
                log(&format!("Failed to load feedback: {err:?}"));
                STATE.with(|state| state.borrow_mut().data.feedbacks.fail_load());
            }
        }
        on_load_completed();
    });
}

fn on_load_completed() {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        aggregate(&mut s.data);
    });
    let _ = render_map();
}

#[wasm_bindgen]
pub fn set_canvas_sizes(width: f64, height: f64) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.canvas_width = width.max(1.0);
        s.canvas_height = height.max(1.0);
    });
    render_map()
}

#[wasm_bindgen]
pub fn set_view(lon_deg: f64, lat_deg: f64, zoom: f64) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.center = LonLat::new(lon_deg, lat_deg);
        s.zoom = clamp(zoom, 2.0, 19.0);
    });
    render_map()
}

/// Pan the view.
///
/// Intended usage: call with pointer delta in pixels.
#[wasm_bindgen]
pub fn pan_view(delta_x_px: f64, delta_y_px: f64) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let proj = view_projector(&s);
        s.center = proj.to_lon_lat(
            s.canvas_width * 0.5 - delta_x_px,
            s.canvas_height * 0.5 - delta_y_px,
        );
    });
    render_map()
}

/// Zoom in/out.
///
/// Intended usage: call with wheel deltaY.
#[wasm_bindgen]
pub fn zoom_view(wheel_delta_y: f64) -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.zoom = clamp(s.zoom - wheel_delta_y * 0.0015, 2.0, 19.0);
    });
    render_map()
}

enum ClickOutcome {
    Popup(String),
    Redirect(String),
}

/// Handles a click at canvas pixel coordinates.
///
/// A click on one or more feedback markers shows their attributes in the
/// popup overlay; a click on empty map redirects to the submission form
/// with the clicked coordinate. The returned object reports what
/// happened: `{picked: bool, html?, url?}`.
#[wasm_bindgen]
pub fn cursor_click(x_px: f64, y_px: f64) -> Result<JsValue, JsValue> {
    let outcome = STATE.with(|state| {
        let s = state.borrow();
        let proj = view_projector(&s);
        let click = proj.to_lon_lat(x_px, y_px);
        let tolerance_m = FEEDBACK_MARKER.radius_px * proj.meters_per_pixel();
        let hits = feedback_hits(s.data.feedbacks.records(), click, tolerance_m);
        if hits.is_empty() {
            ClickOutcome::Redirect(submission_url(SUBMIT_BASE_URL, click))
        } else {
            ClickOutcome::Popup(attribute_table_html(&hits))
        }
    });

    let out = js_sys::Object::new();
    match outcome {
        ClickOutcome::Popup(html) => {
            show_popup(x_px, y_px, &html)?;
            js_sys::Reflect::set(&out, &JsValue::from_str("picked"), &JsValue::TRUE)?;
            js_sys::Reflect::set(&out, &JsValue::from_str("html"), &JsValue::from_str(&html))?;
        }
        ClickOutcome::Redirect(url) => {
            hide_popup();
            log(&format!("Redirecting to submission form: {url}"));
            js_sys::Reflect::set(&out, &JsValue::from_str("picked"), &JsValue::FALSE)?;
            js_sys::Reflect::set(&out, &JsValue::from_str("url"), &JsValue::from_str(&url))?;
            redirect(&url)?;
        }
    }
    Ok(out.into())
}

#[wasm_bindgen]
pub fn hide_popup() {
    if let Some(container) = element_by_id(POPUP_CONTAINER_ID)
        && let Some(el) = container.dyn_ref::<web_sys::HtmlElement>()
    {
        let _ = el.style().set_property("display", "none");
    }
}

/// Starts the continuous location watch; each fix replaces the location
/// marker. Idempotent: a running watch is kept.
#[wasm_bindgen]
pub fn start_location_watch() -> Result<(), JsValue> {
    let already = STATE.with(|state| state.borrow().watch.is_some());
    if already {
        return Ok(());
    }

    let watch = LocationWatch::start(|fix| {
        STATE.with(|state| {
            state.borrow_mut().location = Some(fix);
        });
        let _ = render_map();
    })?;

    STATE.with(|state| {
        state.borrow_mut().watch = Some(watch);
    });
    Ok(())
}

/// Cancels the watch and removes the location marker.
#[wasm_bindgen]
pub fn stop_location_watch() -> Result<(), JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.watch = None;
        s.location = None;
    });
    render_map()
}

/// Single-shot flow behind the "submit feedback at my location" control:
/// queries the device position once and redirects to the submission form.
#[wasm_bindgen]
pub fn submit_at_current_location() -> Result<(), JsValue> {
    current_position(|fix| {
        let url = submission_url(SUBMIT_BASE_URL, fix.position);
        log(&format!("Submitting at device position: {url}"));
        let _ = redirect(&url);
    })
}

async fn fetch_features(url: &str) -> Result<Vec<Feature>, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    parse_feature_collection(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn show_popup(x_px: f64, y_px: f64, html: &str) -> Result<(), JsValue> {
    let Some(content) = element_by_id(POPUP_CONTENT_ID) else {
        // No overlay in the page; the click result still carries the html.
        return Ok(());
    };
    content.set_inner_html(html);

    if let Some(container) = element_by_id(POPUP_CONTAINER_ID)
        && let Some(el) = container.dyn_ref::<web_sys::HtmlElement>()
    {
        let style = el.style();
        style.set_property("left", &format!("{x_px}px"))?;
        style.set_property("top", &format!("{y_px}px"))?;
        style.set_property("display", "block")?;
    }
    Ok(())
}

fn redirect(url: &str) -> Result<(), JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .location()
        .set_href(url)
}

fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
