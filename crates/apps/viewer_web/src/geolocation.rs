use foundation::geo::LonLat;
use layers::markers::LocationFix;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Geolocation, Position, PositionError, PositionOptions};

/// Cancellable subscription to the browser's continuous position stream.
///
/// Each fix replaces the previous one; only the latest position matters,
/// so there is no buffering. Dropping the handle clears the watch.
pub struct LocationWatch {
    watch_id: i32,
    _on_fix: Closure<dyn FnMut(Position)>,
    _on_error: Closure<dyn FnMut(PositionError)>,
}

impl LocationWatch {
    /// Starts a high-accuracy watch. `on_fix` runs for every position
    /// update; errors surface as a blocking alert, with no retry.
    pub fn start(mut on_fix: impl FnMut(LocationFix) + 'static) -> Result<Self, JsValue> {
        let on_fix = Closure::<dyn FnMut(Position)>::new(move |pos: Position| {
            on_fix(fix_from_position(&pos));
        });
        let on_error = Closure::<dyn FnMut(PositionError)>::new(|err: PositionError| {
            alert_geolocation_error(&err);
        });

        let options = PositionOptions::new();
        options.set_enable_high_accuracy(true);

        let watch_id = geolocation()?.watch_position_with_error_callback_and_options(
            on_fix.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )?;

        Ok(Self {
            watch_id,
            _on_fix: on_fix,
            _on_error: on_error,
        })
    }
}

impl Drop for LocationWatch {
    fn drop(&mut self) {
        if let Ok(geo) = geolocation() {
            geo.clear_watch(self.watch_id);
        }
    }
}

/// Single-shot position query, used by the submit-at-my-location flow.
///
/// The callback closure leaks; this fires on explicit user action only,
/// so the one-off allocation is bounded by clicks.
pub fn current_position(mut on_fix: impl FnMut(LocationFix) + 'static) -> Result<(), JsValue> {
    let success = Closure::<dyn FnMut(Position)>::new(move |pos: Position| {
        on_fix(fix_from_position(&pos));
    });
    let failure = Closure::<dyn FnMut(PositionError)>::new(|err: PositionError| {
        alert_geolocation_error(&err);
    });

    geolocation()?.get_current_position_with_error_callback(
        success.as_ref().unchecked_ref(),
        Some(failure.as_ref().unchecked_ref()),
    )?;

    success.forget();
    failure.forget();
    Ok(())
}

fn fix_from_position(pos: &Position) -> LocationFix {
    let coords = pos.coords();
    LocationFix {
        position: LonLat::new(coords.longitude(), coords.latitude()),
        accuracy_m: coords.accuracy(),
    }
}

fn alert_geolocation_error(err: &PositionError) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(&format!("ERROR: {}", err.message()));
    }
}

fn geolocation() -> Result<Geolocation, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .navigator()
        .geolocation()
}
