//! DOM cursor trail
//!
//! Each spawned marker becomes a fixed-position `<div>` on `<body>`.
//! Two one-shot timers per marker drive the fade and the removal.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::core::{CursorTrail, Marker, MarkerId, TrailConfig};
use crate::time::now_ms;

pub struct DomTrail {
    trail: CursorTrail,
    document: Document,
    elements: HashMap<MarkerId, HtmlElement>,
}

type SharedTrail = Rc<RefCell<DomTrail>>;

impl DomTrail {
    /// Attach the trail to `mousemove` on `document` for the page lifetime.
    pub fn install(document: &Document, config: TrailConfig) -> Result<(), JsValue> {
        let state: SharedTrail = Rc::new(RefCell::new(DomTrail {
            trail: CursorTrail::new(config),
            document: document.clone(),
            elements: HashMap::new(),
        }));

        let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            Self::on_pointer_move(&state, e.client_x() as f32, e.client_y() as f32);
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
        Ok(())
    }

    fn on_pointer_move(state: &SharedTrail, x: f32, y: f32) {
        let spawned = state.borrow_mut().trail.on_pointer_move(x, y, now_ms());
        if let Some(marker) = spawned {
            if let Err(e) = Self::show(state, marker) {
                warn!(?e, id = marker.id, "Failed to show trail marker");
                Self::remove(state, marker.id);
            }
        }
    }

    fn show(state: &SharedTrail, marker: Marker) -> Result<(), JsValue> {
        let (fade_delay, remove_delay) = {
            let mut s = state.borrow_mut();
            let config = s.trail.config().clone();

            let el = s.document.create_element("div")?.dyn_into::<HtmlElement>()?;
            let style = el.style();
            let size = format!("{}px", config.size_px);
            style.set_property("position", "fixed")?;
            style.set_property("left", &format!("{}px", marker.x))?;
            style.set_property("top", &format!("{}px", marker.y))?;
            style.set_property("width", &size)?;
            style.set_property("height", &size)?;
            style.set_property("background-color", "white")?;
            style.set_property("border-radius", "50%")?;
            style.set_property("pointer-events", "none")?;
            style.set_property("z-index", "0")?;
            style.set_property("opacity", &marker.opacity.to_string())?;
            style.set_property("transition", "all 1s ease-out")?;

            let body = s
                .document
                .body()
                .ok_or_else(|| JsValue::from_str("no body"))?;
            body.append_child(&el)?;
            s.elements.insert(marker.id, el);

            (config.fade_delay_ms, config.remove_delay_ms)
        };

        let id = marker.id;
        let fade_state = state.clone();
        schedule(fade_delay, move || Self::fade(&fade_state, id))?;
        let remove_state = state.clone();
        schedule(remove_delay, move || Self::remove(&remove_state, id))?;
        Ok(())
    }

    fn fade(state: &SharedTrail, id: MarkerId) {
        let mut s = state.borrow_mut();
        let DomTrail {
            trail, elements, ..
        } = &mut *s;
        let (Some(offset), Some(el)) = (trail.fade(id), elements.get(&id)) else {
            return;
        };

        let style = el.style();
        let transform = format!(
            "scale({}) translate({}px, {}px)",
            offset.scale, offset.dx, offset.dy
        );
        if let Err(e) = style
            .set_property("opacity", "0")
            .and_then(|_| style.set_property("transform", &transform))
        {
            trace!(?e, id, "Trail marker fade style rejected");
        }
    }

    /// Safe to call for markers that are already gone.
    fn remove(state: &SharedTrail, id: MarkerId) {
        let mut s = state.borrow_mut();
        if !s.trail.remove(id) {
            return;
        }
        if let Some(el) = s.elements.remove(&id) {
            el.remove();
        }
    }
}

/// One-shot `setTimeout`; the pending callback is dropped with the page.
fn schedule(delay_ms: f64, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let cb = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        delay_ms as i32,
    )?;
    Ok(())
}
