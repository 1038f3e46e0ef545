//! Browser host for the starfield background
//!
//! Waits for the document, skips pages marked with `about-page-body`,
//! then drives the canvas point field with `requestAnimationFrame` and
//! attaches the cursor trail to `mousemove`.

mod canvas;
mod trail;

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::core::{FieldConfig, PointFieldRenderer, StarfieldConfig};
use crate::page::{effects_enabled, CANVAS_ID, CONFIG_GLOBAL, SKIP_BODY_CLASS};
use canvas::CanvasSurface;
use trail::DomTrail;


#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();

    if let Err(e) = on_document_ready(start) {
        error!(?e, "Failed to schedule starfield start");
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Run `f` now if the DOM is parsed, otherwise on `DOMContentLoaded`.
fn on_document_ready(f: fn()) -> Result<(), JsValue> {
    let document = document()?;
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let on_ready = Closure::once_into_js(move || f());
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}

fn start() {
    if let Err(e) = run() {
        error!(?e, "Starfield setup failed");
    }
}

fn run() -> Result<(), JsValue> {
    let window = window()?;
    let document = document()?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    if !effects_enabled(&body.class_name()) {
        debug!(class = SKIP_BODY_CLASS, "Background effects disabled on this page");
        return Ok(());
    }

    let config = load_config(&window);

    match find_canvas(&document) {
        Some(canvas) => start_point_field(&window, canvas, config.field)?,
        None => warn!(id = CANVAS_ID, "No starfield canvas on page, skipping point field"),
    }

    DomTrail::install(&document, config.trail)?;

    info!("Starfield started");
    Ok(())
}

fn load_config(window: &Window) -> StarfieldConfig {
    let raw = js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL))
        .ok()
        .and_then(|v| v.as_string());
    StarfieldConfig::from_json_or_default(raw.as_deref())
}

fn find_canvas(document: &Document) -> Option<HtmlCanvasElement> {
    document
        .get_element_by_id(CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Current viewport size in CSS pixels, at least 1x1
fn viewport_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
    let w = dim(window.inner_width()).max(1.0) as u32;
    let h = dim(window.inner_height()).max(1.0) as u32;
    (w, h)
}

/// Everything the frame loop and resize handler share
struct PageField {
    renderer: PointFieldRenderer,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
}

impl PageField {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.renderer.on_resize(width, height);
    }

    fn tick(&mut self) {
        let PageField {
            renderer, surface, ..
        } = self;
        renderer.frame_tick(surface);
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn start_point_field(
    window: &Window,
    canvas: HtmlCanvasElement,
    config: FieldConfig,
) -> Result<(), JsValue> {
    let (w, h) = viewport_size(window);
    canvas.set_width(w);
    canvas.set_height(h);

    let surface = CanvasSurface::new(&canvas)?;
    let state = Rc::new(RefCell::new(PageField {
        renderer: PointFieldRenderer::new(config, w, h),
        canvas,
        surface,
    }));

    // Resize - full regeneration at the new viewport size
    let resize_state = state.clone();
    let on_resize = Closure::wrap(Box::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (w, h) = viewport_size(&window);
        resize_state.borrow_mut().resize(w, h);
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    // Frame loop - reschedules itself for the lifetime of the page
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next_frame = frame.clone();
    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        state.borrow_mut().tick();
        if let Some(cb) = next_frame.borrow().as_ref() {
            if let Err(e) = request_frame(cb) {
                error!(?e, "requestAnimationFrame failed, animation stopped");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = frame.borrow().as_ref() {
        request_frame(cb)?;
    }
    debug!(w, h, "Point field animation scheduled");
    Ok(())
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window()?.request_animation_frame(cb.as_ref().unchecked_ref())
}
