//! Page wiring: finds the canvas and image, installs listeners, runs the
//! animation loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, AddEventListenerOptions, Document, HtmlCanvasElement, HtmlElement, PointerEvent,
    TouchEvent, Window,
};

use super::plane::Plane;
use super::render::Renderer;
use crate::config::Settings;
use crate::demo::{query_param, Demo};
use crate::error::FxError;

pub fn start() -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let canvas = document
        .query_selector("canvas.gl")?
        .ok_or(FxError::MissingElement("canvas.gl"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let image = document
        .query_selector("figure > img")?
        .ok_or(FxError::MissingElement("figure > img"))?
        .dyn_into::<HtmlElement>()?;

    let demo = resolve_demo(&window, &document);
    let (settings, errors) = Settings::from_attributes(|name| image.get_attribute(name));
    for err in errors {
        log::warn!("{err}; keeping default");
    }
    log::info!("starting demo {} ({demo:?})", demo.index());

    let mut renderer = Renderer::new(canvas, settings.pointer_lerp, settings.max_dpr)?;
    let plane = Plane::new(&renderer.gl, image, demo, settings)?;
    renderer.planes.push(plane);

    let renderer = Rc::new(RefCell::new(renderer));
    resize(&window, &renderer)?;
    add_listeners(&window, &renderer)?;
    run_loop(window, renderer)
}

fn resolve_demo(window: &Window, document: &Document) -> Demo {
    let search = window.location().search().unwrap_or_default();
    let attribute = document
        .document_element()
        .and_then(|root| Demo::attribute(|name| root.get_attribute(name)));
    Demo::resolve(query_param(&search, "demo"), attribute.as_deref())
}

fn resize(window: &Window, renderer: &Rc<RefCell<Renderer>>) -> Result<(), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    renderer.borrow_mut().resize(width, height)
}

fn add_listeners(window: &Window, renderer: &Rc<RefCell<Renderer>>) -> Result<(), JsValue> {
    let on_resize = {
        let renderer = renderer.clone();
        Closure::wrap(Box::new(move || {
            let Some(window) = web_sys::window() else { return };
            if let Err(err) = resize(&window, &renderer) {
                log::error!("resize failed: {err:?}");
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let on_pointer = {
        let renderer = renderer.clone();
        Closure::wrap(Box::new(move |event: PointerEvent| {
            event.prevent_default();
            renderer
                .borrow_mut()
                .update_pointer(event.client_x() as f32, event.client_y() as f32);
        }) as Box<dyn FnMut(PointerEvent)>)
    };
    window.add_event_listener_with_callback("pointermove", on_pointer.as_ref().unchecked_ref())?;
    on_pointer.forget();

    let on_touch = {
        let renderer = renderer.clone();
        Closure::wrap(Box::new(move |event: TouchEvent| {
            event.prevent_default();
            if let Some(touch) = event.touches().get(0) {
                renderer
                    .borrow_mut()
                    .update_pointer(touch.client_x() as f32, touch.client_y() as f32);
            }
        }) as Box<dyn FnMut(TouchEvent)>)
    };
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        on_touch.as_ref().unchecked_ref(),
        &options,
    )?;
    on_touch.forget();

    Ok(())
}

fn run_loop(window: Window, renderer: Rc<RefCell<Renderer>>) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so it can reschedule itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut last: Option<f64> = None;

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let dt = last.map(|prev| ((now - prev) / 1000.0) as f32).unwrap_or(0.0);
        last = Some(now);

        if let Err(err) = renderer.borrow_mut().render(dt) {
            log::error!("frame failed: {err:?}");
        }

        let Some(window) = web_sys::window() else { return };
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
