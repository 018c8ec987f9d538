use crate::controls::Controls;
use crate::input;
use crate::overlay;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, controls: &Controls) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    // nothing reacts until the experience has been entered
    if overlay::start_pending(&controls.document) {
        return;
    }
    let key = ev.key();
    let Some(action) = input::key_action(&key) else {
        return;
    };
    log::info!("[keys] {} -> {:?}", key, action);
    controls.apply(action);
    ev.prevent_default();
}

pub fn wire_global_keydown(controls: Controls) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &controls);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
