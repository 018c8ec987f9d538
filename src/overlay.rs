use crate::constants::{HINT_BUTTONS, HINT_GESTURES, NOTICE_MS};
use crate::dom;
use crate::timers::TimerSlot;
use tree_core::{Mode, PlaybackState};
use wasm_bindgen::JsCast;
use web_sys as web;

const MODE_BUTTONS: [(Mode, &str); 3] = [
    (Mode::Assembled, "mode-tree"),
    (Mode::Scattered, "mode-scatter"),
    (Mode::Focused, "mode-focus"),
];

pub fn mode_button_id(mode: Mode) -> &'static str {
    MODE_BUTTONS
        .iter()
        .find(|(m, _)| *m == mode)
        .map(|(_, id)| *id)
        .unwrap_or("mode-tree")
}

#[inline]
pub fn hide_start(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("start-overlay") {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Whether the start overlay is still up.
#[inline]
pub fn start_pending(document: &web::Document) -> bool {
    document
        .get_element_by_id("start-overlay")
        .map(|el| !el.class_list().contains("hidden"))
        .unwrap_or(false)
}

/// Show or hide the whole control layer (buttons, title, hint).
pub fn toggle_ui(document: &web::Document) -> bool {
    let Some(body) = document.body() else {
        return false;
    };
    let hidden = body.class_list().toggle("ui-hidden").unwrap_or(false);
    log::info!("[ui] controls {}", if hidden { "hidden" } else { "shown" });
    !hidden
}

pub fn show_mode(document: &web::Document, mode: Mode) {
    for (m, id) in MODE_BUTTONS {
        dom::set_class(document, id, "state-active", m == mode);
    }
}

pub fn show_gesture_status(document: &web::Document, status: &str) {
    dom::set_text(document, "gesture-status", status);
}

/// Reflect whether gesture control is running or starting up.
pub fn show_gesture_control(document: &web::Document, enabled: bool, loading: bool) {
    dom::set_class(document, "gesture-toggle", "state-active", enabled);
    dom::set_text(
        document,
        "gesture-toggle",
        if loading {
            "..."
        } else if enabled {
            "Gestures on"
        } else {
            "Gestures"
        },
    );
    dom::set_class(document, "gesture-status", "hidden", !enabled);
    dom::set_class(document, "gesture-video", "hidden", !enabled);
    dom::set_text(document, "hint", if enabled { HINT_GESTURES } else { HINT_BUTTONS });
}

pub fn show_playback(document: &web::Document, state: PlaybackState) {
    dom::set_text(document, "music-toggle", state.label());
    dom::set_class(document, "music-toggle", "state-error", state == PlaybackState::LoadError);
    dom::set_class(document, "music-toggle", "state-active", state.is_playing());
}

thread_local! {
    static NOTICE_TIMER: TimerSlot = const { TimerSlot::new() };
}

/// Show a short message, then fade it out. A newer notice restarts the timer.
pub fn notify(document: &web::Document, message: &str) {
    log::warn!("[notice] {}", message);
    dom::set_text(document, "notice", message);
    dom::set_class(document, "notice", "visible", true);
    let Some(w) = web::window() else {
        return;
    };
    let doc = document.clone();
    let clear = wasm_bindgen::closure::Closure::once_into_js(move || {
        NOTICE_TIMER.with(|slot| slot.take());
        dom::set_class(&doc, "notice", "visible", false);
    });
    match w.set_timeout_with_callback_and_timeout_and_arguments_0(clear.unchecked_ref(), NOTICE_MS) {
        Ok(handle) => {
            if let Some(previous) = NOTICE_TIMER.with(|slot| slot.replace(handle)) {
                w.clear_timeout_with_handle(previous);
            }
        }
        Err(e) => log::warn!("[notice] setTimeout failed: {:?}", e),
    }
}
