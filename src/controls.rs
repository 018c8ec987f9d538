use crate::audio::Music;
use crate::dom;
use crate::hands::GestureControl;
use crate::input::KeyAction;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{Mode, SceneState};
use web_sys as web;

/// Handles every UI surface (buttons, keys, gestures) acts through.
#[derive(Clone)]
pub struct Controls {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub state: Rc<RefCell<SceneState>>,
    pub gestures: GestureControl,
    pub music: Music,
}

impl Controls {
    /// The overlay catches up with the new mode on the next frame.
    pub fn set_mode(&self, mode: Mode) {
        self.state.borrow_mut().set_mode(mode);
    }

    pub fn apply(&self, action: KeyAction) {
        match action {
            KeyAction::SetMode(mode) => self.set_mode(mode),
            KeyAction::ToggleGestures => self.gestures.toggle(),
            KeyAction::ToggleMusic => self.music.toggle(),
            KeyAction::ToggleUi => {
                overlay::toggle_ui(&self.document);
            }
            KeyAction::Fullscreen => dom::toggle_fullscreen(&self.canvas),
        }
    }

    pub fn wire_buttons(&self) {
        for mode in Mode::ALL {
            let controls = self.clone();
            dom::add_click_listener(&self.document, overlay::mode_button_id(mode), move || {
                log::info!("[click] mode {}", mode);
                controls.set_mode(mode);
            });
        }
        let controls = self.clone();
        dom::add_click_listener(&self.document, "gesture-toggle", move || {
            controls.gestures.toggle();
        });
        let controls = self.clone();
        dom::add_click_listener(&self.document, "music-toggle", move || {
            controls.music.toggle();
        });
    }
}
