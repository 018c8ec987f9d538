use crate::dom;
use crate::overlay;
use std::cell::Cell;
use std::rc::Rc;
use tree_core::constants::{MUSIC_URL, MUSIC_VOLUME};
use tree_core::{PlayTrigger, PlaybackState};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Background track on the page's `<audio id="music">` element.
#[derive(Clone)]
pub struct Music {
    element: web::HtmlAudioElement,
    document: web::Document,
    state: Rc<Cell<PlaybackState>>,
}

impl Music {
    pub fn new(document: &web::Document) -> anyhow::Result<Self> {
        let element: web::HtmlAudioElement = dom::element(document, "music")?;
        element.set_src(MUSIC_URL);
        element.set_loop(true);
        element.set_volume(MUSIC_VOLUME);
        let music = Self {
            element,
            document: document.clone(),
            state: Rc::new(Cell::new(PlaybackState::default())),
        };
        music.wire_error_listener();
        overlay::show_playback(document, music.state());
        Ok(music)
    }

    pub fn state(&self) -> PlaybackState {
        self.state.get()
    }

    fn set_state(&self, next: PlaybackState) {
        let prev = self.state.replace(next);
        if prev != next {
            log::info!("[music] {:?} -> {:?}", prev, next);
        }
        overlay::show_playback(&self.document, next);
    }

    /// Start playback; the outcome lands once the browser settles the play promise.
    pub fn play(&self, trigger: PlayTrigger) {
        let promise = match self.element.play() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[music] play() threw: {:?}", e);
                self.set_state(self.state().after_play(trigger, false));
                return;
            }
        };
        let this = self.clone();
        spawn_local(async move {
            let ok = match JsFuture::from(promise).await {
                Ok(_) => true,
                Err(e) => {
                    log::warn!("[music] {:?} play rejected: {:?}", trigger, e);
                    false
                }
            };
            this.set_state(this.state().after_play(trigger, ok));
        });
    }

    pub fn toggle(&self) {
        if self.state().is_playing() {
            _ = self.element.pause();
            self.set_state(self.state().after_pause());
        } else {
            self.play(PlayTrigger::Manual);
        }
    }

    fn wire_error_listener(&self) {
        let this = self.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::Event| {
            log::error!("[music] failed to load {}", MUSIC_URL);
            this.set_state(this.state().after_media_error());
        }) as Box<dyn FnMut(_)>);
        _ = self
            .element
            .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
