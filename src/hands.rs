use crate::camera;
use crate::constants::{HANDS_MODEL_URL, HANDS_WASM_ROOT};
use crate::overlay;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{GestureClassifier, HandLandmarks, SceneState, TreeError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen(module = "/js/hands.js")]
extern "C" {
    #[wasm_bindgen(js_name = createHandLandmarker, catch)]
    fn create_hand_landmarker(wasm_root: &str, model_path: &str) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_name = detectHand, catch)]
    fn detect_hand(
        landmarker: &JsValue,
        video: &web::HtmlVideoElement,
        timestamp_ms: f64,
    ) -> Result<JsValue, JsValue>;
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

struct GestureInner {
    document: web::Document,
    video: web::HtmlVideoElement,
    state: Rc<RefCell<SceneState>>,
    classifier: GestureClassifier,
    enabled: Cell<bool>,
    loading: Cell<bool>,
    running: Cell<bool>,
    last_timestamp: Cell<f64>,
    shown_status: RefCell<String>,
    landmarker: RefCell<Option<JsValue>>,
    stream: RefCell<Option<web::MediaStream>>,
    tick: Tick,
}

/// Camera + hand tracker + per-frame classification, switched on and off
/// from the UI. The landmarker is created once and reused across toggles.
#[derive(Clone)]
pub struct GestureControl {
    inner: Rc<GestureInner>,
}

impl GestureControl {
    pub fn new(
        document: web::Document,
        video: web::HtmlVideoElement,
        state: Rc<RefCell<SceneState>>,
        classifier: GestureClassifier,
    ) -> Self {
        Self {
            inner: Rc::new(GestureInner {
                document,
                video,
                state,
                classifier,
                enabled: Cell::new(false),
                loading: Cell::new(false),
                running: Cell::new(false),
                last_timestamp: Cell::new(f64::NEG_INFINITY),
                shown_status: RefCell::new(String::new()),
                landmarker: RefCell::new(None),
                stream: RefCell::new(None),
                tick: Rc::new(RefCell::new(None)),
            }),
        }
    }

    pub fn toggle(&self) {
        if self.inner.loading.get() {
            return;
        }
        if self.inner.enabled.get() {
            self.disable();
        } else {
            let this = self.clone();
            spawn_local(async move { this.enable().await });
        }
    }

    async fn enable(&self) {
        let inner = &self.inner;
        inner.loading.set(true);
        overlay::show_gesture_control(&inner.document, false, true);
        log::info!("[gesture] starting");

        match self.acquire().await {
            Ok(()) => {
                inner.enabled.set(true);
                overlay::show_gesture_control(&inner.document, true, false);
                self.show_status(&inner.state.borrow().gesture_status.clone());
                self.ensure_loop();
                log::info!("[gesture] on");
            }
            Err(e) => {
                log::error!("[gesture] {}", e);
                overlay::notify(&inner.document, e.user_notice());
                overlay::show_gesture_control(&inner.document, false, false);
            }
        }
        inner.loading.set(false);
    }

    /// Camera stream, preview and tracker. Any failure after the stream was
    /// granted releases it again.
    async fn acquire(&self) -> Result<(), TreeError> {
        let inner = &self.inner;
        let stream = camera::open_camera().await?;
        let ready = async {
            camera::attach(&inner.video, &stream).await?;
            self.ensure_landmarker().await
        };
        if let Err(e) = ready.await {
            camera::detach(&inner.video);
            camera::stop_tracks(&stream);
            return Err(e);
        }
        *inner.stream.borrow_mut() = Some(stream);
        Ok(())
    }

    async fn ensure_landmarker(&self) -> Result<(), TreeError> {
        if self.inner.landmarker.borrow().is_some() {
            return Ok(());
        }
        let to_error = |e: JsValue| TreeError::asset("hand model", format!("{:?}", e));
        let promise = create_hand_landmarker(HANDS_WASM_ROOT, HANDS_MODEL_URL).map_err(to_error)?;
        let landmarker = JsFuture::from(promise).await.map_err(to_error)?;
        log::info!("[gesture] hand model loaded");
        *self.inner.landmarker.borrow_mut() = Some(landmarker);
        Ok(())
    }

    pub fn disable(&self) {
        let inner = &self.inner;
        inner.enabled.set(false);
        if let Some(stream) = inner.stream.borrow_mut().take() {
            camera::stop_tracks(&stream);
        }
        camera::detach(&inner.video);
        inner.state.borrow_mut().clear_hand();
        self.show_status(&inner.state.borrow().gesture_status.clone());
        overlay::show_gesture_control(&inner.document, false, false);
        log::info!("[gesture] off");
    }

    fn show_status(&self, status: &str) {
        let mut shown = self.inner.shown_status.borrow_mut();
        if *shown != status {
            overlay::show_gesture_status(&self.inner.document, status);
            *shown = status.to_string();
        }
    }

    /// Start the polling loop unless one is still scheduled.
    fn ensure_loop(&self) {
        let inner = &self.inner;
        if inner.running.replace(true) {
            return;
        }
        if inner.tick.borrow().is_none() {
            let this = self.clone();
            *inner.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                if !this.inner.enabled.get() {
                    this.inner.running.set(false);
                    return;
                }
                this.poll();
                request_next(&this.inner.tick);
            }) as Box<dyn FnMut()>));
        }
        request_next(&inner.tick);
    }

    /// One tracker frame, folded into the shared state.
    fn poll(&self) {
        let inner = &self.inner;
        if inner.video.ready_state() < 2 {
            return;
        }
        let now = web::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now);
        if now <= inner.last_timestamp.get() {
            return;
        }
        inner.last_timestamp.set(now);

        let detected = {
            let landmarker = inner.landmarker.borrow();
            let Some(landmarker) = landmarker.as_ref() else {
                return;
            };
            match detect_hand(landmarker, &inner.video, now) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("[gesture] detect failed: {:?}", e);
                    return;
                }
            }
        };
        let hand = match detected.dyn_into::<js_sys::Float32Array>() {
            Ok(flat) => match HandLandmarks::from_flat(&flat.to_vec()) {
                Ok(h) => Some(h),
                Err(e) => {
                    log::warn!("[gesture] {}", e);
                    None
                }
            },
            // undefined: no hand in this frame
            Err(_) => None,
        };

        let status = {
            let mut state = inner.state.borrow_mut();
            inner.classifier.observe(hand.as_ref(), &mut state);
            state.gesture_status.clone()
        };
        self.show_status(&status);
    }
}

fn request_next(tick: &Tick) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
