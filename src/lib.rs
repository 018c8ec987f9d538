#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{GestureClassifier, PlayTrigger, Scene, SceneConfig, SceneState};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod camera;
mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod hands;
mod input;
mod overlay;
mod photos;
mod render;
mod timers;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("glow-tree starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn wire_start_button(controls: &controls::Controls) {
    let c = controls.clone();
    dom::add_click_listener(&controls.document, "start-button", move || {
        overlay::hide_start(&c.document);
        log::info!("[start] entering");
        c.music.play(PlayTrigger::Autoplay);
    });
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = dom::element(&document, "app-canvas")?;
    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let config = SceneConfig::default();
    let scene = Rc::new(RefCell::new(Scene::new(config, &mut rand::thread_rng())));
    let state = Rc::new(RefCell::new(SceneState::default()));

    let video: web::HtmlVideoElement = dom::element(&document, "gesture-video")?;
    let controls = controls::Controls {
        document: document.clone(),
        canvas: canvas.clone(),
        state: state.clone(),
        gestures: hands::GestureControl::new(
            document.clone(),
            video,
            state.clone(),
            GestureClassifier::default(),
        ),
        music: audio::Music::new(&document)?,
    };
    overlay::show_gesture_control(&document, false, false);
    controls.wire_buttons();
    wire_start_button(&controls);
    events::wire_global_keydown(controls.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
        state: state.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });
    let pending_photos = photos::wire_photo_input(&document)?;

    let gpu = frame::init_gpu(&canvas, &config).await;
    if gpu.is_none() {
        overlay::notify(&document, "WebGPU is not available in this browser.");
    }

    let now = Instant::now();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        state,
        pending_photos,
        document,
        canvas,
        gpu,
        started: now,
        last_instant: now,
        shown_mode: None,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
