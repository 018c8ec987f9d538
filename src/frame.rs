use crate::input;
use crate::overlay;
use crate::photos::PendingUploads;
use crate::render;
use instant::Instant;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::constants::PLACARD_COUNT;
use tree_core::{Mode, Scene, SceneConfig, SceneState};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// A frame after a long stall (hidden tab) is clamped to this step.
const MAX_FRAME_DT_SEC: f32 = 0.1;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub state: Rc<RefCell<SceneState>>,
    pub pending_photos: PendingUploads,

    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub started: Instant,
    pub last_instant: Instant,
    pub shown_mode: Option<Mode>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;
        let time_sec = (now - self.started).as_secs_f32();

        self.sync_mode_display();
        self.upload_photos();

        let (w, h) = (self.canvas.width(), self.canvas.height());
        let aspect = input::aspect(w, h);
        let mut scene = self.scene.borrow_mut();
        let placard_photos: SmallVec<[Option<usize>; PLACARD_COUNT]> =
            scene.placards().placards().iter().map(|p| p.photo).collect();
        let out = {
            let mut state = self.state.borrow_mut();
            scene.tick(&mut state, dt_sec, time_sec, aspect)
        };

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            match g.render(&out, &placard_photos, time_sec) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    fn sync_mode_display(&mut self) {
        let mode = self.state.borrow().mode();
        if self.shown_mode != Some(mode) {
            overlay::show_mode(&self.document, mode);
            self.shown_mode = Some(mode);
        }
    }

    /// Move decoded photos onto the GPU and their placards.
    fn upload_photos(&mut self) {
        let ready: Vec<_> = self.pending_photos.borrow_mut().drain(..).collect();
        for (index, bitmap) in ready {
            let uploaded = self
                .gpu
                .as_mut()
                .map(|g| g.upload_photo(index, &bitmap))
                .unwrap_or(false);
            if uploaded {
                self.scene.borrow_mut().assign_photo(index, index);
            }
            bitmap.close();
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    config: &SceneConfig,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, config).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_next(tick: &Tick) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Tick = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_next(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_next(&tick);
}
