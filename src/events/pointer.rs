use crate::constants::CLICK_SLOP_PX;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{Scene, SceneState};
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub state: Rc<RefCell<SceneState>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

impl InputWiring {
    fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let size = w.canvas_size();
        let ndc = input::px_to_ndc(pos, size);
        w.state.borrow_mut().mouse_pointer = ndc;

        let delta = w.drag_state.borrow_mut().move_to(pos);
        match delta {
            Some(d) => w.scene.borrow_mut().orbit.rotate(d.x, d.y, size.y),
            None => {
                let over_canvas = ev
                    .target()
                    .is_some_and(|t| t.dyn_ref::<web::HtmlCanvasElement>().is_some());
                let aspect = input::aspect(w.canvas.width(), w.canvas.height());
                let hit = if over_canvas {
                    w.scene.borrow().pick(ndc, aspect)
                } else {
                    None
                };
                _ = w.canvas.style().set_property("cursor", input::hover_cursor(hit));
            }
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        w.drag_state.borrow_mut().begin(pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let was_click = w.drag_state.borrow_mut().end(CLICK_SLOP_PX);
        if !was_click {
            return;
        }
        let size = w.canvas_size();
        let ndc = input::px_to_ndc(input::pointer_canvas_px(&ev, &w.canvas), size);
        let aspect = input::aspect(w.canvas.width(), w.canvas.height());
        let hit = w.scene.borrow().pick(ndc, aspect);
        if let Some(i) = hit {
            w.state.borrow_mut().toggle_focus(i);
            log::info!("[click] placard {}", i);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let delta = input::wheel_pixels(ev.delta_y(), ev.delta_mode());
        let mode = w.state.borrow().mode();
        if w.scene.borrow_mut().orbit.zoom(delta, mode) {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
