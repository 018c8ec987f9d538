use glam::Vec2;
use tree_core::Mode;
use web_sys as web;

/// Press-drag-release tracking on the canvas. A release that never moved
/// further than the click slop counts as a click.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub start: Vec2,
    pub last: Vec2,
    pub travelled: f32,
}

impl DragState {
    pub fn begin(&mut self, px: Vec2) {
        self.active = true;
        self.start = px;
        self.last = px;
        self.travelled = 0.0;
    }

    /// Returns the movement since the previous call while a drag is active.
    pub fn move_to(&mut self, px: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = px - self.last;
        self.last = px;
        self.travelled += delta.length();
        Some(delta)
    }

    /// Ends the drag; true when it was a click.
    pub fn end(&mut self, click_slop: f32) -> bool {
        let was_click = self.active && self.travelled <= click_slop;
        self.active = false;
        was_click
    }
}

/// Keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    SetMode(Mode),
    ToggleGestures,
    ToggleMusic,
    ToggleUi,
    Fullscreen,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "1" => Some(KeyAction::SetMode(Mode::Assembled)),
        "2" => Some(KeyAction::SetMode(Mode::Scattered)),
        "3" => Some(KeyAction::SetMode(Mode::Focused)),
        "g" | "G" => Some(KeyAction::ToggleGestures),
        "m" | "M" => Some(KeyAction::ToggleMusic),
        "h" | "H" => Some(KeyAction::ToggleUi),
        "Enter" => Some(KeyAction::Fullscreen),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = rect.width().max(1.0) as f32;
    let h = rect.height().max(1.0) as f32;
    Vec2::new(x_css / w * canvas.width() as f32, y_css / h * canvas.height() as f32)
}

/// Canvas pixel position to normalized device coordinates (+y up).
#[inline]
pub fn px_to_ndc(px: Vec2, size: Vec2) -> Vec2 {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec2::ZERO;
    }
    let ndc = Vec2::new(2.0 * px.x / size.x - 1.0, 1.0 - 2.0 * px.y / size.y);
    ndc.clamp(Vec2::splat(-1.0), Vec2::splat(1.0))
}

#[inline]
pub fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

/// Pointer cursor while hovering a placard.
#[inline]
pub fn hover_cursor(hit: Option<usize>) -> &'static str {
    if hit.is_some() {
        "pointer"
    } else {
        "auto"
    }
}

/// Normalized wheel delta in pixels, whatever unit the browser reported.
#[inline]
pub fn wheel_pixels(delta_y: f64, delta_mode: u32) -> f32 {
    match delta_mode {
        1 => (delta_y * 16.0) as f32,  // lines
        2 => (delta_y * 400.0) as f32, // pages
        _ => delta_y as f32,
    }
}
