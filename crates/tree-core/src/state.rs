//! Shared update context and camera types.
//!
//! `SceneState` is the single mutable object both the render loop and the
//! gesture loop read and write. Writers change it inside one borrow, so a
//! frame never observes a half-applied transition.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Assembled,
    Scattered,
    Focused,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Assembled, Mode::Scattered, Mode::Focused];

    /// Button label shown in the UI.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Assembled => "TREE",
            Mode::Scattered => "SCATTER",
            Mode::Focused => "FOCUS",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SceneState {
    mode: Mode,
    focused: Option<usize>,
    focus_requested: bool,
    /// Hand pointer in [-1, 1]^2; zero while gesture control is off.
    pub hand_pointer: Vec2,
    /// Mouse position in normalized device coordinates.
    pub mouse_pointer: Vec2,
    pub gesture_status: String,
}

impl SceneState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Switch modes. Returns whether a transition happened.
    ///
    /// Entering `Focused` with nothing focused queues a focus selection for
    /// the next frame; leaving `Focused` clears the focused placard.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if mode == self.mode {
            return false;
        }
        log::info!("[mode] {} -> {}", self.mode, mode);
        self.mode = mode;
        if mode == Mode::Focused {
            self.focus_requested = self.focused.is_none();
        } else {
            self.focused = None;
            self.focus_requested = false;
        }
        true
    }

    /// Consume a pending focus selection request.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    pub fn set_focused(&mut self, index: Option<usize>) {
        self.focused = index;
        if index.is_some() {
            self.focus_requested = false;
        }
    }

    /// Click on a placard: focus it, or release it when already focused.
    pub fn toggle_focus(&mut self, index: usize) {
        if self.focused == Some(index) {
            self.focused = None;
        } else {
            self.focused = Some(index);
            self.focus_requested = false;
        }
    }

    /// Reset what gesture control wrote when it is switched off.
    pub fn clear_hand(&mut self) {
        self.hand_pointer = Vec2::ZERO;
        self.gesture_status = "None".to_string();
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Camera-space up axis expressed in world space.
    pub fn camera_up(&self) -> Vec3 {
        let f = self.forward();
        let right = f.cross(self.up).normalize_or_zero();
        right.cross(f)
    }

    /// Project a world point to normalized device coordinates.
    pub fn project(&self, world: Vec3) -> Vec2 {
        self.view_proj().project_point3(world).truncate()
    }

    /// World-space ray through an NDC point.
    pub fn ray_through(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let far = inv.project_point3(ndc.extend(1.0));
        (self.eye, (far - self.eye).normalize_or_zero())
    }
}

/// Orbit controls around a fixed target: drag to rotate, wheel to zoom, no pan.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub radius: f32,
    /// Azimuth around +Y, measured from +Z.
    pub theta: f32,
    /// Polar angle from +Y.
    pub phi: f32,
    pub fovy_radians: f32,
    pub max_polar: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(CAMERA_EYE, Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let radius = offset.length().max(1e-3);
        Self {
            target,
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            max_polar: CAMERA_MAX_POLAR,
            min_radius: CAMERA_MIN_DISTANCE,
            max_radius: CAMERA_MAX_DISTANCE,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.target
            + self.radius
                * Vec3::new(sin_phi * self.theta.sin(), self.phi.cos(), sin_phi * self.theta.cos())
    }

    /// Rotate by a pointer drag of `dx`, `dy` pixels on a viewport `height` px tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.theta -= std::f32::consts::TAU * dx / h;
        self.phi = (self.phi - std::f32::consts::TAU * dy / h).clamp(1e-3, self.max_polar);
    }

    /// Dolly by a wheel delta; ignored while a placard is focused.
    pub fn zoom(&mut self, wheel_delta: f32, mode: Mode) -> bool {
        if mode == Mode::Focused {
            return false;
        }
        let factor = 0.95_f32.powf(-wheel_delta / 100.0);
        self.radius = (self.radius * factor).clamp(self.min_radius, self.max_radius);
        true
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect: aspect.max(1e-3),
            fovy_radians: self.fovy_radians,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
