use glam::Vec3;

// Shared scene tuning constants. Rendering-only values live in the web crate.

// Swarm
pub const PARTICLE_COUNT: usize = 4000;
pub const SPHERE_FRACTION: f32 = 0.6; // remainder are cubes

// Tree silhouette
pub const TREE_HEIGHT: f32 = 14.0;
pub const TREE_RADIUS: f32 = 6.0;
pub const CONE_SPIRAL_TWIST: f32 = 25.0; // radians of extra angle from base to tip

// Scatter shell
pub const SHELL_RADIUS_MIN: f32 = 10.0;
pub const SHELL_RADIUS_MAX: f32 = 20.0;

// Per-point scale range
pub const POINT_SCALE_MIN: f32 = 0.2;
pub const POINT_SCALE_MAX: f32 = 0.7;

// Placards
pub const PLACARD_COUNT: usize = 10;
pub const PLACARD_SURFACE_OFFSET: f32 = 0.5; // sits just outside the swarm
pub const GOLDEN_RATIO_CONJUGATE: f32 = 0.618;
pub const PLACARD_ANGLE_JITTER: f32 = 0.5;
pub const PLACARD_ROLL_JITTER: f32 = 0.1; // +/- radians about local Z
pub const PLACARD_PITCH_JITTER: f32 = 0.05; // +/- radians about local X
pub const PLACARD_EXPLODE_MIN: f32 = 15.0;
pub const PLACARD_EXPLODE_MAX: f32 = 30.0;
pub const PLACARD_EXPLODE_JITTER: f32 = 2.5;
pub const PLACARD_FOCUS_DISTANCE: f32 = 6.0; // in front of the camera
pub const PLACARD_FOCUS_DROP: f32 = 0.8; // below the camera's line of sight
pub const PLACARD_FOCUS_SCALE: f32 = 2.2;
pub const PLACARD_FOCUS_TILT: f32 = 0.3; // radians per unit of pointer
pub const PLACARD_PICK_RADIUS: f32 = 0.95; // bounding sphere of the 1.2 x 1.45 frame

// Upload intake
pub const MAX_PHOTOS: usize = 10;

// Blend rates (1/s) for the swarm
pub const ASSEMBLE_RATE: f32 = 4.5;
pub const SCATTER_RATE: f32 = 2.5;
pub const SCATTER_WOBBLE: f32 = 2.0;
pub const BREATH_AMOUNT: f32 = 0.1;
pub const FOCUS_BACKDROP_SCALE: f32 = 0.3;
pub const SPIN_JITTER: f32 = 1.5; // max per-instance spin rate (rad/s)
pub const SPIN_SHARED: f32 = 1.0; // shared spin rate (rad/s)

// Per-frame smoothing factors, expressed at the reference frame rate
pub const REFERENCE_FPS: f32 = 60.0;
pub const PLACARD_REST_FOLLOW: f32 = 0.05;
pub const PLACARD_SCALE_FOLLOW: f32 = 0.1;
pub const PLACARD_FOCUS_FOLLOW: f32 = 0.1;
pub const PLACARD_FOCUS_TURN: f32 = 0.15;
pub const GROUP_FOLLOW: f32 = 0.05;
pub const STAR_SCALE_FOLLOW: f32 = 0.1;

// Assembly group motion
pub const AMBIENT_SPIN_RATE: f32 = 0.15; // rad/s
pub const POINTER_YAW: f32 = 0.7;
pub const POINTER_PITCH: f32 = 0.4;
pub const FOCUS_POINTER_DAMPING: f32 = 0.3;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 2.0, 25.0);
pub const CAMERA_FOV_DEGREES: f32 = 40.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::PI / 1.7;
pub const CAMERA_MIN_DISTANCE: f32 = 8.0;
pub const CAMERA_MAX_DISTANCE: f32 = 60.0;

// Star
pub const STAR_OUTER_RADIUS: f32 = 0.8;
pub const STAR_INNER_RADIUS: f32 = 0.35;
pub const STAR_DEPTH: f32 = 0.15;
pub const STAR_LIFT: f32 = 0.5; // above the tree tip
pub const STAR_SPIN_RATE: f32 = 1.2;
pub const STAR_BOB: f32 = 0.1;
pub const STAR_LIGHT_HEX: u32 = 0xFFD700;
pub const STAR_LIGHT_INTENSITY: f32 = 10.0;
pub const STAR_LIGHT_RANGE: f32 = 10.0; // no contribution beyond this distance

// Dust
pub const DUST_COUNT: usize = 150;
pub const DUST_EXTENT: f32 = 30.0;
pub const DUST_COLOR: [f32; 4] = [1.0, 0.98, 0.80, 0.3]; // lemon chiffon

// Music
pub const MUSIC_URL: &str =
    "https://www.chosic.com/wp-content/uploads/2021/11/Jingle-Bells-Traditional-1.mp3";
pub const MUSIC_VOLUME: f64 = 0.4;

// Warm-dominated gold palette with a couple of cold accents
pub const PALETTE_HEX: [u32; 7] = [
    0xFFD700, // gold
    0xFDB931, // golden poppy
    0xFFFAF0, // floral white
    0xFFA500, // orange
    0xB8860B, // dark goldenrod
    0xE0FFFF, // light cyan
    0xFFFFFF, // white
];

pub const GOLD_HEX: u32 = 0xD4AF37;

#[inline]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

#[inline]
pub fn sphere_count(total: usize) -> usize {
    (total as f32 * SPHERE_FRACTION).floor() as usize
}

/// Convert a per-frame smoothing factor tuned at [`REFERENCE_FPS`] into the
/// factor for a frame of `dt_sec` seconds.
#[inline]
pub fn frame_follow(per_frame: f32, dt_sec: f32) -> f32 {
    let f = per_frame.clamp(0.0, 1.0);
    1.0 - (1.0 - f).powf(dt_sec.max(0.0) * REFERENCE_FPS)
}
