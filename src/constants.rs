// Rendering, post-processing and front-end tuning constants.
// Scene behaviour (shapes, rates, camera limits) lives in
// `tree_core::constants`; everything here only affects how a frame looks
// or how the browser glue behaves.

// Clear colour of the HDR scene target (#050505)
pub const CLEAR_RGB: [f64; 3] = [0.0015, 0.0015, 0.0015];

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.2;
pub const POINT_LIGHT_POS: [f32; 3] = [10.0, 10.0, 10.0];
pub const POINT_LIGHT_INTENSITY: f32 = 50.0;
pub const POINT_LIGHT_HEX: u32 = 0xFFD700;

// Material response
pub const SWARM_EMISSIVE: f32 = 0.6; // ornaments glow with their own colour
pub const STAR_EMISSIVE: f32 = 2.5;
pub const PLACARD_FRAME_HEX: u32 = 0xFAFAFA;
pub const PLACARD_EMPTY_RGB: [f32; 3] = [0.08, 0.08, 0.08];

// Bloom
pub const BLOOM_THRESHOLD: f32 = 0.4;
pub const BLOOM_INTENSITY: f32 = 1.5;

// Vignette (offset, darkness) and film grain
pub const VIGNETTE_OFFSET: f32 = 0.1;
pub const VIGNETTE_DARKNESS: f32 = 1.1;
pub const NOISE_OPACITY: f32 = 0.03;

// Reinhard tone mapping
pub const TONE_EXPOSURE: f32 = 1.8;

// Camera capture
pub const CAPTURE_WIDTH: u32 = 320;
pub const CAPTURE_HEIGHT: u32 = 240;
pub const CAPTURE_FPS: f64 = 30.0;

// Hand tracker assets
pub const HANDS_WASM_ROOT: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.3/wasm";
pub const HANDS_MODEL_URL: &str = "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task";

// Photos larger than this are centre-cropped to a square of this side
pub const PHOTO_MAX_SIDE: u32 = 2048;

// Pointer travel (px) below which a press counts as a click
pub const CLICK_SLOP_PX: f32 = 5.0;

// How long a notice stays on screen
pub const NOTICE_MS: i32 = 4000;

// Hint line under the mode buttons
pub const HINT_GESTURES: &str = "FIST: ASSEMBLE • OPEN: SCATTER • PINCH: FOCUS";
pub const HINT_BUTTONS: &str = "TOGGLE GESTURE OR USE BUTTONS";
