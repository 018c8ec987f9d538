use crate::constants::{CAPTURE_FPS, CAPTURE_HEIGHT, CAPTURE_WIDTH};
use tree_core::TreeError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Map a rejected browser call to a user-facing error. Permission refusals
/// are told apart from everything else.
pub fn camera_error(err: &JsValue) -> TreeError {
    match err.dyn_ref::<web::DomException>() {
        Some(ex) => match ex.name().as_str() {
            "NotAllowedError" | "SecurityError" => TreeError::PermissionDenied(ex.name()),
            name => TreeError::asset("camera", format!("{}: {}", name, ex.message())),
        },
        None => TreeError::asset("camera", format!("{:?}", err)),
    }
}

fn video_constraints() -> JsValue {
    let video = js_sys::Object::new();
    let frame_rate = js_sys::Object::new();
    _ = js_sys::Reflect::set(&frame_rate, &"ideal".into(), &CAPTURE_FPS.into());
    _ = js_sys::Reflect::set(&video, &"width".into(), &CAPTURE_WIDTH.into());
    _ = js_sys::Reflect::set(&video, &"height".into(), &CAPTURE_HEIGHT.into());
    _ = js_sys::Reflect::set(&video, &"frameRate".into(), &frame_rate);
    video.into()
}

/// Ask for the user-facing camera at the capture size.
pub async fn open_camera() -> Result<web::MediaStream, TreeError> {
    let window = web::window().ok_or_else(|| TreeError::asset("camera", "no window"))?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|e| camera_error(&e))?;
    let constraints = web::MediaStreamConstraints::new();
    constraints.set_video(&video_constraints());
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| camera_error(&e))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| camera_error(&e))?
        .dyn_into::<web::MediaStream>()
        .map_err(|e| TreeError::asset("camera", format!("not a stream: {:?}", e)))?;
    log::info!(
        "[camera] stream open ({} track(s))",
        stream.get_tracks().length()
    );
    Ok(stream)
}

pub fn stop_tracks(stream: &web::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
            track.stop();
        }
    }
    log::info!("[camera] tracks stopped");
}

/// Show the stream in the preview element and wait for playback to begin.
pub async fn attach(video: &web::HtmlVideoElement, stream: &web::MediaStream) -> Result<(), TreeError> {
    video.set_muted(true);
    video.set_src_object(Some(stream));
    let promise = video
        .play()
        .map_err(|e| TreeError::asset("camera preview", format!("{:?}", e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| TreeError::asset("camera preview", format!("{:?}", e)))?;
    Ok(())
}

pub fn detach(video: &web::HtmlVideoElement) {
    video.set_src_object(None);
}
