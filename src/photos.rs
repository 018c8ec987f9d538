use crate::constants::PHOTO_MAX_SIDE;
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{centre_crop, PhotoQueue, TreeError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Decoded photos waiting for the frame loop to upload them to the GPU.
pub type PendingUploads = Rc<RefCell<Vec<(usize, web::ImageBitmap)>>>;

async fn bitmap_from(promise: Result<js_sys::Promise, wasm_bindgen::JsValue>, name: &str) -> Result<web::ImageBitmap, TreeError> {
    let promise = promise.map_err(|e| TreeError::asset(name, format!("{:?}", e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| TreeError::asset(name, format!("{:?}", e)))?
        .dyn_into::<web::ImageBitmap>()
        .map_err(|_| TreeError::asset(name, "not an image"))
}

/// Decode an uploaded file into a square bitmap.
pub async fn decode_photo(file: &web::File) -> Result<web::ImageBitmap, TreeError> {
    let name = file.name();
    let window = web::window().ok_or_else(|| TreeError::asset(name.as_str(), "no window"))?;
    let full = bitmap_from(window.create_image_bitmap_with_blob(file), &name).await?;
    let (x, y, side) = centre_crop(full.width(), full.height(), PHOTO_MAX_SIDE);
    let cropped = bitmap_from(
        window.create_image_bitmap_with_image_bitmap_and_a_sx_and_a_sy_and_a_sw_and_a_sh(
            &full,
            x as i32,
            y as i32,
            side as i32,
            side as i32,
        ),
        &name,
    )
    .await;
    full.close();
    cropped
}

/// Accept files from `#photo-input` into the queue and decode the accepted ones.
pub fn wire_photo_input(document: &web::Document) -> anyhow::Result<PendingUploads> {
    let input: web::HtmlInputElement = crate::dom::element(document, "photo-input")?;
    let queue: Rc<RefCell<PhotoQueue<web::File>>> = Rc::new(RefCell::new(PhotoQueue::default()));
    let pending: PendingUploads = Rc::new(RefCell::new(Vec::new()));

    let pending_for_listener = pending.clone();
    let input_for_listener = input.clone();
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::Event| {
        let Some(files) = input_for_listener.files() else {
            return;
        };
        let incoming = (0..files.length()).filter_map(|i| files.get(i));
        let (accepted, remaining) = {
            let mut queue = queue.borrow_mut();
            let accepted = queue.extend(incoming);
            (accepted, queue.remaining())
        };
        log::info!(
            "[photos] accepted {} of {}, {} slot(s) left",
            accepted.len(),
            files.length(),
            remaining
        );
        // allow picking the same files again
        input_for_listener.set_value("");

        for (index, file) in accepted {
            let pending = pending_for_listener.clone();
            let doc = doc.clone();
            spawn_local(async move {
                match decode_photo(&file).await {
                    Ok(bitmap) => {
                        log::info!("[photos] #{} {}x{} ready", index, bitmap.width(), bitmap.height());
                        pending.borrow_mut().push((index, bitmap));
                    }
                    Err(e) => {
                        log::error!("[photos] {}", e);
                        overlay::notify(&doc, e.user_notice());
                    }
                }
            });
        }
    }) as Box<dyn FnMut(_)>);
    _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();

    Ok(pending)
}
