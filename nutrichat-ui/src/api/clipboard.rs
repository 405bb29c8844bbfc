//! Clipboard
//!
//! `navigator.clipboard.writeText`, reached through reflection so no
//! unstable web-sys APIs are needed.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn describe(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Write `text` to the system clipboard
pub async fn write_text(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let navigator = window.navigator();

    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).map_err(describe)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("clipboard API unavailable".to_string());
    }

    let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| "clipboard.writeText is not a function".to_string())?;
    let promise: Promise = write
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(describe)?
        .dyn_into()
        .map_err(|_| "clipboard.writeText did not return a promise".to_string())?;

    JsFuture::from(promise).await.map_err(describe)?;
    Ok(())
}
