//! chatdeck App — WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters and hands them to the egui UI.
//! Everything here is browser-only; on other targets the crate is empty.

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
mod entry {
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;

    const CANVAS_ID: &str = "chatdeck_canvas";

    /// WASM entry point, called from index.html
    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        wasm_logger::init(wasm_logger::Config::default());
        log::info!("chatdeck starting...");

        let web_options = eframe::WebOptions::default();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("no canvas element with id 'chatdeck_canvas'"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str("element 'chatdeck_canvas' is not a canvas"))?;

        wasm_bindgen_futures::spawn_local(async move {
            let started = eframe::WebRunner::new()
                .start(
                    canvas,
                    web_options,
                    Box::new(|cc| Ok(Box::new(super::app::ChatDeckApp::new(cc)))),
                )
                .await;
            if let Err(e) = started {
                log::error!("Failed to start eframe: {:?}", e);
            }
        });

        Ok(())
    }
}
