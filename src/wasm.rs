//! WebAssembly bindings for asciify

use wasm_bindgen::prelude::*;

use crate::config::ConversionConfig;
use crate::{convert, AsciifyError, Converter};

fn to_js_error(err: AsciifyError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

#[wasm_bindgen]
pub struct WasmConverter {
    converter: Converter,
}

#[wasm_bindgen]
impl WasmConverter {
    /// Create a converter for the given ramp (lightest glyph first)
    #[wasm_bindgen(constructor)]
    pub fn new(ramp: String) -> WasmConverter {
        WasmConverter {
            converter: Converter::new(ramp),
        }
    }

    #[wasm_bindgen]
    pub fn set_width(&mut self, width: usize) {
        self.converter = self.converter.clone().with_width(width);
    }

    /// Glyph height / width, as measured by the page at the chosen font size
    #[wasm_bindgen]
    pub fn set_glyph_aspect_ratio(&mut self, ratio: f64) {
        self.converter = self.converter.clone().with_glyph_aspect_ratio(ratio);
    }

    #[wasm_bindgen]
    pub fn set_lightness_gain(&mut self, gain: f64) {
        self.converter = self.converter.clone().with_lightness_gain(gain);
    }

    /// Convert canvas `ImageData.data` (RGBA) to an HTML fragment
    #[wasm_bindgen]
    pub fn convert(
        &self,
        image_data: &[u8],
        width: usize,
        height: usize,
    ) -> Result<String, JsValue> {
        self.converter
            .convert_rgba(image_data, width, height)
            .map(|grid| grid.to_html())
            .map_err(to_js_error)
    }
}

/// Worker-message entry point: RGBA data plus a JSON `ConversionConfig`,
/// answered with one HTML fragment
#[wasm_bindgen]
pub fn convert_message(image_data: &[u8], config_json: &str) -> Result<String, JsValue> {
    let config: ConversionConfig = serde_json::from_str(config_json)
        .map_err(|e| to_js_error(AsciifyError::Json(e)))?;
    let grid = convert(image_data, &config).map_err(to_js_error)?;
    Ok(grid.to_html())
}

#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&"asciify wasm module loaded".into());
}
