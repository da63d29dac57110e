//! WASM bindings for dncl-bridge.
//!
//! The browser editor collaborator calls these to convert pane contents and
//! to fetch Mermaid source for the diagram pane.

use wasm_bindgen::prelude::*;

use crate::flowchart::mermaid::{FlowRenderer, MermaidRenderer};

/// Convert Python source to the notation.
#[wasm_bindgen(js_name = "toDncl")]
pub fn to_dncl(src: &str) -> String {
    crate::transpile::to_dncl(src)
}

/// Convert notation source to Python.
#[wasm_bindgen(js_name = "toPython")]
pub fn to_python(src: &str) -> String {
    crate::transpile::to_python(src)
}

/// Derive a flowchart from `src` and serialize it as Mermaid text.
///
/// - `from`: "python", "dncl", or empty string to auto-detect
#[wasm_bindgen(js_name = "flowchartMermaid")]
pub fn flowchart_mermaid(src: &str, from: &str) -> Result<String, JsError> {
    let lang = if from.is_empty() {
        crate::transpile::detect_lang(src)
    } else {
        from.parse().map_err(|e: String| JsError::new(&e))?
    };
    let graph = crate::flowchart::derive_flowchart(src, lang);
    MermaidRenderer.render(&graph).map_err(|e| JsError::new(&e))
}
