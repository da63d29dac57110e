//! dncl-bridge: bidirectional source-to-source translation between Python
//! and the DNCL pseudocode notation used in Common Test exam materials, plus
//! a flowchart deriver over the same line-structure analysis.
//!
//! Public API: `to_dncl()`, `to_python()`, `detect_lang()`,
//! `derive_flowchart()`.

pub mod classify;
pub mod config;
pub mod flowchart;
pub mod syntax;
pub mod transpile;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::Config;
pub use flowchart::mermaid::{FlowRenderer, MermaidRenderer};
pub use flowchart::{
    FlowEdge, FlowGraph, FlowNode, NodeShape, derive_flowchart, derive_flowchart_with,
};
pub use syntax::types::{EdgeLabel, SourceLang, Statement};
pub use transpile::{
    detect_lang, to_dncl, to_dncl_with, to_python, to_python_with, transpile, transpile_with,
};
