//! Output formats for a built module graph

pub mod dot;
pub mod error;
pub mod json;
pub mod report;


pub use dot::{DotRenderer, RenderOptions};
pub use error::RenderError;
pub use json::{DEFAULT_JSON_FILE, JsonGraph, JsonLink, JsonNode};
pub use report::render_symbol_report;
