//! Rendering of outline results.

mod json;
mod toc;

pub use json::{to_json, JsonFormat};
pub use toc::to_toc;
