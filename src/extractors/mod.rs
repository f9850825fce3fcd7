//! Request extractors whose rejections are envelope-shaped.

mod json;
pub use json::JsonBody;
