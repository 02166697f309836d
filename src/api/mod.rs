//! Lambda-facing proxy services and request processing

pub mod handler;
pub mod helpers;
pub mod image;
pub mod parsing;
pub mod summary;
pub mod text;

pub use image::ImageProxy;
pub use summary::SummaryProxy;
pub use text::TextProxy;
