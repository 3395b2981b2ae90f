pub mod image_source;

pub use image_source::{InMemoryImageSource, PageImageSource};
