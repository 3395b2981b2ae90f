pub mod annotate;
pub mod compose;
pub mod geometry;
pub mod layout;
pub mod score;

pub use annotate::SheetAnnotator;
pub use geometry::{map_to_pixels, PixelRect};
pub use layout::{normalize_layout, PageRectangles};
pub use score::{check_multiple, classify_subjective, ObjectiveVerdict, SubjectiveVerdict};
