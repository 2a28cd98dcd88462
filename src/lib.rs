pub mod compose;
pub mod config;
pub mod detection;
pub mod error;
pub mod matching;
pub mod models;
pub mod shaper;

pub use config::{Binarization, ContourRetrieval, ShaperConfig};
pub use detection::{Detection, DetectionPipeline};
pub use error::{Result, ShaperError};
pub use matching::{match_rects, rect_compare};
pub use models::{Contour, Rect, RectPair};
pub use shaper::{RunSummary, Shaper};
