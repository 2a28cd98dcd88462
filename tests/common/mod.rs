mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from coinshaper for tests
pub use coinshaper::{
    Binarization, ContourRetrieval, Rect, RectPair, RunSummary, Shaper, ShaperConfig, ShaperError,
};
