pub mod config;
pub mod error;
pub mod figure;
pub mod render;
pub mod sample;
pub mod stat;
pub mod study;

pub use config::Config;
pub use error::{PlotError, Result};
pub use render::{PngRenderer, Renderer};
pub use study::{Study, StudyOutcome};
