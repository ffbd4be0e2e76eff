//! Image tagging service.
//!
//! Accepts an uploaded JPEG, PNG or WEBP image, asks an OpenAI-compatible
//! vision model to describe it, and returns a list of `{label, confidence}`
//! tags as JSON.
//!
//! - `POST /api/analyze` - multipart upload, field `image`
//! - `GET  /health` - liveness check
//! - `GET  /` - upload page

pub mod analyze;
pub mod config;
pub mod error;
pub mod format;
pub mod handlers;
pub mod normalize;
pub mod page;
pub mod router;
pub mod state;
pub mod vision;

pub use config::Config;
pub use error::AnalyzeError;
pub use format::ImageFormat;
pub use normalize::{parse_tags, Tag};
pub use router::build_app;
pub use state::AppState;
pub use vision::{OpenAiVision, VisionError, VisionModel};
