//! Tagging pipeline: sniff, encode, ask the model, normalize.

use std::time::Instant;

use crate::error::AnalyzeError;
use crate::format::ImageFormat;
use crate::normalize::{parse_tags, Tag};
use crate::vision::VisionModel;

/// Tags an uploaded image.
///
/// `declared_mime` is whatever the client sent; the MIME type embedded in the
/// outbound request is always the sniffed one.
pub async fn analyze_image(
    model: &dyn VisionModel,
    blob: &[u8],
    declared_mime: &str,
) -> Result<Vec<Tag>, AnalyzeError> {
    let start = Instant::now();

    let format = ImageFormat::detect(blob)?;
    if !format.matches_mime(declared_mime) {
        tracing::warn!(
            "Declared type {} does not match detected {}, using detected",
            declared_mime,
            format.mime()
        );
    }

    let data_uri = format.data_uri(blob);

    tracing::info!(
        "Sending {} byte {} image to {}",
        blob.len(),
        format.mime(),
        model.name()
    );

    let raw = model.complete(&data_uri).await?;
    tracing::debug!("Model response: {}", &raw[..floor_char_boundary(&raw, 500)]);

    let tags = parse_tags(&raw)?;

    tracing::info!(
        "Tagged image with {} tags in {}ms",
        tags.len(),
        start.elapsed().as_millis()
    );

    Ok(tags)
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
