//! Legacy metafile pictures and the pass that rasterizes them.

use async_trait::async_trait;
use deck_core::convert::is_legacy_metafile;
use deck_core::types::{Element, Slide};
use thiserror::Error;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Why a picture could not be transcoded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranscodeError {
    #[error("no transcoder available")]
    Unavailable,

    #[error("transcoding failed: {0}")]
    Failed(String),
}

/// Converts base64 metafile data into base64 raster data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageTranscoder: Send + Sync {
    async fn transcode(&self, base64: &str) -> std::result::Result<String, TranscodeError>;
}

/// Transcoder for builds without metafile support. Every call fails, so
/// pictures keep their original source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranscoder;

#[async_trait]
impl ImageTranscoder for NoTranscoder {
    async fn transcode(&self, _base64: &str) -> std::result::Result<String, TranscodeError> {
        Err(TranscodeError::Unavailable)
    }
}

/// A recoverable problem met while importing.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    /// Zero-based slide index.
    pub slide: usize,
    pub element_id: String,
    pub message: String,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slide {}: {}", self.slide + 1, self.message)
    }
}

/// Rasterize every legacy metafile picture, one at a time in slide and
/// element order.
///
/// A picture whose transcode fails keeps its source and yields a notice.
pub async fn transcode_legacy_images<T>(slides: &mut [Slide], transcoder: &T) -> Vec<Notice>
where
    T: ImageTranscoder + ?Sized,
{
    let mut notices = Vec::new();

    for (index, slide) in slides.iter_mut().enumerate() {
        for element in &mut slide.elements {
            let Element::Image(image) = element else {
                continue;
            };
            if !is_legacy_metafile(&image.src) {
                continue;
            }

            let payload = data_url_payload(&image.src);
            match transcoder.transcode(payload).await {
                Ok(raster) => {
                    log::debug!("Transcoded legacy image {} on slide {}", image.id, index + 1);
                    image.src = if raster.starts_with("data:") {
                        raster
                    } else {
                        format!("{}{}", PNG_DATA_URL_PREFIX, raster)
                    };
                }
                Err(e) => {
                    log::warn!(
                        "Keeping original source for image {} on slide {}: {}",
                        image.id,
                        index + 1,
                        e
                    );
                    notices.push(Notice {
                        slide: index,
                        element_id: image.id.clone(),
                        message: format!("legacy image could not be converted ({})", e),
                    });
                }
            }
        }
    }

    notices
}

/// The base64 part of a data URL, or the whole source otherwise.
fn data_url_payload(src: &str) -> &str {
    match src.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((_, payload)) => payload,
        None => src,
    }
}
