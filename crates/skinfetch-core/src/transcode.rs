//! Payload transform applied between fetch and commit.

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

/// Turns a downloaded payload into the bytes written to disk.
/// Runs on the blocking pool; implementations may be CPU-heavy.
pub trait Transcode: Send + Sync {
    fn transcode(&self, payload: &[u8]) -> Result<Vec<u8>>;
}

/// Decode any supported image and re-encode it as JPEG at a fixed quality.
#[derive(Debug, Clone, Copy)]
pub struct JpegReencode {
    quality: u8,
}

impl JpegReencode {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

impl Transcode for JpegReencode {
    fn transcode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        let img = image::load_from_memory(payload).context("decode downloaded image")?;
        let rgb = img.to_rgb8();
        let mut out = Vec::with_capacity(payload.len());
        JpegEncoder::new_with_quality(&mut out, self.quality)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
            .context("encode jpeg")?;
        Ok(out)
    }
}

/// Writes payloads unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Transcode for Passthrough {
    fn transcode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        Ok(payload.to_vec())
    }
}
