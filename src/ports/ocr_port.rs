//! OCR engine port trait.

use crate::domain::error::TickerTrackError;

pub trait OcrPort {
    fn image_to_text(&self, image: &[u8]) -> Result<String, TickerTrackError>;
}
