//! QR codes linking each detail page to the artist (or the event).

use image::{DynamicImage, GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    #[error("failed to encode QR code: {0}")]
    Encode(qrcode::types::QrError),
}

impl From<qrcode::types::QrError> for QrError {
    fn from(err: qrcode::types::QrError) -> Self {
        QrError::Encode(err)
    }
}

/// Picks what an artist's QR code points at: their profile URL if the handle already
/// is one, their Instagram profile if they have a handle, else the event page.
pub fn qr_target(handle: Option<&str>, eid: &str) -> String {
    match handle.map(str::trim).filter(|h| !h.is_empty()) {
        Some(url) if url.starts_with("http") => url.to_string(),
        Some(handle) => format!(
            "https://instagram.com/{}",
            handle.strip_prefix('@').unwrap_or(handle)
        ),
        None => format!("https://artb.art/event/{eid}"),
    }
}

/// Encodes `url` at medium error correction, without a quiet zone, as a greyscale
/// image roughly `pixels` wide (each module is a whole number of pixels, at least one).
pub fn generate(url: &str, pixels: u32) -> Result<DynamicImage, QrError> {
    let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::M)?;
    let modules = code.width() as u32;
    let scale = (pixels / modules.max(1)).max(1);
    let colors = code.to_colors();

    let size = modules * scale;
    let image = GrayImage::from_fn(size, size, |x, y| {
        let index = ((y / scale) * modules + (x / scale)) as usize;
        match colors.get(index) {
            Some(Color::Dark) => Luma([0u8]),
            _ => Luma([255u8]),
        }
    });

    Ok(DynamicImage::ImageLuma8(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    #[test]
    fn full_urls_are_used_verbatim() {
        assert_eq!(
            qr_target(Some("https://example.com/jane"), "AB2995"),
            "https://example.com/jane"
        );
    }

    #[test]
    fn handles_become_instagram_profiles() {
        assert_eq!(
            qr_target(Some("@jane.paints"), "AB2995"),
            "https://instagram.com/jane.paints"
        );
        assert_eq!(
            qr_target(Some("jane"), "AB2995"),
            "https://instagram.com/jane"
        );
    }

    #[test]
    fn missing_handles_fall_back_to_the_event() {
        assert_eq!(qr_target(None, "AB2995"), "https://artb.art/event/AB2995");
        assert_eq!(qr_target(Some("  "), "AB2995"), "https://artb.art/event/AB2995");
    }

    #[test]
    fn generates_square_image_without_border() {
        let image = generate("https://artb.art/event/AB2995", 256).unwrap();
        assert_eq!(image.width(), image.height());
        assert!(image.width() <= 256);
        assert!(image.width() > 128);
        // finder pattern in the top-left corner is dark when there is no quiet zone
        assert_eq!(image.to_luma8().get_pixel(0, 0).0, [0]);
    }

    #[test]
    fn oversized_payloads_fail() {
        let url = "x".repeat(5000);
        assert!(generate(&url, 256).is_err());
    }
}
