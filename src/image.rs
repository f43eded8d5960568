use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;
use image::{ColorType, DynamicImage, GenericImageView};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Pdf};

pub enum RasterImageType {
    /// Baseline RGB JPEG data which PDF readers can decode themselves
    DirectlyEmbeddableJpeg(Vec<u8>),
    Image(DynamicImage),
}

/// A raster image which can be placed on any number of pages. Images are stored once
/// in the document and referenced by their [id_arena::Id].
pub struct Image {
    pub image: RasterImageType,
    pub width: f32,
    pub height: f32,
}

struct EncodeOutput {
    filter: Filter,
    bytes: Vec<u8>,
    mask: Option<Vec<u8>>,
}

impl Image {
    /// Decode an image from its encoded bytes (PNG, JPEG, ...)
    pub fn from_bytes(data: Vec<u8>) -> Result<Image, PDFError> {
        let format = image::guess_format(&data)?;
        let image = image::load_from_memory_with_format(&data, format)?;

        match (format, image.color()) {
            (image::ImageFormat::Jpeg, ColorType::Rgb8) => {
                let width = image.width() as f32;
                let height = image.height() as f32;

                Ok(Image {
                    image: RasterImageType::DirectlyEmbeddableJpeg(data),
                    width,
                    height,
                })
            }
            _ => Ok(Self::new_raster(image)),
        }
    }

    pub fn new_raster(image: DynamicImage) -> Image {
        let width = image.width() as f32;
        let height = image.height() as f32;
        Image {
            image: RasterImageType::Image(image),
            width,
            height,
        }
    }

    fn encode_raster(&self) -> EncodeOutput {
        match &self.image {
            RasterImageType::DirectlyEmbeddableJpeg(bytes) => EncodeOutput {
                filter: Filter::DctDecode,
                bytes: bytes.clone(),
                mask: None,
            },
            RasterImageType::Image(image) => {
                let level = CompressionLevel::DefaultLevel as u8;

                let mask = image.color().has_alpha().then(|| {
                    let alphas: Vec<u8> = image.pixels().map(|p| (p.2).0[3]).collect();
                    compress_to_vec_zlib(&alphas, level)
                });

                let bytes = compress_to_vec_zlib(image.to_rgb8().as_raw(), level);

                EncodeOutput {
                    filter: Filter::FlateDecode,
                    bytes,
                    mask,
                }
            }
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        image_index: usize,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs.gen(RefType::Image(image_index));
        let encoded = self.encode_raster();

        let mask_id = encoded
            .mask
            .as_ref()
            .map(|_| refs.gen(RefType::ImageMask(image_index)));

        let mut image = writer.image_xobject(id, encoded.bytes.as_slice());
        image.filter(encoded.filter);
        image.width(self.width as i32);
        image.height(self.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            image.s_mask(mask_id);
        }
        image.finish();

        // add a transparency mask if we have one
        if let (Some(mask_id), Some(mask)) = (mask_id, encoded.mask.as_ref()) {
            let mut s_mask = writer.image_xobject(mask_id, mask.as_slice());
            s_mask.filter(Filter::FlateDecode);
            s_mask.width(self.width as i32);
            s_mask.height(self.height as i32);
            s_mask.color_space().device_gray();
            s_mask.bits_per_component(8);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).expect("can encode fixture");
        bytes.into_inner()
    }

    #[test]
    fn png_is_reencoded() {
        let png = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]))),
            ImageOutputFormat::Png,
        );
        let image = Image::from_bytes(png).expect("png decodes");
        assert_eq!((image.width, image.height), (3.0, 2.0));
        assert!(matches!(image.image, RasterImageType::Image(_)));
    }

    #[test]
    fn rgb_jpeg_is_embedded_directly() {
        let jpeg = encode(
            DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([200, 10, 10]))),
            ImageOutputFormat::Jpeg(90),
        );
        let image = Image::from_bytes(jpeg).expect("jpeg decodes");
        assert!(matches!(
            image.image,
            RasterImageType::DirectlyEmbeddableJpeg(_)
        ));
    }

    #[test]
    fn alpha_produces_a_soft_mask() {
        let image = Image::new_raster(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([0, 0, 0, 128]),
        )));
        assert!(image.encode_raster().mask.is_some());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Image::from_bytes(b"definitely not an image".to_vec()).is_err());
    }
}
