use crate::*;
use base::Vec2;
use crates_image::ImageEncoder;

/// Decode an encoded image (format auto-detected) into packed RGB.
///
/// Alpha is dropped and 16-bit or float images are converted to 8-bit.
pub fn decode_rgb(data: &[u8]) -> Result<RgbImage, ImageError> {
    let decoded = crates_image::load_from_memory(data)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    RgbImage::from_raw(Vec2::new(width as usize, height as usize), rgb.into_raw())
}

/// Encode an RGB image as JPEG; `quality` is 1-100.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder
        .write_image(
            &image.data,
            image.width() as u32,
            image.height() as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Encode an RGB image as PNG (lossless).
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    let encoder = crates_image::codecs::png::PngEncoder::new(&mut buffer);
    encoder
        .write_image(
            &image.data,
            image.width() as u32,
            image.height() as u32,
            crates_image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}
