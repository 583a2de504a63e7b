//! Image rendition rendering.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::{FilesError, Result};

/// Widths of the renditions produced for every uploaded image.
pub const THUMBNAIL_WIDTHS: [u32; 3] = [500, 250, 100];

/// Render one rendition per entry of [`THUMBNAIL_WIDTHS`].
///
/// Each rendition keeps the aspect ratio and is encoded in the source
/// format (JPEG stays JPEG, everything else becomes PNG).
pub fn render_thumbnails(content: &[u8]) -> Result<Vec<(u32, Vec<u8>)>> {
    let format = match image::guess_format(content) {
        Ok(ImageFormat::Jpeg) => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };
    let source = image::load_from_memory(content)
        .map_err(|e| FilesError::Job(format!("cannot decode image: {e}")))?;

    THUMBNAIL_WIDTHS
        .iter()
        .map(|&width| {
            let resized = source.resize(width, u32::MAX, FilterType::Triangle);
            encode(&resized, format).map(|bytes| (width, bytes))
        })
        .collect()
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    // JPEG has no alpha channel.
    let img = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => img.clone(),
    };

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)
        .map_err(|e| FilesError::Job(format!("cannot encode thumbnail: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgba([10u8, 200, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn test_render_png_widths_and_ratio() {
        let renditions = render_thumbnails(&png_bytes(1000, 500)).unwrap();

        let widths: Vec<u32> = renditions.iter().map(|(w, _)| *w).collect();
        assert_eq!(widths, vec![500, 250, 100]);

        for (width, bytes) in renditions {
            assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!(decoded.width(), width);
            assert_eq!(decoded.height(), width / 2);
        }
    }

    #[test]
    fn test_render_jpeg_stays_jpeg() {
        let img = ImageBuffer::from_pixel(600, 300, Rgb([1u8, 2, 3]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Jpeg)
            .unwrap();

        let renditions = render_thumbnails(&out.into_inner()).unwrap();
        assert_eq!(renditions.len(), 3);
        assert!(renditions
            .iter()
            .all(|(_, bytes)| image::guess_format(bytes).unwrap() == ImageFormat::Jpeg));
    }

    #[test]
    fn test_render_rejects_non_image() {
        let result = render_thumbnails(b"hello");
        assert!(matches!(result, Err(FilesError::Job(_))));
    }
}
