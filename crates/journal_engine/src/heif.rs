//! HEIC/HEIF sources. Decoding needs the `heif` feature (system libheif).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::images::DecodedImage;
use crate::media::MaterializeError;

const HEIF_BRANDS: &[&[u8; 4]] = &[b"heic", b"heix", b"heim", b"heis", b"hevc", b"mif1", b"msf1"];

/// Sniff the ISO-BMFF `ftyp` brand, falling back to the extension.
pub fn is_heif(path: &Path) -> bool {
    if let Ok(mut file) = File::open(path) {
        let mut header = [0u8; 12];
        if file.read_exact(&mut header).is_ok() && &header[4..8] == b"ftyp" {
            return HEIF_BRANDS.iter().any(|brand| header[8..12] == brand[..]);
        }
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "heic" | "heif" | "hif"))
        .unwrap_or(false)
}

#[cfg(feature = "heif")]
pub fn decode(path: &Path) -> Result<DecodedImage, MaterializeError> {
    use image::{DynamicImage, RgbImage, RgbaImage};
    use journal_core::{ColorMode, ImageTraits, SourceEncoding};
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let unsupported = |what: &str, e: libheif_rs::HeifError| {
        MaterializeError::Unsupported(format!("{what}: {e}"))
    };

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_file(path.to_string_lossy().as_ref())
        .map_err(|e| unsupported("failed to read HEIF", e))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| unsupported("failed to get primary image", e))?;

    let has_alpha = handle.has_alpha_channel();
    let (chroma, channels) = if has_alpha {
        (RgbChroma::Rgba, 4usize)
    } else {
        (RgbChroma::Rgb, 3usize)
    };
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| unsupported("failed to decode HEIF", e))?;

    let planes = decoded.planes();
    let plane = planes
        .interleaved
        .ok_or_else(|| MaterializeError::Unsupported("HEIF has no interleaved plane".into()))?;

    // Rows may be padded past width * channels.
    let (width, height) = (plane.width, plane.height);
    let row_len = width as usize * channels;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in plane.data.chunks(plane.stride).take(height as usize) {
        let row = row
            .get(..row_len)
            .ok_or_else(|| MaterializeError::Unsupported("truncated HEIF plane".into()))?;
        pixels.extend_from_slice(row);
    }

    let too_small = || MaterializeError::Unsupported("HEIF plane smaller than image".into());
    let (image, mode) = if has_alpha {
        let buf = RgbaImage::from_raw(width, height, pixels).ok_or_else(too_small)?;
        (DynamicImage::ImageRgba8(buf), ColorMode::Rgba)
    } else {
        let buf = RgbImage::from_raw(width, height, pixels).ok_or_else(too_small)?;
        (DynamicImage::ImageRgb8(buf), ColorMode::Rgb)
    };

    Ok(DecodedImage {
        image,
        traits: ImageTraits {
            encoding: SourceEncoding::Heif,
            mode,
            palette_transparency: false,
        },
    })
}

#[cfg(not(feature = "heif"))]
pub fn decode(path: &Path) -> Result<DecodedImage, MaterializeError> {
    Err(MaterializeError::Unsupported(format!(
        "{} is HEIC/HEIF; rebuild with the `heif` feature to convert it",
        path.display()
    )))
}
