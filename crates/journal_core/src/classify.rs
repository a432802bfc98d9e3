use std::fmt;

/// Encoding an image was stored in, as reported by its decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEncoding {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Heif,
    Other(String),
}

impl SourceEncoding {
    /// Map a decoder format name (`"JPEG"`, `"jpg"`, `"HEIC"`, ...) to an encoding.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "JPEG" | "JPG" => SourceEncoding::Jpeg,
            "PNG" => SourceEncoding::Png,
            "GIF" => SourceEncoding::Gif,
            "BMP" => SourceEncoding::Bmp,
            "TIFF" | "TIF" => SourceEncoding::Tiff,
            "WEBP" => SourceEncoding::WebP,
            "HEIF" | "HEIC" => SourceEncoding::Heif,
            other => SourceEncoding::Other(other.to_string()),
        }
    }

    /// The encoding as a pass-through target, if it is already widely supported.
    pub fn as_supported(&self) -> Option<TargetEncoding> {
        match self {
            SourceEncoding::Jpeg => Some(TargetEncoding::Jpeg),
            SourceEncoding::Png => Some(TargetEncoding::Png),
            _ => None,
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEncoding::Jpeg => write!(f, "JPEG"),
            SourceEncoding::Png => write!(f, "PNG"),
            SourceEncoding::Gif => write!(f, "GIF"),
            SourceEncoding::Bmp => write!(f, "BMP"),
            SourceEncoding::Tiff => write!(f, "TIFF"),
            SourceEncoding::WebP => write!(f, "WEBP"),
            SourceEncoding::Heif => write!(f, "HEIF"),
            SourceEncoding::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Pixel layout of a decoded image, named after the usual mode letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// 8/16-bit grayscale.
    L,
    /// Grayscale with alpha.
    La,
    Rgb,
    Rgba,
    /// Palette based.
    P,
    Cmyk,
    /// 32-bit integer grayscale.
    I,
    /// 32-bit float grayscale.
    F,
    Other(String),
}

impl ColorMode {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "L" => ColorMode::L,
            "LA" => ColorMode::La,
            "RGB" => ColorMode::Rgb,
            "RGBA" => ColorMode::Rgba,
            "P" => ColorMode::P,
            "CMYK" => ColorMode::Cmyk,
            "I" => ColorMode::I,
            "F" => ColorMode::F,
            other => ColorMode::Other(other.to_string()),
        }
    }

    fn carries_alpha(&self) -> bool {
        matches!(self, ColorMode::Rgba | ColorMode::La)
    }
}

/// What the classifier needs to know about a decoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTraits {
    pub encoding: SourceEncoding,
    pub mode: ColorMode,
    /// Palette image declares a transparent entry.
    pub palette_transparency: bool,
}

/// Output encodings the materializer produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetEncoding {
    Jpeg,
    Png,
}

impl TargetEncoding {
    /// File extension for outputs in this encoding, lowercase without a dot.
    pub fn extension(self) -> &'static str {
        match self {
            TargetEncoding::Jpeg => "jpeg",
            TargetEncoding::Png => "png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetMode {
    Rgb,
    Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Bytes can be copied verbatim.
    PassThrough { encoding: TargetEncoding },
    /// Pixels must be converted to `mode` and written as `encoding`.
    Reencode {
        encoding: TargetEncoding,
        mode: TargetMode,
    },
}

impl Classification {
    pub fn target_encoding(&self) -> TargetEncoding {
        match *self {
            Classification::PassThrough { encoding } => encoding,
            Classification::Reencode { encoding, .. } => encoding,
        }
    }
}

/// Decide whether an image is copied as-is or re-encoded, and into what.
///
/// Alpha is only assumed for the RGBA/LA modes and for palette images that
/// declare transparency. Every other mode, CMYK and grayscale included, goes
/// to opaque JPEG.
pub fn classify(traits: &ImageTraits) -> Classification {
    if let Some(encoding) = traits.encoding.as_supported() {
        return Classification::PassThrough { encoding };
    }

    let has_alpha = traits.mode.carries_alpha()
        || (traits.mode == ColorMode::P && traits.palette_transparency);
    if has_alpha {
        Classification::Reencode {
            encoding: TargetEncoding::Png,
            mode: TargetMode::Rgba,
        }
    } else {
        Classification::Reencode {
            encoding: TargetEncoding::Jpeg,
            mode: TargetMode::Rgb,
        }
    }
}
