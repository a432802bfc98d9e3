use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat, ImageReader};
use journal_core::{
    classify, image_link, Classification, ColorMode, ImageTraits, SourceEncoding, TargetEncoding,
    TargetMode,
};
use journal_logging::{journal_debug, journal_warn};

use crate::heif;
use crate::media::{file_stem, MaterializeError, Materializer};
use crate::persist::{ensure_dir, AtomicFileWriter, WriteOutcome};

/// A fully decoded source image plus what the classifier needs to know about it.
pub struct DecodedImage {
    pub image: DynamicImage,
    pub traits: ImageTraits,
}

/// Decode `path`, sniffing the format from its content first.
pub fn decode_image(path: &Path) -> Result<DecodedImage, MaterializeError> {
    if heif::is_heif(path) {
        return heif::decode(path);
    }

    let read_err = |source| MaterializeError::Read {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .map_err(read_err)?
        .with_guessed_format()
        .map_err(read_err)?;
    let format = reader.format().ok_or_else(|| {
        MaterializeError::Unsupported(format!("unrecognised format for {}", path.display()))
    })?;
    let image = reader.decode()?;
    let palette_transparency = format == ImageFormat::Gif && gif_declares_transparency(path)?;
    let traits = image_traits(format, &image, palette_transparency);

    Ok(DecodedImage { image, traits })
}

/// Describe a decoded image the way the classifier expects.
///
/// The decoder expands palettes, so GIF frames are reported as palette images;
/// `palette_transparency` has to come from the file's own metadata.
pub fn image_traits(
    format: ImageFormat,
    image: &DynamicImage,
    palette_transparency: bool,
) -> ImageTraits {
    let encoding = format
        .extensions_str()
        .first()
        .map(|ext| SourceEncoding::from_name(ext))
        .unwrap_or_else(|| SourceEncoding::Other(format!("{format:?}").to_ascii_uppercase()));

    if format == ImageFormat::Gif {
        return ImageTraits {
            encoding,
            mode: ColorMode::P,
            palette_transparency,
        };
    }

    ImageTraits {
        encoding,
        mode: color_mode(image.color()),
        palette_transparency: false,
    }
}

/// Whether the first GIF frame names a transparent palette index, used or not.
pub fn gif_declares_transparency(path: &Path) -> Result<bool, MaterializeError> {
    let file = File::open(path).map_err(|source| MaterializeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(BufReader::new(file))?;
    let transparent = decoder
        .read_next_frame()?
        .map(|frame| frame.transparent.is_some())
        .unwrap_or(false);
    Ok(transparent)
}

fn color_mode(color: ColorType) -> ColorMode {
    match color {
        ColorType::L8 | ColorType::L16 => ColorMode::L,
        ColorType::La8 | ColorType::La16 => ColorMode::La,
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => ColorMode::Rgb,
        ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => ColorMode::Rgba,
        other => ColorMode::Other(format!("{other:?}")),
    }
}

/// Copies JPEG/PNG sources and converts everything else to JPEG or PNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageMaterializer;

impl Materializer for ImageMaterializer {
    fn materialize(&self, source: &Path, dest_dir: &Path) -> Result<String, MaterializeError> {
        ensure_dir(dest_dir)?;

        let decoded = decode_image(source)?;
        let decision = classify(&decoded.traits);
        let filename = format!(
            "{}.{}",
            file_stem(source)?,
            decision.target_encoding().extension()
        );
        let link = image_link(&filename);

        if dest_dir.join(&filename).exists() {
            journal_debug!("Image {} already present, skipping", filename);
            return Ok(link);
        }

        let writer = AtomicFileWriter::new(dest_dir.to_path_buf());
        let outcome = match decision {
            Classification::PassThrough { encoding } => {
                match writer.copy_once(source, &filename) {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        journal_warn!(
                            "Raw copy of {:?} failed ({}), re-saving decoded image",
                            source,
                            err
                        );
                        writer.write_once(&filename, &encode(&decoded.image, encoding)?)?
                    }
                }
            }
            Classification::Reencode { encoding, mode } => {
                journal_debug!(
                    "Converting {:?} from {} to {:?}",
                    source,
                    decoded.traits.encoding,
                    encoding
                );
                let converted = convert(decoded.image, mode);
                writer.write_once(&filename, &encode(&converted, encoding)?)?
            }
        };
        if outcome == WriteOutcome::AlreadyPresent {
            journal_debug!("Image {} appeared concurrently, kept existing", filename);
        }
        Ok(link)
    }
}

fn convert(image: DynamicImage, mode: TargetMode) -> DynamicImage {
    match mode {
        TargetMode::Rgb => DynamicImage::ImageRgb8(image.to_rgb8()),
        TargetMode::Rgba => DynamicImage::ImageRgba8(image.to_rgba8()),
    }
}

/// Serialize `image` as `encoding`, narrowing pixel layouts the encoder rejects.
pub fn encode(image: &DynamicImage, encoding: TargetEncoding) -> Result<Vec<u8>, MaterializeError> {
    let (format, pixels): (ImageFormat, Cow<'_, DynamicImage>) = match encoding {
        TargetEncoding::Jpeg => match image.color() {
            ColorType::L8 | ColorType::Rgb8 => (ImageFormat::Jpeg, Cow::Borrowed(image)),
            _ => (
                ImageFormat::Jpeg,
                Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
            ),
        },
        TargetEncoding::Png => match image.color() {
            ColorType::Rgb32F | ColorType::Rgba32F => (
                ImageFormat::Png,
                Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
            ),
            _ => (ImageFormat::Png, Cow::Borrowed(image)),
        },
    };

    let mut buf = Cursor::new(Vec::new());
    pixels.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}
