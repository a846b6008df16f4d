//! The conversion engine: resolve a requested output extension against a
//! fragment's actual type and produce the converted bytes.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use pulldown_cmark::{html, Parser};
use tracing::warn;

use crate::registry::{transform_between, SupportedType, Transform};
use crate::{FragmentError, FragmentResult};

/// Result of a conversion request.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertOutcome {
    /// The payload under the resolved target type.
    Converted {
        data: Bytes,
        content_type: SupportedType,
    },
    /// The extension is unmapped, or the target type is not reachable from
    /// the source type. A routine outcome the HTTP layer turns into 415,
    /// not an error.
    Unsupported,
}

/// Convert `data` of type `source` into the type the `extension` requests.
///
/// Library failures while transforming bytes (corrupt image data and the
/// like) surface as [`FragmentError::Conversion`]; an unreachable target is
/// the [`ConvertOutcome::Unsupported`] outcome instead.
pub fn convert(
    source: SupportedType,
    data: &[u8],
    extension: &str,
) -> FragmentResult<ConvertOutcome> {
    let Some(target) = SupportedType::from_extension(extension) else {
        warn!(extension, "no media type mapped for requested extension");
        return Ok(ConvertOutcome::Unsupported);
    };
    let Some(transform) = transform_between(source, target) else {
        warn!(source = %source, target = %target, "conversion target not reachable");
        return Ok(ConvertOutcome::Unsupported);
    };

    let data = match transform {
        Transform::Identity | Transform::PassthroughRelabel => Bytes::copy_from_slice(data),
        Transform::MarkdownToHtml => render_markdown(data),
        Transform::ImageReencode(format) => reencode_image(data, format)?,
    };

    Ok(ConvertOutcome::Converted {
        data,
        content_type: target,
    })
}

fn render_markdown(data: &[u8]) -> Bytes {
    let source = String::from_utf8_lossy(data);
    let mut markup = String::new();
    html::push_html(&mut markup, Parser::new(&source));
    Bytes::from(markup)
}

fn reencode_image(data: &[u8], target: SupportedType) -> FragmentResult<Bytes> {
    let format = match target {
        SupportedType::ImagePng => ImageFormat::Png,
        SupportedType::ImageJpeg => ImageFormat::Jpeg,
        SupportedType::ImageWebp => ImageFormat::WebP,
        SupportedType::ImageGif => ImageFormat::Gif,
        other => return Err(FragmentError::unknown_type(other.as_mime())),
    };

    let img = image::load_from_memory(data).map_err(FragmentError::conversion)?;
    // JPEG has no alpha channel; drop it before encoding.
    let img = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)
        .map_err(FragmentError::conversion)?;
    Ok(Bytes::from(out.into_inner()))
}
