//! The closed set of supported media types and the conversion matrix.
//!
//! Everything that needs a validity or reachability decision consumes this
//! one table: construction validation, the `formats` derivation on a
//! fragment, and conversion legality. There is exactly one definition of
//! each rule.

use std::fmt;

use tracing::debug;

use crate::{FragmentError, FragmentResult};

/// One of the eight base media types the service stores.
///
/// Parsing a raw `Content-Type` header into this enum is the single
/// validation gate; once a value of this type exists, every derived query
/// (`legal_outputs`, `is_text`, transform selection) is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedType {
    TextPlain,
    TextMarkdown,
    TextHtml,
    ApplicationJson,
    ImagePng,
    ImageJpeg,
    ImageWebp,
    ImageGif,
}

/// All supported base types, in the order the service documents them.
pub const SUPPORTED_TYPES: [SupportedType; 8] = [
    SupportedType::TextPlain,
    SupportedType::TextMarkdown,
    SupportedType::TextHtml,
    SupportedType::ApplicationJson,
    SupportedType::ImagePng,
    SupportedType::ImageJpeg,
    SupportedType::ImageWebp,
    SupportedType::ImageGif,
];

const IMAGE_OUTPUTS: [SupportedType; 4] = [
    SupportedType::ImagePng,
    SupportedType::ImageJpeg,
    SupportedType::ImageWebp,
    SupportedType::ImageGif,
];

impl SupportedType {
    /// Match a bare `type/subtype` string (no parameters) against the
    /// registry. Case-insensitive.
    pub fn from_mime(base: &str) -> Option<Self> {
        match base.to_ascii_lowercase().as_str() {
            "text/plain" => Some(Self::TextPlain),
            "text/markdown" => Some(Self::TextMarkdown),
            "text/html" => Some(Self::TextHtml),
            "application/json" => Some(Self::ApplicationJson),
            "image/png" => Some(Self::ImagePng),
            "image/jpeg" => Some(Self::ImageJpeg),
            "image/webp" => Some(Self::ImageWebp),
            "image/gif" => Some(Self::ImageGif),
            _ => None,
        }
    }

    /// Match a raw `Content-Type` header value. Parameter suffixes such as
    /// `; charset=utf-8` are ignored for the check; callers preserve the raw
    /// header in storage.
    pub fn from_header(raw: &str) -> Option<Self> {
        let base = raw.split(';').next().unwrap_or_default().trim();
        Self::from_mime(base)
    }

    /// Map a requested output extension (`.html`, `html`) to a candidate
    /// target type. Unmapped extensions mean "not convertible".
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.strip_prefix('.').unwrap_or(extension);
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::TextPlain),
            "md" | "markdown" => Some(Self::TextMarkdown),
            "html" => Some(Self::TextHtml),
            "json" => Some(Self::ApplicationJson),
            "png" => Some(Self::ImagePng),
            "jpg" | "jpeg" => Some(Self::ImageJpeg),
            "webp" => Some(Self::ImageWebp),
            "gif" => Some(Self::ImageGif),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::TextMarkdown => "text/markdown",
            Self::TextHtml => "text/html",
            Self::ApplicationJson => "application/json",
            Self::ImagePng => "image/png",
            Self::ImageJpeg => "image/jpeg",
            Self::ImageWebp => "image/webp",
            Self::ImageGif => "image/gif",
        }
    }

    pub fn is_text(&self) -> bool {
        self.as_mime().starts_with("text/")
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self,
            Self::ImagePng | Self::ImageJpeg | Self::ImageWebp | Self::ImageGif
        )
    }

    /// The conversion matrix row for this type: every output type legally
    /// reachable from it. Always contains the type itself.
    pub fn legal_outputs(&self) -> &'static [SupportedType] {
        match self {
            Self::TextPlain => &[SupportedType::TextPlain],
            Self::TextMarkdown => &[
                SupportedType::TextPlain,
                SupportedType::TextMarkdown,
                SupportedType::TextHtml,
            ],
            Self::TextHtml => &[SupportedType::TextPlain, SupportedType::TextHtml],
            Self::ApplicationJson => &[
                SupportedType::TextPlain,
                SupportedType::ApplicationJson,
            ],
            // Every raster type may be re-encoded as any other, uniformly.
            Self::ImagePng | Self::ImageJpeg | Self::ImageWebp | Self::ImageGif => &IMAGE_OUTPUTS,
        }
    }
}

impl fmt::Display for SupportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// Returns true if we know how to work with this `Content-Type` header.
///
/// Pure apart from a diagnostic log line.
pub fn is_supported_type(raw: &str) -> bool {
    debug!(header = raw, "checking content type support");
    SupportedType::from_header(raw).is_some()
}

/// String-keyed form of the conversion matrix lookup.
///
/// Callers are expected to have validated the type at construction time, so
/// the `UnknownType` failure here is a programming error, not a user-facing
/// one.
pub fn legal_outputs(base: &str) -> FragmentResult<&'static [SupportedType]> {
    SupportedType::from_header(base)
        .map(|t| t.legal_outputs())
        .ok_or_else(|| FragmentError::unknown_type(base))
}

/// The action required to satisfy one (source, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Destination equals the source type; bytes pass through unchanged.
    Identity,
    /// Render markdown source into HTML markup.
    MarkdownToHtml,
    /// Re-encode the raster payload into the destination format.
    ImageReencode(SupportedType),
    /// Original bytes reinterpreted under the destination type, without
    /// transformation. This is how textual "downgrade" pairs (html→plain,
    /// json→plain, markdown→plain) have always behaved; compatibility
    /// requires keeping it, and keeping it here makes it one policy point.
    PassthroughRelabel,
}

/// Select the transform for a (source, destination) pair, or `None` when the
/// destination is not reachable from the source.
pub fn transform_between(source: SupportedType, dest: SupportedType) -> Option<Transform> {
    if !source.legal_outputs().contains(&dest) {
        return None;
    }
    if source == dest {
        return Some(Transform::Identity);
    }
    if source == SupportedType::TextMarkdown && dest == SupportedType::TextHtml {
        return Some(Transform::MarkdownToHtml);
    }
    if dest.is_image() {
        return Some(Transform::ImageReencode(dest));
    }
    Some(Transform::PassthroughRelabel)
}
