//! Image inputs and their base64 encoding.
//!
//! An [`ImageInput`] is resolved to a single base64 string by [`encode_image`]
//! before it is embedded into a request as inline image data.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::{Error, Result, TRACING_TARGET};

/// Content type declared for inline image data when nothing more specific is known.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Image file extensions accepted as inputs (lowercase) and their content types.
pub const SUPPORTED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("gif", "image/gif"),
    ("heic", "image/heic"),
    ("heif", "image/heif"),
];

/// Where the image content comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Raw binary file content.
    Bytes(Bytes),
    /// Content that is already base64 text.
    Encoded(String),
    /// A file on disk, read to completion when encoded.
    File(PathBuf),
}

/// A single image to analyze, together with the name reported in batch results.
#[derive(Debug, Clone)]
pub struct ImageInput {
    name: String,
    source: ImageSource,
    mime_type: Option<String>,
}

impl ImageInput {
    /// Creates an input from raw binary content.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Bytes(data.into()),
            mime_type: None,
        }
    }

    /// Creates an input from base64 text; the text is sent as-is.
    pub fn from_base64(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ImageSource::Encoded(data.into()),
            mime_type: None,
        }
    }

    /// Creates an input backed by a file; the file name becomes the input name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            source: ImageSource::File(path),
            mime_type: None,
        }
    }

    /// Creates an input from a `data:image/...;base64,` URL.
    ///
    /// The declared media type of the URL becomes the input's MIME type.
    pub fn from_data_url(name: impl Into<String>, url: &str) -> Result<Self> {
        let (header, data) = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(','))
            .ok_or_else(|| Error::unsupported_format().with_message("Malformed data URL"))?;

        let mime_type = header.strip_suffix(";base64").ok_or_else(|| {
            Error::unsupported_format().with_message("Data URL is not base64 encoded")
        })?;

        if !mime_type.starts_with("image/") {
            return Err(Error::unsupported_format()
                .with_message(format!("Data URL media type '{mime_type}' is not an image")));
        }

        Ok(Self::from_base64(name, data).with_mime_type(mime_type))
    }

    /// Overrides the declared content type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Returns the name reported for this input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the content comes from.
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Returns the content type declared in the request.
    ///
    /// An explicit override wins; otherwise a recognized extension of the
    /// input name decides, falling back to [`DEFAULT_MIME_TYPE`].
    pub fn mime_type(&self) -> &str {
        if let Some(mime_type) = &self.mime_type {
            return mime_type;
        }

        mime_type_for_path(Path::new(&self.name)).unwrap_or(DEFAULT_MIME_TYPE)
    }
}

/// Returns whether the path has one of the [`SUPPORTED_IMAGE_TYPES`] extensions.
pub fn is_supported_image(path: &Path) -> bool {
    mime_type_for_path(path).is_some()
}

/// Maps a supported file extension to its image content type.
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?;
    SUPPORTED_IMAGE_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(extension))
        .map(|(_, mime_type)| *mime_type)
}

/// Resolves an image input into base64 text.
///
/// Raw bytes are encoded with the standard alphabet, base64 text is returned
/// unchanged, and files are read to completion before encoding.
///
/// # Errors
///
/// Returns [`ErrorKind::UnsupportedFormat`](crate::ErrorKind::UnsupportedFormat)
/// for empty content or a file that is not a supported image type and
/// [`ErrorKind::Encoding`](crate::ErrorKind::Encoding) when the file cannot be read.
pub async fn encode_image(input: &ImageInput) -> Result<String> {
    match input.source() {
        ImageSource::Bytes(data) => {
            ensure_not_empty(input, data.is_empty())?;
            Ok(STANDARD.encode(data))
        }
        ImageSource::Encoded(data) => {
            ensure_not_empty(input, data.trim().is_empty())?;
            Ok(data.clone())
        }
        ImageSource::File(path) => {
            if !is_supported_image(path) {
                return Err(Error::unsupported_format().with_message(format!(
                    "'{}' is not a supported image file",
                    path.display()
                )));
            }

            let data = tokio::fs::read(path).await.map_err(|e| {
                Error::encoding()
                    .with_message(format!("Failed to read '{}'", path.display()))
                    .with_source(e)
            })?;

            tracing::trace!(
                target: TRACING_TARGET,
                path = %path.display(),
                size = data.len(),
                "Read image file"
            );

            ensure_not_empty(input, data.is_empty())?;
            Ok(STANDARD.encode(data))
        }
    }
}

fn ensure_not_empty(input: &ImageInput, is_empty: bool) -> Result<()> {
    if is_empty {
        return Err(Error::unsupported_format()
            .with_message(format!("Image '{}' has no content", input.name())));
    }
    Ok(())
}
