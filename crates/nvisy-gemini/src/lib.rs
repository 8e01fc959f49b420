#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for the main library.
pub const TRACING_TARGET: &str = "nvisy_gemini";

/// Tracing target for analyzer operations.
pub const TRACING_TARGET_CLIENT: &str = "nvisy_gemini::client";

/// Tracing target for transport operations.
pub const TRACING_TARGET_TRANSPORT: &str = "nvisy_gemini::transport";

mod analyzer;
mod batch;
mod config;
mod error;
mod image;
mod request;
mod response;
mod transport;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

pub use crate::analyzer::ImageAnalyzer;
pub use crate::batch::{BatchOutcome, BatchResult, BatchStatus};
pub use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiConfig};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::image::{
    DEFAULT_MIME_TYPE, ImageInput, ImageSource, SUPPORTED_IMAGE_TYPES, encode_image,
    is_supported_image, mime_type_for_path,
};
pub use crate::request::{
    AnalysisRequest, Content, GenerationConfig, GenerationConfigBuilder,
    GenerationConfigBuilderError, InlineData, Part,
};
pub use crate::response::AnalysisResult;
pub use crate::transport::{Transport, TransportResponse};
