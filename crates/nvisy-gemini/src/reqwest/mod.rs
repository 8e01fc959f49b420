//! Reqwest-based HTTP transport.
//!
//! This module provides a reqwest-based implementation of the [`Transport`] trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use nvisy_gemini::reqwest::ReqwestTransport;
//! use nvisy_gemini::{GeminiConfig, ImageAnalyzer};
//!
//! let config = GeminiConfig::new(api_key);
//! let transport = ReqwestTransport::new(&config)?;
//! let analyzer = ImageAnalyzer::new(config, transport)?;
//! ```
//!
//! [`Transport`]: crate::Transport

mod transport;

pub use transport::ReqwestTransport;
