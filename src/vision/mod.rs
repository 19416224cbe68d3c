//! Image acquisition and normalization.
//!
//! Accepts either an inline `data:image/` URI or a remote URL and
//! produces one canonical byte representation, ready for the
//! provider-specific encodings (base64 data URI for OpenAI, raw inline
//! data for Gemini).
//!
//! # Submodules
//!
//! - `models`: payload types, format detection, and size constraints.
//! - `fetch`: data-URI decoding and bounded remote download.

pub mod fetch;
pub mod models;

pub use fetch::{decode_data_uri, ImageFetcher, DATA_URI_PREFIX};
pub use models::{ImageFormat, NormalizedImage};
