//! Data models for the analysis API and both provider wire formats.
//!
//! - `request`: inbound request parsing/validation and response payloads
//! - `openai`: OpenAI chat completions types
//! - `gemini`: Gemini generateContent types

pub mod gemini;
pub mod openai;
pub mod request;

pub use request::{parse_body, AnalysisRequest, AnalysisResult, RawAnalysisRequest};
