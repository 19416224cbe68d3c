//! The capability interface shared by both inference providers.
//!
//! The two analysis pipelines are identical except for image encoding
//! and invocation details, so everything above the provider call is
//! written once against `ImageAnalysisProvider`.

use crate::error::Result;
use crate::prompt::PromptSet;
use crate::vision::NormalizedImage;
use async_trait::async_trait;

/// One synchronous multimodal completion: system text + user text +
/// image in, one distilled critique out.
#[async_trait]
pub trait ImageAnalysisProvider: Send + Sync {
    /// Short provider name used in routes, logs, and metrics.
    fn name(&self) -> &'static str;

    /// Submit the prompts and normalized image, returning the trimmed
    /// textual critique. Implementations must verify their credential
    /// before any network call and never retry.
    async fn analyze(&self, prompts: &PromptSet, image: &NormalizedImage) -> Result<String>;
}

/// Extract a human-readable message from a provider error body.
///
/// Both providers wrap failures as `{"error": {"message": ...}}`; fall
/// back to the raw body when the shape differs.
pub fn extract_error_message(response_text: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorResponse {
        error: Option<ErrorDetail>,
    }

    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
        status: Option<String>,
    }

    if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
        if let Some(error) = error_resp.error {
            return error.message.or(error.status);
        }
    }
    None
}

/// Substitute a fixed fallback sentence for low-information replies.
///
/// The phrase set is matched case-insensitively against the trimmed
/// summary. Anything else passes through unchanged.
pub fn guard_terse_reply(summary: String, phrases: &[String], fallback: &str) -> String {
    let lowered = summary.to_lowercase();
    if phrases.iter().any(|p| p.to_lowercase() == lowered) {
        fallback.to_string()
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases() -> Vec<String> {
        ["ok", "fine", "good", "looks fine"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    const FALLBACK: &str = "The image looks aligned and acceptable.";

    #[test]
    fn test_terse_reply_is_replaced() {
        let out = guard_terse_reply("Fine".to_string(), &phrases(), FALLBACK);
        assert_eq!(out, FALLBACK);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let out = guard_terse_reply("LOOKS FINE".to_string(), &phrases(), FALLBACK);
        assert_eq!(out, FALLBACK);
    }

    #[test]
    fn test_substantive_reply_passes_through() {
        let summary = "**Overall score: 7/10.** Strong hook, weak CTA.".to_string();
        let out = guard_terse_reply(summary.clone(), &phrases(), FALLBACK);
        assert_eq!(out, summary);
    }

    #[test]
    fn test_phrase_inside_longer_reply_is_not_replaced() {
        let summary = "Fine work on the palette, but the copy drags.".to_string();
        let out = guard_terse_reply(summary.clone(), &phrases(), FALLBACK);
        assert_eq!(out, summary);
    }
}
