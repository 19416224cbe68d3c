//! Prompt assembly for creative analysis.
//!
//! Both providers receive the same fixed system instruction and the same
//! templated user instruction; only the image encoding differs per
//! provider. Assembly is a pure function of the validated request.

use crate::models::AnalysisRequest;

/// Fixed system instruction shared by both providers.
pub const SYSTEM_PROMPT: &str = "You are a creative strategist with deep expertise in performance marketing creatives. \
You are from India and understand the consumer personas and market dynamics in India. \
Evaluate the attached creative from a performance marketing lens. \
Provide: an overall score, copy analysis, visual analysis, targeting/persona insights, \
performance prediction, and improvement areas. \
Keep it concise, in bullet points, and highlight key takeaways in **bold**.";

/// The assembled instruction pair for one analysis.
#[derive(Debug, Clone)]
pub struct PromptSet {
    pub system: &'static str,
    pub user: String,
}

impl PromptSet {
    pub fn build(request: &AnalysisRequest) -> Self {
        Self {
            system: SYSTEM_PROMPT,
            user: format!(
                "Brief: {}\nBrand Name: {}\nBrand Description: {}",
                request.brief, request.brand_name, request.brand_description
            ),
        }
    }
}
