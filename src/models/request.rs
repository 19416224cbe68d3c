// Inbound analysis request and response types

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully validated analysis request. All fields are present and
/// non-empty once this type exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Either an inline `data:image/...` URI or an HTTP(S) URL.
    pub image_url: String,
    pub brief: String,
    pub brand_name: String,
    pub brand_description: String,
}

/// The raw shape of an incoming body before validation. Every field is
/// optional so that a missing-field failure can name what was missing
/// instead of surfacing as a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysisRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub brand_description: Option<String>,
}

impl RawAnalysisRequest {
    /// Require all four fields to be present and non-empty.
    pub fn validate(self) -> Result<AnalysisRequest> {
        let mut missing = Vec::new();

        fn take(field: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
            match field {
                Some(value) if !value.trim().is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        }

        let image_url = take(self.image_url, "image_url", &mut missing);
        let brief = take(self.brief, "brief", &mut missing);
        let brand_name = take(self.brand_name, "brand_name", &mut missing);
        let brand_description = take(self.brand_description, "brand_description", &mut missing);

        if !missing.is_empty() {
            return Err(AnalysisError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(AnalysisRequest {
            image_url,
            brief,
            brand_name,
            brand_description,
        })
    }
}

/// Parse a request body that may be a JSON object or a JSON string
/// containing JSON. Serverless-style triggers often double-encode the
/// body, so the string case is unwrapped one level before decoding.
pub fn parse_body(body: &str) -> Result<RawAnalysisRequest> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AnalysisError::InvalidRequest(format!("Malformed JSON body: {}", e)))?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| AnalysisError::InvalidRequest(format!("Malformed JSON body: {}", e)))?,
        other => other,
    };

    serde_json::from_value(value)
        .map_err(|e| AnalysisError::InvalidRequest(format!("Malformed request body: {}", e)))
}

/// Successful analysis payload returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub brand: String,
    pub brief: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_body() -> String {
        serde_json::json!({
            "image_url": "https://example.com/creative.jpg",
            "brief": "Summer sale launch",
            "brand_name": "Acme",
            "brand_description": "Household goods brand"
        })
        .to_string()
    }

    #[test]
    fn test_parse_object_body() {
        let raw = parse_body(&full_body()).unwrap();
        let req = raw.validate().unwrap();
        assert_eq!(req.brand_name, "Acme");
        assert_eq!(req.brief, "Summer sale launch");
    }

    #[test]
    fn test_parse_double_encoded_body() {
        // The object serialized again as a JSON string
        let wrapped = serde_json::to_string(&full_body()).unwrap();
        let raw = parse_body(&wrapped).unwrap();
        let req = raw.validate().unwrap();
        assert_eq!(req.brand_name, "Acme");
    }

    #[test]
    fn test_malformed_body_is_invalid_request() {
        let err = parse_body("{not json").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRequest(_)));
    }

    #[test]
    fn test_missing_fields_are_named() {
        let raw = parse_body(r#"{"image_url": "https://example.com/a.jpg"}"#).unwrap();
        let err = raw.validate().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("brief"));
        assert!(message.contains("brand_name"));
        assert!(message.contains("brand_description"));
        assert!(!message.contains("image_url"));
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let raw = parse_body(
            r#"{"image_url": "https://example.com/a.jpg", "brief": "  ", "brand_name": "Acme", "brand_description": "Goods"}"#,
        )
        .unwrap();
        let err = raw.validate().unwrap_err();
        assert!(err.to_string().contains("brief"));
    }
}
