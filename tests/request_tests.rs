// Request parsing, validation, and normalization tests

use adlens::config::FetchConfig;
use adlens::error::AnalysisError;
use adlens::models::parse_body;
use adlens::prompt::PromptSet;
use adlens::vision::ImageFetcher;
use serde_json::json;

const PNG_B64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn valid_body() -> serde_json::Value {
    json!({
        "image_url": "https://example.com/creative.jpg",
        "brief": "Monsoon campaign",
        "brand_name": "Acme",
        "brand_description": "Household goods brand"
    })
}

#[test]
fn test_each_missing_field_fails_validation() {
    for field in ["image_url", "brief", "brand_name", "brand_description"] {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(field);

        let err = parse_body(&body.to_string())
            .unwrap()
            .validate()
            .unwrap_err();
        assert!(
            matches!(err, AnalysisError::Validation(_)),
            "removing {} should fail validation",
            field
        );
        assert!(err.to_string().contains(field));
    }
}

#[test]
fn test_complete_body_validates() {
    let request = parse_body(&valid_body().to_string())
        .unwrap()
        .validate()
        .unwrap();
    assert_eq!(request.brand_name, "Acme");
    assert_eq!(request.brief, "Monsoon campaign");
}

#[test]
fn test_string_wrapped_body_is_unwrapped() {
    let wrapped = serde_json::to_string(&valid_body().to_string()).unwrap();
    let request = parse_body(&wrapped).unwrap().validate().unwrap();
    assert_eq!(request.brand_name, "Acme");
}

#[test]
fn test_extra_fields_are_ignored() {
    let mut body = valid_body();
    body.as_object_mut()
        .unwrap()
        .insert("httpMethod".to_string(), json!("POST"));
    assert!(parse_body(&body.to_string()).is_ok());
}

#[test]
fn test_prompt_built_from_validated_request() {
    let request = parse_body(&valid_body().to_string())
        .unwrap()
        .validate()
        .unwrap();
    let prompts = PromptSet::build(&request);
    assert!(prompts.user.starts_with("Brief: Monsoon campaign"));
    assert!(prompts.user.contains("Brand Name: Acme"));
    assert!(prompts.user.ends_with("Brand Description: Household goods brand"));
}

#[test]
fn test_inline_data_uri_normalizes_without_network() {
    let fetcher = ImageFetcher::new(&FetchConfig::default()).unwrap();
    let uri = format!("data:image/png;base64,{}", PNG_B64);

    let image = tokio_test::block_on(fetcher.normalize(&uri)).unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.as_data_uri(), uri);
}
