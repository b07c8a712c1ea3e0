use hyper::http::uri::{InvalidUri, Uri};
use serde::Deserialize;
use thiserror::Error;

pub const TARGET_PLACEHOLDER: &str = "{target}";

#[derive(Error, Debug)]
pub enum UriTemplateError {
    #[error(r#"URI template "{0}" has no "{{target}}" placeholder"#)]
    NoPlaceholder(String),
    #[error(r#"URI template "{template}" does not give a valid URI: {error}"#)]
    Invalid { template: String, error: InvalidUri },
}

/// Provider endpoint with a `{target}` placeholder, e.g. `http://ip-api.com/json/{target}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct UriTemplate(String);

impl UriTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, UriTemplateError> {
        let template = template.into();
        if !template.contains(TARGET_PLACEHOLDER) {
            return Err(UriTemplateError::NoPlaceholder(template));
        }
        // Both an empty target and an address must give a valid URI
        for sample in ["", "127.0.0.1"] {
            if let Err(error) = template.replace(TARGET_PLACEHOLDER, sample).parse::<Uri>() {
                return Err(UriTemplateError::Invalid { template, error });
            }
        }
        Ok(Self(template))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn compose(&self, target: &str) -> Result<Uri, InvalidUri> {
        self.0.replace(TARGET_PLACEHOLDER, target).parse()
    }
}

impl TryFrom<String> for UriTemplate {
    type Error = UriTemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
