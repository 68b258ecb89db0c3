//! Error types surfaced at startup and at the wasm boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the page. All of these happen once, at startup; after
/// wiring succeeds the page has no recoverable-failure surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("no window")]
    MissingWindow,
    #[error("no document")]
    MissingDocument,
    #[error("required element #{id} is missing from the page")]
    MissingElement { id: String },
    #[error("element #{id} is not a {expected}")]
    WrongElementType { id: String, expected: &'static str },
    #[error("invalid config: {0}")]
    Config(String),
    #[error("js error: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<PageError> for JsValue {
    fn from(err: PageError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Raised when the reveal trigger fires a second time.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RevealError {
    #[error("reveal sequence already started")]
    AlreadyStarted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_message_names_the_id() {
        let err = PageError::MissingElement {
            id: "ring-fill".into(),
        };
        assert_eq!(
            err.to_string(),
            "required element #ring-fill is missing from the page"
        );
    }

    #[test]
    fn wrong_type_message() {
        let err = PageError::WrongElementType {
            id: "girlName".into(),
            expected: "HtmlInputElement",
        };
        assert_eq!(err.to_string(), "element #girlName is not a HtmlInputElement");
    }
}
