//! Page contract for the target directory site.
//!
//! Every selector the harvester relies on lives in one [`PageContract`] value
//! that is handed to the parsers and the extractor at construction time. Tests
//! substitute their own contract (or their own HTML fixtures) without touching
//! global state.

use serde::{Deserialize, Serialize};

/// How often a field is expected to be present on a profile page.
///
/// The presence class decides the log severity used when the field is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Usually present; absence is logged as a warning.
    Expected,
    /// Frequently absent; absence is logged at debug level.
    Optional,
}

impl Presence {
    /// Log that `field` was not found for `subject` at the severity of this class.
    pub fn log_missing(self, field: &str, subject: &str) {
        match self {
            Self::Expected => tracing::warn!("{} not found for {}", field, subject),
            Self::Optional => tracing::debug!("{} not found for {}", field, subject),
        }
    }
}

/// A CSS selector for one profile field together with its presence class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    /// CSS selector locating the element
    pub selector: String,
    /// Expected presence of the element
    pub presence: Presence,
}

impl FieldSelector {
    /// Create a field selector.
    #[must_use]
    pub fn new(selector: impl Into<String>, presence: Presence) -> Self {
        Self {
            selector: selector.into(),
            presence,
        }
    }
}

/// Selectors and URL layout of the target site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageContract {
    /// Site root, e.g. `https://notaries-directory.eu/`
    pub base_url: String,
    /// Listing path relative to `base_url`; `{page}` is replaced by the page number
    pub listing_path: String,
    /// One listing row
    pub listing_item: String,
    /// Display name inside a listing row
    pub listing_name: String,
    /// Detail link inside a listing row
    pub listing_link: String,
    /// Element proving a profile page rendered
    pub profile_marker: String,
    /// Country text node; its last whitespace token is the country
    pub country: FieldSelector,
    /// Mail link; its `href` carries a `mailto:` target
    pub email: FieldSelector,
}

impl Default for PageContract {
    fn default() -> Self {
        Self {
            base_url: "https://notaries-directory.eu/".to_string(),
            listing_path: "en/search?page={page}".to_string(),
            listing_item: ".list-element".to_string(),
            listing_name: "h3".to_string(),
            listing_link: "a".to_string(),
            profile_marker: "#block-edn-theme-content > div > div > div > div:nth-of-type(1) > div:nth-of-type(1) > h1"
                .to_string(),
            country: FieldSelector::new(
                "#block-edn-theme-content > div > div > div > div:nth-of-type(1) > div:nth-of-type(2) > div > span",
                Presence::Expected,
            ),
            email: FieldSelector::new(
                "div.info-with-icon.link-redirect.mail > a",
                Presence::Optional,
            ),
        }
    }
}

impl PageContract {
    /// All selectors paired with their config field names.
    #[must_use]
    pub fn selectors(&self) -> [(&'static str, &str); 6] {
        [
            ("contract.listing_item", &self.listing_item),
            ("contract.listing_name", &self.listing_name),
            ("contract.listing_link", &self.listing_link),
            ("contract.profile_marker", &self.profile_marker),
            ("contract.country.selector", &self.country.selector),
            ("contract.email.selector", &self.email.selector),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_presence_classes() {
        let contract = PageContract::default();
        assert_eq!(contract.country.presence, Presence::Expected);
        assert_eq!(contract.email.presence, Presence::Optional);
        assert!(contract.listing_path.contains("{page}"));
    }

    #[test]
    fn test_presence_serialization() {
        let field = FieldSelector::new("span.country", Presence::Optional);
        let toml_str = toml::to_string(&field).expect("serialize field selector");
        assert!(toml_str.contains("presence = \"optional\""));

        let parsed: FieldSelector = toml::from_str(&toml_str).expect("parse field selector");
        assert_eq!(parsed, field);
    }

    #[test]
    fn test_selectors_are_non_empty() {
        let contract = PageContract::default();
        for (name, selector) in contract.selectors() {
            assert!(!selector.trim().is_empty(), "{name} is empty");
        }
    }
}
