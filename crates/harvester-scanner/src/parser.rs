use crate::error::{Result, ScanError};
use crate::url_builder::resolve_link;
use harvester_core::{ListingEntry, PageContract};
use scraper::{ElementRef, Html, Selector};

/// One row of a listing page, as far as it could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRow {
    Entry(ListingEntry),
    Malformed { reason: String },
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScanError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Text content with runs of whitespace collapsed, as a browser renders it.
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads listing rows out of a rendered listing page.
#[derive(Debug)]
pub struct ListingParser {
    base_url: String,
    item: Selector,
    name: Selector,
    link: Selector,
}

impl ListingParser {
    pub fn new(contract: &PageContract) -> Result<Self> {
        Ok(Self {
            base_url: contract.base_url.clone(),
            item: compile(&contract.listing_item)?,
            name: compile(&contract.listing_name)?,
            link: compile(&contract.listing_link)?,
        })
    }

    /// Rows in document order. Rows without a name are `Malformed`;
    /// rows without a link are entries with no detail URL.
    pub fn parse(&self, html: &str) -> Vec<ListingRow> {
        let document = Html::parse_document(html);
        document
            .select(&self.item)
            .map(|item| self.parse_item(&item))
            .collect()
    }

    fn parse_item(&self, item: &ElementRef) -> ListingRow {
        let Some(name) = item.select(&self.name).next().map(|el| element_text(&el)) else {
            return ListingRow::Malformed {
                reason: "no name element".to_string(),
            };
        };

        let href = item
            .select(&self.link)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty());

        let detail_url = match href.map(|href| resolve_link(&self.base_url, href)) {
            None => None,
            Some(Ok(url)) => Some(url),
            Some(Err(e)) => {
                return ListingRow::Malformed {
                    reason: format!("{name}: {e}"),
                }
            }
        };

        ListingRow::Entry(ListingEntry::new(name, detail_url))
    }
}

/// Optional fields read from a profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub country: Option<String>,
    pub email: Option<String>,
}

/// Reads the optional profile fields out of a rendered profile page.
#[derive(Debug)]
pub struct ProfileParser {
    country: Selector,
    email: Selector,
}

impl ProfileParser {
    pub fn new(contract: &PageContract) -> Result<Self> {
        Ok(Self {
            country: compile(&contract.country.selector)?,
            email: compile(&contract.email.selector)?,
        })
    }

    /// Each field is looked up independently; absence of one never affects the other.
    pub fn parse(&self, html: &str) -> ProfileFields {
        let document = Html::parse_document(html);

        let country = document
            .select(&self.country)
            .next()
            .and_then(|el| last_token(&element_text(&el)));

        let email = document
            .select(&self.email)
            .next()
            .and_then(|el| el.value().attr("href"))
            .and_then(strip_mailto);

        ProfileFields { country, email }
    }
}

/// Last whitespace-delimited token, if any.
pub fn last_token(text: &str) -> Option<String> {
    text.split_whitespace().last().map(ToString::to_string)
}

/// Mail address behind a link target, without the `mailto:` scheme.
pub fn strip_mailto(href: &str) -> Option<String> {
    let href = href.trim();
    let address = href.strip_prefix("mailto:").unwrap_or(href).trim();
    (!address.is_empty()).then(|| address.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> PageContract {
        PageContract {
            base_url: "https://directory.test/".to_string(),
            ..PageContract::default()
        }
    }

    #[test]
    fn test_parse_listing_rows() {
        let html = r#"
            <div class="results">
                <div class="list-element">
                    <h3>Jane Q. Public</h3>
                    <a href="/en/notary/jane">View profile</a>
                </div>
                <div class="list-element">
                    <h3>No Link</h3>
                </div>
                <div class="list-element">
                    <a href="/en/notary/nameless">View profile</a>
                </div>
            </div>
        "#;

        let parser = ListingParser::new(&contract()).expect("valid selectors");
        let rows = parser.parse(html);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            ListingRow::Entry(ListingEntry::new(
                "Jane Q. Public",
                Some("https://directory.test/en/notary/jane".to_string())
            ))
        );
        assert_eq!(rows[1], ListingRow::Entry(ListingEntry::new("No Link", None)));
        assert!(matches!(rows[2], ListingRow::Malformed { .. }));
    }

    #[test]
    fn test_name_with_inline_markup() {
        let html = r#"
            <div class="list-element">
                <h3>Jane <span>Q.</span>
                    Public</h3>
                <a href="/x">View profile</a>
            </div>
            <div class="list-element">
                <h3><b>Jean</b><i>-Luc</i> Dupont</h3>
            </div>
        "#;

        let parser = ListingParser::new(&contract()).expect("valid selectors");
        let names: Vec<_> = parser
            .parse(html)
            .into_iter()
            .map(|row| match row {
                ListingRow::Entry(entry) => entry.display_name,
                ListingRow::Malformed { reason } => panic!("unexpected malformed row: {reason}"),
            })
            .collect();

        assert_eq!(names, vec!["Jane Q. Public", "Jean-Luc Dupont"]);
    }

    #[test]
    fn test_empty_listing_page() {
        let parser = ListingParser::new(&contract()).expect("valid selectors");
        assert!(parser.parse("<html><body><p>No results</p></body></html>").is_empty());
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let contract = PageContract {
            listing_item: "div[".to_string(),
            ..contract()
        };
        assert!(matches!(
            ListingParser::new(&contract),
            Err(ScanError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_parse_profile_fields() {
        let contract = PageContract {
            country: harvester_core::FieldSelector::new(
                ".country",
                harvester_core::Presence::Expected,
            ),
            email: harvester_core::FieldSelector::new(
                ".mail a",
                harvester_core::Presence::Optional,
            ),
            ..contract()
        };
        let html = r#"
            <span class="country">Paris, France</span>
            <div class="mail"><a href="mailto:jane@example.com">Write</a></div>
        "#;

        let parser = ProfileParser::new(&contract).expect("valid selectors");
        let fields = parser.parse(html);
        assert_eq!(fields.country.as_deref(), Some("France"));
        assert_eq!(fields.email.as_deref(), Some("jane@example.com"));

        let fields = parser.parse(r#"<span class="country">Paris, France</span>"#);
        assert_eq!(fields.country.as_deref(), Some("France"));
        assert_eq!(fields.email, None);
    }

    #[test]
    fn test_last_token() {
        assert_eq!(last_token("Paris, France").as_deref(), Some("France"));
        assert_eq!(last_token("  Luxembourg \n").as_deref(), Some("Luxembourg"));
        assert_eq!(last_token("   "), None);
    }

    #[test]
    fn test_strip_mailto() {
        assert_eq!(
            strip_mailto("mailto:jane@example.com").as_deref(),
            Some("jane@example.com")
        );
        assert_eq!(
            strip_mailto("jane@example.com").as_deref(),
            Some("jane@example.com")
        );
        assert_eq!(strip_mailto("mailto:"), None);
    }
}
