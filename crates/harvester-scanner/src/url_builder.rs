use crate::error::{Result, ScanError};
use harvester_core::PageContract;
use url::Url;

/// URL of listing page `page`: `listing_path` with `{page}` filled in, joined onto `base_url`.
pub fn build_listing_url(contract: &PageContract, page: u32) -> Result<String> {
    let path = contract.listing_path.replace("{page}", &page.to_string());
    resolve_link(&contract.base_url, &path)
}

/// Resolve a possibly relative `href` against `base_url`.
pub fn resolve_link(base_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(base_url).map_err(|e| ScanError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    base.join(href.trim())
        .map(String::from)
        .map_err(|e| ScanError::InvalidUrl {
            url: href.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_listing_url_from_defaults() {
        let contract = PageContract::default();
        let url = build_listing_url(&contract, 0).expect("should build listing URL");
        assert_eq!(url, "https://notaries-directory.eu/en/search?page=0");

        let url = build_listing_url(&contract, 12).expect("should build listing URL");
        assert_eq!(url, "https://notaries-directory.eu/en/search?page=12");
    }

    #[test]
    fn test_resolve_relative_and_absolute_links() {
        assert_eq!(
            resolve_link("https://directory.test/en/search?page=1", "/en/notary/jane").unwrap(),
            "https://directory.test/en/notary/jane"
        );
        assert_eq!(
            resolve_link("https://directory.test/", "https://other.test/p/1").unwrap(),
            "https://other.test/p/1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let contract = PageContract {
            base_url: "not a url".to_string(),
            ..PageContract::default()
        };
        assert!(matches!(
            build_listing_url(&contract, 0),
            Err(ScanError::InvalidUrl { .. })
        ));
    }
}
