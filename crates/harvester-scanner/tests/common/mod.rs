//! HTML fixtures shaped like the directory site.

#![allow(dead_code)]

use harvester_core::{AppConfig, PageContract};
use harvester_scanner::build_listing_url;
use std::path::Path;

pub const BASE_URL: &str = "https://directory.test/";

pub fn contract() -> PageContract {
    PageContract {
        base_url: BASE_URL.to_string(),
        ..PageContract::default()
    }
}

/// Config with no settle or stagger delays, writing to `store`.
pub fn config(store: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.contract = contract();
    config.scraping.settle_ms = 0;
    config.scraping.stagger_ms = 0;
    config.scraping.wait_timeout_secs = 1;
    config.store.path = store.to_path_buf();
    config
}

pub fn listing_url(page: u32) -> String {
    build_listing_url(&contract(), page).expect("listing URL")
}

pub fn profile_url(slug: &str) -> String {
    format!("{BASE_URL}en/notary/{slug}")
}

/// A listing page with one row per `(name, href)`.
pub fn listing_page(entries: &[(&str, Option<&str>)]) -> String {
    let rows: String = entries
        .iter()
        .map(|(name, href)| match href {
            Some(href) => format!(
                r#"<div class="list-element"><h3>{name}</h3><a href="{href}">View profile</a></div>"#
            ),
            None => format!(r#"<div class="list-element"><h3>{name}</h3></div>"#),
        })
        .collect();
    format!(r#"<html><body><div class="results">{rows}</div></body></html>"#)
}

pub fn empty_listing_page() -> String {
    r#"<html><body><div class="results"><p>No results</p></div></body></html>"#.to_string()
}

/// A rendered profile page carrying the title marker.
pub fn profile_page(name: &str, country: Option<&str>, email: Option<&str>) -> String {
    let country = country
        .map(|c| format!("<div><div><span>{c}</span></div></div>"))
        .unwrap_or_default();
    let mail = email
        .map(|e| {
            format!(r#"<div class="info-with-icon link-redirect mail"><a href="mailto:{e}">{e}</a></div>"#)
        })
        .unwrap_or_default();

    format!(
        r#"<html><body>
        <div id="block-edn-theme-content">
          <div><div><div>
            <div>
              <div><h1>{name}</h1></div>
              {country}
            </div>
          </div></div></div>
          {mail}
        </div>
        </body></html>"#
    )
}
