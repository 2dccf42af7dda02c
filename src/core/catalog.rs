use scraper::{Html, Selector};
use url::Url;

use crate::domain::model::Shop;
use crate::utils::error::{Result, ScrapeError};

/// Extract the shop list from the index page's sidebar menu.
///
/// An empty result is fatal: the sidebar selectors no longer matching
/// means the site layout changed, not that there are no shops.
pub fn extract_shops(html: &str, base_url: &str) -> Result<Vec<Shop>> {
    let document = Html::parse_document(html);
    let shop_links =
        Selector::parse("div#sidebar ul#left-category-shops li a").expect("valid selector");

    let mut shops = Vec::new();
    for link in document.select(&shop_links) {
        let name = link.text().collect::<String>().trim().to_string();

        let Some(href) = link.value().attr("href").filter(|h| !h.is_empty()) else {
            tracing::warn!("No URL found for shop: {}", name);
            continue;
        };

        shops.push(Shop {
            name,
            url: resolve_url(href, base_url),
        });
    }

    if shops.is_empty() {
        return Err(ScrapeError::EmptyCatalog);
    }

    tracing::info!("Found {} shops in sidebar", shops.len());
    Ok(shops)
}

/// Resolve a possibly relative href against the site base URL.
pub(crate) fn resolve_url(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }

    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            href.trim_start_matches('/')
        ),
    }
}
