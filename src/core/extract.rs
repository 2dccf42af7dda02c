use chrono::{Datelike, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};

use crate::core::catalog::resolve_url;
use crate::domain::model::Leaflet;
use crate::domain::services::dates;
use crate::utils::error::{Result, ScrapeError};

/// Selectors for one leaflet entry, parsed once per page.
struct LeafletSelectors {
    grid: Selector,
    items: Selector,
    title: Selector,
    shop_name: Selector,
    date_full: Selector,
    date_short: Selector,
    thumb_picture: Selector,
    thumb_plain: Selector,
    thumb_figure: Selector,
}

impl LeafletSelectors {
    fn new() -> Self {
        Self {
            grid: Selector::parse("div.letaky-grid").expect("valid selector"),
            items: Selector::parse("div.brochure-thumb.grid-item").expect("valid selector"),
            title: Selector::parse("h2").expect("valid selector"),
            shop_name: Selector::parse("span.shop-name").expect("valid selector"),
            date_full: Selector::parse("span.hidden-sm").expect("valid selector"),
            date_short: Selector::parse("span.visible-sm").expect("valid selector"),
            thumb_picture: Selector::parse("div.image-wrapper picture img")
                .expect("valid selector"),
            thumb_plain: Selector::parse("div.image-wrapper img").expect("valid selector"),
            thumb_figure: Selector::parse("figure img").expect("valid selector"),
        }
    }
}

/// Extract every leaflet from one shop page, in document order.
///
/// A single malformed entry never aborts the page: it is logged with
/// its shop and skipped, and the skip count is returned alongside the
/// parsed records.
pub fn extract_leaflets(
    html: &str,
    shop_name: Option<&str>,
    captured_at: NaiveDateTime,
    base_url: &str,
) -> (Vec<Leaflet>, usize) {
    let document = Html::parse_document(html);
    let selectors = LeafletSelectors::new();

    let Some(grid) = document.select(&selectors.grid).next() else {
        tracing::debug!(
            "Leaflet grid not found for {}",
            shop_name.unwrap_or("<unknown>")
        );
        return (Vec::new(), 0);
    };

    let mut leaflets = Vec::new();
    let mut skipped = 0;
    for (index, element) in grid.select(&selectors.items).enumerate() {
        match parse_leaflet(element, &selectors, shop_name, captured_at, base_url) {
            Ok(leaflet) => leaflets.push(leaflet),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    "Skipping leaflet #{} for {}: {}",
                    index + 1,
                    shop_name.unwrap_or("<unknown>"),
                    e
                );
            }
        }
    }

    (leaflets, skipped)
}

fn parse_leaflet(
    element: ElementRef<'_>,
    selectors: &LeafletSelectors,
    shop_name: Option<&str>,
    captured_at: NaiveDateTime,
    base_url: &str,
) -> Result<Leaflet> {
    let title = element
        .select(&selectors.title)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::InvalidRecord {
            reason: "title element not found".to_string(),
        })?;

    let thumbnail =
        extract_thumbnail(element, selectors).ok_or_else(|| ScrapeError::InvalidRecord {
            reason: "thumbnail image not found".to_string(),
        })?;
    let thumbnail = resolve_url(&thumbnail, base_url);

    let shop_name = match shop_name {
        Some(name) => name.to_string(),
        None => element
            .select(&selectors.shop_name)
            .next()
            .map(element_text)
            .ok_or_else(|| ScrapeError::InvalidRecord {
                reason: "shop name element not found".to_string(),
            })?,
    };

    // The full-format span is preferred; the narrow-viewport variant
    // carries an abbreviated copy of the same range.
    let raw_dates = element
        .select(&selectors.date_full)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .or_else(|| element.select(&selectors.date_short).next().map(element_text))
        .ok_or_else(|| ScrapeError::InvalidRecord {
            reason: "validity text not found".to_string(),
        })?;

    let interval = dates::parse_date_range(&raw_dates, captured_at.year())?;

    let leaflet = Leaflet {
        title,
        thumbnail,
        shop_name,
        valid_from: interval.start,
        valid_to: interval.end,
        parsed_time: captured_at,
    };
    leaflet.validate()?;

    Ok(leaflet)
}

/// Thumbnail lookup with fallbacks: the regular markup wraps the image
/// in a `<picture>`, lazy-loaded variants move the URL to `data-src` or
/// `srcset`, and some shops use a bare `<figure>`.
fn extract_thumbnail(element: ElementRef<'_>, selectors: &LeafletSelectors) -> Option<String> {
    if let Some(img) = element.select(&selectors.thumb_picture).next() {
        let value = img.value();
        if let Some(src) = value.attr("src").filter(|s| !s.is_empty()) {
            return Some(src.to_string());
        }
        if let Some(src) = value.attr("data-src").filter(|s| !s.is_empty()) {
            return Some(src.to_string());
        }
        if let Some(srcset) = value.attr("srcset") {
            if let Some(first) = srcset
                .split(',')
                .next()
                .and_then(|entry| entry.split_whitespace().next())
            {
                return Some(first.to_string());
            }
        }
    }

    for selector in [&selectors.thumb_plain, &selectors.thumb_figure] {
        if let Some(img) = element.select(selector).next() {
            let value = img.value();
            if let Some(src) = value
                .attr("src")
                .or_else(|| value.attr("data-src"))
                .filter(|s| !s.is_empty())
            {
                return Some(src.to_string());
            }
        }
    }

    None
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
