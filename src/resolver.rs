//! Category and subcategory discovery from static HTML.
//!
//! Both levels are read from plain anchors. Category links on the homepage and
//! specialisation links on a category page share the `text-sm` class; the
//! location category lists its cities as "Jobs in <city>" anchors without it.

use crate::models::{CategoryLink, SubcategoryLink};
use crate::{CrawlError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Fan-out bound applied to every category page.
pub const MAX_SUBCATEGORIES: usize = 10;

const LINK_SELECTOR: &str = "a.text-sm[href]";
const ANY_LINK_SELECTOR: &str = "a[href]";
const CATEGORY_MARKER: &str = "jobs-by";
const LOCATION_MARKER: &str = "location";
const LOCATION_PREFIX: &str = "Jobs in";
const LOCATION_SEARCH_MARKER: &str = "/search/jobs-in-";
const SEARCH_MARKER: &str = "/search/";
const JOBS_SUFFIX: &str = "-jobs";

pub fn parse_categories(html: &str, base_url: &str) -> Result<Vec<CategoryLink>> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url)?;
    let selector = selector(LINK_SELECTOR)?;

    let categories = document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !href.contains(CATEGORY_MARKER) {
                return None;
            }
            let url = base.join(href).ok()?;
            Some(CategoryLink::new(anchor_text(&anchor), url.to_string()))
        })
        .collect();

    Ok(categories)
}

/// Picks the parsing strategy from the category URL alone; a location page
/// with no city anchors yields nothing rather than trying the general pattern.
pub fn parse_subcategories(
    html: &str,
    category: &CategoryLink,
    base_url: &str,
    limit: usize,
) -> Result<Vec<SubcategoryLink>> {
    if is_location_category(&category.url) {
        parse_location_subcategories(html, category, base_url, limit)
    } else {
        parse_search_subcategories(html, category, base_url, limit)
    }
}

pub fn is_location_category(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().contains(LOCATION_MARKER),
        Err(_) => url.contains(LOCATION_MARKER),
    }
}

fn parse_location_subcategories(
    html: &str,
    category: &CategoryLink,
    base_url: &str,
    limit: usize,
) -> Result<Vec<SubcategoryLink>> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url)?;
    let selector = selector(ANY_LINK_SELECTOR)?;

    let links = document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            let text = anchor_text(&anchor);
            let city = text.strip_prefix(LOCATION_PREFIX)?.trim();
            if !href.contains(LOCATION_SEARCH_MARKER) {
                return None;
            }
            let url = base.join(href).ok()?;
            Some(SubcategoryLink::new(city, url.to_string(), &category.name))
        })
        .take(limit)
        .collect();

    Ok(links)
}

fn parse_search_subcategories(
    html: &str,
    category: &CategoryLink,
    base_url: &str,
    limit: usize,
) -> Result<Vec<SubcategoryLink>> {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url)?;
    let selector = selector(LINK_SELECTOR)?;

    let links = document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !(href.contains(SEARCH_MARKER) && href.contains(JOBS_SUFFIX)) {
                return None;
            }
            let url = base.join(href).ok()?;
            Some(SubcategoryLink::new(
                anchor_text(&anchor),
                url.to_string(),
                &category.name,
            ))
        })
        .take(limit)
        .collect();

    Ok(links)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CrawlError::Selector(format!("{}: {:?}", css, e)))
}

/// Text nodes trimmed and joined with a single space.
fn anchor_text(anchor: &ElementRef<'_>) -> String {
    anchor
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
