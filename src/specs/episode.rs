// src/specs/episode.rs
//! Reading rules for one saved episode page.
//!
//! - Title: `div.post-headline h1`, else `<title>`.
//! - Footer: `div.post-footer`, date text before the first `|`, anchor texts as categories.
//! - Body: `div.post-bodycopy`, else `div.post`, else the whole document, rendered to
//!   lines and handed to the round extractor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::html::{div_inner_by_class, inner_after_open_tag, next_tag_block_ci, render_lines, strip_tags};
use crate::showdown::RawBlock;

use super::showdowns::extract_blocks;

lazy_regex!(ORDINAL = r"(\d+)(?:st|nd|rd|th)\b");
lazy_regex!(CANONICAL = r#"(?i)<link[^>]*\brel=["']canonical["'][^>]*\bhref=["']([^"']+)["']"#);

const DATE_FORMAT: &str = "%B %d, %Y";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub url: Option<String>,
    pub episode_title: Option<String>,
    pub raw_date: Option<String>,
    pub iso_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub showcase_showdowns: Vec<RawBlock>,
}

/// "May 1st, 2019" → 2019-05-01. `None` when the text isn't a date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL.replace_all(raw.trim(), "$1");
    NaiveDate::parse_from_str(&cleaned, DATE_FORMAT).ok()
}

fn title(doc: &str) -> Option<String> {
    let from_headline = div_inner_by_class(doc, "post-headline")
        .and_then(|h| next_tag_block_ci(h, "<h1", "</h1>", 0).map(|(s, e)| strip_tags(&h[s..e])));
    let text = from_headline.filter(|t| !t.is_empty()).or_else(|| {
        next_tag_block_ci(doc, "<title", "</title>", 0)
            .map(|(s, e)| strip_tags(inner_after_open_tag(&doc[s..e])))
    })?;
    Some(text).filter(|t| !t.is_empty())
}

fn anchors(fragment: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut from = 0usize;
    while let Some((s, e)) = next_tag_block_ci(fragment, "<a", "</a>", from) {
        let text = strip_tags(&fragment[s..e]);
        if !text.is_empty() {
            out.push(text);
        }
        from = e;
    }
    out
}

struct Footer {
    raw_date: Option<String>,
    iso_date: Option<String>,
    categories: Vec<String>,
}

fn footer(doc: &str) -> Footer {
    let Some(f) = div_inner_by_class(doc, "post-footer") else {
        return Footer { raw_date: None, iso_date: None, categories: Vec::new() };
    };
    let text = strip_tags(f);
    let date_part = text.split('|').next().unwrap_or_default().trim();
    let raw_date = Some(s!(date_part)).filter(|d| !d.is_empty());
    let iso_date = raw_date
        .as_deref()
        .and_then(parse_date)
        .map(|d| d.format("%Y-%m-%d").to_string());
    Footer { raw_date, iso_date, categories: anchors(f) }
}

pub fn canonical_url(doc: &str) -> Option<String> {
    CANONICAL.captures(doc).map(|c| c[1].to_string())
}

/// Build the episode record for one page. `url` overrides the page's canonical link.
pub fn parse_episode(doc: &str, url: Option<&str>) -> EpisodeRecord {
    let body = div_inner_by_class(doc, "post-bodycopy")
        .or_else(|| div_inner_by_class(doc, "post"))
        .unwrap_or(doc);
    let blocks = extract_blocks(&render_lines(body));
    let Footer { raw_date, iso_date, categories } = footer(doc);

    let rec = EpisodeRecord {
        url: url.map(str::to_string).or_else(|| canonical_url(doc)),
        episode_title: title(doc),
        raw_date,
        iso_date,
        categories,
        showcase_showdowns: blocks,
    };

    if rec.showcase_showdowns.is_empty() {
        logf!(
            "No Showcase Showdowns detected for {}",
            rec.episode_title.as_deref().or(rec.url.as_deref()).unwrap_or("page")
        );
    }
    rec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates() {
        assert_eq!(parse_date("May 1st, 2019"), NaiveDate::from_ymd_opt(2019, 5, 1));
        assert_eq!(parse_date(" September 22nd, 2008 "), NaiveDate::from_ymd_opt(2008, 9, 22));
        assert_eq!(parse_date("March 3rd 2010"), None);
        assert_eq!(parse_date("Posted in Season 37"), None);
    }

    #[test]
    fn title_falls_back_to_title_tag() {
        let doc = "<html><head><title>Ep &amp; Title</title></head><body></body></html>";
        assert_eq!(title(doc).as_deref(), Some("Ep & Title"));
        let doc = r#"<title>T</title><div class="post-headline"><h1>Headline</h1></div>"#;
        assert_eq!(title(doc).as_deref(), Some("Headline"));
    }

    #[test]
    fn footer_date_and_categories() {
        let doc = r#"<div class="post-footer">June 4th, 2012 | <a href="/c/1">Season 40</a>, <a href="/c/2">Drew</a></div>"#;
        let f = footer(doc);
        assert_eq!(f.raw_date.as_deref(), Some("June 4th, 2012"));
        assert_eq!(f.iso_date.as_deref(), Some("2012-06-04"));
        assert_eq!(f.categories, vec!["Season 40", "Drew"]);
    }
}
