// tests/extract.rs
use std::fs;

use showdown_scrape::batch;
use showdown_scrape::config::PipelineOptions;
use showdown_scrape::progress::CountingProgress;
use showdown_scrape::showdown::Scenario;
use showdown_scrape::specs::episode::parse_episode;
use showdown_scrape::store::{self, EpisodeInput};

const PAGE: &str = include_str!("fixtures/episode.html");

#[test]
fn page_fields_and_blocks() {
    let ep = parse_episode(PAGE, None);
    assert_eq!(ep.url.as_deref(), Some("https://example.org/?p=9773"));
    assert_eq!(ep.episode_title.as_deref(), Some("#4471K – Monday, June 4th"));
    assert_eq!(ep.raw_date.as_deref(), Some("June 4th, 2012"));
    assert_eq!(ep.iso_date.as_deref(), Some("2012-06-04"));
    assert_eq!(ep.categories, vec!["Season 40", "Drew Carey"]);

    let labels: Vec<&str> = ep.showcase_showdowns.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["SHOWCASE SHOWDOWN #1", "SHOWCASE SHOWDOWN #2"]);
    assert_eq!(
        ep.showcase_showdowns[1].text,
        "$1,000 Ann 50 30 $800 Bo 50 45 $900 Cy 15 + 10"
    );
}

#[test]
fn explicit_url_wins_over_canonical() {
    let ep = parse_episode(PAGE, Some("file:///saved.html"));
    assert_eq!(ep.url.as_deref(), Some("file:///saved.html"));
}

#[test]
fn extract_then_parse_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let pages = tmp.path().join("pages");
    fs::create_dir_all(&pages).unwrap();
    fs::write(pages.join("a.html"), PAGE).unwrap();
    fs::write(pages.join("notes.txt"), "ignored").unwrap();

    let paths = batch::page_paths(&[pages]).unwrap();
    assert_eq!(paths.len(), 1);

    let extracted = batch::extract_pages(&paths, None);
    let dir_hint = format!("{}/", tmp.path().join("json").display());
    let saved = store::save_episodes(&dir_hint, &extracted, true).unwrap();
    assert!(saved.ends_with("episodes.json"));

    let episodes: Vec<EpisodeInput> = store::load_episodes(&saved).unwrap();
    let out = batch::run(&episodes, &PipelineOptions::default(), None, None);
    assert_eq!(out.summary.kept, 2);
    assert_eq!(out.summary.scenarios, [0, 1, 1]);

    let rounds = &out.structured[0].parsed_showdowns;
    assert_eq!(rounds[0].scenario, Some(Scenario::BustPresent));
    assert_eq!(rounds[0].winner().map(|c| c.name.as_str()), Some("Terri"));
    assert_eq!(rounds[1].winner().map(|c| c.name.as_str()), Some("Bo"));
}

#[test]
fn pages_without_rounds_are_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let empty = tmp.path().join("b.html");
    fs::write(&empty, "<html><title>Quiet day</title><body><p>No wheel today.</p></body></html>").unwrap();
    let full = tmp.path().join("a.html");
    fs::write(&full, PAGE).unwrap();

    let mut prog = CountingProgress::default();
    let paths = batch::page_paths(&[tmp.path().to_path_buf()]).unwrap();
    let eps = batch::extract_pages(&paths, Some(&mut prog));

    assert_eq!(eps.len(), 2);
    assert_eq!((prog.total, prog.done, prog.failed), (2, 2, 0));
    assert_eq!(prog.messages.len(), 1);
    assert!(prog.messages[0].ends_with("b.html: no Showcase Showdowns found"), "{:?}", prog.messages);
}
