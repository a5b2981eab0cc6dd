// tests/batch_e2e.rs
use std::fs;

use serde_json::{json, Value};

use showdown_scrape::batch;
use showdown_scrape::config::{OutputOptions, PipelineOptions, TableFormat};
use showdown_scrape::csv::{parse_rows, CONTESTANT_COLUMNS};
use showdown_scrape::report;
use showdown_scrape::store;

fn write_episodes(dir: &std::path::Path) -> std::path::PathBuf {
    let eps = json!([
        {
            "url": "https://example.org/?p=1",
            "episode_title": "Episode 1",
            "iso_date": "2012-06-04",
            "categories": ["Season 40"],
            "showcase_showdowns": [
                {"label": "SS #1", "text": "$1,000 Ann 35 + 40 $800 Bo 55 + 10 $900 Cy 60 + 25"},
                {"label": "SS #2", "text": "$700 Dee 60 + 55 $650 Eve 50 + 45 $600 Fay 20 + 70"}
            ]
        },
        {
            "episode_title": "Episode 2",
            "showcase_showdowns": [
                {"label": "SS #1", "text": "$500 Gus 50 + 50 $400 Hal 50 + 50"},
                {"label": "SS #2", "text": null}
            ]
        }
    ]);
    let path = dir.join("episodes.json");
    fs::write(&path, serde_json::to_string_pretty(&eps).unwrap()).unwrap();
    path
}

fn read(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn parse_writes_every_output() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_episodes(tmp.path());
    let episodes = store::load_episodes(&input).unwrap();

    let out = batch::run(&episodes, &PipelineOptions::default(), None, None);
    let out_opts = OutputOptions {
        out_dir: tmp.path().join("out"),
        table: Some(TableFormat::Csv),
        pretty: true,
    };
    let written = out.write(&out_opts).unwrap();
    assert_eq!(written.len(), 6);

    let s = &out.summary;
    assert_eq!((s.total, s.kept, s.errors), (4, 2, 2));
    assert_eq!(s.scenarios, [1, 1, 0]);
    assert_eq!(s.episodes_with_kept, 1);

    // kept rounds stay under their episode, with pass-through metadata
    let structured = read(&out_opts.structured_path());
    assert_eq!(structured.as_array().unwrap().len(), 1);
    assert_eq!(structured[0]["url"], "https://example.org/?p=1");
    assert_eq!(structured[0]["categories"][0], "Season 40");
    assert_eq!(structured[0]["parsed_showdowns"].as_array().unwrap().len(), 2);

    let errors = read(&out_opts.errors_path());
    assert_eq!(errors.as_array().unwrap().len(), 2);
    assert_eq!(errors[0]["episode_title"], "Episode 2");
    assert_eq!(errors[0]["parse_warnings"][0], "unresolved_tie");
    assert_eq!(errors[1]["parse_warnings"][0], "non_text_input");

    let sc2 = read(&out_opts.scenario_path(2));
    assert_eq!(sc2[0]["label"], "SS #2");
    assert_eq!(sc2[0]["scenario"], 2);
    assert_eq!(sc2[0]["episode_title"], "Episode 1");
    assert_eq!(read(&out_opts.scenario_path(3)), json!([]));

    let table = fs::read_to_string(out_opts.table_path().unwrap()).unwrap();
    let rows = parse_rows(&table, ',');
    assert_eq!(rows.len(), 1 + 6);
    assert_eq!(rows[0].len(), CONTESTANT_COLUMNS.len());
    assert_eq!(rows[1][5], "Ann");
}

#[test]
fn error_report_reads_back_the_error_file() {
    let tmp = tempfile::tempdir().unwrap();
    let input = write_episodes(tmp.path());
    let episodes = store::load_episodes(&input).unwrap();
    let out = batch::run(&episodes, &PipelineOptions::default(), None, None);
    let out_opts = OutputOptions { out_dir: tmp.path().to_path_buf(), ..Default::default() };
    out.write(&out_opts).unwrap();

    let records = store::load_error_records(&out_opts.errors_path()).unwrap();
    assert_eq!(records, out.errors);

    let summary = report::summarize(&records, 1);
    let text = summary.render();
    assert!(text.contains("Total error showdowns: 2"));
    assert!(text.contains("unresolved_tie: 1"));
    assert!(text.contains("non_text_input: 1"));
}

#[test]
fn output_dir_that_is_a_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("taken");
    fs::write(&blocker, "x").unwrap();
    let out = batch::run(&[], &PipelineOptions::default(), None, None);
    let err = out
        .write(&OutputOptions { out_dir: blocker, ..Default::default() })
        .unwrap_err();
    assert!(matches!(err, showdown_scrape::Error::NotADirectory(_)));
}
