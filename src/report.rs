// src/report.rs
//! Error-channel records and the frequency report over them.

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::showdown::{Contestant, ParseStatus, Round};
use crate::store::EpisodeInput;

pub const UNKNOWN_ERROR: &str = "unknown_error";

/// One round that did not make it into the kept set, with its episode context.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorRecord {
    pub episode_title: Option<String>,
    pub iso_date: Option<String>,
    pub url: Option<String>,
    pub label: Option<String>,
    pub raw_text: String,
    pub parse_status: ParseStatus,
    pub parse_warnings: Vec<String>,
    pub validation_errors: Vec<String>,
    pub parsed_contestants: Vec<Contestant>,
    pub winner_name: Option<String>,
    pub winner_index: Option<usize>,
}

impl ErrorRecord {
    pub fn new(episode: &EpisodeInput, round: &Round) -> Self {
        Self {
            episode_title: episode.title().map(str::to_string),
            iso_date: episode.iso_date().map(str::to_string),
            url: episode.url().map(str::to_string),
            label: Some(round.label.clone()).filter(|l| !l.is_empty()),
            raw_text: round.raw_text.clone(),
            parse_status: round.parse_status,
            parse_warnings: round.warnings.clone(),
            validation_errors: round.validation_errors.clone(),
            parsed_contestants: round.contestants.clone(),
            winner_name: round.winner().map(|c| c.name.clone()),
            winner_index: round.winner_index,
        }
    }

    /// Warnings then validation codes; `unknown_error` when both are empty.
    pub fn codes(&self) -> Vec<&str> {
        let codes: Vec<&str> = self
            .parse_warnings
            .iter()
            .chain(&self.validation_errors)
            .map(String::as_str)
            .collect();
        if codes.is_empty() { vec![UNKNOWN_ERROR] } else { codes }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeCount<'a> {
    pub code: String,
    pub count: usize,
    pub examples: Vec<&'a ErrorRecord>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorSummary<'a> {
    pub total: usize,
    /// Most frequent first; ties keep first-seen order.
    pub codes: Vec<CodeCount<'a>>,
}

pub fn summarize(records: &[ErrorRecord], max_examples: usize) -> ErrorSummary<'_> {
    let mut codes: Vec<CodeCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for rec in records {
        for code in rec.codes() {
            let i = *index.entry(code.to_string()).or_insert_with(|| {
                codes.push(CodeCount { code: code.to_string(), count: 0, examples: Vec::new() });
                codes.len() - 1
            });
            let entry = &mut codes[i];
            entry.count += 1;
            if entry.examples.len() < max_examples {
                entry.examples.push(rec);
            }
        }
    }

    codes.sort_by(|a, b| b.count.cmp(&a.count)); // stable
    ErrorSummary { total: records.len(), codes }
}

fn opt(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("-")
}

fn fmt_vals(vals: impl Iterator<Item = Option<f64>>) -> String {
    let parts: Vec<String> = vals
        .map(|v| v.map_or_else(|| s!("-"), |x| format!("{x}")))
        .collect();
    format!("[{}]", parts.join(", "))
}

impl ErrorSummary<'_> {
    pub fn render(&self) -> String {
        let mut out = s!();
        let _ = writeln!(out, "=== ERROR DATASET SUMMARY ===");
        let _ = writeln!(out, "Total error showdowns: {}\n", self.total);

        let _ = writeln!(out, "=== ERROR TYPE FREQUENCY ===");
        for c in &self.codes {
            let _ = writeln!(out, "{}: {}", c.code, c.count);
        }

        let _ = writeln!(out, "\n=== EXAMPLES ===");
        for c in &self.codes {
            let _ = writeln!(out, "\n--- {} ---", c.code);
            for ex in &c.examples {
                let _ = writeln!(out, "Episode: {}   Date: {}", opt(&ex.episode_title), opt(&ex.iso_date));
                let _ = writeln!(out, "URL: {}", opt(&ex.url));
                let _ = writeln!(out, "Label: {}", opt(&ex.label));
                let _ = writeln!(out, "Raw text:\n  {}", ex.raw_text);
                let _ = writeln!(out, "Parsed contestants:");
                for p in &ex.parsed_contestants {
                    let _ = writeln!(
                        out,
                        "  - {}: spins={}, extras={}, total={}",
                        p.name,
                        fmt_vals(p.initial_spins.iter().map(|s| s.value)),
                        fmt_vals(p.spin_off_spins.iter().map(|s| Some(s.value))),
                        p.total.map_or_else(|| s!("-"), |t| format!("{t}")),
                    );
                }
                let _ = writeln!(out, "Winner: {}", opt(&ex.winner_name));
                let _ = writeln!(out, "Parse warnings: {:?}", ex.parse_warnings);
                let _ = writeln!(out, "Validation errors: {:?}", ex.validation_errors);
                let _ = writeln!(out, "{}", "-".repeat(60));
            }
        }
        out
    }
}
