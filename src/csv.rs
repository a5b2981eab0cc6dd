// src/csv.rs
use std::io::{self, Write};
use std::mem::take;

use crate::batch::StructuredEpisode;
use crate::showdown::Contestant;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Trailing field/row, even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/* ---------------- Contestant table ---------------- */

pub const CONTESTANT_COLUMNS: &[&str] = &[
    "episode_title", "iso_date", "label", "scenario", "position", "name",
    "pre_round_winnings", "spin_1", "spin_2", "total", "bust",
    "spin_offs", "bonus_spins", "advanced",
];

fn num(v: Option<f64>) -> String {
    v.map(|x| format!("{x}")).unwrap_or_default()
}

fn contestant_cells(c: &Contestant) -> [String; 10] {
    let offs: Vec<String> = c.spin_off_spins.iter().map(|s| format!("{}", s.value)).collect();
    let bonus: Vec<String> = c
        .bonus_spins
        .iter()
        .map(|b| format!("{}@{}", num(b.wheel_value), b.cash_prize.map(|p| p.to_string()).unwrap_or_default()))
        .collect();
    [
        c.position.to_string(),
        c.name.clone(),
        c.pre_round_winnings.map(|w| w.to_string()).unwrap_or_default(),
        num(c.first_spin()),
        num(c.second_spin()),
        num(c.total),
        c.bust.to_string(),
        offs.join(";"),
        bonus.join(";"),
        c.advanced.to_string(),
    ]
}

/// One row per contestant of every kept round. Returns `(headers, rows)`.
pub fn contestant_table(episodes: &[StructuredEpisode]) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = CONTESTANT_COLUMNS.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();

    for ep in episodes {
        let title = ep.episode.title().unwrap_or_default();
        let date = ep.episode.iso_date().unwrap_or_default();
        for round in &ep.parsed_showdowns {
            let scenario = round.scenario.map(|s| s.number().to_string()).unwrap_or_default();
            for c in &round.contestants {
                let mut row = vec![
                    title.to_string(),
                    date.to_string(),
                    round.label.clone(),
                    scenario.clone(),
                ];
                row.extend(contestant_cells(c));
                rows.push(row);
            }
        }
    }
    (headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_round_trip() {
        let rows = vec![
            vec![s!("Ann"), s!("a,b"), s!("say \"hi\"")],
            vec![s!("Bo"), s!(""), s!("x")],
        ];
        let mut buf: Vec<u8> = Vec::new();
        for r in &rows {
            write_row(&mut buf, r, ',').unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Ann,\"a,b\",\"say \"\"hi\"\"\"\nBo,,x\n");
        assert_eq!(parse_rows(&text, ','), rows);
    }

    #[test]
    fn crlf_and_blank_lines() {
        let rows = parse_rows("a\tb\r\n\r\nc\td", '\t');
        assert_eq!(rows, vec![vec![s!("a"), s!("b")], vec![s!("c"), s!("d")]]);
    }
}
