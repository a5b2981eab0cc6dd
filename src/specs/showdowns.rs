// src/specs/showdowns.rs
//! Slices wheel-round fragments out of an episode page's rendered text.
//!
//! A page reads roughly:
//!
//! ```text
//! SHOWCASE SHOWDOWN #1          <- header, becomes the label
//! $1,250 Pat 35                 <- scoreboard starts at the first money-ish line
//! +                             <- continuations
//! 40
//! through to the showcase
//! * * *                         <- hard separator
//! (editorial prose)             <- any other line ends the block
//! SHOWCASES                     <- final showcases: stop scanning
//! ```

use crate::core::sanitize::normalize_ws;
use crate::showdown::RawBlock;

lazy_regex!(SHOWCASE_N = r"^showcase\s*#\d+\b");
lazy_regex!(SCOREBOARD_START = r"^\$?\s*[\d,]");
lazy_regex!(BARE_NUMBER = r"^[-+]?\d+(?:\.\d+)?$");
lazy_regex!(THROUGH = r"(?i)^through to the showcases?");
lazy_regex!(EVENT = r"(?i)^(?:bonus spin|spin[- ]off|busted|dollar)");
lazy_regex!(SEPARATOR = r"^\* \* \*$");

const DEFAULT_LABEL: &str = "Showcase Showdown";
const STOP_PREFIX: &str = "showcases";

fn is_header(norm: &str) -> bool {
    norm.starts_with("showcase showdown") || norm.starts_with("showdown") || SHOWCASE_N.is_match(norm)
}

fn is_scoreboard_start(line: &str) -> bool {
    SCOREBOARD_START.is_match(line)
}

fn is_continuation(line: &str) -> bool {
    BARE_NUMBER.is_match(line)
        || line == "+"
        || line == "-"
        || THROUGH.is_match(line)
        || EVENT.is_match(line)
}

#[derive(Default)]
struct Extractor {
    blocks: Vec<RawBlock>,
    label: Option<String>,
    buffer: Vec<String>,
    scoreboard: bool,
}

impl Extractor {
    fn flush(&mut self) {
        if let Some(label) = self.label.take() {
            let body = normalize_ws(&self.buffer.join("\n"));
            if !body.is_empty() {
                self.blocks.push(RawBlock::new(label, body));
            }
        }
        self.buffer.clear();
        self.scoreboard = false;
    }

    /// Feed one line. Returns `false` once the final-showcases section is reached.
    fn line(&mut self, raw: &str) -> bool {
        let stripped = raw.replace('\u{a0}', " ");
        let stripped = stripped.trim();
        let norm = normalize_ws(stripped).to_lowercase();

        if norm.starts_with(STOP_PREFIX) {
            self.flush();
            return false;
        }

        if is_header(&norm) {
            self.flush();
            self.label = Some(if stripped.is_empty() { s!(DEFAULT_LABEL) } else { s!(stripped) });
            return true;
        }

        if self.label.is_none() || stripped.is_empty() {
            return true;
        }

        if !self.scoreboard {
            if is_scoreboard_start(stripped) {
                self.scoreboard = true;
                self.buffer.push(s!(stripped));
            }
            return true;
        }

        if SEPARATOR.is_match(stripped) {
            self.flush();
        } else if is_scoreboard_start(stripped) || is_continuation(stripped) {
            self.buffer.push(s!(stripped));
        } else {
            self.flush();
        }
        true
    }
}

/// Scan rendered lines and return every wheel-round fragment, in page order.
pub fn extract_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<RawBlock> {
    let mut ex = Extractor::default();
    for l in lines {
        if !ex.line(l.as_ref()) {
            break;
        }
    }
    ex.flush();
    ex.blocks
}
