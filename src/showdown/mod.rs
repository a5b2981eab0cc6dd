// src/showdown/mod.rs
//! Round parser: raw fragment text in, structured `Round` out.
//!
//! Stages run strictly in order: tokenize, segment on money anchors, parse each
//! contestant slice, resolve the winner, bucket the scenario. `validate` is a
//! separate read-only pass over the finished round.
//!
//! Nothing here returns an error. Bad input shows up as warnings, a `parse_status`
//! of `error`, or `val_*` codes, and the batch layer routes the round accordingly.

pub mod contestant;
pub mod model;
pub mod numeric;
pub mod scenario;
pub mod segment;
pub mod tokens;
pub mod validate;
pub mod warnings;
pub mod winner;

pub use model::*;
pub use validate::validate;

use crate::config::ParsingPolicy;

use contestant::{parse_contestant, ParsedContestant};
use segment::segment;
use winner::resolve_winner;

/// One configured parser. Cheap to copy; holds no state between rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    policy: ParsingPolicy,
}

impl Pipeline {
    pub fn new(policy: ParsingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ParsingPolicy {
        self.policy
    }

    /// Parse and validate one block.
    pub fn process(&self, block: &RawBlock) -> Round {
        let mut round = self.parse(block);
        round.validation_errors = validate(&round);
        round
    }

    /// Parse one block without running the validator.
    pub fn parse(&self, block: &RawBlock) -> Round {
        self.parse_text(&block.label, &block.text)
    }

    pub fn parse_text(&self, label: &str, text: &str) -> Round {
        let toks = tokens::tokenize(text);
        self.parse_tokens(label, text, &toks)
    }

    pub fn parse_tokens(&self, label: &str, raw_text: &str, toks: &[String]) -> Round {
        let segs = segment(toks, self.policy.segmentation);

        let mut warns: Vec<String> = Vec::new();
        if segs.len() < 2 {
            warns.push(s!(warnings::TOO_FEW_CONTESTANTS));
        }

        let parsed: Vec<ParsedContestant> = segs
            .iter()
            .enumerate()
            .map(|(i, seg)| parse_contestant(toks, seg, i + 1, self.policy.second_spin))
            .collect();

        for p in &parsed {
            let c = &p.contestant;
            if !c.has_name() || c.first_spin().is_none() {
                warns.push(warnings::missing_core_fields(c.position));
            }
            if p.malformed_money {
                warns.push(warnings::malformed_money(c.position));
            }
            if p.dangling_marker {
                warns.push(warnings::missing_second_spin(c.position));
            }
        }

        let marked: Vec<bool> = parsed.iter().map(|p| p.advance_marker).collect();
        let mut contestants: Vec<Contestant> = parsed.into_iter().map(|p| p.contestant).collect();

        let resolution = resolve_winner(&mut contestants, &marked);
        warns.extend(resolution.warnings.iter().map(|w| w.to_string()));

        let parse_status = status(resolution.winner.is_some(), &warns);

        let mut round = Round {
            label: label.to_string(),
            raw_text: raw_text.to_string(),
            contestants,
            winner_index: resolution.winner,
            scenario: None,
            parse_status,
            warnings: warns,
            validation_errors: Vec::new(),
        };
        round.scenario = scenario::classify(&round);

        logd!(
            "Round {label:?}: {} contestants, winner={:?}, status={:?}, warnings={:?}",
            round.contestants.len(),
            round.winner_index,
            round.parse_status,
            round.warnings
        );
        round
    }
}

/// `error` without a winner or with a contestant missing its core fields;
/// otherwise `ok` when no warning fired, else `partial`.
fn status(has_winner: bool, warns: &[String]) -> ParseStatus {
    let missing_core = warns.iter().any(|w| warnings::is_missing_core_fields(w));
    if !has_winner || missing_core {
        ParseStatus::Error
    } else if warns.is_empty() {
        ParseStatus::Ok
    } else {
        ParseStatus::Partial
    }
}
