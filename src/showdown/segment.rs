// src/showdown/segment.rs
use crate::config::consts::*;
use crate::config::SegmentationGrammar;

use super::numeric::{classify_money, parse_number};

/// Token range `[start, end)` belonging to one contestant.
/// `money` is the index of the numeric money token (after a standalone `$`, if any).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub money: usize,
    pub end: usize,
}

fn is_all_caps(tok: &str) -> bool {
    tok.chars().any(char::is_alphabetic)
        && tok.chars().filter(|c| c.is_alphabetic()).all(char::is_uppercase)
}

/// Capitalized word that is not scoreboard vocabulary or shouted commentary.
pub fn is_name_token(tok: &str) -> bool {
    let Some(first) = tok.chars().next() else { return false };
    if NAME_KEYWORDS.contains(&tok) || CONJUNCTIONS.contains(&tok) {
        return false;
    }
    if BAD_NAME_TOKENS.contains(&tok.to_uppercase().as_str()) {
        return false;
    }
    if is_all_caps(tok) && tok.chars().count() > MAX_CAPS_NAME_LEN {
        return false;
    }
    first.is_alphabetic() && first.is_uppercase()
}

/// Number of consecutive name tokens starting at `from` (bounded by `end`).
pub fn name_run(tokens: &[String], from: usize, end: usize) -> usize {
    tokens[from.min(end)..end]
        .iter()
        .take_while(|t| is_name_token(t))
        .count()
}

/// Money anchor at `i`: returns the index of the numeric money token, or `None`.
fn money_anchor(tokens: &[String], i: usize) -> Option<usize> {
    let tok = tokens[i].as_str();
    if tok == CURRENCY_SIGN {
        let next = tokens.get(i + 1)?;
        return parse_number(next).map(|_| i + 1);
    }
    let prev = i.checked_sub(1).map(|p| tokens[p].as_str());
    classify_money(tok, prev).map(|_| i)
}

/// Partition the token stream into contestant slices.
/// Tokens before the first anchor (editorial lead-in) belong to no slice.
pub fn segment(tokens: &[String], grammar: SegmentationGrammar) -> Vec<Segment> {
    let n = tokens.len();
    let mut anchors: Vec<(usize, usize)> = Vec::new();
    let mut i = 0usize;

    while i < n {
        let Some(money) = money_anchor(tokens, i) else {
            i += 1;
            continue;
        };
        let names = name_run(tokens, money + 1, n);
        let accept = match grammar {
            SegmentationGrammar::Strict => names > 0,
            SegmentationGrammar::Permissive => true,
        };
        if accept {
            anchors.push((i, money));
            i = money + 1 + names;
        } else {
            i = money + 1;
        }
    }

    anchors
        .iter()
        .enumerate()
        .map(|(k, &(start, money))| Segment {
            start,
            money,
            end: anchors.get(k + 1).map_or(n, |&(next, _)| next),
        })
        .collect()
}
