// src/showdown/winner.rs
use crate::config::consts::EPS;

use super::model::Contestant;
use super::warnings::*;

/// Outcome of the total-based strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByTotal {
    Winner(usize),
    /// Tied at the top and the spin-offs ran out before a single leader emerged.
    Unresolved,
    NoNonBust,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    pub winner: Option<usize>,
    pub warnings: Vec<&'static str>,
}

/// Indices whose `value` is the maximum among the given pairs.
fn leaders(vals: impl Iterator<Item = (usize, f64)>) -> Vec<usize> {
    let vals: Vec<(usize, f64)> = vals.collect();
    let Some(best) = vals.iter().map(|&(_, v)| v).reduce(f64::max) else {
        return Vec::new();
    };
    vals.iter()
        .filter(|&&(_, v)| (v - best).abs() < EPS)
        .map(|&(i, _)| i)
        .collect()
}

/// Highest contending total; ties go to spin-offs, one depth at a time.
pub fn by_total(contestants: &[Contestant]) -> ByTotal {
    let mut tied = leaders(
        contestants
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.contending_total().map(|t| (i, t))),
    );
    if tied.is_empty() {
        return ByTotal::NoNonBust;
    }

    let mut depth = 0usize;
    while tied.len() > 1 {
        let next = leaders(
            tied.iter()
                .filter_map(|&i| contestants[i].spin_off_at(depth).map(|v| (i, v))),
        );
        if next.is_empty() {
            return ByTotal::Unresolved;
        }
        tied = next;
        depth += 1;
    }
    ByTotal::Winner(tied[0])
}

/// Decide the advancing contestant and set `advanced` accordingly.
/// `marked[i]` is whether slice `i` carried an explicit advancement phrase.
pub fn resolve_winner(contestants: &mut [Contestant], marked: &[bool]) -> Resolution {
    let flagged: Vec<usize> = marked
        .iter()
        .enumerate()
        .filter(|&(i, &m)| m && i < contestants.len())
        .map(|(i, _)| i)
        .collect();

    for &i in &flagged {
        contestants[i].advanced = true;
    }

    match flagged.as_slice() {
        [one] => Resolution { winner: Some(*one), warnings: Vec::new() },
        [] if contestants.is_empty() => Resolution::default(),
        [] => match by_total(contestants) {
            ByTotal::Winner(i) => {
                contestants[i].advanced = true;
                Resolution { winner: Some(i), warnings: vec![WINNER_INFERRED_BY_TOTAL] }
            }
            ByTotal::Unresolved => Resolution { winner: None, warnings: vec![UNRESOLVED_TIE] },
            ByTotal::NoNonBust => Resolution { winner: None, warnings: vec![NO_NON_BUST_WINNER] },
        },
        _ => Resolution { winner: None, warnings: vec![MULTIPLE_ADVANCED_FLAGS] },
    }
}
