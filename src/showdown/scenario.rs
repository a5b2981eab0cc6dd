// src/showdown/scenario.rs
use super::model::{Round, Scenario};

const CONTESTANTS_PER_ROUND: usize = 3;

/// Bucket a parsed round. `None` for anything outside the clean
/// three-contestant, no-bonus shape.
pub fn classify(round: &Round) -> Option<Scenario> {
    if round.contestants.len() != CONTESTANTS_PER_ROUND
        || round.has_bonus()
        || round.contestants.iter().any(|c| c.first_spin().is_none())
    {
        return None;
    }
    if round.has_spin_off() {
        Some(Scenario::SpinOffPresent)
    } else if round.bust_count() == 0 {
        Some(Scenario::NoBust)
    } else {
        Some(Scenario::BustPresent)
    }
}
