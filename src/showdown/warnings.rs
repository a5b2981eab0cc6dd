// src/showdown/warnings.rs
//! Parse-warning codes. Structural ones disqualify a round on their own.

pub const TOO_FEW_CONTESTANTS: &str = "too_few_contestants";
pub const MULTIPLE_ADVANCED_FLAGS: &str = "multiple_advanced_flags";
pub const WINNER_INFERRED_BY_TOTAL: &str = "winner_inferred_by_total";
pub const NO_NON_BUST_WINNER: &str = "no_non_bust_winner";
pub const UNRESOLVED_TIE: &str = "unresolved_tie";
pub const NON_TEXT_INPUT: &str = "non_text_input";

const MISSING_CORE_FIELDS: &str = "_missing_core_fields";
const MALFORMED_MONEY: &str = "_malformed_money";
const MISSING_SECOND_SPIN: &str = "_missing_second_spin";

const STRUCTURAL: &[&str] = &[
    TOO_FEW_CONTESTANTS,
    NO_NON_BUST_WINNER,
    MULTIPLE_ADVANCED_FLAGS,
    NON_TEXT_INPUT,
];

pub fn missing_core_fields(position: usize) -> String {
    format!("contestant_{position}{MISSING_CORE_FIELDS}")
}

pub fn malformed_money(position: usize) -> String {
    format!("contestant_{position}{MALFORMED_MONEY}")
}

/// A `+` marker with nothing usable after it.
pub fn missing_second_spin(position: usize) -> String {
    format!("contestant_{position}{MISSING_SECOND_SPIN}")
}

pub fn is_missing_core_fields(code: &str) -> bool {
    code.ends_with(MISSING_CORE_FIELDS)
}

pub fn is_structural(code: &str) -> bool {
    STRUCTURAL.contains(&code) || is_missing_core_fields(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_set() {
        assert!(is_structural(TOO_FEW_CONTESTANTS));
        assert!(is_structural(&missing_core_fields(2)));
        assert!(!is_structural(WINNER_INFERRED_BY_TOTAL));
        assert!(!is_structural(UNRESOLVED_TIE));
        assert!(!is_structural(&malformed_money(1)));
        assert!(!is_structural(&missing_second_spin(3)));
    }
}
