// src/showdown/model.rs
use serde::{Deserialize, Serialize};

use crate::config::consts::{BUST_OVER, UNKNOWN_NAME};

/// One round fragment as sliced from an episode page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub label: String,
    pub text: String,
}

impl RawBlock {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self { label: label.into(), text: text.into() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinSlot {
    pub spin_index: u8,
    pub value: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinOff {
    pub value: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BonusSpin {
    pub wheel_value: Option<f64>,
    pub cash_prize: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contestant {
    pub name: String,
    /// 1-based order of appearance in the fragment.
    pub position: usize,
    pub pre_round_winnings: Option<i64>,
    pub initial_spins: [SpinSlot; 2],
    pub total: Option<f64>,
    pub bust: bool,
    #[serde(default)]
    pub spin_off_spins: Vec<SpinOff>,
    #[serde(default)]
    pub bonus_spins: Vec<BonusSpin>,
    #[serde(default)]
    pub advanced: bool,
}

impl Contestant {
    pub fn first_spin(&self) -> Option<f64> { self.initial_spins[0].value }
    pub fn second_spin(&self) -> Option<f64> { self.initial_spins[1].value }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty() && self.name != UNKNOWN_NAME
    }

    /// Sum of the initial spins present; `None` when neither is.
    pub fn initial_total(&self) -> Option<f64> {
        let present: Vec<f64> = self.initial_spins.iter().filter_map(|s| s.value).collect();
        if present.is_empty() { None } else { Some(present.iter().sum()) }
    }

    /// Total that can compete for the win: computable and not over the bust line.
    pub fn contending_total(&self) -> Option<f64> {
        self.total.filter(|&t| !self.bust && t <= BUST_OVER)
    }

    pub fn spin_off_at(&self, depth: usize) -> Option<f64> {
        self.spin_off_spins.get(depth).map(|s| s.value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStatus {
    Ok,
    Partial,
    #[default]
    Error,
}

/// Dataset partition for a clean three-contestant, no-bonus round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Scenario {
    NoBust = 1,
    BustPresent = 2,
    SpinOffPresent = 3,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::NoBust, Scenario::BustPresent, Scenario::SpinOffPresent];

    pub fn number(self) -> u8 { self as u8 }

    pub fn label(self) -> &'static str {
        match self {
            Scenario::NoBust => "no-bust",
            Scenario::BustPresent => "bust-present",
            Scenario::SpinOffPresent => "spin-off-present",
        }
    }
}

impl From<Scenario> for u8 {
    fn from(s: Scenario) -> u8 { s.number() }
}

impl TryFrom<u8> for Scenario {
    type Error = String;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Scenario::NoBust),
            2 => Ok(Scenario::BustPresent),
            3 => Ok(Scenario::SpinOffPresent),
            other => Err(format!("unknown scenario {other}")),
        }
    }
}

/// A parsed showdown. Diagnostics travel with it; membership in the kept/error
/// buckets is decided from these fields alone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub label: String,
    pub raw_text: String,
    pub contestants: Vec<Contestant>,
    pub winner_index: Option<usize>,
    pub scenario: Option<Scenario>,
    pub parse_status: ParseStatus,
    #[serde(rename = "parse_warnings", default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub validation_errors: Vec<String>,
}

impl Round {
    /// Empty round for input that could not be read as text at all.
    pub fn failed(label: impl Into<String>, warning: &str) -> Self {
        Self {
            label: label.into(),
            raw_text: s!(),
            contestants: Vec::new(),
            winner_index: None,
            scenario: None,
            parse_status: ParseStatus::Error,
            warnings: vec![warning.to_string()],
            validation_errors: Vec::new(),
        }
    }

    pub fn winner(&self) -> Option<&Contestant> {
        self.winner_index.and_then(|i| self.contestants.get(i))
    }

    pub fn has_structural_warning(&self) -> bool {
        self.warnings.iter().any(|w| super::warnings::is_structural(w))
    }

    pub fn has_bonus(&self) -> bool {
        self.contestants.iter().any(|c| !c.bonus_spins.is_empty())
    }

    pub fn has_spin_off(&self) -> bool {
        self.contestants.iter().any(|c| !c.spin_off_spins.is_empty())
    }

    pub fn bust_count(&self) -> usize {
        self.contestants.iter().filter(|c| c.bust).count()
    }

    /// Kept iff parsing did not fail, nothing structural fired, the validator
    /// was clean, and a winner is named.
    pub fn is_kept(&self) -> bool {
        self.parse_status != ParseStatus::Error
            && !self.has_structural_warning()
            && self.validation_errors.is_empty()
            && self.winner().is_some()
    }
}
