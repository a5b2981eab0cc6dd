// src/config/consts.rs

// Wheel domain
pub const SPIN_MIN: f64 = 5.0;
pub const SPIN_MAX: f64 = 100.0;
pub const SPIN_STEP: f64 = 5.0;
pub const BUST_OVER: f64 = 100.0; // strict '>'
pub const EPS: f64 = 1e-6;

// "1.00" in transcripts means the $1.00 slot, i.e. 100
pub const QUIRK_LITERALS: &[&str] = &["1.00", "1.0"];
pub const QUIRK_VALUE: f64 = 100.0;

// Money heuristic
pub const CURRENCY_SIGN: &str = "$";
pub const MONEY_FLOOR: f64 = 200.0; // bare numbers above this are money
pub const BONUS_PRIZES: &[i64] = &[5_000, 10_000, 25_000];

// Segmentation
pub const UNKNOWN_NAME: &str = "UNKNOWN";
pub const SECOND_SPIN_MARKER: &str = "+";
pub const NAME_KEYWORDS: &[&str] = &[
    "Through", "to", "the", "Showcases", "Showcase", "Round", "Goes",
    "BONUS", "Bonus", "SPIN", "Spin", "bonus", "ROUND",
    "showcases", "showcase",
];
// Transcriber shorthand and its typos
pub const BAD_NAME_TOKENS: &[&str] = &[
    "OVER", "STAYS", "THROUGH", "THROUG", "THROPHUGH", "THROPUGH", "THRU", "THO",
];
pub const CONJUNCTIONS: &[&str] = &["And", "&", "AND"];
pub const MAX_CAPS_NAME_LEN: usize = 3;

// Output
pub const DEFAULT_OUT_DIR: &str = "out";
pub const STRUCTURED_FILE: &str = "structured_showdowns.json";
pub const ERRORS_FILE: &str = "showdown_parse_errors.json";
pub const EPISODES_FILE: &str = "episodes.json";
pub const TABLE_STEM: &str = "contestants";
pub const EXAMPLES_PER_CODE: usize = 1;

pub fn scenario_file(n: u8) -> String {
    format!("scenario_{n}_showdowns.json")
}

// Concurrency
pub const WORKERS: usize = 4;
pub const MAX_WORKERS: usize = 64;
