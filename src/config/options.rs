// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::{Error, Result};

/// Where a contestant slice may begin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SegmentationGrammar {
    /// Money token must be followed by at least one name-shaped token.
    #[default]
    Strict,
    /// Any money token opens a slice.
    Permissive,
}

/// Which numeric becomes the second initial spin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SecondSpinRule {
    /// Only when a standalone `+` appears in the slice.
    #[default]
    MarkerGated,
    /// Always the second numeric.
    Positional,
}

/// Grammar selection for one pipeline instance.
/// `Default` is the system of record: strict segmentation, marker-gated second spin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingPolicy {
    pub segmentation: SegmentationGrammar,
    pub second_spin: SecondSpinRule,
}

impl ParsingPolicy {
    pub fn permissive() -> Self {
        Self {
            segmentation: SegmentationGrammar::Permissive,
            second_spin: SecondSpinRule::MarkerGated,
        }
    }

    pub fn positional() -> Self {
        Self {
            segmentation: SegmentationGrammar::Strict,
            second_spin: SecondSpinRule::Positional,
        }
    }
}

/// Runtime pipeline configuration. Loadable from TOML:
///
/// ```toml
/// workers = 2
///
/// [policy]
/// segmentation = "permissive"
/// second_spin = "positional"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub policy: ParsingPolicy,
    pub workers: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            policy: ParsingPolicy::default(),
            workers: WORKERS,
        }
    }
}

impl PipelineOptions {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let opts: Self = toml::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let opts = Self::from_toml_str(&text)?;
        logd!("Config: loaded {} ({:?}, {} workers)", path.display(), opts.policy, opts.workers);
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(Error::Config(format!(
                "workers must be in 1..={MAX_WORKERS}, got {}",
                self.workers
            )));
        }
        Ok(())
    }
}

/// Flat contestant table format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn ext(&self) -> &'static str {
        match self { TableFormat::Csv => "csv", TableFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { TableFormat::Csv => ',', TableFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub out_dir: PathBuf,
    pub table: Option<TableFormat>,
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            table: None,
            pretty: true,
        }
    }
}

impl OutputOptions {
    pub fn structured_path(&self) -> PathBuf { self.out_dir.join(STRUCTURED_FILE) }
    pub fn errors_path(&self) -> PathBuf { self.out_dir.join(ERRORS_FILE) }
    pub fn scenario_path(&self, n: u8) -> PathBuf { self.out_dir.join(scenario_file(n)) }

    pub fn table_path(&self) -> Option<PathBuf> {
        self.table
            .map(|fmt| self.out_dir.join(format!("{TABLE_STEM}.{}", fmt.ext())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_strict_marker_gated() {
        let p = ParsingPolicy::default();
        assert_eq!(p.segmentation, SegmentationGrammar::Strict);
        assert_eq!(p.second_spin, SecondSpinRule::MarkerGated);
    }

    #[test]
    fn toml_overrides_only_given_fields() {
        let opts = PipelineOptions::from_toml_str(
            r#"
            [policy]
            second_spin = "positional"
            "#,
        )
        .unwrap();
        assert_eq!(opts.workers, WORKERS);
        assert_eq!(opts.policy.segmentation, SegmentationGrammar::Strict);
        assert_eq!(opts.policy.second_spin, SecondSpinRule::Positional);
    }

    #[test]
    fn zero_workers_rejected() {
        let err = PipelineOptions::from_toml_str("workers = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn unknown_grammar_is_a_toml_error() {
        let err = PipelineOptions::from_toml_str("[policy]\nsegmentation = \"loose\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn table_path_follows_format() {
        let mut out = OutputOptions::default();
        assert!(out.table_path().is_none());
        out.table = Some(TableFormat::Tsv);
        assert!(out.table_path().unwrap().to_string_lossy().ends_with("contestants.tsv"));
    }
}
