// src/store.rs
//! Episode JSON in, result JSON out. Loading is tolerant: unknown keys pass
//! through untouched and a block that isn't text becomes an error round later
//! instead of failing the whole file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::consts::EPISODES_FILE;
use crate::file::{read_json, resolve_out_path, write_json};
use crate::report::ErrorRecord;
use crate::showdown::RawBlock;
use crate::Result;

/// One episode as read from the episodes file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeInput {
    #[serde(default)]
    pub showcase_showdowns: Vec<Value>,
    /// Everything else (title, dates, url, categories, ...), kept verbatim.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl EpisodeInput {
    fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> { self.meta_str("episode_title") }
    pub fn iso_date(&self) -> Option<&str> { self.meta_str("iso_date") }
    pub fn url(&self) -> Option<&str> { self.meta_str("url") }
}

/// A block entry read leniently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockInput {
    Text(RawBlock),
    /// Present but without usable text. Carries whatever label could be read.
    NonText { label: String },
}

pub fn read_block(v: &Value) -> BlockInput {
    match v {
        Value::String(text) => BlockInput::Text(RawBlock::new("", text.as_str())),
        Value::Object(obj) => {
            let label = obj.get("label").and_then(Value::as_str).unwrap_or_default();
            match obj.get("text") {
                Some(Value::String(text)) => BlockInput::Text(RawBlock::new(label, text.as_str())),
                _ => BlockInput::NonText { label: label.to_string() },
            }
        }
        _ => BlockInput::NonText { label: s!() },
    }
}

pub fn load_episodes(path: &Path) -> Result<Vec<EpisodeInput>> {
    let eps: Vec<EpisodeInput> = read_json(path)?;
    logd!("Store: {} episodes from {}", eps.len(), path.display());
    Ok(eps)
}

/// Write extracted episodes. `user_o` may be a file, a directory, or empty
/// (then `episodes.json` in the working directory). Returns the path written.
pub fn save_episodes<T: Serialize>(user_o: &str, episodes: &[T], pretty: bool) -> Result<PathBuf> {
    let path = resolve_out_path(user_o, EPISODES_FILE)?;
    write_json(&path, episodes, pretty)?;
    logd!("Store: {} episodes to {}", episodes.len(), path.display());
    Ok(path)
}

pub fn load_error_records(path: &Path) -> Result<Vec<ErrorRecord>> {
    read_json(path)
}
