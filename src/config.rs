//! Application configuration stored as `config.json` in the data directory.

use crate::core::constants::DEFAULT_HELP_COINS;
use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_WORD_LIST_FILE: &str = "word_lists.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Help coins granted at the start of every session.
    pub default_help_coins: u32,
    /// Word list file, relative to the data directory unless absolute.
    pub word_list_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_help_coins: DEFAULT_HELP_COINS,
            word_list_file: PathBuf::from(DEFAULT_WORD_LIST_FILE),
        }
    }
}

impl AppConfig {
    /// Reads `config.json` from `data_dir`, falling back to defaults.
    pub fn load(data_dir: &Path) -> Self {
        load_json_or_default(data_dir, CONFIG_FILE)
    }

    pub fn save(&self, data_dir: &Path) -> io::Result<()> {
        save_json(data_dir, CONFIG_FILE, self)
    }

    pub fn word_list_path(&self, data_dir: &Path) -> PathBuf {
        if self.word_list_file.is_absolute() {
            self.word_list_file.clone()
        } else {
            data_dir.join(&self.word_list_file)
        }
    }
}
