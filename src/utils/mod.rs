//! Utility modules: build info and JSON persistence helpers.

pub mod build_info;
pub mod persistence;

pub use persistence::{default_data_dir, load_json_or_default, save_json};
