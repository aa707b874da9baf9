use std::env;
use std::path::PathBuf;

/// Deployment configuration, read once at startup. Every value has a
/// development default so a bare `cargo run` works against local files.
pub struct Config {
    pub port: u16,
    pub model_path: PathBuf,
    pub labels_path: PathBuf,
    pub nutrition_table_path: PathBuf,
    pub upload_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_var("PORT", 5000),
            model_path: path_var("MODEL_PATH", "models/food_classifier.pt"),
            labels_path: path_var("MODEL_LABELS_PATH", "models/labels.txt"),
            nutrition_table_path: path_var("NUTRITION_TABLE_PATH", "data/nutrition.csv"),
            upload_dir: path_var("UPLOAD_DIR", "uploads"),
        }
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key).unwrap_or_else(|_| default.to_string()).into()
}

fn parse_var(key: &str, default: u16) -> u16 {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
