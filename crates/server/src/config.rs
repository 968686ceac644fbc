use std::{collections::HashMap, fs, path::PathBuf, str::FromStr};

use shared::i18n::Language;
use tracing::warn;

pub const CONFIG_FILE: &str = "server.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_bind: String,
    pub default_language: Language,
    pub submission_delay_ms: u64,
    pub submission_retention_secs: u64,
    pub organizer_id: String,
    pub fixtures_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            default_language: Language::Fr,
            submission_delay_ms: 1500,
            submission_retention_secs: 600,
            organizer_id: "2".into(),
            fixtures_dir: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

pub fn load_settings() -> Settings {
    let file = fs::read_to_string(CONFIG_FILE).ok();
    resolve_settings(file.as_deref(), |key| std::env::var(key).ok())
}

/// Defaults, then `server.toml` keys, then environment variables.
pub fn resolve_settings(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                let lookup = |key: &str| file_cfg.get(key).map(value_text);
                apply(&mut settings, lookup, FILE_KEYS);
            }
            Err(error) => warn!(%error, file = CONFIG_FILE, "ignoring unreadable config file"),
        }
    }

    apply(&mut settings, &env, LEGACY_ENV_KEYS);
    apply(&mut settings, &env, ENV_KEYS);
    settings
}

#[derive(Clone, Copy)]
enum Field {
    Bind,
    Language,
    Delay,
    Retention,
    Organizer,
    Fixtures,
    BodyLimit,
}

const FILE_KEYS: &[(&str, Field)] = &[
    ("bind_addr", Field::Bind),
    ("default_language", Field::Language),
    ("submission_delay_ms", Field::Delay),
    ("submission_retention_secs", Field::Retention),
    ("organizer_id", Field::Organizer),
    ("fixtures_dir", Field::Fixtures),
    ("max_body_bytes", Field::BodyLimit),
];

const LEGACY_ENV_KEYS: &[(&str, Field)] = &[("SERVER_BIND", Field::Bind)];

const ENV_KEYS: &[(&str, Field)] = &[
    ("APP__BIND_ADDR", Field::Bind),
    ("APP__DEFAULT_LANGUAGE", Field::Language),
    ("APP__SUBMISSION_DELAY_MS", Field::Delay),
    ("APP__SUBMISSION_RETENTION_SECS", Field::Retention),
    ("APP__ORGANIZER_ID", Field::Organizer),
    ("APP__FIXTURES_DIR", Field::Fixtures),
    ("APP__MAX_BODY_BYTES", Field::BodyLimit),
];

fn apply(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
    keys: &[(&'static str, Field)],
) {
    for &(key, field) in keys {
        let Some(value) = lookup(key) else {
            continue;
        };
        match field {
            Field::Bind => settings.server_bind = value,
            Field::Organizer => settings.organizer_id = value,
            Field::Fixtures => settings.fixtures_dir = Some(PathBuf::from(value)),
            Field::Language => set_parsed(&mut settings.default_language, key, &value),
            Field::Delay => set_parsed(&mut settings.submission_delay_ms, key, &value),
            Field::Retention => set_parsed(&mut settings.submission_retention_secs, key, &value),
            Field::BodyLimit => set_parsed(&mut settings.max_body_bytes, key, &value),
        }
    }
}

fn set_parsed<T: FromStr>(slot: &mut T, key: &str, value: &str) {
    match value.trim().parse() {
        Ok(parsed) => *slot = parsed,
        Err(_) => warn!(key, value, "ignoring invalid setting"),
    }
}

fn value_text(value: &toml::Value) -> String {
    match value {
        toml::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
