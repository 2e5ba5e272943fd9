// src/banks.rs
//! Word banks: keyword vocabulary, phrase signal words, stopwords and red-flag phrases.
//!
//! The default banks are embedded from `config/banks.toml`. A TOML override can be
//! loaded from `COPILOT_BANKS_PATH`; any list the override leaves out keeps the
//! embedded default.

use anyhow::{anyhow, Context};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_BANKS_PATH: &str = "COPILOT_BANKS_PATH";

const EMBEDDED_BANKS: &str = include_str!("../config/banks.toml");

static DEFAULT_BANKS: Lazy<Banks> = Lazy::new(|| {
    let file: BanksFile = toml::from_str(EMBEDDED_BANKS).expect("valid embedded banks.toml");
    Banks::from_file(file, None).expect("complete embedded banks.toml")
});

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Default, Deserialize)]
struct BanksFile {
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    signal_words: Option<Vec<String>>,
    #[serde(default)]
    stopwords: Option<Vec<String>>,
    #[serde(default)]
    red_flags: Option<Vec<String>>,
}

/// Read-only vocabulary shared by every matcher in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banks {
    keywords: Vec<String>,
    signal_words: HashSet<String>,
    stopwords: HashSet<String>,
    red_flags: Vec<String>,
}

impl Default for Banks {
    fn default() -> Self {
        DEFAULT_BANKS.clone()
    }
}

impl Banks {
    /// Build banks from explicit lists. Entries are cleaned the same way as TOML input.
    pub fn new<I, S>(keywords: I, signal_words: I, stopwords: I, red_flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let own = |items: I| {
            items
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect::<Vec<_>>()
        };
        Self {
            keywords: clean_list(own(keywords)),
            signal_words: clean_list(own(signal_words)).into_iter().collect(),
            stopwords: clean_list(own(stopwords)).into_iter().collect(),
            red_flags: clean_list(own(red_flags)),
        }
    }

    /// The embedded banks, built once per process.
    pub fn embedded() -> &'static Banks {
        &DEFAULT_BANKS
    }

    /// Load from `$COPILOT_BANKS_PATH`, or return the embedded banks when unset.
    pub fn from_toml() -> anyhow::Result<Self> {
        match std::env::var(ENV_BANKS_PATH) {
            Ok(p) if !p.trim().is_empty() => Self::from_path(&PathBuf::from(p)),
            _ => Ok(Self::default()),
        }
    }

    /// Load a TOML override from an explicit path.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading banks from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing banks at {}", path.display()))
    }

    /// Parse a TOML document; lists it does not define fall back to the embedded ones.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let file: BanksFile = toml::from_str(toml_str)?;
        Self::from_file(file, Some(Self::embedded()))
    }

    fn from_file(file: BanksFile, fallback: Option<&Banks>) -> anyhow::Result<Self> {
        fn pick<T>(
            name: &str,
            own: Option<Vec<String>>,
            fallback: Option<&T>,
            build: impl FnOnce(Vec<String>) -> T,
        ) -> anyhow::Result<T>
        where
            T: Clone,
        {
            match (own, fallback) {
                (Some(v), _) => Ok(build(clean_list(v))),
                (None, Some(f)) => Ok(f.clone()),
                (None, None) => Err(anyhow!("banks: missing `{name}` list")),
            }
        }

        let to_set = |v: Vec<String>| v.into_iter().collect::<HashSet<_>>();
        Ok(Self {
            keywords: pick("keywords", file.keywords, fallback.map(|b| &b.keywords), |v| v)?,
            signal_words: pick(
                "signal_words",
                file.signal_words,
                fallback.map(|b| &b.signal_words),
                to_set,
            )?,
            stopwords: pick(
                "stopwords",
                file.stopwords,
                fallback.map(|b| &b.stopwords),
                to_set,
            )?,
            red_flags: pick("red_flags", file.red_flags, fallback.map(|b| &b.red_flags), |v| v)?,
        })
    }

    /// Keyword bank in configured order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Red-flag phrases in configured order.
    pub fn red_flags(&self) -> &[String] {
        &self.red_flags
    }

    #[inline]
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    #[inline]
    pub fn is_signal_word(&self, word: &str) -> bool {
        self.signal_words.contains(word)
    }
}

/// Trim, lowercase, drop empties and keep the first occurrence of each entry.
fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && seen.insert(t.clone()) {
            out.push(t);
        }
    }
    out
}
