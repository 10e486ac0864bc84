//! Behaviour switches for the two steps with more than one sound answer

use serde::{Deserialize, Serialize};

/// How `current` is repointed at the new release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutoverMode {
    /// Remove the old link, then create the new one. Between the two,
    /// `current` does not exist.
    #[default]
    Swap,
    /// Create a temporary link and rename it over `current`.
    Atomic,
}

impl CutoverMode {
    pub const VALUES: &'static [&'static str] = &["swap", "atomic"];

    pub fn as_str(self) -> &'static str {
        match self {
            CutoverMode::Swap => "swap",
            CutoverMode::Atomic => "atomic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "swap" => Some(CutoverMode::Swap),
            "atomic" => Some(CutoverMode::Atomic),
            _ => None,
        }
    }
}

/// How the shared `.env` is archived before a deploy touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvBackupMode {
    /// Rename to the backup; a fresh `.env` is then seeded from `.env.example`.
    #[default]
    Move,
    /// Copy to the backup; the live `.env` keeps its values and is reused.
    Copy,
}

impl EnvBackupMode {
    pub const VALUES: &'static [&'static str] = &["move", "copy"];

    pub fn as_str(self) -> &'static str {
        match self {
            EnvBackupMode::Copy => "copy",
            EnvBackupMode::Move => "move",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "copy" => Some(EnvBackupMode::Copy),
            "move" => Some(EnvBackupMode::Move),
            _ => None,
        }
    }
}
