//! Encounter metadata and challenge-mote detection.
//!
//! The table maps an encounter id from the log header to display metadata
//! and a [`CmPolicy`]. It is built once (built-in entries plus an optional
//! TOML override file) and passed by reference into each parse.

mod builtin;
mod config;

use serde::Serialize;
use std::collections::HashMap;
use strum::IntoStaticStr;

/// How challenge-mote status is derived for an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CmPolicy {
    /// The encounter has no challenge mote.
    Never,
    /// CM when the boss max health is at least the threshold.
    HealthBased(u64),
    /// CM status cannot be derived from the log header and boss health.
    Indeterminate,
}

impl CmPolicy {
    pub fn health_threshold(&self) -> u64 {
        match self {
            Self::HealthBased(threshold) => *threshold,
            _ => 0,
        }
    }

    pub fn needs_boss_health(&self) -> bool {
        matches!(self, Self::HealthBased(_))
    }

    pub fn evaluate(&self, boss_max_health: Option<u64>) -> CmVerdict {
        match (self, boss_max_health) {
            (Self::Never, _) => CmVerdict::No,
            (Self::HealthBased(threshold), Some(health)) if health >= *threshold => CmVerdict::Yes,
            (Self::HealthBased(_), Some(_)) => CmVerdict::No,
            (Self::HealthBased(_), None) | (Self::Indeterminate, _) => CmVerdict::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, IntoStaticStr)]
pub enum CmVerdict {
    #[serde(rename = "NO")]
    #[strum(serialize = "NO")]
    No,
    #[serde(rename = "YES")]
    #[strum(serialize = "YES")]
    Yes,
    #[serde(rename = "UNKNOWN")]
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl CmVerdict {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for CmVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display metadata for one encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterMetadata {
    pub name: String,
    /// Raid wing number, or the area name for fractals and other content.
    pub location: Option<String>,
    pub cm: CmPolicy,
}

impl EncounterMetadata {
    pub fn new(name: impl Into<String>, location: impl Into<String>, cm: CmPolicy) -> Self {
        Self {
            name: name.into(),
            location: Some(location.into()),
            cm,
        }
    }

    /// Placeholder for an id missing from the table.
    pub fn unknown(encounter_id: u16) -> Self {
        Self {
            name: format!("Unknown encounter {encounter_id}"),
            location: None,
            cm: CmPolicy::Indeterminate,
        }
    }

    pub fn health_threshold(&self) -> u64 {
        self.cm.health_threshold()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterTable {
    entries: HashMap<u16, EncounterMetadata>,
}

impl EncounterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The encounters known at build time.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for &(id, name, location, cm) in builtin::ENCOUNTERS {
            // First entry wins for ids listed twice.
            table
                .entries
                .entry(id)
                .or_insert_with(|| EncounterMetadata::new(name, location, cm));
        }
        table
    }

    pub fn insert(&mut self, encounter_id: u16, metadata: EncounterMetadata) {
        self.entries.insert(encounter_id, metadata);
    }

    /// Merge `other` into this table; its entries replace existing ones.
    pub fn extend(&mut self, other: EncounterTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, encounter_id: u16) -> Option<&EncounterMetadata> {
        self.entries.get(&encounter_id)
    }

    /// Metadata for `encounter_id`; unknown ids never fail.
    pub fn resolve(&self, encounter_id: u16) -> EncounterMetadata {
        self.get(encounter_id)
            .cloned()
            .unwrap_or_else(|| EncounterMetadata::unknown(encounter_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
