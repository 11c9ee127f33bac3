use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{CmPolicy, EncounterMetadata, EncounterTable};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EncounterFile {
    #[serde(default, rename = "encounter")]
    encounters: Vec<EncounterEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum CmKind {
    #[default]
    Never,
    HealthBased,
    Unknown,
}

/// One `[[encounter]]` table in an encounter configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct EncounterEntry {
    id: u16,
    name: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    cm: CmKind,
    #[serde(default)]
    health_threshold: Option<u64>,
}

impl EncounterEntry {
    fn policy(&self) -> Result<CmPolicy> {
        match (self.cm, self.health_threshold) {
            (CmKind::Never, _) => Ok(CmPolicy::Never),
            (CmKind::Unknown, _) => Ok(CmPolicy::Indeterminate),
            (CmKind::HealthBased, Some(threshold)) => Ok(CmPolicy::HealthBased(threshold)),
            (CmKind::HealthBased, None) => Err(Error::InvalidConfig(format!(
                "encounter {:#06x} ({}) is health-based but has no health_threshold",
                self.id, self.name
            ))),
        }
    }
}

impl EncounterTable {
    /// Load an encounter table from a TOML file.
    ///
    /// ```toml
    /// [[encounter]]
    /// id = 0x4314
    /// name = "Mursaat Overseer"
    /// location = "4"
    /// cm = "health-based"
    /// health_threshold = 25000000
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let table = Self::parse(&content)?;
        debug!(
            "Loaded {} encounters from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Parse an encounter table from TOML content.
    pub fn parse(content: &str) -> Result<Self> {
        let file: EncounterFile = toml::from_str(content)?;
        let mut table = Self::new();

        for entry in file.encounters {
            let cm = entry.policy()?;
            table.insert(
                entry.id,
                EncounterMetadata {
                    name: entry.name,
                    location: entry.location,
                    cm,
                },
            );
        }

        Ok(table)
    }
}
