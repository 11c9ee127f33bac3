//! Common CLI utility functions shared across commands.

use anyhow::{Context, Result};
use arcparse_core::{EncounterTable, EvtcLog};
use std::fmt::Display;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// The built-in encounter table, with `overrides` merged over it.
pub fn load_encounters(overrides: Option<&Path>) -> Result<EncounterTable> {
    let mut table = EncounterTable::builtin();
    if let Some(path) = overrides {
        let loaded = EncounterTable::load(path)
            .with_context(|| format!("Failed to load encounter table {}", path.display()))?;
        debug!("Merging {} encounters over the built-in table", loaded.len());
        table.extend(loaded);
    }
    Ok(table)
}

pub fn open_log(path: &Path) -> Result<EvtcLog<File>> {
    EvtcLog::open(path).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Render an optional value; absent values become an empty string.
pub fn optional<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional() {
        assert_eq!(optional(Some(42)), "42");
        assert_eq!(optional::<u64>(None), "");
    }

    #[test]
    fn test_load_builtin_only() {
        let table = load_encounters(None).unwrap();
        assert_eq!(table.resolve(0x4314).name, "Mursaat Overseer");
    }

    #[test]
    fn test_missing_override_mentions_path() {
        let err = load_encounters(Some(Path::new("/no/such/table.toml"))).unwrap_err();
        assert!(err.to_string().contains("/no/such/table.toml"));
    }
}
