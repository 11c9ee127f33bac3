//! Single-fact commands.
//!
//! Each query prints one value per line and runs only the scans it needs.

use anyhow::{Context, Result};
use arcparse_core::{EncounterTable, EvtcLog};
use std::io::{Read, Seek};
use std::path::Path;

use crate::cli_utils::{self, optional};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Header,
    Revision,
    Players,
    Success,
    StartTime,
    EndTime,
    LocalStartTime,
    LocalEndTime,
    BossMaxHealth,
    IsCm,
    Duration,
    Location,
}

pub fn run(path: &Path, query: Query, table: &EncounterTable) -> Result<()> {
    let mut log = cli_utils::open_log(path)?;
    let lines = answer(&mut log, query, table)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// The output lines for `query`.
pub fn answer<R: Read + Seek>(
    log: &mut EvtcLog<R>,
    query: Query,
    table: &EncounterTable,
) -> arcparse_core::Result<Vec<String>> {
    let encounter_id = log.header().encounter_id;

    let line = match query {
        Query::Header => {
            let header = log.header();
            return Ok(vec![
                format!("EVTC{}", header.build),
                table.resolve(encounter_id).name,
                encounter_id.to_string(),
            ]);
        }
        Query::Players => {
            return Ok(log.players()?.into_iter().map(|p| p.account).collect());
        }
        Query::Revision => log.header().revision.to_string(),
        Query::Success => {
            if log.success()? {
                "SUCCESS".to_string()
            } else {
                "FAILURE".to_string()
            }
        }
        Query::StartTime => optional(log.log_start()?.map(|t| t.server)),
        Query::EndTime => optional(log.log_end()?.map(|t| t.server)),
        Query::LocalStartTime => optional(log.log_start()?.map(|t| t.local)),
        Query::LocalEndTime => optional(log.local_end()?),
        Query::BossMaxHealth => optional(log.boss_max_health()?),
        Query::IsCm => log.cm_verdict(table)?.to_string(),
        Query::Duration => optional(log.duration()?),
        Query::Location => optional(table.resolve(encounter_id).location),
    };
    Ok(vec![line])
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcparse_core::testing::EvtcBuilder;
    use std::io::Cursor;

    fn ask(builder: EvtcBuilder, query: Query) -> Vec<String> {
        let mut log = EvtcLog::from_reader(Cursor::new(builder.build())).unwrap();
        answer(&mut log, query, &EncounterTable::builtin()).unwrap()
    }

    fn mursaat() -> EvtcBuilder {
        EvtcBuilder::default()
            .build_id("20190212")
            .encounter(0x4314)
            .player(1, "Char", ":acc.1234", "1")
            .player(2, "Other", ":other.5678", "1")
            .npc(9, 0x4314)
            .log_start(100, 1_550_000_000)
            .max_health(101, 9, 25_000_000)
            .log_end(900, 1_550_000_008)
            .reward(850)
    }

    #[test]
    fn test_header() {
        assert_eq!(
            ask(mursaat(), Query::Header),
            ["EVTC20190212", "Mursaat Overseer", "17172"]
        );
    }

    #[test]
    fn test_players() {
        assert_eq!(ask(mursaat(), Query::Players), ["acc.1234", "other.5678"]);
    }

    #[test]
    fn test_scalar_queries() {
        assert_eq!(ask(mursaat(), Query::Revision), ["1"]);
        assert_eq!(ask(mursaat(), Query::Success), ["SUCCESS"]);
        assert_eq!(ask(mursaat(), Query::StartTime), ["1550000000"]);
        assert_eq!(ask(mursaat(), Query::EndTime), ["1550000008"]);
        assert_eq!(ask(mursaat(), Query::LocalStartTime), ["100"]);
        assert_eq!(ask(mursaat(), Query::LocalEndTime), ["850"]);
        assert_eq!(ask(mursaat(), Query::BossMaxHealth), ["25000000"]);
        assert_eq!(ask(mursaat(), Query::IsCm), ["YES"]);
        assert_eq!(ask(mursaat(), Query::Duration), ["750"]);
        assert_eq!(ask(mursaat(), Query::Location), ["4"]);
    }

    #[test]
    fn test_absent_values_are_empty_lines() {
        let empty = EvtcBuilder::default().encounter(0x0001);

        assert_eq!(ask(empty.clone(), Query::Success), ["FAILURE"]);
        assert_eq!(ask(empty.clone(), Query::StartTime), [""]);
        assert_eq!(ask(empty.clone(), Query::Duration), [""]);
        assert_eq!(ask(empty.clone(), Query::BossMaxHealth), [""]);
        assert_eq!(ask(empty.clone(), Query::Location), [""]);
        assert_eq!(ask(empty.clone(), Query::IsCm), ["UNKNOWN"]);
        assert!(ask(empty, Query::Players).is_empty());
    }
}
