//! Assembly of everything extracted from one log into a single result.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classify::{EventFacts, LogTimestamp};
use crate::encounter::{CmVerdict, EncounterMetadata, EncounterTable};
use crate::evtc::{EncounterHeader, PlayerDetails};

/// The immutable result of parsing one log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSummary {
    pub header: EncounterHeader,
    pub encounter: EncounterMetadata,
    pub boss_address: Option<u64>,
    pub boss_max_health: Option<u64>,
    pub log_start: Option<LogTimestamp>,
    pub log_end: Option<LogTimestamp>,
    pub reward_time: Option<u64>,
    pub last_event_time: Option<u64>,
    pub success: bool,
    pub cm: CmVerdict,
    pub players: Vec<PlayerDetails>,
}

impl ParsedSummary {
    pub fn server_start(&self) -> Option<u32> {
        self.log_start.map(|t| t.server)
    }

    pub fn server_end(&self) -> Option<u32> {
        self.log_end.map(|t| t.server)
    }

    pub fn server_start_utc(&self) -> Option<DateTime<Utc>> {
        self.server_start().and_then(server_time_utc)
    }

    pub fn server_end_utc(&self) -> Option<DateTime<Utc>> {
        self.server_end().and_then(server_time_utc)
    }

    pub fn local_start(&self) -> Option<u64> {
        self.log_start.map(|t| t.local)
    }

    /// Reward time, else log-end time, else the last event's time.
    pub fn local_end(&self) -> Option<u64> {
        local_end(self.reward_time, self.log_end, self.last_event_time)
    }

    pub fn duration(&self) -> Option<u64> {
        duration(self.local_start(), self.local_end())
    }
}

/// Server times are unix seconds.
pub fn server_time_utc(seconds: u32) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(i64::from(seconds), 0)
}

pub(crate) fn local_end(
    reward_time: Option<u64>,
    log_end: Option<LogTimestamp>,
    last_event_time: Option<u64>,
) -> Option<u64> {
    reward_time
        .or(log_end.map(|t| t.local))
        .or(last_event_time)
}

/// `end - start`, when both exist and do not run backwards.
pub(crate) fn duration(start: Option<u64>, end: Option<u64>) -> Option<u64> {
    end?.checked_sub(start?)
}

/// Collects the pieces of a [`ParsedSummary`] as the parse produces them.
pub struct SummaryBuilder<'t> {
    table: &'t EncounterTable,
    header: EncounterHeader,
    facts: EventFacts,
    last_event_time: Option<u64>,
}

impl<'t> SummaryBuilder<'t> {
    pub fn new(table: &'t EncounterTable, header: EncounterHeader) -> Self {
        Self {
            table,
            header,
            facts: EventFacts::default(),
            last_event_time: None,
        }
    }

    pub fn facts(mut self, facts: EventFacts) -> Self {
        self.facts = facts;
        self
    }

    pub fn last_event_time(mut self, time: Option<u64>) -> Self {
        self.last_event_time = time;
        self
    }

    pub fn build(self) -> ParsedSummary {
        let encounter = self.table.resolve(self.header.encounter_id);
        let cm = encounter.cm.evaluate(self.facts.boss_max_health);
        let success = self.facts.success();

        ParsedSummary {
            header: self.header,
            encounter,
            boss_address: self.facts.boss_address,
            boss_max_health: self.facts.boss_max_health,
            log_start: self.facts.log_start,
            log_end: self.facts.log_end,
            reward_time: self.facts.reward_time,
            last_event_time: self.last_event_time,
            success,
            cm,
            players: self.facts.players,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::CmPolicy;
    use crate::evtc::Revision;

    fn header(encounter_id: u16) -> EncounterHeader {
        EncounterHeader {
            build: "20180904".to_string(),
            revision: Revision::V1,
            encounter_id,
        }
    }

    fn stamp(server: u32, local: u64) -> Option<LogTimestamp> {
        Some(LogTimestamp { server, local })
    }

    #[test]
    fn test_end_prefers_reward() {
        assert_eq!(local_end(Some(900), stamp(1, 800), Some(1000)), Some(900));
        assert_eq!(local_end(None, stamp(1, 800), Some(1000)), Some(800));
        assert_eq!(local_end(None, None, Some(1000)), Some(1000));
        assert_eq!(local_end(None, None, None), None);
    }

    #[test]
    fn test_duration_requires_ordered_bounds() {
        assert_eq!(duration(Some(100), Some(350)), Some(250));
        assert_eq!(duration(Some(100), Some(100)), Some(0));
        assert_eq!(duration(Some(400), Some(350)), None);
        assert_eq!(duration(None, Some(350)), None);
        assert_eq!(duration(Some(100), None), None);
    }

    #[test]
    fn test_build_evaluates_cm() {
        let table = EncounterTable::builtin();
        let facts = EventFacts {
            boss_address: Some(5),
            boss_max_health: Some(35_000_000),
            log_start: stamp(1_550_000_000, 100),
            reward_time: Some(600),
            ..Default::default()
        };

        let summary = SummaryBuilder::new(&table, header(0x4324))
            .facts(facts)
            .last_event_time(Some(700))
            .build();

        assert_eq!(summary.encounter.name, "Samarog");
        assert_eq!(summary.encounter.cm, CmPolicy::HealthBased(35_000_000));
        assert_eq!(summary.cm, CmVerdict::Yes);
        assert!(summary.success);
        assert_eq!(summary.local_end(), Some(600));
        assert_eq!(summary.duration(), Some(500));
        assert_eq!(summary.server_start(), Some(1_550_000_000));
        assert_eq!(summary.server_end(), None);
        assert_eq!(
            summary.server_start_utc().unwrap().to_rfc3339(),
            "2019-02-12T19:33:20+00:00"
        );
        assert!(summary.server_end_utc().is_none());
    }

    #[test]
    fn test_build_unknown_encounter() {
        let table = EncounterTable::builtin();
        let summary = SummaryBuilder::new(&table, header(7)).build();

        assert_eq!(summary.encounter.name, "Unknown encounter 7");
        assert_eq!(summary.cm, CmVerdict::Unknown);
        assert!(!summary.success);
        assert_eq!(summary.local_end(), None);
        assert_eq!(summary.duration(), None);
    }
}
