//! One opened log and the queries that can be asked of it.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::debug;

use crate::classify::{self, Classifier, EventFacts, LogTimestamp};
use crate::encounter::{CmVerdict, EncounterTable};
use crate::error::Result;
use crate::evtc::{AgentTable, EncounterHeader, EventStream, Layout, PlayerDetails, SkillRecord};
use crate::source::LogSource;
use crate::summary::{self, ParsedSummary, SummaryBuilder};

/// An EVTC log with its header decoded and section layout resolved.
///
/// Each query runs only the scans its fact needs. Nothing is cached between
/// queries; the event array is never loaded as a whole.
pub struct EvtcLog<R> {
    source: LogSource<R>,
    header: EncounterHeader,
    layout: Layout,
}

impl EvtcLog<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("Opening {}", path.as_ref().display());
        Self::from_source(LogSource::open(path)?)
    }
}

impl<R: Read + Seek> EvtcLog<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_source(LogSource::new(reader)?)
    }

    fn from_source(mut source: LogSource<R>) -> Result<Self> {
        let header = EncounterHeader::read(&mut source)?;
        let layout = Layout::resolve(&mut source, header.revision)?;
        Ok(Self {
            source,
            header,
            layout,
        })
    }

    pub fn header(&self) -> &EncounterHeader {
        &self.header
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn event_count(&self) -> u64 {
        self.layout.event_count
    }

    /// Decode the agent array: players in file order and the boss, if any.
    pub fn agents(&mut self) -> Result<AgentTable> {
        AgentTable::read(&mut self.source, &self.layout, self.header.encounter_id)
    }

    /// Players from the agent array, without guild ids.
    pub fn players(&mut self) -> Result<Vec<PlayerDetails>> {
        Ok(self.agents()?.players)
    }

    pub fn skill(&mut self, index: u32) -> Result<Option<SkillRecord>> {
        SkillRecord::read(&mut self.source, &self.layout, index)
    }

    pub fn events(&mut self) -> EventStream<'_, R> {
        EventStream::new(&mut self.source, &self.layout)
    }

    /// Whether the log contains a reward event.
    pub fn success(&mut self) -> Result<bool> {
        debug!("Scanning backward for reward");
        let mut facts = EventFacts::default();
        self.events()
            .find_backward(|event| classify::reward(&mut facts, event))?;
        Ok(facts.success())
    }

    /// Server and local time of the first LOGSTART.
    pub fn log_start(&mut self) -> Result<Option<LogTimestamp>> {
        debug!("Scanning forward for log start");
        let mut facts = EventFacts::default();
        self.events()
            .find_forward(|event| classify::log_start(&mut facts, event))?;
        Ok(facts.log_start)
    }

    /// Server and local time of the last LOGEND.
    pub fn log_end(&mut self) -> Result<Option<LogTimestamp>> {
        debug!("Scanning backward for log end");
        let mut facts = EventFacts::default();
        self.events()
            .find_backward(|event| classify::log_end(&mut facts, event))?;
        Ok(facts.log_end)
    }

    /// Local end of the encounter: the reward time, else the last LOGEND,
    /// else the time of the last event.
    pub fn local_end(&mut self) -> Result<Option<u64>> {
        debug!("Scanning backward for precise end");
        let mut facts = EventFacts::default();
        let mut events = self.events();
        events.find_backward(|event| classify::precise_end(&mut facts, event))?;

        // Only read the last event when no end marker was found.
        let last_event_time = match (facts.reward_time, facts.log_end) {
            (None, None) => events.last()?.map(|event| event.time),
            _ => None,
        };
        Ok(summary::local_end(
            facts.reward_time,
            facts.log_end,
            last_event_time,
        ))
    }

    /// Maximum health of the boss agent, if both the boss and a
    /// MAXHEALTHUPDATE for it are present.
    pub fn boss_max_health(&mut self) -> Result<Option<u64>> {
        let agents = self.agents()?;
        if agents.boss_address.is_none() {
            debug!("No boss agent, skipping boss health scan");
            return Ok(None);
        }

        debug!("Scanning forward for boss max health");
        let mut facts = EventFacts::new(agents);
        self.events()
            .find_forward(|event| classify::boss_max_health(&mut facts, event))?;
        Ok(facts.boss_max_health)
    }

    pub fn cm_verdict(&mut self, table: &EncounterTable) -> Result<CmVerdict> {
        let policy = table.resolve(self.header.encounter_id).cm;
        let boss_max_health = if policy.needs_boss_health() {
            self.boss_max_health()?
        } else {
            None
        };
        Ok(policy.evaluate(boss_max_health))
    }

    /// Local end minus local start, when both exist and are ordered.
    pub fn duration(&mut self) -> Result<Option<u64>> {
        let start = self.log_start()?.map(|t| t.local);
        if start.is_none() {
            return Ok(None);
        }
        Ok(summary::duration(start, self.local_end()?))
    }

    /// Every fact in one forward sweep plus one read of the last event.
    pub fn summarize(&mut self, table: &EncounterTable) -> Result<ParsedSummary> {
        let mut facts = EventFacts::new(self.agents()?);
        let mut events = self.events();

        debug!("Sweeping {} events", events.len());
        events.sweep(|event| {
            classify::classify(&Classifier::ALL, &mut facts, event);
        })?;
        let last_event_time = events.last()?.map(|event| event.time);

        Ok(SummaryBuilder::new(table, self.header.clone())
            .facts(facts)
            .last_event_time(last_event_time)
            .build())
    }
}

/// Open `path` and build its full summary.
pub fn parse_file<P: AsRef<Path>>(path: P, table: &EncounterTable) -> Result<ParsedSummary> {
    EvtcLog::open(path)?.summarize(table)
}
