pub mod classify;
pub mod encounter;
pub mod error;
pub mod evtc;
pub mod log;
pub mod source;
pub mod summary;

#[doc(hidden)]
pub mod testing;

pub use classify::{Classifier, EventFacts, LogTimestamp};
pub use encounter::{CmPolicy, CmVerdict, EncounterMetadata, EncounterTable};
pub use error::{Error, Result};
pub use evtc::{
    AgentTable, CombatEvent, EncounterHeader, EventStream, GuildId, Layout, PlayerDetails,
    Revision, StateChange,
};
pub use log::{EvtcLog, parse_file};
pub use summary::{ParsedSummary, SummaryBuilder};
