//! EVTC file format: header, section layout and record decoding.

mod agent;
mod event;
mod guild;
mod header;
pub mod layout;
mod skill;
mod stream;

pub use agent::{AgentName, AgentRecord, AgentTable, PlayerDetails};
pub use event::{ADDON_SOURCE_AGENT, CombatEvent, StateChange};
pub use guild::GuildId;
pub use header::EncounterHeader;
pub use layout::{Layout, Revision};
pub use skill::SkillRecord;
pub use stream::EventStream;
