//! On-disk layout of EVTC log files.
//!
//! # File Structure Overview
//!
//! ```text
//! Offset                      Size                   Description
//! ─────────────────────────────────────────────────────────────────────
//! 0x00                        16                     Header
//! 0x10                        4                      agent_count (u32)
//! 0x14                        agent_count * 96       Agent records
//! A = 0x14 + agent_count*96   4                      skill_count (u32)
//! A + 4                       skill_count * 68       Skill records
//! E = A + 4 + skill_count*68  rest of file           Combat event records
//! ```
//!
//! The event array carries no count; it is derived from the remaining length
//! and the record width of the header's revision.

use serde::Serialize;
use std::io::{Read, Seek};
use tracing::debug;

use crate::error::{Error, Result};
use crate::source::LogSource;

pub const HEADER_SIZE: u64 = 16;
pub const COUNT_SIZE: u64 = 4;
pub const AGENT_COUNT_OFFSET: u64 = HEADER_SIZE;
pub const AGENT_ARRAY_OFFSET: u64 = AGENT_COUNT_OFFSET + COUNT_SIZE;

/// Width of the name blob shared by agent and skill records.
pub const NAME_SIZE: usize = 64;

/// Agent record layout.
///
/// ```text
/// Offset   Field              Size
/// ─────────────────────────────────
/// 0x00     address            8
/// 0x08     profession         4
/// 0x0C     is_elite           4
/// 0x10     toughness          2
/// 0x12     concentration      2
/// 0x14     healing            2
/// 0x16     hitbox_width       2
/// 0x18     condition          2
/// 0x1A     hitbox_height      2
/// 0x1C     name               64
/// 0x5C     (padding)          4
/// ```
pub mod agent {
    pub const RECORD_SIZE: u64 = 96;

    /// `is_elite` value marking a non-player agent.
    pub const NON_PLAYER_ELITE: u32 = 0xFFFF_FFFF;

    /// Upper profession bits marking a gadget.
    pub const GADGET_MARKER: u32 = 0xFFFF_0000;

    /// Lower profession bits holding the species id of a non-player.
    pub const SPECIES_ID_MASK: u32 = 0x0000_FFFF;
}

/// Skill record layout: `id: i32` followed by a 64-byte name.
pub mod skill {
    pub const RECORD_SIZE: u64 = 68;
}

/// Combat event record revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
#[repr(u8)]
pub enum Revision {
    V0 = 0,
    V1 = 1,
}

impl Revision {
    pub const MAX: u8 = Revision::V1 as u8;

    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::V0),
            1 => Ok(Self::V1),
            _ => Err(Error::UnsupportedRevision {
                revision: value,
                max: Self::MAX,
            }),
        }
    }

    /// Width in bytes of one combat event record.
    pub fn event_size(self) -> u64 {
        self.fields().record_size as u64
    }

    /// Field offset table for this revision.
    pub fn fields(self) -> &'static EventFields {
        match self {
            Self::V0 => &EVENT_V0,
            Self::V1 => &EVENT_V1,
        }
    }
}

impl From<Revision> for u8 {
    fn from(revision: Revision) -> u8 {
        revision as u8
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// A field whose stored width differs between revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    U16(usize),
    U32(usize),
}

/// Byte offsets of every decoded field inside one combat event record.
///
/// `None` marks a field the revision does not store; it decodes as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventFields {
    pub record_size: usize,
    pub time: usize,
    pub src_agent: usize,
    pub dst_agent: usize,
    pub value: usize,
    pub buff_dmg: usize,
    pub overstack_value: Slot,
    pub skill_id: Slot,
    pub src_instid: usize,
    pub dst_instid: usize,
    pub src_master_instid: usize,
    pub dst_master_instid: Option<usize>,
    pub iff: usize,
    pub buff: usize,
    pub result: usize,
    pub is_activation: usize,
    pub is_buffremove: usize,
    pub is_ninety: usize,
    pub is_fifty: usize,
    pub is_moving: usize,
    pub is_statechange: usize,
    pub is_flanking: usize,
    pub is_shields: usize,
    pub is_offcycle: Option<usize>,
}

/// Revision 0: 16-bit skill id and overstack, nine internal tracking bytes
/// at 0x2A..0x33.
pub const EVENT_V0: EventFields = EventFields {
    record_size: 64,
    time: 0,
    src_agent: 8,
    dst_agent: 16,
    value: 24,
    buff_dmg: 28,
    overstack_value: Slot::U16(32),
    skill_id: Slot::U16(34),
    src_instid: 36,
    dst_instid: 38,
    src_master_instid: 40,
    dst_master_instid: None,
    iff: 51,
    buff: 52,
    result: 53,
    is_activation: 54,
    is_buffremove: 55,
    is_ninety: 56,
    is_fifty: 57,
    is_moving: 58,
    is_statechange: 59,
    is_flanking: 60,
    is_shields: 61,
    is_offcycle: None,
};

/// Revision 1: 32-bit skill id and overstack, dst master id, offcycle flag.
pub const EVENT_V1: EventFields = EventFields {
    record_size: 64,
    time: 0,
    src_agent: 8,
    dst_agent: 16,
    value: 24,
    buff_dmg: 28,
    overstack_value: Slot::U32(32),
    skill_id: Slot::U32(36),
    src_instid: 40,
    dst_instid: 42,
    src_master_instid: 44,
    dst_master_instid: Some(46),
    iff: 48,
    buff: 49,
    result: 50,
    is_activation: 51,
    is_buffremove: 52,
    is_ninety: 53,
    is_fifty: 54,
    is_moving: 55,
    is_statechange: 56,
    is_flanking: 57,
    is_shields: 58,
    is_offcycle: Some(59),
};

/// Largest event record width of any known revision.
pub const MAX_EVENT_SIZE: usize = 64;

/// Resolved section offsets of one log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub revision: Revision,
    pub agent_count: u32,
    pub skill_count: u32,
    pub skill_count_offset: u64,
    pub skill_array_offset: u64,
    pub event_array_offset: u64,
    pub event_count: u64,
    pub file_len: u64,
}

impl Layout {
    /// Read the two section counts and derive every offset.
    pub fn resolve<R: Read + Seek>(source: &mut LogSource<R>, revision: Revision) -> Result<Self> {
        let file_len = source.len();
        ensure_within(AGENT_ARRAY_OFFSET, file_len, "agent count")?;
        let agent_count = source.read_u32_at(AGENT_COUNT_OFFSET)?;

        let skill_count_offset = skill_count_offset(agent_count)?;
        ensure_within(skill_count_offset + COUNT_SIZE, file_len, "skill count")?;
        let skill_count = source.read_u32_at(skill_count_offset)?;

        Self::from_counts(revision, agent_count, skill_count, file_len)
    }

    /// Pure offset arithmetic over already-read counts.
    pub fn from_counts(
        revision: Revision,
        agent_count: u32,
        skill_count: u32,
        file_len: u64,
    ) -> Result<Self> {
        let skill_count_offset = skill_count_offset(agent_count)?;
        let skill_array_offset = skill_count_offset + COUNT_SIZE;
        ensure_within(skill_array_offset, file_len, "skill array")?;

        let event_array_offset = (skill_count as u64)
            .checked_mul(skill::RECORD_SIZE)
            .and_then(|size| size.checked_add(skill_array_offset))
            .ok_or_else(|| Error::CorruptedFile("skill array size overflows".to_string()))?;
        ensure_within(event_array_offset, file_len, "event array")?;

        let event_bytes = file_len - event_array_offset;
        let width = revision.event_size();
        if event_bytes % width != 0 {
            return Err(Error::CorruptedFile(format!(
                "event region of {event_bytes} bytes is not a multiple of the revision {revision} record width {width}"
            )));
        }
        let event_count = event_bytes / width;

        debug!(
            "Layout: {} agents, {} skills, {} events at {:#x} (revision {})",
            agent_count, skill_count, event_count, event_array_offset, revision
        );

        Ok(Self {
            revision,
            agent_count,
            skill_count,
            skill_count_offset,
            skill_array_offset,
            event_array_offset,
            event_count,
            file_len,
        })
    }

    /// Offset of agent record `index`.
    pub fn agent_offset(&self, index: u32) -> u64 {
        AGENT_ARRAY_OFFSET + index as u64 * agent::RECORD_SIZE
    }

    /// Offset of skill record `index`.
    pub fn skill_offset(&self, index: u32) -> u64 {
        self.skill_array_offset + index as u64 * skill::RECORD_SIZE
    }

    /// Offset of combat event record `index`.
    pub fn event_offset(&self, index: u64) -> u64 {
        self.event_array_offset + index * self.revision.event_size()
    }
}

fn skill_count_offset(agent_count: u32) -> Result<u64> {
    (agent_count as u64)
        .checked_mul(agent::RECORD_SIZE)
        .and_then(|size| size.checked_add(AGENT_ARRAY_OFFSET))
        .ok_or_else(|| Error::CorruptedFile("agent array size overflows".to_string()))
}

fn ensure_within(offset: u64, file_len: u64, what: &str) -> Result<()> {
    if offset > file_len {
        return Err(Error::CorruptedFile(format!(
            "{what} ends at {offset:#x}, past the end of the file ({file_len} bytes)"
        )));
    }
    Ok(())
}
