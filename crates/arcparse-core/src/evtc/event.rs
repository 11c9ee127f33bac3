use strum::{FromRepr, IntoStaticStr};

use crate::error::Result;
use crate::evtc::guild::GuildId;
use crate::evtc::layout::{Revision, Slot};
use crate::source::ByteBuffer;

/// Source address the logging addon uses for its own metadata events.
pub const ADDON_SOURCE_AGENT: u64 = 0x637261;

/// State-change discriminants carried in `is_statechange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum StateChange {
    None = 0,
    EnterCombat = 1,
    ExitCombat = 2,
    ChangeUp = 3,
    ChangeDead = 4,
    ChangeDown = 5,
    Spawn = 6,
    Despawn = 7,
    HealthUpdate = 8,
    /// `value` is the server unix timestamp.
    LogStart = 9,
    /// `value` is the server unix timestamp.
    LogEnd = 10,
    WeaponSwap = 11,
    /// `dst_agent` is the new maximum health.
    MaxHealthUpdate = 12,
    PointOfView = 13,
    Language = 14,
    GwBuild = 15,
    ShardId = 16,
    Reward = 17,
    BuffInitial = 18,
    Position = 19,
    Velocity = 20,
    Facing = 21,
    TeamChange = 22,
    AttackTarget = 23,
    Targetable = 24,
    MapId = 25,
    ReplInfo = 26,
    StackActive = 27,
    StackReset = 28,
    /// `dst_agent` through `buff_dmg` hold a 16-byte guild id.
    Guild = 29,
}

impl StateChange {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// One combat event with both record revisions normalized into the same
/// shape. Fields a revision does not store are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CombatEvent {
    pub time: u64,
    pub src_agent: u64,
    pub dst_agent: u64,
    pub value: i32,
    pub buff_dmg: i32,
    pub overstack_value: u32,
    pub skill_id: u32,
    pub src_instid: u16,
    pub dst_instid: u16,
    pub src_master_instid: u16,
    pub dst_master_instid: u16,
    pub iff: u8,
    pub buff: u8,
    pub result: u8,
    pub is_activation: u8,
    pub is_buffremove: u8,
    pub is_ninety: bool,
    pub is_fifty: bool,
    pub is_moving: bool,
    pub statechange: u8,
    pub is_flanking: bool,
    pub is_shields: bool,
    pub is_offcycle: bool,
}

impl CombatEvent {
    /// Decode one raw record laid out according to `revision`.
    pub fn decode(revision: Revision, raw: &[u8]) -> Result<Self> {
        let fields = revision.fields();
        let buf = ByteBuffer::new(raw);

        let widened = |slot: Slot| -> Result<u32> {
            match slot {
                Slot::U16(offset) => buf.read_u16_at(offset).map(u32::from),
                Slot::U32(offset) => buf.read_u32_at(offset),
            }
        };
        let optional_u16 = |offset: Option<usize>| -> Result<u16> {
            offset.map_or(Ok(0), |o| buf.read_u16_at(o))
        };
        let flag = |offset: usize| -> Result<bool> { Ok(buf.read_u8_at(offset)? != 0) };

        Ok(Self {
            time: buf.read_u64_at(fields.time)?,
            src_agent: buf.read_u64_at(fields.src_agent)?,
            dst_agent: buf.read_u64_at(fields.dst_agent)?,
            value: buf.read_i32_at(fields.value)?,
            buff_dmg: buf.read_i32_at(fields.buff_dmg)?,
            overstack_value: widened(fields.overstack_value)?,
            skill_id: widened(fields.skill_id)?,
            src_instid: buf.read_u16_at(fields.src_instid)?,
            dst_instid: buf.read_u16_at(fields.dst_instid)?,
            src_master_instid: buf.read_u16_at(fields.src_master_instid)?,
            dst_master_instid: optional_u16(fields.dst_master_instid)?,
            iff: buf.read_u8_at(fields.iff)?,
            buff: buf.read_u8_at(fields.buff)?,
            result: buf.read_u8_at(fields.result)?,
            is_activation: buf.read_u8_at(fields.is_activation)?,
            is_buffremove: buf.read_u8_at(fields.is_buffremove)?,
            is_ninety: flag(fields.is_ninety)?,
            is_fifty: flag(fields.is_fifty)?,
            is_moving: flag(fields.is_moving)?,
            statechange: buf.read_u8_at(fields.is_statechange)?,
            is_flanking: flag(fields.is_flanking)?,
            is_shields: flag(fields.is_shields)?,
            is_offcycle: match fields.is_offcycle {
                Some(offset) => flag(offset)?,
                None => false,
            },
        })
    }

    /// The state-change kind, or `None` for an unknown code.
    pub fn state_change(&self) -> Option<StateChange> {
        StateChange::from_u8(self.statechange)
    }

    pub fn is(&self, kind: StateChange) -> bool {
        self.statechange == kind as u8
    }

    /// Whether this is a metadata event emitted by the logging addon itself.
    pub fn is_from_addon(&self) -> bool {
        self.src_agent == ADDON_SOURCE_AGENT
    }

    /// The guild identifier overlaid on this event. Only meaningful when
    /// the event is a [`StateChange::Guild`] event.
    pub fn guild_id(&self) -> GuildId {
        GuildId::from_event_fields(self.dst_agent, self.value, self.buff_dmg)
    }
}
