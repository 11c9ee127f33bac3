use serde::Serialize;
use std::io::{Read, Seek};
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::evtc::guild::GuildId;
use crate::evtc::layout::{Layout, NAME_SIZE, agent};
use crate::source::{ByteBuffer, LogSource, split_nul_strings};

/// The three strings packed into an agent's 64-byte name blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentName {
    pub character: String,
    pub account: String,
    pub subgroup: String,
}

impl AgentName {
    /// Split the blob into character, account and subgroup.
    ///
    /// Returns `None` when the window holds fewer than three terminators.
    /// One leading ':' is stripped from the account name.
    pub fn parse(blob: &[u8]) -> Option<Self> {
        let [character, mut account, subgroup] = split_nul_strings::<3>(blob)?;
        if account.starts_with(':') {
            account.remove(0);
        }
        Some(Self {
            character,
            account,
            subgroup,
        })
    }
}

/// One decoded agent record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRecord {
    pub address: u64,
    pub profession: u32,
    pub elite: u32,
    pub toughness: u16,
    pub concentration: u16,
    pub healing: u16,
    pub hitbox_width: u16,
    pub condition: u16,
    pub hitbox_height: u16,
    pub name: AgentName,
}

impl AgentRecord {
    pub fn decode(index: u32, raw: &[u8]) -> Result<Self> {
        let mut buf = ByteBuffer::new(raw);

        let address = buf.read_u64()?;
        let profession = buf.read_u32()?;
        let elite = buf.read_u32()?;
        let toughness = buf.read_u16()?;
        let concentration = buf.read_u16()?;
        let healing = buf.read_u16()?;
        let hitbox_width = buf.read_u16()?;
        let condition = buf.read_u16()?;
        let hitbox_height = buf.read_u16()?;
        let blob = buf.read_bytes(NAME_SIZE)?;

        let name = AgentName::parse(blob).ok_or_else(|| Error::MalformedAgent {
            index,
            message: "name blob holds fewer than three NUL-terminated strings".to_string(),
        })?;

        Ok(Self {
            address,
            profession,
            elite,
            toughness,
            concentration,
            healing,
            hitbox_width,
            condition,
            hitbox_height,
            name,
        })
    }

    pub fn is_player(&self) -> bool {
        self.elite != agent::NON_PLAYER_ELITE
    }

    pub fn is_gadget(&self) -> bool {
        self.profession & agent::GADGET_MARKER == agent::GADGET_MARKER
    }

    /// Species id of a non-player agent.
    pub fn species_id(&self) -> u16 {
        (self.profession & agent::SPECIES_ID_MASK) as u16
    }

    /// Whether this agent is the boss of encounter `encounter_id`.
    pub fn is_boss_of(&self, encounter_id: u16) -> bool {
        !self.is_player() && !self.is_gadget() && self.species_id() == encounter_id
    }
}

/// A player taking part in the encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerDetails {
    pub character: String,
    pub account: String,
    pub subgroup: String,
    #[serde(skip)]
    pub address: u64,
    #[serde(rename = "guid", skip_serializing_if = "Option::is_none")]
    pub guild: Option<GuildId>,
}

impl From<AgentRecord> for PlayerDetails {
    fn from(record: AgentRecord) -> Self {
        Self {
            character: record.name.character,
            account: record.name.account,
            subgroup: record.name.subgroup,
            address: record.address,
            guild: None,
        }
    }
}

/// Players in file order plus the boss agent, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentTable {
    pub players: Vec<PlayerDetails>,
    pub boss_address: Option<u64>,
}

impl AgentTable {
    /// Decode every agent record and classify it.
    pub fn read<R: Read + Seek>(
        source: &mut LogSource<R>,
        layout: &Layout,
        encounter_id: u16,
    ) -> Result<Self> {
        let mut table = Self::default();
        let mut raw = [0u8; agent::RECORD_SIZE as usize];

        for index in 0..layout.agent_count {
            source.read_exact_at(layout.agent_offset(index), &mut raw)?;
            let record = AgentRecord::decode(index, &raw)?;
            table.push(record, encounter_id);
        }

        debug!(
            "Read {} agents: {} players, boss {:?}",
            layout.agent_count,
            table.players.len(),
            table.boss_address
        );
        if table.boss_address.is_none() {
            warn!("No boss agent found for encounter {:#06x}", encounter_id);
        }

        Ok(table)
    }

    fn push(&mut self, record: AgentRecord, encounter_id: u16) {
        if record.is_player() {
            trace!("Player agent {:#x}: {}", record.address, record.name.account);
            self.players.push(record.into());
        } else if self.boss_address.is_none() && record.is_boss_of(encounter_id) {
            trace!("Boss agent {:#x}", record.address);
            self.boss_address = Some(record.address);
        }
    }
}
