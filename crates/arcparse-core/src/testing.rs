//! Synthetic log construction for tests.
//!
//! [`EvtcBuilder`] assembles an EVTC file byte by byte: header, agent array,
//! skill array and combat events in either record revision.

use crate::evtc::layout::{EventFields, NAME_SIZE, Revision, Slot, agent, skill};
use crate::evtc::{ADDON_SOURCE_AGENT, CombatEvent, StateChange};

/// Builder for synthetic EVTC logs
///
/// Provides a fluent API; every method consumes and returns the builder.
#[derive(Debug, Clone)]
pub struct EvtcBuilder {
    build: String,
    revision: u8,
    encounter_id: u16,
    agents: Vec<Vec<u8>>,
    skills: Vec<Vec<u8>>,
    events: Vec<CombatEvent>,
    trailing: Vec<u8>,
}

impl Default for EvtcBuilder {
    fn default() -> Self {
        Self::new(Revision::V1)
    }
}

impl EvtcBuilder {
    /// Create a builder for an empty log with build id "20180904"
    pub fn new(revision: Revision) -> Self {
        Self {
            build: "20180904".to_string(),
            revision: revision.into(),
            encounter_id: 0,
            agents: Vec::new(),
            skills: Vec::new(),
            events: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// Set the 8-character build id
    pub fn build_id(mut self, build: &str) -> Self {
        self.build = build.to_string();
        self
    }

    /// Set the raw revision byte, including unsupported values
    pub fn raw_revision(mut self, revision: u8) -> Self {
        self.revision = revision;
        self
    }

    pub fn encounter(mut self, encounter_id: u16) -> Self {
        self.encounter_id = encounter_id;
        self
    }

    /// Add a player agent
    pub fn player(self, address: u64, character: &str, account: &str, subgroup: &str) -> Self {
        let blob = [character, account, subgroup].join("\0") + "\0";
        self.raw_agent(address, 1, 0, blob.as_bytes())
    }

    /// Add a non-player agent with the given species id
    pub fn npc(self, address: u64, species_id: u16) -> Self {
        self.raw_agent(address, species_id as u32, agent::NON_PLAYER_ELITE, b"NPC\0\0\0")
    }

    /// Add a gadget agent with the given id in its lower 16 bits
    pub fn gadget(self, address: u64, id: u16) -> Self {
        self.raw_agent(
            address,
            agent::GADGET_MARKER | id as u32,
            agent::NON_PLAYER_ELITE,
            b"Gadget\0\0\0",
        )
    }

    /// Add an agent record with an arbitrary name blob, truncated or
    /// zero-padded to 64 bytes
    pub fn raw_agent(mut self, address: u64, profession: u32, elite: u32, name: &[u8]) -> Self {
        let mut record = Vec::with_capacity(agent::RECORD_SIZE as usize);
        record.extend_from_slice(&address.to_le_bytes());
        record.extend_from_slice(&profession.to_le_bytes());
        record.extend_from_slice(&elite.to_le_bytes());
        record.extend_from_slice(&[0u8; 12]);
        let mut blob = name.to_vec();
        blob.resize(NAME_SIZE, 0);
        record.extend_from_slice(&blob);
        record.resize(agent::RECORD_SIZE as usize, 0);
        self.agents.push(record);
        self
    }

    pub fn skill(mut self, id: i32, name: &str) -> Self {
        let mut record = Vec::with_capacity(skill::RECORD_SIZE as usize);
        record.extend_from_slice(&id.to_le_bytes());
        let mut blob = name.as_bytes().to_vec();
        blob.resize(NAME_SIZE, 0);
        record.extend_from_slice(&blob);
        self.skills.push(record);
        self
    }

    /// Add a combat event
    pub fn event(mut self, event: CombatEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Add a non-statechange event at `time`
    pub fn plain_event(self, time: u64) -> Self {
        self.event(CombatEvent {
            time,
            ..Default::default()
        })
    }

    pub fn statechange(self, kind: StateChange, time: u64, src_agent: u64) -> Self {
        self.event(CombatEvent {
            time,
            src_agent,
            statechange: kind as u8,
            ..Default::default()
        })
    }

    pub fn log_start(self, time: u64, server: u32) -> Self {
        self.addon_event(StateChange::LogStart, time, server)
    }

    pub fn log_end(self, time: u64, server: u32) -> Self {
        self.addon_event(StateChange::LogEnd, time, server)
    }

    pub fn reward(self, time: u64) -> Self {
        self.statechange(StateChange::Reward, time, 0)
    }

    pub fn max_health(self, time: u64, address: u64, health: u64) -> Self {
        self.event(CombatEvent {
            time,
            src_agent: address,
            dst_agent: health,
            statechange: StateChange::MaxHealthUpdate as u8,
            ..Default::default()
        })
    }

    /// Add a GUILD event carrying the raw 16-byte identifier
    pub fn guild(self, time: u64, address: u64, raw: [u8; 16]) -> Self {
        let mut dst = [0u8; 8];
        dst.copy_from_slice(&raw[..8]);
        let mut value = [0u8; 4];
        value.copy_from_slice(&raw[8..12]);
        let mut buff_dmg = [0u8; 4];
        buff_dmg.copy_from_slice(&raw[12..]);

        self.event(CombatEvent {
            time,
            src_agent: address,
            dst_agent: u64::from_le_bytes(dst),
            value: i32::from_le_bytes(value),
            buff_dmg: i32::from_le_bytes(buff_dmg),
            statechange: StateChange::Guild as u8,
            ..Default::default()
        })
    }

    /// Append raw bytes after the last event
    pub fn trailing_bytes(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    fn addon_event(self, kind: StateChange, time: u64, server: u32) -> Self {
        self.event(CombatEvent {
            time,
            src_agent: ADDON_SOURCE_AGENT,
            value: server as i32,
            statechange: kind as u8,
            ..Default::default()
        })
    }

    /// Serialize the log
    pub fn build(self) -> Vec<u8> {
        let mut data = Vec::new();

        let mut build = self.build.into_bytes();
        build.resize(8, b'0');
        data.extend_from_slice(b"EVTC");
        data.extend_from_slice(&build[..8]);
        data.push(self.revision);
        data.extend_from_slice(&self.encounter_id.to_le_bytes());
        data.push(0);

        data.extend_from_slice(&(self.agents.len() as u32).to_le_bytes());
        for record in &self.agents {
            data.extend_from_slice(record);
        }

        data.extend_from_slice(&(self.skills.len() as u32).to_le_bytes());
        for record in &self.skills {
            data.extend_from_slice(record);
        }

        let fields = Revision::from_u8(self.revision)
            .map(Revision::fields)
            .unwrap_or(Revision::V1.fields());
        for event in &self.events {
            data.extend_from_slice(&encode_event(fields, event));
        }

        data.extend_from_slice(&self.trailing);
        data
    }
}

/// Lay out `event` according to `fields`. Values too wide for a 16-bit slot
/// are truncated.
pub fn encode_event(fields: &EventFields, event: &CombatEvent) -> Vec<u8> {
    let mut raw = vec![0u8; fields.record_size];
    let mut put = |offset: usize, bytes: &[u8]| {
        raw[offset..offset + bytes.len()].copy_from_slice(bytes);
    };

    put(fields.time, &event.time.to_le_bytes());
    put(fields.src_agent, &event.src_agent.to_le_bytes());
    put(fields.dst_agent, &event.dst_agent.to_le_bytes());
    put(fields.value, &event.value.to_le_bytes());
    put(fields.buff_dmg, &event.buff_dmg.to_le_bytes());
    for (slot, value) in [
        (fields.overstack_value, event.overstack_value),
        (fields.skill_id, event.skill_id),
    ] {
        match slot {
            Slot::U16(offset) => put(offset, &(value as u16).to_le_bytes()),
            Slot::U32(offset) => put(offset, &value.to_le_bytes()),
        }
    }
    put(fields.src_instid, &event.src_instid.to_le_bytes());
    put(fields.dst_instid, &event.dst_instid.to_le_bytes());
    put(fields.src_master_instid, &event.src_master_instid.to_le_bytes());
    if let Some(offset) = fields.dst_master_instid {
        put(offset, &event.dst_master_instid.to_le_bytes());
    }
    put(fields.iff, &[event.iff]);
    put(fields.buff, &[event.buff]);
    put(fields.result, &[event.result]);
    put(fields.is_activation, &[event.is_activation]);
    put(fields.is_buffremove, &[event.is_buffremove]);
    put(fields.is_ninety, &[event.is_ninety as u8]);
    put(fields.is_fifty, &[event.is_fifty as u8]);
    put(fields.is_moving, &[event.is_moving as u8]);
    put(fields.is_statechange, &[event.statechange]);
    put(fields.is_flanking, &[event.is_flanking as u8]);
    put(fields.is_shields, &[event.is_shields as u8]);
    if let Some(offset) = fields.is_offcycle {
        put(offset, &[event.is_offcycle as u8]);
    }
    raw
}
