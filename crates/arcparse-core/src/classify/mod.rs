//! Event classifiers.
//!
//! Each classifier inspects one event, reports whether it matched, and on a
//! match records what it extracted into [`EventFacts`]. Classifiers never
//! decide scan direction or when to stop; callers pick a scan mode on
//! [`EventStream`](crate::evtc::EventStream) and feed events in.

use serde::Serialize;
use strum::IntoStaticStr;
use tracing::trace;

use crate::evtc::{AgentTable, CombatEvent, PlayerDetails, StateChange};

/// A timestamp pair reported by the logging addon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LogTimestamp {
    /// Server unix time, seconds.
    pub server: u32,
    /// Local precise time of the event.
    pub local: u64,
}

/// Everything the classifiers can extract from the event stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventFacts {
    pub boss_address: Option<u64>,
    pub players: Vec<PlayerDetails>,
    pub log_start: Option<LogTimestamp>,
    pub log_end: Option<LogTimestamp>,
    pub reward_time: Option<u64>,
    pub boss_max_health: Option<u64>,
}

impl EventFacts {
    pub fn new(agents: AgentTable) -> Self {
        Self {
            boss_address: agents.boss_address,
            players: agents.players,
            ..Default::default()
        }
    }

    /// A reward event is the authoritative success signal.
    pub fn success(&self) -> bool {
        self.reward_time.is_some()
    }

    fn player_mut(&mut self, address: u64) -> Option<&mut PlayerDetails> {
        self.players.iter_mut().find(|p| p.address == address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Classifier {
    LogStart,
    LogEnd,
    Reward,
    BossMaxHealth,
    GuildAssociation,
}

impl Classifier {
    /// Every classifier, in the order a full sweep tries them.
    pub const ALL: [Classifier; 5] = [
        Classifier::Reward,
        Classifier::LogStart,
        Classifier::LogEnd,
        Classifier::BossMaxHealth,
        Classifier::GuildAssociation,
    ];

    pub fn apply(self, facts: &mut EventFacts, event: &CombatEvent) -> bool {
        let matched = match self {
            Self::LogStart => log_start(facts, event),
            Self::LogEnd => log_end(facts, event),
            Self::Reward => reward(facts, event),
            Self::BossMaxHealth => boss_max_health(facts, event),
            Self::GuildAssociation => guild_association(facts, event),
        };
        if matched {
            let name: &'static str = self.into();
            trace!("{} matched event at {}", name, event.time);
        }
        matched
    }
}

/// Run `classifiers` in order against one event; the first match wins.
pub fn classify(
    classifiers: &[Classifier],
    facts: &mut EventFacts,
    event: &CombatEvent,
) -> Option<Classifier> {
    classifiers
        .iter()
        .copied()
        .find(|classifier| classifier.apply(facts, event))
}

/// LOGSTART from the addon. Keeps the first one seen.
pub fn log_start(facts: &mut EventFacts, event: &CombatEvent) -> bool {
    if !(event.is(StateChange::LogStart) && event.is_from_addon()) {
        return false;
    }
    facts.log_start.get_or_insert(LogTimestamp {
        server: event.value as u32,
        local: event.time,
    });
    true
}

/// LOGEND from the addon. Each match replaces the previous one, so a forward
/// sweep ends up with the last LOGEND in the file.
pub fn log_end(facts: &mut EventFacts, event: &CombatEvent) -> bool {
    if !(event.is(StateChange::LogEnd) && event.is_from_addon()) {
        return false;
    }
    facts.log_end = Some(LogTimestamp {
        server: event.value as u32,
        local: event.time,
    });
    true
}

/// REWARD: the encounter was completed.
pub fn reward(facts: &mut EventFacts, event: &CombatEvent) -> bool {
    if !event.is(StateChange::Reward) {
        return false;
    }
    facts.reward_time = Some(event.time);
    true
}

/// Exact end of the encounter, for backward scans.
///
/// A LOGEND only records a candidate and lets the scan continue; a REWARD
/// is definitive and reports the match that stops it. Scanning backward, the
/// first LOGEND seen is the last one in the file and is kept.
pub fn precise_end(facts: &mut EventFacts, event: &CombatEvent) -> bool {
    if reward(facts, event) {
        return true;
    }
    if facts.log_end.is_none() {
        log_end(facts, event);
    }
    false
}

/// MAXHEALTHUPDATE for the boss agent. Keeps the first one seen.
pub fn boss_max_health(facts: &mut EventFacts, event: &CombatEvent) -> bool {
    let Some(boss) = facts.boss_address else {
        return false;
    };
    if !(event.is(StateChange::MaxHealthUpdate) && event.src_agent == boss) {
        return false;
    }
    facts.boss_max_health.get_or_insert(event.dst_agent);
    true
}

/// GUILD: attach the guild id to the matching player. Later events for the
/// same player overwrite earlier ones.
pub fn guild_association(facts: &mut EventFacts, event: &CombatEvent) -> bool {
    if !event.is(StateChange::Guild) {
        return false;
    }
    if let Some(player) = facts.player_mut(event.src_agent) {
        player.guild = Some(event.guild_id());
    }
    true
}
