//! JSON summary command.

use anyhow::{Context, Result};
use arcparse_core::{EncounterTable, ParsedSummary};
use serde_json::{Map, Value, json};
use std::path::Path;

use crate::cli_utils;

pub fn run(path: &Path, table: &EncounterTable) -> Result<()> {
    let mut log = cli_utils::open_log(path)?;
    let summary = log
        .summarize(table)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&render(&summary))?);
    Ok(())
}

pub fn render(summary: &ParsedSummary) -> Value {
    let mut local_time = Map::new();
    local_time.insert("start".into(), json!(summary.local_start()));
    local_time.insert("end".into(), json!(summary.local_end()));
    local_time.insert("last_event".into(), json!(summary.last_event_time));
    if let Some(reward) = summary.reward_time {
        local_time.insert("reward".into(), json!(reward));
    }
    if let Some(log_end) = summary.log_end {
        local_time.insert("log_end".into(), json!(log_end.local));
    }

    json!({
        "parser": {
            "version": env!("CARGO_PKG_VERSION"),
        },
        "header": {
            "build": summary.header.build,
            "revision": summary.header.revision,
        },
        "boss": {
            "name": summary.encounter.name,
            "location": summary.encounter.location,
            "id": summary.header.encounter_id,
            "is_cm": summary.cm,
            "maxhealth": summary.boss_max_health,
            "success": summary.success,
            "duration": summary.duration(),
        },
        "local_time": local_time,
        "server_time": {
            "start": summary.server_start(),
            "end": summary.server_end(),
            "start_utc": summary.server_start_utc().map(|t| t.to_rfc3339()),
            "end_utc": summary.server_end_utc().map(|t| t.to_rfc3339()),
        },
        "players": summary.players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcparse_core::EvtcLog;
    use arcparse_core::testing::EvtcBuilder;
    use std::io::Cursor;

    fn summarize(builder: EvtcBuilder) -> ParsedSummary {
        EvtcLog::from_reader(Cursor::new(builder.build()))
            .unwrap()
            .summarize(&EncounterTable::builtin())
            .unwrap()
    }

    #[test]
    fn test_render_full_summary() {
        let mut guild = [0u8; 16];
        guild[15] = 1;
        let summary = summarize(
            EvtcBuilder::default()
                .encounter(0x4324)
                .player(1, "Char", ":acc.1234", "2")
                .npc(9, 0x4324)
                .log_start(100, 1_550_000_000)
                .max_health(101, 9, 30_000_000)
                .guild(102, 1, guild)
                .log_end(900, 1_550_000_008)
                .reward(850)
                .plain_event(950),
        );
        let value = render(&summary);

        assert_eq!(value["header"]["build"], "20180904");
        assert_eq!(value["header"]["revision"], 1);
        assert_eq!(value["boss"]["name"], "Samarog");
        assert_eq!(value["boss"]["location"], "4");
        assert_eq!(value["boss"]["id"], 0x4324);
        assert_eq!(value["boss"]["is_cm"], "NO");
        assert_eq!(value["boss"]["maxhealth"], 30_000_000);
        assert_eq!(value["boss"]["success"], true);
        assert_eq!(value["boss"]["duration"], 750);
        assert_eq!(value["local_time"]["end"], 850);
        assert_eq!(value["local_time"]["last_event"], 950);
        assert_eq!(value["local_time"]["reward"], 850);
        assert_eq!(value["local_time"]["log_end"], 900);
        assert_eq!(value["server_time"]["start_utc"], "2019-02-12T19:33:20+00:00");
        assert_eq!(value["players"][0]["subgroup"], "2");
        assert_eq!(
            value["players"][0]["guid"],
            "00000000-0000-0000-0000-000000000001"
        );
    }

    #[test]
    fn test_render_omits_missing_markers() {
        let value = render(&summarize(EvtcBuilder::default().encounter(5)));

        assert_eq!(value["boss"]["name"], "Unknown encounter 5");
        assert!(value["boss"]["location"].is_null());
        assert!(value["boss"]["duration"].is_null());
        assert!(value["local_time"].get("reward").is_none());
        assert!(value["local_time"].get("log_end").is_none());
        assert!(value["server_time"]["start_utc"].is_null());
        assert_eq!(value["players"], json!([]));
    }
}
