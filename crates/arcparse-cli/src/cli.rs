//! CLI argument definitions for arcparse.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcparse")]
#[command(about = "EVTC combat log parser", version)]
pub struct Args {
    /// Encounter table (TOML) merged over the built-in one
    #[arg(long, value_name = "FILE", env = "ARCPARSE_ENCOUNTERS", global = true)]
    pub encounters: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the parser version
    Version,
    /// Print the whole summary as JSON
    Json { file: PathBuf },
    /// Print build id, encounter name and encounter id
    Header { file: PathBuf },
    /// Print the event record revision
    Revision { file: PathBuf },
    /// Print one account name per player
    Players { file: PathBuf },
    /// Print SUCCESS or FAILURE
    Success { file: PathBuf },
    /// Print the server start time (unix seconds)
    StartTime { file: PathBuf },
    /// Print the server end time (unix seconds)
    EndTime { file: PathBuf },
    /// Print the local start time
    LocalStartTime { file: PathBuf },
    /// Print the local end time
    LocalEndTime { file: PathBuf },
    /// Print the boss max health
    BossMaxhealth { file: PathBuf },
    /// Print YES, NO or UNKNOWN
    IsCm { file: PathBuf },
    /// Print the encounter duration
    Duration { file: PathBuf },
    /// Print the encounter location
    Location { file: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_version() {
        let args = parse(&["arcparse", "version"]);
        assert_eq!(args.command, Command::Version);
    }

    #[test]
    fn test_parse_file_commands() {
        let cases = [
            ("json", Command::Json { file: "a.evtc".into() }),
            ("header", Command::Header { file: "a.evtc".into() }),
            ("players", Command::Players { file: "a.evtc".into() }),
            ("start-time", Command::StartTime { file: "a.evtc".into() }),
            (
                "local-end-time",
                Command::LocalEndTime { file: "a.evtc".into() },
            ),
            (
                "boss-maxhealth",
                Command::BossMaxhealth { file: "a.evtc".into() },
            ),
            ("is-cm", Command::IsCm { file: "a.evtc".into() }),
            ("location", Command::Location { file: "a.evtc".into() }),
        ];

        for (name, expected) in cases {
            let args = parse(&["arcparse", name, "a.evtc"]);
            assert_eq!(args.command, expected, "subcommand {name}");
        }
    }

    #[test]
    fn test_file_is_required() {
        assert!(Args::try_parse_from(["arcparse", "success"]).is_err());
    }

    #[test]
    fn test_version_takes_no_file() {
        assert!(Args::try_parse_from(["arcparse", "version", "a.evtc"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(Args::try_parse_from(["arcparse", "dps", "a.evtc"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["arcparse"]).is_err());
    }

    #[test]
    fn test_encounters_option_is_global() {
        let before = parse(&["arcparse", "--encounters", "e.toml", "is-cm", "a.evtc"]);
        let after = parse(&["arcparse", "is-cm", "a.evtc", "--encounters", "e.toml"]);

        assert_eq!(before.encounters, Some(PathBuf::from("e.toml")));
        assert_eq!(after.encounters, Some(PathBuf::from("e.toml")));
    }
}
