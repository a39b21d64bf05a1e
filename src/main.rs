//! Gravity Snail entry point
//!
//! Headless native driver: loads settings and levels, plays a fixed number
//! of frames with the walk key held and logs how the run went. Windowing and
//! drawing belong to a host application built on the library.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gravity_snail::consts::FRAME_DT;
use gravity_snail::input::{Key, KeySet, MouseState};
use gravity_snail::level::LevelSource;
use gravity_snail::{GameState, Session, Settings};

/// Floor with the spawn on the left and the goal on the right
const DEMO_LEVEL: &str = "5\n3\n\n3\n1e\n\n\n1b\n\n\n1b\n\n\n1b\n\n2\n1e\n";

const DEFAULT_FRAMES: u64 = 600;

/// Play levels headlessly and report how the run went
#[derive(Debug, Parser)]
#[command(name = "gravity-snail")]
struct Args {
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long)]
    frames: Option<u64>,
    /// Hold no keys instead of walking right
    #[arg(long)]
    idle: bool,
    /// Level files, text or `.json`; the built-in demo when empty
    levels: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Gravity Snail (headless) starting...");

    let args = Args::parse();

    let settings = args
        .settings
        .as_ref()
        .map_or_else(Settings::default, Settings::load_or_default);

    let levels: Vec<LevelSource> = if args.levels.is_empty() {
        log::info!("No level files given, playing the demo level");
        vec![LevelSource::Inline(DEMO_LEVEL.to_string())]
    } else {
        args.levels.iter().map(LevelSource::file).collect()
    };

    let mut session = Session::new(levels, settings);
    if let Err(e) = session.select_level(0) {
        log::error!("Could not start: {}", e);
        return ExitCode::FAILURE;
    }

    let keys = if args.idle {
        KeySet::EMPTY
    } else {
        KeySet::from_keys(&[Key::MoveRight])
    };
    let frames = args.frames.unwrap_or(DEFAULT_FRAMES);

    let mut played = 0;
    while played < frames {
        for event in session.frame(keys, MouseState::default(), FRAME_DT) {
            log::info!("Frame {}: {:?}", played, event);
        }
        played += 1;
        if matches!(session.state(), GameState::Win | GameState::GameOver) {
            break;
        }
    }

    let player = session.level().and_then(|level| level.player()).map(|player| player.position);
    log::info!(
        "Stopped after {} frames: {:?} in level {:?}, player at {:?}",
        played,
        session.state(),
        session.loaded_index(),
        player
    );
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["gravity-snail", "--frames", "30", "a.level", "--idle", "b.json"]).unwrap();
        assert_eq!(args.frames, Some(30));
        assert!(args.idle);
        assert!(args.settings.is_none());
        assert_eq!(args.levels, vec![PathBuf::from("a.level"), PathBuf::from("b.json")]);

        let args = Args::try_parse_from(["gravity-snail", "--settings", "tuning.json"]).unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("tuning.json")));
        assert!(args.levels.is_empty());

        assert!(Args::try_parse_from(["gravity-snail", "--frames"]).is_err());
        assert!(Args::try_parse_from(["gravity-snail", "--frames", "many"]).is_err());
        assert!(Args::try_parse_from(["gravity-snail", "--fast"]).is_err());
    }

    #[test]
    fn test_demo_level_is_winnable() {
        let mut session = Session::new(vec![LevelSource::Inline(DEMO_LEVEL.to_string())], Settings::default());
        session.select_level(0).unwrap();
        let walk = KeySet::from_keys(&[Key::MoveRight]);
        for _ in 0..DEFAULT_FRAMES {
            session.frame(walk, MouseState::default(), FRAME_DT);
            if session.state() == GameState::Win {
                break;
            }
        }
        assert_eq!(session.state(), GameState::Win);
    }
}
