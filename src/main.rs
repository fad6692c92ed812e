//! Animal Match entry point
//!
//! Headless runner: loads settings, then lets the autoplayer play one game
//! against a logging presenter and audio backend.

use std::path::PathBuf;
use std::process::ExitCode;

use animal_match::audio::LogBackend;
use animal_match::consts::SIM_DT;
use animal_match::presentation::LogPresenter;
use animal_match::sim::GamePhase;
use animal_match::{Game, Settings};
use clap::Parser;

/// Give up after ten simulated minutes
const MAX_TICKS: u32 = 60 * 60 * 10;

#[derive(Debug, Parser)]
#[command(author, version, about = "Let the autoplayer play one game of Animal Match", long_about = None)]
struct Args {
    /// JSON settings file (defaults are used when omitted)
    #[arg(value_name = "SETTINGS")]
    settings: Option<PathBuf>,
    /// RNG seed for a reproducible run (defaults to the current time)
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Silence all audio, music included
    #[arg(long)]
    mute: bool,
}

fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Animal Match (headless) starting...");

    let settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    };
    let mut settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    // Must be set before the game starts its music
    settings.audio.muted |= args.mute;

    let seed = args.seed.unwrap_or_else(time_seed);
    let mut game = match Game::new(&settings, seed, Box::new(LogPresenter), Box::new(LogBackend)) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Cannot start game: {}", e);
            return ExitCode::FAILURE;
        }
    };
    game.set_autoplay(true);

    let mut ticks = 0;
    while ticks < MAX_TICKS && !game.state().is_game_over() {
        ticks += game.update(SIM_DT);
    }

    let state = game.state();
    match state.phase() {
        GamePhase::Won => {
            log::info!("Won in {} ticks ({:.1}s)", state.time_ticks, state.time_ticks as f32 * SIM_DT);
            ExitCode::SUCCESS
        }
        GamePhase::Lost => {
            log::info!("Lost with {} shapes left in the field", state.field().len());
            ExitCode::FAILURE
        }
        phase => {
            log::warn!("Gave up after {} ticks in {:?}", ticks, phase);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from(["animal-match", "level.json", "--seed=5", "--mute"]).unwrap();
        assert_eq!(args.settings, Some(PathBuf::from("level.json")));
        assert_eq!(args.seed, Some(5));
        assert!(args.mute);

        let args = Args::try_parse_from(["animal-match", "--seed", "42"]).unwrap();
        assert_eq!(args.seed, Some(42));
        assert!(args.settings.is_none());
        assert!(!args.mute);
    }

    #[test]
    fn test_bad_seed_rejected() {
        assert!(Args::try_parse_from(["animal-match", "--seed", "soon"]).is_err());
        assert!(Args::try_parse_from(["animal-match", "--volume", "3"]).is_err());
    }
}
