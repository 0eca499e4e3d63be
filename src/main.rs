//! Fruit Catcher entry point
//!
//! Native builds run a headless session with the autopilot steering, which is
//! handy for balancing: tweak a tuning file, run, read the log.
//!
//! Usage: fruit-catcher [--seconds N] [--seed S] [--tuning PATH] [--best PATH]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use fruit_catcher::sim::{GameEvent, GameState, Playfield, TickInput, tick};
    use fruit_catcher::{GameError, GameResult, HighScore, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    const PLAYFIELD_WIDTH: f32 = 960.0;
    const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Command line options
    #[derive(Debug)]
    struct Options {
        seconds: f32,
        seed: Option<u64>,
        tuning: Option<PathBuf>,
        best: PathBuf,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                seconds: 120.0,
                seed: None,
                tuning: None,
                best: PathBuf::from("fruit-catcher-best.json"),
            }
        }
    }

    fn bad_arg(name: &str, reason: impl std::fmt::Display) -> GameError {
        GameError::Usage(format!("--{}: {}", name, reason))
    }

    fn parse_args(args: impl Iterator<Item = String>) -> GameResult<Options> {
        let mut options = Options::default();
        let mut args = args.skip(1);
        while let Some(arg) = args.next() {
            let mut value = |name: &'static str| {
                args.next()
                    .ok_or_else(|| bad_arg(name, "missing value"))
            };
            match arg.as_str() {
                "--seconds" => {
                    let raw = value("seconds")?;
                    options.seconds = raw
                        .parse()
                        .map_err(|_| bad_arg("seconds", format!("not a number: {}", raw)))?;
                }
                "--seed" => {
                    let raw = value("seed")?;
                    options.seed = Some(
                        raw.parse()
                            .map_err(|_| bad_arg("seed", format!("not an integer: {}", raw)))?,
                    );
                }
                "--tuning" => options.tuning = Some(PathBuf::from(value("tuning")?)),
                "--best" => options.best = PathBuf::from(value("best")?),
                other => return Err(GameError::Usage(format!("unknown argument: {}", other))),
            }
        }
        Ok(options)
    }

    /// Stand-in for the audio/HUD layer: log what a player would see and hear
    fn present(event: &GameEvent, best: &mut HighScore, best_path: &std::path::Path) {
        match event {
            GameEvent::Catch { kind, points } => log::debug!("catch {:?} +{}", kind, points),
            GameEvent::PowerActivated { kind, duration_ms } => {
                log::info!("{:?} active for {:.1}s", kind, duration_ms / 1000.0)
            }
            GameEvent::Miss => log::info!("missed a fruit"),
            GameEvent::LivesChanged(lives) => log::info!("lives: {}", lives),
            GameEvent::PowerStateChanged(text) => log::debug!("power: {}", text),
            GameEvent::NewHighScore(score) => {
                if best.record(*score) {
                    // Persistence failures never stop the game
                    if let Err(e) = best.save_to(best_path) {
                        log::warn!("Could not save best score: {}", e);
                    }
                }
            }
            GameEvent::GameOver {
                final_score,
                best: best_score,
            } => {
                log::info!("GAME OVER - score {} (best {})", final_score, best_score)
            }
            _ => log::trace!("{:?}", event),
        }
    }

    pub fn run() -> GameResult<()> {
        let options = parse_args(std::env::args())?;

        let tuning = match &options.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        tuning.validate()?;

        let mut best = HighScore::load_from(&options.best).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable best score: {}", e);
            HighScore::default()
        });

        let playfield = Playfield::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        let state = match options.seed {
            Some(seed) => GameState::with_seed(tuning, playfield, seed),
            None => GameState::new(tuning, playfield),
        };
        let mut state = state.with_high_score(best.best);
        state.start();

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        let frames = (options.seconds.max(0.0) / FRAME_DT) as u64;
        for _ in 0..frames {
            tick(&mut state, &input, FRAME_DT);
            for event in state.drain_events() {
                present(&event, &mut best, &options.best);
            }
            if state.is_game_over() {
                break;
            }
        }

        println!(
            "score {} | best {} | lives {} | {:.1}s played (seed {})",
            state.score(),
            state.high_score,
            state.lives(),
            state.elapsed,
            state.seed
        );
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fruit Catcher (native, headless) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser shell drives the library directly
}
