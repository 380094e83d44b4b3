//! Headless runner
//!
//! Plays seeded games at a fixed frame rate, steered by the built-in autopilot,
//! and prints a JSON summary. Handy for balancing tuning files and for checking
//! that a seed reproduces. The browser build is driven by `WebGame` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use flappy_engine::platform::FixedClock;
    use flappy_engine::sim::autopilot;
    use flappy_engine::sim::{CrashCause, Engine, GameEvent, Phase};
    use flappy_engine::{Tuning, TuningError};

    #[derive(Debug, Parser)]
    #[command(name = "flappy-engine", version, about = "Run headless flap-through-the-gaps games")]
    pub struct Args {
        /// Seed of the first run; run N uses seed + N
        #[arg(long, default_value_t = 1)]
        pub seed: u64,

        /// Number of runs to play
        #[arg(long, default_value_t = 10)]
        pub runs: u32,

        /// Time limit per run (seconds of game time)
        #[arg(long, default_value_t = 60.0)]
        pub seconds: f64,

        /// Play field width
        #[arg(long, default_value_t = 400.0)]
        pub width: f32,

        /// Play field height
        #[arg(long, default_value_t = 600.0)]
        pub height: f32,

        /// JSON tuning file (missing fields use defaults)
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Disable the autopilot; the body just falls
        #[arg(long)]
        pub manual: bool,
    }

    /// Outcome of one headless run
    #[derive(Debug, Clone, Serialize)]
    pub struct RunReport {
        pub seed: u64,
        pub score: u32,
        /// Game time survived (seconds)
        pub seconds: f64,
        /// `None` when the time limit was reached first
        pub crash: Option<CrashCause>,
        pub impulses: u32,
    }

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub runs: Vec<RunReport>,
        pub best: u32,
        pub mean: f64,
    }

    pub fn load_tuning(args: &Args) -> Result<Tuning, TuningError> {
        let tuning = match &args.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        tuning.validate_for(args.width, args.height)?;
        Ok(tuning)
    }

    pub fn play(args: &Args, tuning: &Tuning, seed: u64) -> RunReport {
        let source = Pcg32::seed_from_u64(seed);
        let mut engine = Engine::with_tuning(args.width, args.height, tuning.clone(), source);
        let mut clock = FixedClock::default();
        let frames = clock.frames_for(args.seconds);

        engine.start();
        engine.advance(clock.now_ms());

        let mut crash = None;
        let mut impulses = 0;
        let mut played = 0;
        while played < frames && engine.phase() == Phase::Running {
            if !args.manual && autopilot::wants_impulse(engine.world(), engine.tuning()) {
                engine.trigger_impulse();
            }
            engine.advance(clock.tick());
            played += 1;

            for event in engine.drain_events() {
                match event {
                    GameEvent::Impulse => impulses += 1,
                    GameEvent::Scored { score } => log::trace!("seed {}: score {}", seed, score),
                    GameEvent::Crashed { cause, .. } => crash = Some(cause),
                    _ => {}
                }
            }
        }

        let report = RunReport {
            seed,
            score: engine.score(),
            seconds: played as f64 * clock.frame_ms() / 1000.0,
            crash,
            impulses,
        };
        log::info!(
            "seed {}: score {} after {:.2}s ({:?})",
            report.seed,
            report.score,
            report.seconds,
            report.crash
        );
        report
    }

    pub fn summarize(runs: Vec<RunReport>) -> Summary {
        let best = runs.iter().map(|r| r.score).max().unwrap_or(0);
        let mean = if runs.is_empty() {
            0.0
        } else {
            runs.iter().map(|r| r.score as f64).sum::<f64>() / runs.len() as f64
        };
        Summary { runs, best, mean }
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();

        let tuning = match load_tuning(&args) {
            Ok(t) => t,
            Err(e) => {
                log::error!("{}", e);
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        };

        log::info!(
            "Playing {} run(s) on a {}x{} field{}",
            args.runs,
            args.width,
            args.height,
            if args.manual { " without autopilot" } else { "" }
        );

        let runs = (0..args.runs)
            .map(|n| play(&args, &tuning, args.seed.wrapping_add(n as u64)))
            .collect();
        let summary = summarize(runs);

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to encode summary: {e}");
                ExitCode::FAILURE
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm entry point is `platform::WebGame`; this only satisfies the bin target
}
