//! Batty entry point
//!
//! Runs the game headless: a simple autopilot steers the paddle, draw calls go
//! to a recording surface and sound cues to the log.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use batty::app::Screen;
use batty::audio::LogBackend;
use batty::consts::MAX_SUBSTEPS;
use batty::platform::{
    Clock, FrameInput, FramePacer, InputEvent, InputQueue, Key, KeySet, ManualClock, SystemClock,
};
use batty::renderer::{RecordingSurface, Surface};
use batty::sim::{GamePhase, GameState};
use batty::{App, FrameOutcome, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "batty")]
#[command(about = "Brick breaker with timed power-ups, run headless under an autopilot")]
struct Cli {
    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulation ticks to run before stopping
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    /// JSON file overriding gameplay tuning
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// JSON settings file (created on sound toggle)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Print the final session summary as JSON
    #[arg(long)]
    summary: bool,
}

type HeadlessApp = App<LogBackend>;

/// Follow the lowest descending ball with the paddle centre
fn steer(session: &GameState) -> KeySet {
    let target = session
        .balls
        .iter()
        .filter(|b| b.vel.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| session.balls.first());
    let Some(ball) = target else {
        return KeySet::new();
    };

    let center = session.paddle.center_x();
    let dead_zone = session.paddle.speed / 2.0;
    if ball.pos.x < center - dead_zone {
        KeySet::new().with(Key::Left)
    } else if ball.pos.x > center + dead_zone {
        KeySet::new().with(Key::Right)
    } else {
        KeySet::new()
    }
}

/// Queue the next tick's key presses and return the held keys; `None` once the run is over
fn autopilot(app: &HeadlessApp, queue: &mut InputQueue) -> Option<KeySet> {
    match (app.screen(), app.session()) {
        (Screen::Menu, None) => {
            queue.push(InputEvent::KeyDown(Key::Return));
            Some(KeySet::new())
        }
        (Screen::Game, Some(session)) if session.phase == GamePhase::GameOver => None,
        (Screen::Game, Some(session)) => Some(steer(session)),
        _ => None,
    }
}

fn run_flat_out(app: &mut HeadlessApp, frames: u64, tick_ms: u64) -> u64 {
    let clock = ManualClock::new(0);
    let mut surface = RecordingSurface::new();
    let mut queue = InputQueue::new();
    let mut ran = 0;
    while ran < frames {
        let Some(held) = autopilot(app, &mut queue) else { break };
        let input = FrameInput::from_queue(held, &mut queue);
        if app.frame(&input, clock.now_ms(), &mut surface) == FrameOutcome::Quit {
            break;
        }
        clock.advance(tick_ms);
        ran += 1;
    }
    ran
}

fn run_realtime(app: &mut HeadlessApp, frames: u64, fps: u32) -> u64 {
    let clock = SystemClock::new();
    let mut pacer = FramePacer::new(fps, MAX_SUBSTEPS);
    let mut surface = RecordingSurface::new();
    let mut queue = InputQueue::new();
    let mut ran = 0;
    'outer: while ran < frames {
        let now = clock.now_ms();
        for _ in 0..pacer.accumulate(now) {
            let Some(held) = autopilot(app, &mut queue) else { break 'outer };
            let input = FrameInput::from_queue(held, &mut queue);
            if app.handle_input(&input.events) == FrameOutcome::Quit {
                break 'outer;
            }
            app.update(&input.held, now);
            ran += 1;
            if ran >= frames {
                break;
            }
        }
        app.draw(&mut surface);
        surface.present();
        std::thread::sleep(pacer.until_next_tick());
    }
    log::debug!("{} frames presented", surface.frames_presented);
    ran
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.frames == 0 {
        return Err(anyhow!("--frames must be > 0"));
    }

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path).with_context(|| format!("failed loading tuning {}", path.display()))?,
        None => Tuning::default(),
    };
    let settings = match &cli.settings {
        Some(path) => {
            Settings::load(path).with_context(|| format!("failed loading settings {}", path.display()))?
        }
        None => Settings::default(),
    };

    let seed = match cli.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before UNIX epoch")?
            .as_millis() as u64,
    };
    log::info!("Batty starting (seed {}, {} frames)", seed, cli.frames);

    let fps = tuning.fps;
    let tick_ms = tuning.tick_ms();
    let mut app = App::new(tuning, settings, LogBackend, seed);
    if let Some(path) = &cli.settings {
        app = app.with_settings_path(path);
    }

    let ran = if cli.realtime {
        run_realtime(&mut app, cli.frames, fps)
    } else {
        run_flat_out(&mut app, cli.frames, tick_ms)
    };

    let session = app.session().ok_or_else(|| anyhow!("no game was started"))?;
    let summary = session.summary();
    log::info!(
        "Ran {} frames: score {}, lives {}, level {}",
        ran,
        summary.score,
        summary.lives,
        summary.level + 1
    );
    if cli.summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("failed to serialize summary json")?
        );
    }
    Ok(())
}
