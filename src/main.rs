//! Grid Wars headless runner
//!
//! Drives a session at a chosen display rate with a simple autopilot, pumps
//! every frame through a line buffer, and prints a summary.
//!
//! Usage:
//!   cargo run --release -- --seed 7 --frames 7200 --mode waves
//!   RUST_LOG=debug cargo run -- --display-hz 144

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

#[cfg(not(target_arch = "wasm32"))]
use grid_wars::{
    Session, Settings, SpawnMode, Tuning,
    highscores::{HighScoreStore, JsonFileStore, MemoryStore},
    render::LineBuffer,
    sim::{Entity, GameEvent, GameState, TickInput, collision, geom::board_center},
};

#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser)]
#[command(name = "grid-wars")]
#[command(about = "Run the Grid Wars simulation headless with an autopilot")]
struct Args {
    /// Run seed (random when omitted and not set in the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Displayed frames to run
    #[arg(short, long, default_value = "3600")]
    frames: u64,

    /// Simulated display refresh rate
    #[arg(long, default_value = "60")]
    display_hz: f32,

    /// Spawn policy (random or waves); overrides the settings file
    #[arg(short, long)]
    mode: Option<SpawnMode>,

    /// Lives to play before stopping
    #[arg(long, default_value = "3")]
    lives: u32,

    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tuning JSON file
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// High score JSON file (kept in memory when omitted)
    #[arg(long)]
    highscore: Option<PathBuf>,
}

/// Keep away from the nearest enemy, drift home to the center, and shoot
/// at whatever is closest
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState) -> TickInput {
    let Some(player) = state.player_pos() else {
        return TickInput::default();
    };
    let home = (board_center() - player) * 0.15;

    match collision::nearest(&state.registry, player, Entity::is_enemy) {
        Some(threat) => {
            let away = (player - threat.pos).normalize_or_zero();
            let move_dir = if threat.pos.distance(player) < 3.0 {
                (away + home).normalize_or_zero()
            } else {
                home.clamp_length_max(1.0)
            };
            TickInput {
                move_dir,
                shoot: Some(threat.pos),
                pause: false,
            }
        }
        None => TickInput {
            move_dir: home.clamp_length_max(1.0),
            ..Default::default()
        },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Grid Wars (headless) starting...");

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(mode) = args.mode {
        settings.spawn_mode = mode;
    }
    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let store: Box<dyn HighScoreStore> = match &args.highscore {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    };
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);

    let mut session = Session::new(settings, tuning, store, seed);
    let mut sink = LineBuffer::new();

    let mut ticks = 0u64;
    let mut kills = 0u64;
    let mut waves = 0u32;
    let mut deaths = 0u32;
    let mut frames = 0u64;

    while frames < args.frames {
        let input = autopilot(session.state());
        ticks += session.frame(args.display_hz, &input) as u64;
        session.present(&mut sink);
        frames += 1;

        for event in session.drain_events() {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::WaveLaunched { wave, .. } => waves = wave,
                GameEvent::PlayerDied { .. } => deaths += 1,
                GameEvent::PickupCollected { .. } => {}
            }
        }

        if session.is_game_over() {
            if deaths >= args.lives {
                break;
            }
            session.restart();
        }
    }

    let board = session.scoreboard();
    println!();
    println!("=== GRID WARS ===");
    println!("  Seed:        {}", seed);
    println!("  Mode:        {}", session.settings().spawn_mode.as_str());
    println!("  Frames:      {} at {:.0} Hz", frames, args.display_hz);
    println!("  Ticks:       {}", ticks);
    println!("  Kills:       {}", kills);
    if waves > 0 {
        println!("  Waves:       {}", waves);
    }
    println!("  Deaths:      {}", deaths);
    println!("  Points:      {} (x{})", board.points, board.multiplier);
    println!("  High score:  {}", board.high_score);
    println!(
        "  Last frame:  {} entities, {} line vertices",
        sink.len(),
        sink.vertices().len()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Session` directly; this is just to satisfy the compiler
}
