//! Dragon Orbit entry point
//!
//! Runs a headless session driven by a simple autopilot and logs a summary.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use glam::Vec2;

    use dragon_orbit::Settings;
    use dragon_orbit::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Headless steering-arena simulation
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    struct Args {
        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 3600)]
        ticks: u32,

        /// RNG seed (overrides the settings file)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Settings JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// World width (overrides the settings file)
        #[arg(long)]
        width: Option<f32>,

        /// World height (overrides the settings file)
        #[arg(long)]
        height: Option<f32>,

        /// Print the final frame as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the effective settings (after overrides) to this file
        #[arg(long)]
        save_config: Option<PathBuf>,
    }

    /// Radius of the circle the autopilot pointer traces around the center
    const AUTOPILOT_RADIUS: f32 = 180.0;
    /// Radians per frame
    const AUTOPILOT_SPEED: f32 = 0.01;
    const FIRE_EVERY: u32 = 20;

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    /// Pointer, fire and confirm commands for frame `i`
    fn autopilot(state: &GameState, i: u32) -> TickInput {
        let angle = i as f32 * AUTOPILOT_SPEED;
        let mut pointer = state.ctx.center() + Vec2::from_angle(angle) * AUTOPILOT_RADIUS;
        // A pointer parked inside an obstacle pins the player against it
        if state.obstacles.iter().any(|o| o.contains_point(pointer)) {
            pointer = state.ctx.center();
        }

        // Aim at the nearest enemy when one is around
        let nearest = state.enemies.iter().min_by(|a, b| {
            let da = a.body.pos.distance_squared(state.player.body.pos);
            let db = b.body.pos.distance_squared(state.player.body.pos);
            da.total_cmp(&db)
        });
        let mut fire = false;
        if let Some(enemy) = nearest {
            if i % FIRE_EVERY == 0 {
                pointer = enemy.body.pos;
                fire = true;
            }
        }

        TickInput {
            pointer,
            fire,
            confirm: state.phase == GamePhase::Menu
                || state.director.achievement_pending.is_some(),
            ..TickInput::default()
        }
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();

        let mut settings = match &args.config {
            Some(path) => Settings::load_or_default(path),
            None => Settings::default(),
        };
        if let Some(width) = args.width {
            settings.world_width = width;
        }
        if let Some(height) = args.height {
            settings.world_height = height;
        }
        if let Err(e) = settings.validate() {
            log::error!("{e}");
            std::process::exit(2);
        }
        let seed = args.seed.or(settings.seed).unwrap_or_else(time_seed);

        if let Some(path) = &args.save_config {
            if let Err(e) = settings.save(path) {
                log::error!("{e}");
            }
        }

        log::info!(
            "Dragon Orbit (headless) starting: seed {}, world {}x{}, {} ticks",
            seed,
            settings.world_width,
            settings.world_height,
            args.ticks
        );

        let mut state = GameState::new(seed, &settings);
        let mut shots = 0u32;
        let mut levels = 0u32;

        for i in 0..args.ticks {
            let input = autopilot(&state, i);
            tick(&mut state, &input);

            for event in &state.events {
                match event {
                    GameEvent::ProjectileFired { .. } => shots += 1,
                    GameEvent::LevelUp { .. } => levels += 1,
                    _ => {}
                }
            }
            if state.phase == GamePhase::GameOver {
                log::info!("Player down after {} frames", i + 1);
                break;
            }
        }

        let frame = state.frame();
        log::info!(
            "Summary: wave {}, score {}, level {} (+{}), {} kills, {} shots, health {:.0}/{:.0}",
            frame.wave,
            frame.score,
            frame.level,
            levels,
            frame.kills,
            shots,
            frame.player_health,
            frame.player_max_health
        );
        log::info!(
            "Alive: {} enemies, {} projectiles, {} orbs",
            frame.counts.enemies,
            frame.counts.projectiles,
            frame.counts.orbs
        );

        if args.json {
            match serde_json::to_string_pretty(&frame) {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Failed to serialize frame: {e}"),
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the wasm surface
}
