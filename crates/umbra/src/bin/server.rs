//! # UMBRA Server
//!
//! Headless arena simulation: generates a map, fills it with wandering
//! bots and runs the vision pass at the configured tick rate.
//!
//! ```bash
//! # Default config (data/umbra.toml, or built-in defaults)
//! ./umbra_server
//!
//! # Explicit config, verbose vision logs
//! RUST_LOG=umbra=debug ./umbra_server path/to/umbra.toml
//! ```

use std::f32::consts::TAU;
use std::path::Path;
use std::process::ExitCode;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;
use umbra::procedural::MapSeed;
use umbra::shared::Vec2;
use umbra::{Arena, PlayerId, ServerConfig, TickLoop, UmbraResult, VisionFrame};

/// Config used when no path is given.
const DEFAULT_CONFIG: &str = "data/umbra.toml";

/// Random stream for bot decisions, independent of the map streams.
const BOT_STREAM: u64 = 3;

/// Chance per tick that a bot turns without hitting anything.
const TURN_CHANCE: f64 = 0.05;

/// A bot walking straight until it bumps into a wall.
struct Wanderer {
    id: PlayerId,
    heading: f32,
}

impl Wanderer {
    /// Next position, or `None` if every heading tried was blocked.
    fn step(&mut self, arena: &Arena, speed: f32, rng: &mut ChaCha8Rng) -> Option<Vec2> {
        let position = arena.player(self.id)?.position();
        if rng.gen_bool(TURN_CHANCE) {
            self.heading = rng.gen_range(0.0..TAU);
        }
        for _ in 0..8 {
            let next = position + Vec2::from_angle(self.heading) * speed;
            if arena.map().is_open(next) {
                return Some(next);
            }
            self.heading = rng.gen_range(0.0..TAU);
        }
        None
    }
}

/// Vision totals over one logging window.
#[derive(Default)]
struct WindowStats {
    frames: usize,
    polygon_points: usize,
    sightings: usize,
    discovered: usize,
}

impl WindowStats {
    fn record(&mut self, frames: &[VisionFrame]) {
        for frame in frames {
            self.frames += 1;
            self.polygon_points += frame.polygon.len();
            self.sightings += frame.visible_players.len();
            self.discovered += frame.newly_discovered;
        }
    }

    fn avg_polygon_points(&self) -> usize {
        self.polygon_points.checked_div(self.frames).unwrap_or(0)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "Server stopped");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> UmbraResult<ServerConfig> {
    if let Some(path) = std::env::args_os().nth(1) {
        return ServerConfig::from_toml_file(Path::new(&path));
    }
    let path = Path::new(DEFAULT_CONFIG);
    if path.exists() {
        ServerConfig::from_toml_file(path)
    } else {
        tracing::warn!(path = DEFAULT_CONFIG, "No config file, using defaults");
        Ok(ServerConfig::default())
    }
}

fn run() -> UmbraResult<()> {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                      UMBRA SERVER v{}", env!("CARGO_PKG_VERSION"));
    println!("                         HEADLESS MODE");
    println!("═══════════════════════════════════════════════════════════════════");

    let config = load_config()?;
    let sim = &config.simulation;
    let mut arena = Arena::from_config(&config)?;

    let map = arena.map().map();
    tracing::info!(
        seed = arena.map().seed().value(),
        width = map.width_tiles(),
        height = map.height_tiles(),
        walls = map.walls.len(),
        tick_rate = config.tick_rate,
        "Arena ready"
    );

    let mut rng = arena.map().seed().derive(BOT_STREAM).rng();
    let mut bots = Vec::with_capacity(sim.bots);
    for _ in 0..sim.bots.min(config.max_players) {
        let id = arena.join_balanced()?;
        bots.push(Wanderer {
            id,
            heading: rng.gen_range(0.0..TAU),
        });
    }

    let mut tick_loop = TickLoop::new(config.tick_rate);
    let mut window = WindowStats::default();
    let log_every = u64::from(config.tick_rate);

    while arena.current_tick() < sim.run_ticks {
        if !tick_loop.should_tick() {
            tick_loop.wait_for_next_tick();
            continue;
        }
        let start = tick_loop.begin_tick();
        let tick = arena.current_tick() + 1;

        if sim.reset_interval_ticks > 0 && tick % sim.reset_interval_ticks == 0 {
            arena.reset_map(MapSeed::new(rng.gen()));
        }

        for bot in &mut bots {
            if let Some(next) = bot.step(&arena, sim.bot_speed, &mut rng) {
                arena.move_player(bot.id, next)?;
            }
            if sim.ward_interval_ticks > 0 && (tick + u64::from(bot.id)) % sim.ward_interval_ticks == 0 {
                arena.place_ward(bot.id)?;
            }
        }

        let frames = arena.tick();
        window.record(&frames);
        tick_loop.end_tick(start);

        if tick % log_every == 0 {
            let stats = tick_loop.stats();
            tracing::info!(
                tick,
                avg_tick_us = stats.avg_tick_us,
                max_tick_us = stats.max_tick_us,
                late_ticks = stats.late_ticks,
                avg_polygon_points = window.avg_polygon_points(),
                sightings = window.sightings,
                discovered = window.discovered,
                wards = arena.wards().len(),
                "Server stats"
            );
            window = WindowStats::default();
        }
    }

    for player in arena.players() {
        tracing::info!(
            player = player.id(),
            team = ?player.team(),
            explored = player.discovered().explored_fraction(),
            "Final exploration"
        );
    }
    tracing::info!(ticks = arena.current_tick(), generation = arena.map().generation(), "Simulation finished");
    Ok(())
}
