//! # Arena
//!
//! One map, its players and their wards, advanced one tick at a time.
//!
//! ## Tick Order
//!
//! 1. Expire wards whose lifetime ran out
//! 2. For every player: cast the visibility polygon, decide which other
//!    players it sees (own sight or allied ward), record discovered tiles
//! 3. Hand the frames back to the caller for broadcast
//!
//! Teammates always see each other. Enemies are visible only through an
//! unobstructed sight line within the vision radius, or inside an allied
//! ward.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use umbra_procedural::MapSeed;
use umbra_shared::{Team, Vec2};
use umbra_vision::{VisibilityPolygon, VisionEngine, Ward};

use crate::config::ServerConfig;
use crate::error::{UmbraError, UmbraResult};
use crate::session::{MapSession, PlayerId, PlayerSession};

/// Per-arena gameplay settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaSettings {
    /// Player cap.
    pub max_players: usize,
    /// Vision radius of newly joined players.
    pub vision_radius: f32,
    /// Radius of placed wards.
    pub ward_radius: f32,
    /// Ward lifetime in ticks, `None` for permanent wards.
    pub ward_lifetime: Option<u64>,
    /// Wards one team may hold at once.
    pub max_wards_per_team: usize,
    /// Columns past the home strip revealed on spawn.
    pub discovery_buffer_tiles: u32,
}

impl From<&ServerConfig> for ArenaSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            max_players: config.max_players,
            vision_radius: config.vision_radius,
            ward_radius: config.ward_radius,
            ward_lifetime: config.ward_lifetime(),
            max_wards_per_team: config.max_wards_per_team,
            discovery_buffer_tiles: config.discovery_buffer_tiles,
        }
    }
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

/// What one player sees this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct VisionFrame {
    /// The viewer.
    pub player: PlayerId,
    /// Tick the frame belongs to.
    pub tick: u64,
    /// Fog polygon around the viewer.
    pub polygon: VisibilityPolygon,
    /// Other players the viewer is told about, in id order.
    pub visible_players: Vec<PlayerId>,
    /// Tiles discovered this tick.
    pub newly_discovered: usize,
}

/// A running arena.
pub struct Arena {
    settings: ArenaSettings,
    map: MapSession,
    vision: VisionEngine,
    players: BTreeMap<PlayerId, PlayerSession>,
    wards: Vec<Ward>,
    tick: u64,
    next_player_id: PlayerId,
    spawn_rng: ChaCha8Rng,
}

impl Arena {
    /// Creates an arena on an already generated map.
    #[must_use]
    pub fn new(settings: ArenaSettings, map: MapSession) -> Self {
        let vision = VisionEngine::with_index(Arc::clone(map.segments()));
        let spawn_rng = map.seed().derive(MapSeed::SPAWNS).rng();
        Self {
            settings,
            map,
            vision,
            players: BTreeMap::new(),
            wards: Vec::new(),
            tick: 0,
            next_player_id: 1,
            spawn_rng,
        }
    }

    /// Validates `config`, generates the first map and opens the arena.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &ServerConfig) -> UmbraResult<Self> {
        config.validate()?;
        let map = MapSession::new(config.maze.clone(), config.resolved_seed())?;
        Ok(Self::new(ArenaSettings::from(config), map))
    }

    /// Adds a player to `team` at a random point of its spawn strip.
    ///
    /// # Errors
    ///
    /// Returns [`UmbraError::ArenaFull`] at the player cap.
    pub fn join(&mut self, team: Team) -> UmbraResult<PlayerId> {
        if self.players.len() >= self.settings.max_players {
            return Err(UmbraError::ArenaFull {
                max: self.settings.max_players,
            });
        }

        let id = self.next_player_id;
        self.next_player_id += 1;

        let position = self.map.spawn_point(team, &mut self.spawn_rng);
        let player = PlayerSession::for_map(
            id,
            team,
            position,
            self.settings.vision_radius,
            self.map.map(),
            self.settings.discovery_buffer_tiles,
        );
        self.players.insert(id, player);

        tracing::info!(player = id, ?team, x = position.x, y = position.y, "Player joined");
        Ok(id)
    }

    /// Adds a player to whichever team is smaller, red on a tie.
    ///
    /// # Errors
    ///
    /// Returns [`UmbraError::ArenaFull`] at the player cap.
    pub fn join_balanced(&mut self) -> UmbraResult<PlayerId> {
        let red = self.team_size(Team::Red);
        let blue = self.team_size(Team::Blue);
        self.join(if blue < red { Team::Blue } else { Team::Red })
    }

    /// Removes a player and returns its session.
    ///
    /// # Errors
    ///
    /// Returns [`UmbraError::UnknownPlayer`] for an unknown id.
    pub fn leave(&mut self, id: PlayerId) -> UmbraResult<PlayerSession> {
        let player = self.players.remove(&id).ok_or(UmbraError::UnknownPlayer(id))?;
        tracing::info!(player = id, "Player left");
        Ok(player)
    }

    /// Looks up a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerSession> {
        self.players.get(&id)
    }

    /// All players, in id order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerSession> + '_ {
        self.players.values()
    }

    /// Number of players in the arena.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of players on `team`.
    #[must_use]
    pub fn team_size(&self, team: Team) -> usize {
        self.players.values().filter(|player| player.team() == team).count()
    }

    /// Moves a player. Positions come from the movement system as-is.
    ///
    /// # Errors
    ///
    /// Returns [`UmbraError::UnknownPlayer`] for an unknown id.
    pub fn move_player(&mut self, id: PlayerId, position: Vec2) -> UmbraResult<()> {
        let player = self.players.get_mut(&id).ok_or(UmbraError::UnknownPlayer(id))?;
        player.set_position(position);
        Ok(())
    }

    /// Drops a ward for the player's team at the player's position.
    ///
    /// A team holds at most `max_wards_per_team` wards; placing one more
    /// removes that team's oldest.
    ///
    /// # Errors
    ///
    /// Returns [`UmbraError::UnknownPlayer`] for an unknown id.
    pub fn place_ward(&mut self, id: PlayerId) -> UmbraResult<Ward> {
        let player = self.players.get(&id).ok_or(UmbraError::UnknownPlayer(id))?;
        let mut ward = Ward::new(player.position(), self.settings.ward_radius, player.team());
        if let Some(lifetime) = self.settings.ward_lifetime {
            ward = ward.expiring_at(self.tick + lifetime);
        }
        let team = ward.team;
        let held = self.wards.iter().filter(|w| w.team == team).count();
        if held >= self.settings.max_wards_per_team {
            if let Some(oldest) = self.wards.iter().position(|w| w.team == team) {
                self.wards.remove(oldest);
                tracing::debug!(player = id, ?team, "Oldest ward replaced");
            }
        }
        self.wards.push(ward);

        tracing::debug!(player = id, team = ?ward.team, expires = ?ward.expires_at_tick, "Ward placed");
        Ok(ward)
    }

    /// Wards currently in play.
    #[must_use]
    pub fn wards(&self) -> &[Ward] {
        &self.wards
    }

    /// Advances one tick and returns a vision frame per player.
    pub fn tick(&mut self) -> Vec<VisionFrame> {
        self.tick += 1;
        let tick = self.tick;

        let before = self.wards.len();
        self.wards.retain(|ward| !ward.is_expired(tick));
        if self.wards.len() < before {
            tracing::debug!(tick, expired = before - self.wards.len(), "Wards expired");
        }

        let snapshot: Vec<(PlayerId, Team, Vec2)> = self
            .players
            .values()
            .map(|player| (player.id(), player.team(), player.position()))
            .collect();

        let vision = &self.vision;
        let wards = &self.wards;
        let mut frames = Vec::with_capacity(self.players.len());
        let mut discovered_total = 0;

        for player in self.players.values_mut() {
            let (id, team) = (player.id(), player.team());
            let (origin, radius) = (player.position(), player.vision_radius());
            let polygon = vision.compute_polygon(origin, radius);

            let visible_players = snapshot
                .iter()
                .filter(|&&(other, other_team, position)| {
                    other != id
                        && (other_team == team || vision.sees_with_wards(origin, radius, team, wards, position))
                })
                .map(|&(other, ..)| other)
                .collect();

            let newly_discovered = player.discover();
            discovered_total += newly_discovered;

            frames.push(VisionFrame {
                player: id,
                tick,
                polygon,
                visible_players,
                newly_discovered,
            });
        }

        tracing::trace!(tick, players = frames.len(), discovered = discovered_total, "Vision pass done");
        frames
    }

    /// Generates a new map, clears wards and respawns every player with a
    /// fresh discovery grid.
    pub fn reset_map(&mut self, seed: MapSeed) {
        self.map.regenerate(seed);
        self.vision.publish(Arc::clone(self.map.segments()));
        self.wards.clear();
        self.spawn_rng = seed.derive(MapSeed::SPAWNS).rng();

        for player in self.players.values_mut() {
            let position = self.map.spawn_point(player.team(), &mut self.spawn_rng);
            player.respawn(position, self.map.map(), self.settings.discovery_buffer_tiles);
        }

        tracing::info!(
            seed = seed.value(),
            generation = self.map.generation(),
            players = self.players.len(),
            "Arena reset"
        );
    }

    /// The live map session.
    #[must_use]
    pub const fn map(&self) -> &MapSession {
        &self.map
    }

    /// Vision engine over the live map.
    #[must_use]
    pub const fn vision(&self) -> &VisionEngine {
        &self.vision
    }

    /// Gameplay settings.
    #[must_use]
    pub const fn settings(&self) -> &ArenaSettings {
        &self.settings
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn current_tick(&self) -> u64 {
        self.tick
    }
}
