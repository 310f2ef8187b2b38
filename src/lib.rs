//! Grammar Defense - a retro falling-word arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, targeting, countdown, match state)
//! - `audio`: Procedural Web Audio synthesis (SFX, menu music, word speech)
//! - `render`: Canvas2D drawing at a fixed logical resolution
//! - `vocab`: Word lists and grammatical categories
//! - `highscores`: Best-score persistence

pub mod highscores;
pub mod sim;
pub mod vocab;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use highscores::BestScore;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth motion)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical play field dimensions - CSS scales the canvas up, pixelated
    pub const FIELD_WIDTH: f32 = 480.0;
    pub const FIELD_HEIGHT: f32 = 640.0;

    /// Hit points at match start
    pub const INITIAL_HP: u8 = 5;
    /// Score awarded per correct shot
    pub const HIT_SCORE: u64 = 100;
    /// Difficulty multiplier gain per kill
    pub const DIFFICULTY_STEP: f32 = 0.02;

    /// Seconds between spawns at difficulty 1.0
    pub const SPAWN_INTERVAL: f32 = 2.0;
    /// Extra spawn-clock deferral when a match starts
    pub const SPAWN_SAFETY_DELAY: f32 = SPAWN_INTERVAL * 5.0;
    /// Horizontal margin keeping spawned words fully on-screen
    pub const SPAWN_MARGIN: f32 = 80.0;
    /// Enemies enter above the visible top edge
    pub const SPAWN_Y: f32 = -60.0;

    /// Enemy fall speed band at difficulty 1.0, px/s
    pub const ENEMY_BASE_SPEED: f32 = 90.0;
    pub const ENEMY_SPEED_BAND: f32 = 30.0;

    /// Particles per explosion burst
    pub const BURST_SIZE: usize = 15;
    /// Particle life decay per second
    pub const PARTICLE_DECAY: f32 = 3.0;

    /// Turret position - wrong-shot feedback erupts here
    pub const TURRET_X: f32 = FIELD_WIDTH / 2.0;
    pub const TURRET_Y: f32 = FIELD_HEIGHT - 50.0;
}
