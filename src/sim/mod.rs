//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Audio is reached exclusively through the [`state::GameEvent`] queue the
//! shell drains each frame.

pub mod countdown;
pub mod state;
pub mod tick;

pub use countdown::Countdown;
pub use state::{
    Enemy, GameEvent, GameState, MatchPhase, Particle, ParticleColor, SoundCue, MAX_PARTICLES,
};
pub use tick::{shoot, tick};
