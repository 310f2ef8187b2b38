//! Match state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::countdown::Countdown;
use crate::consts::*;
use crate::vocab::{GameMode, Word};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Title screen, menu music running
    Menu,
    /// Active match (including the pre-play countdown)
    Playing,
    /// Match ended, waiting for retry or menu
    GameOver,
}

/// Sound cues the simulation asks the audio engine to play.
///
/// The simulation never touches the audio device; it emits these and the
/// shell drains them each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Base fire sound, every shot
    Shoot,
    /// Correct category - explosion
    Hit,
    /// Wrong category - buzzer
    Error,
    /// Enemy crossed the bottom boundary
    Miss,
    /// Match start jingle
    MatchStart,
    /// Countdown 3/2/1 beep
    CountdownBeep,
    /// Countdown "START!" rising tone
    CountdownGo,
    /// Hit points depleted - the big boom
    Defeat,
    /// UI toggle blip
    Blip,
}

/// Events emitted by the simulation for the shell to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    /// Pronounce a freshly spawned word
    Speak(&'static str),
}

/// A falling word target
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub id: u32,
    /// Center of the word box, logical pixels
    pub pos: Vec2,
    pub word: &'static Word,
    /// Fall speed in px/s, fixed at spawn
    pub speed: f32,
    /// Flash feedback flag
    pub hit: bool,
}

/// Particle tint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Success burst
    Green,
    /// Damage burst
    Red,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time; doubles as rendering alpha
    pub life: f32,
    pub color: ParticleColor,
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub mode: GameMode,
    pub phase: MatchPhase,
    pub countdown: Countdown,
    /// Hit points, never above INITIAL_HP
    pub hp: u8,
    pub score: u64,
    /// Scales spawn rate and fall speed; only grows during a match
    pub difficulty: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Live falling words
    pub enemies: Vec<Enemy>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Seconds until the next spawn becomes eligible
    pub spawn_clock: f32,
    /// Text of the most recently spawned word, for repeat avoidance
    pub last_word: Option<&'static str>,
    /// Pending cues for the shell, drained once per frame
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh state sitting on the menu
    pub fn new(seed: u64, mode: GameMode) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode,
            phase: MatchPhase::Menu,
            countdown: Countdown::Inactive,
            hp: INITIAL_HP,
            score: 0,
            difficulty: 1.0,
            time_ticks: 0,
            enemies: Vec::new(),
            particles: Vec::new(),
            spawn_clock: SPAWN_INTERVAL,
            last_word: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a match (from the menu or a game-over retry).
    ///
    /// Clears all entities, resets score/HP/difficulty and arms the
    /// countdown. The spawn clock is pushed well out so nothing can appear
    /// before the countdown finishes.
    pub fn start_match(&mut self, mode: GameMode) {
        self.mode = mode;
        self.phase = MatchPhase::Playing;
        self.countdown = Countdown::start();
        self.hp = INITIAL_HP;
        self.score = 0;
        self.difficulty = 1.0;
        self.enemies.clear();
        self.particles.clear();
        self.last_word = None;
        self.spawn_clock = SPAWN_SAFETY_DELAY;
        self.push_sound(SoundCue::MatchStart);
    }

    /// Return to the menu, dropping all match entities
    pub fn to_menu(&mut self) {
        self.phase = MatchPhase::Menu;
        self.countdown = Countdown::Inactive;
        self.enemies.clear();
        self.particles.clear();
    }

    pub(crate) fn push_sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Hand pending events to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply one point of damage. Returns true when this damage ends the
    /// match. Damage after the transition is a no-op, so a single tick can
    /// never fire game-over twice.
    pub(crate) fn lose_hp(&mut self) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.phase = MatchPhase::GameOver;
            self.push_sound(SoundCue::Defeat);
            true
        } else {
            false
        }
    }

    /// Scatter a burst of particles around a point
    pub(crate) fn spawn_burst(&mut self, pos: Vec2, color: ParticleColor) {
        for _ in 0..BURST_SIZE {
            if self.particles.len() >= MAX_PARTICLES {
                // Oldest particles make room
                self.particles.remove(0);
            }
            let vel = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * 480.0,
                (self.rng.random::<f32>() - 0.5) * 480.0,
            );
            let size = self.rng.random::<f32>() * 4.0 + 2.0;
            self.particles.push(Particle {
                pos,
                vel,
                life: 1.0,
                color,
                size,
            });
        }
    }
}
