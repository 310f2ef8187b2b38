//! Best-score persistence
//!
//! A single record in LocalStorage: read once at startup, written whenever a
//! finished match beats it. The only durable side effect the game has.

use serde::{Deserialize, Serialize};

/// Best score achieved on this browser
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub score: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "grammar_defense_highscore";

    pub fn new() -> Self {
        Self { score: 0 }
    }

    /// True when `score` would become a new record
    pub fn beats(&self, score: u64) -> bool {
        score > self.score
    }

    /// Record a finished match; persists and returns true on a new best
    pub fn record(&mut self, score: u64) -> bool {
        if !self.beats(score) {
            return false;
        }
        self.score = score;
        self.save();
        true
    }

    /// Load the record from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("Loaded best score: {}", best.score);
                    return best;
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::new()
    }

    /// Save the record to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best score saved: {}", self.score);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_the_maximum() {
        let mut best = BestScore::new();
        assert!(best.record(300));
        assert!(!best.record(200));
        assert_eq!(best.score, 300);
        assert!(best.record(500));
        assert_eq!(best.score, 500);
    }

    #[test]
    fn zero_never_beats_anything() {
        let mut best = BestScore::new();
        assert!(!best.record(0));
        assert_eq!(best.score, 0);
    }
}
