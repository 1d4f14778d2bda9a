//! Persisted high score
//!
//! A single record, stored as a plain integer string under the `high-score`
//! key. Loaded once at startup; anything missing or unparseable counts as
//! zero. The value only ever goes up.

/// Storage key for the persisted record
pub const STORAGE_KEY: &str = "high-score";

/// The best score seen so far, across runs and reloads
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Parse a stored record; malformed or absent input is zero, not an error
    pub fn from_stored(raw: Option<&str>) -> Self {
        let best = raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0);
        Self { best }
    }

    /// Report the current score. Persists and returns true on a new record.
    /// Called every frame during play, not just at game over.
    pub fn observe(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            self.save();
            log::info!("new high score: {score}");
            true
        } else {
            false
        }
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage
            && let Ok(raw) = storage.get_item(STORAGE_KEY)
        {
            let loaded = Self::from_stored(raw.as_deref());
            log::info!("loaded high score: {}", loaded.best);
            return loaded;
        }

        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(STORAGE_KEY, &self.best.to_string());
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        // In-memory only for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_record_is_zero() {
        assert_eq!(HighScore::from_stored(None).best(), 0);
    }

    #[test]
    fn malformed_record_is_zero() {
        assert_eq!(HighScore::from_stored(Some("")).best(), 0);
        assert_eq!(HighScore::from_stored(Some("garbage")).best(), 0);
        assert_eq!(HighScore::from_stored(Some("-5")).best(), 0);
        assert_eq!(HighScore::from_stored(Some("12.5")).best(), 0);
    }

    #[test]
    fn valid_record_round_trips() {
        assert_eq!(HighScore::from_stored(Some("1234")).best(), 1234);
        assert_eq!(HighScore::from_stored(Some("  90 ")).best(), 90);
    }

    #[test]
    fn best_never_decreases() {
        let mut hs = HighScore::new();
        assert!(hs.observe(100));
        assert!(!hs.observe(50));
        assert_eq!(hs.best(), 100);
        assert!(hs.observe(101));
        assert!(!hs.observe(101));
        assert_eq!(hs.best(), 101);
    }
}
