//! A named table of running games.
//!
//! Each game sits behind its own mutex so that callers serialize the
//! operations on it. Finished games are kept for an expiry window so late
//! readers can still fetch final scores, then swept away.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;
use std::collections::HashMap;
use std::time::Instant;

use crate::error::RegistryError;
use crate::game::Game;
use crate::options::GameOptions;
use crate::sync::Mutex;

/// A game shared between callers. Locking it never fails; a lock poisoned
/// by a panicking holder is recovered.
pub type SharedGame = Arc<Mutex<Game>>;

/// How long a finished game stays registered by default.
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(60 * 60);

struct Entry {
    game: SharedGame,
    finished_at: Option<Instant>,
}

/// Games keyed by name.
pub struct GameRegistry {
    games: Mutex<HashMap<String, Entry>>,
    expiry: Duration,
}

impl GameRegistry {
    /// Creates an empty registry that removes finished games after `expiry`.
    #[must_use]
    pub fn new(expiry: Duration) -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
            expiry,
        }
    }

    /// Creates and registers a new game.
    ///
    /// Expired games are swept first.
    ///
    /// # Errors
    ///
    /// Returns an error if a game with this name already exists.
    pub fn create(
        &self,
        name: &str,
        options: GameOptions,
        seed: u64,
    ) -> Result<SharedGame, RegistryError> {
        self.sweep();

        let mut games = self.games.lock();
        if games.contains_key(name) {
            return Err(RegistryError::GameExists);
        }

        let game = Arc::new(Mutex::new(Game::new(options, seed)));
        games.insert(
            String::from(name),
            Entry {
                game: Arc::clone(&game),
                finished_at: None,
            },
        );
        drop(games);

        tracing::info!(game = name, "game created");
        Ok(game)
    }

    /// Returns the game with the given name.
    ///
    /// # Errors
    ///
    /// Returns an error if no such game is registered.
    pub fn get(&self, name: &str) -> Result<SharedGame, RegistryError> {
        self.games
            .lock()
            .get(name)
            .map(|entry| Arc::clone(&entry.game))
            .ok_or(RegistryError::NoSuchGame)
    }

    /// Removes the game with the given name.
    ///
    /// # Errors
    ///
    /// Returns an error if no such game is registered.
    pub fn remove(&self, name: &str) -> Result<(), RegistryError> {
        if self.games.lock().remove(name).is_none() {
            return Err(RegistryError::NoSuchGame);
        }
        tracing::info!(game = name, "game removed");
        Ok(())
    }

    /// Returns the registered game names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.games.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.lock().len()
    }

    /// Returns whether no games are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.lock().is_empty()
    }

    /// Sweeps expired games as of now. See [`sweep_at`](Self::sweep_at).
    pub fn sweep(&self) -> Vec<String> {
        self.sweep_at(Instant::now())
    }

    /// Records when newly finished games ended and removes those finished
    /// at least the expiry window before `now`.
    ///
    /// Returns the names removed. A game whose lock is held elsewhere is
    /// skipped until the next sweep.
    pub fn sweep_at(&self, now: Instant) -> Vec<String> {
        let mut games = self.games.lock();
        let mut removed = Vec::new();

        for (name, entry) in games.iter_mut() {
            if entry.finished_at.is_none() {
                let over = entry.game.try_lock().is_some_and(|game| game.is_over());
                if over {
                    tracing::info!(game = %name, "game is over");
                    entry.finished_at = Some(now);
                }
            }
            if entry
                .finished_at
                .is_some_and(|at| now.saturating_duration_since(at) >= self.expiry)
            {
                removed.push(name.clone());
            }
        }

        for name in &removed {
            games.remove(name);
            tracing::info!(game = %name, "removed expired game");
        }
        removed
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_EXPIRY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finish(game: &SharedGame) {
        let mut game = game.lock();
        let id = game.add_player("solo").unwrap();
        game.deal().unwrap();
        let card = game.pick_up_stock(id).unwrap();
        game.discard_card(id, card).unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn create_get_remove() {
        let registry = GameRegistry::default();
        let game = registry.create("table", GameOptions::default(), 1).unwrap();
        assert_eq!(
            registry.create("table", GameOptions::default(), 2).err(),
            Some(RegistryError::GameExists)
        );
        assert!(Arc::ptr_eq(&game, &registry.get("table").unwrap()));
        assert_eq!(registry.names(), ["table"]);

        registry.remove("table").unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.get("table").err(), Some(RegistryError::NoSuchGame));
        assert_eq!(registry.remove("table"), Err(RegistryError::NoSuchGame));
    }

    #[test]
    fn finished_games_expire_after_window() {
        let registry = GameRegistry::new(Duration::from_secs(60));
        let done = registry
            .create("done", GameOptions::default().with_hand_size(0), 1)
            .unwrap();
        registry.create("live", GameOptions::default(), 1).unwrap();
        finish(&done);

        let start = Instant::now();
        assert!(registry.sweep_at(start).is_empty());
        assert!(registry.sweep_at(start + Duration::from_secs(30)).is_empty());
        assert_eq!(
            registry.sweep_at(start + Duration::from_secs(60)),
            ["done"]
        );
        assert_eq!(registry.names(), ["live"]);
    }
}
