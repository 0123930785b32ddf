//! Flat-text save files.
//!
//! The format is positional and whitespace separated:
//!
//! ```text
//! <day> <gold> <carryingCapacity>
//! <commodityName> <quantity>
//! ...
//! ```
//!
//! Only the trader and the day are persisted. Village prices are redrawn
//! every morning and never written.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io;
use std::path::Path;

use crate::core::Trader;
use crate::error::GameError;

pub const DEFAULT_SAVE_FILE: &str = "savegame.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveState {
    pub day: u32,
    pub gold: u32,
    pub carrying_capacity: u32,
    pub inventory: BTreeMap<String, u32>,
}

impl SaveState {
    pub fn capture(day: u32, trader: &Trader) -> Self {
        Self {
            day,
            gold: trader.gold,
            carrying_capacity: trader.carrying_capacity,
            inventory: trader.inventory.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} {} {}\n", self.day, self.gold, self.carrying_capacity);
        for (name, quantity) in &self.inventory {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{} {}", name, quantity);
        }
        out
    }

    /// Parse save contents. The header must be complete; inventory pairs are
    /// read until the first pair that does not parse, and the rest is dropped.
    pub fn parse(contents: &str) -> Result<Self, GameError> {
        let mut tokens = contents.split_whitespace();

        let mut header = [0u32; 3];
        for (slot, field) in header.iter_mut().zip(["day", "gold", "carrying capacity"]) {
            let token = tokens
                .next()
                .ok_or_else(|| GameError::CorruptSave(format!("missing {}", field)))?;
            *slot = token
                .parse()
                .map_err(|_| GameError::CorruptSave(format!("bad {} {:?}", field, token)))?;
        }
        let [day, gold, carrying_capacity] = header;
        if day == 0 {
            return Err(GameError::CorruptSave("day must be at least 1".to_string()));
        }

        let mut inventory = BTreeMap::new();
        while let (Some(name), Some(quantity)) = (tokens.next(), tokens.next()) {
            let Ok(quantity) = quantity.parse::<u32>() else {
                log::debug!("save inventory truncated at {:?}", name);
                break;
            };
            if quantity > 0 {
                inventory.insert(name.to_string(), quantity);
            } else {
                inventory.remove(name);
            }
        }

        Ok(Self {
            day,
            gold,
            carrying_capacity,
            inventory,
        })
    }

    /// Overwrites whatever is at `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), GameError> {
        std::fs::write(path, self.render())?;
        log::info!("saved day {} to {}", self.day, path.display());
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, GameError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(GameError::NoSaveFile),
            Err(e) => return Err(e.into()),
        };
        let state = Self::parse(&contents)?;
        log::info!("read save for day {} from {}", state.day, path.display());
        Ok(state)
    }

    /// Overwrite the trader's purse, capacity and inventory. Returns the saved day.
    pub fn apply_to(self, trader: &mut Trader) -> u32 {
        trader.gold = self.gold;
        trader.carrying_capacity = self.carrying_capacity;
        trader.inventory = self.inventory;
        if trader.current_load() > trader.carrying_capacity {
            log::warn!(
                "loaded inventory {} exceeds carrying capacity {}",
                trader.current_load(),
                trader.carrying_capacity
            );
        }
        self.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trader() -> Trader {
        let mut trader = Trader::new("Alex", 80, 50);
        trader.inventory.insert("Wheat".to_string(), 2);
        trader.inventory.insert("Silk".to_string(), 4);
        trader
    }

    #[test]
    fn test_render_format() {
        let state = SaveState::capture(3, &sample_trader());
        assert_eq!(state.render(), "3 80 50\nSilk 4\nWheat 2\n");
    }

    #[test]
    fn test_parse_reads_header_and_entries() {
        let state = SaveState::parse("7 120 60\nIron 3\nGold 1\n").unwrap();
        assert_eq!(state.day, 7);
        assert_eq!(state.gold, 120);
        assert_eq!(state.carrying_capacity, 60);
        assert_eq!(state.inventory.len(), 2);
        assert_eq!(state.inventory["Iron"], 3);
        assert_eq!(state.inventory["Gold"], 1);
    }

    #[test]
    fn test_parse_is_token_based() {
        // Line breaks are irrelevant, only token order matters.
        let state = SaveState::parse("2 10\n40 Wheat\n5 Iron 6").unwrap();
        assert_eq!(state.day, 2);
        assert_eq!(state.carrying_capacity, 40);
        assert_eq!(state.inventory["Wheat"], 5);
        assert_eq!(state.inventory["Iron"], 6);
    }

    #[test]
    fn test_parse_stops_at_first_bad_pair() {
        let state = SaveState::parse("1 100 50\nWheat 5\nIron lots\nSilk 2\n").unwrap();
        assert_eq!(state.inventory.len(), 1);
        assert_eq!(state.inventory["Wheat"], 5);
    }

    #[test]
    fn test_parse_ignores_trailing_name_without_quantity() {
        let state = SaveState::parse("1 100 50\nWheat 5\nIron").unwrap();
        assert_eq!(state.inventory.len(), 1);
    }

    #[test]
    fn test_parse_drops_zero_entries() {
        let state = SaveState::parse("1 100 50\nWheat 0\nIron 2\n").unwrap();
        assert!(!state.inventory.contains_key("Wheat"));
        assert_eq!(state.inventory["Iron"], 2);
    }

    #[test]
    fn test_parse_rejects_bad_header() {
        assert!(matches!(SaveState::parse(""), Err(GameError::CorruptSave(_))));
        assert!(matches!(SaveState::parse("1 100"), Err(GameError::CorruptSave(_))));
        assert!(matches!(SaveState::parse("1 -5 50"), Err(GameError::CorruptSave(_))));
        assert!(matches!(SaveState::parse("0 100 50"), Err(GameError::CorruptSave(_))));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SaveState::read_from(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(GameError::NoSaveFile)));
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SAVE_FILE);
        let state = SaveState::capture(12, &sample_trader());

        state.write_to(&path).unwrap();
        let restored = SaveState::read_from(&path).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_SAVE_FILE);
        std::fs::write(&path, "99 99 99\nJunk 1\nMore 2\nStuff 3\n").unwrap();

        SaveState::capture(1, &Trader::new("Alex", 100, 50))
            .write_to(&path)
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1 100 50\n");
    }

    #[test]
    fn test_apply_replaces_inventory() {
        let mut trader = sample_trader();
        let state = SaveState::parse("4 15 30\nIron 9\n").unwrap();

        let day = state.apply_to(&mut trader);

        assert_eq!(day, 4);
        assert_eq!(trader.gold, 15);
        assert_eq!(trader.carrying_capacity, 30);
        assert_eq!(trader.inventory.len(), 1);
        assert_eq!(trader.quantity_of("Iron"), 9);
        assert_eq!(trader.name, "Alex");
    }
}
