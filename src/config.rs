//! Game configuration: starting trader, world layout and price bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::persistence::DEFAULT_SAVE_FILE;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub trader_name: String,
    pub starting_gold: u32,
    pub carrying_capacity: u32,
    pub travel_cost: u32,
    /// Inclusive lower bound of a daily price draw.
    pub min_price: u32,
    /// Inclusive upper bound of a daily price draw.
    pub max_price: u32,
    pub villages: Vec<String>,
    /// Every village trades the same commodities, in this order.
    pub commodities: Vec<String>,
    pub save_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            trader_name: "Alex".to_string(),
            starting_gold: 100,
            carrying_capacity: 50,
            travel_cost: 10,
            min_price: 10,
            max_price: 100,
            villages: ["Oakwood", "Maple Hill", "Pine Valley", "Willow Creek", "Cedar Town"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            commodities: ["Wheat", "Iron", "Gold", "Spices", "Silk"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
        }
    }
}

impl GameConfig {
    /// Load from YAML when the extension is `yaml`/`yml`, JSON otherwise.
    /// Missing fields fall back to the defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&contents).map_err(|e| format!("Failed to parse YAML: {}", e))
            }
            _ => serde_json::from_str(&contents).map_err(|e| format!("Failed to parse JSON: {}", e)),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.villages.is_empty() {
            return Err("Config must have at least one village".to_string());
        }
        if self.commodities.is_empty() {
            return Err("Config must have at least one commodity".to_string());
        }
        if self.min_price == 0 {
            return Err("Minimum price must be at least 1".to_string());
        }
        if self.min_price > self.max_price {
            return Err(format!(
                "Minimum price {} is above maximum price {}",
                self.min_price, self.max_price
            ));
        }
        if self.carrying_capacity == 0 {
            return Err("Carrying capacity must be at least 1".to_string());
        }
        // Save entries are whitespace-separated tokens.
        if let Some(name) = self
            .commodities
            .iter()
            .find(|name| name.is_empty() || name.chars().any(char::is_whitespace))
        {
            return Err(format!(
                "Commodity name {:?} must be a single non-empty word",
                name
            ));
        }

        Ok(())
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trader: {}", self.trader_name)?;
        writeln!(
            f,
            "  Starting gold: {}, carrying capacity: {}",
            self.starting_gold, self.carrying_capacity
        )?;
        writeln!(f, "  Travel cost: {} gold", self.travel_cost)?;
        writeln!(f, "  Prices: {}-{} gold", self.min_price, self.max_price)?;
        writeln!(f, "Villages: {}", self.villages.join(", "))?;
        writeln!(f, "Commodities: {}", self.commodities.join(", "))?;
        writeln!(f, "Save file: {}", self.save_file.display())
    }
}
