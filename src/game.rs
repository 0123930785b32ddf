//! The day-by-day state machine.
//!
//! A day runs `start_day` → `travel` → (`buy` | `sell`)* → `leave_village`
//! → `end_day`. Every transition is a plain method with no console I/O; the
//! interactive loop lives in [`crate::session`].

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

use crate::config::GameConfig;
use crate::core::{Trader, Village};
use crate::error::GameError;
use crate::events::{EventLogger, EventType};
use crate::persistence::SaveState;
use crate::types::{Phase, Trade, TradeSide};

/// Seed derived from the current wall-clock time.
pub fn wall_clock_seed() -> u64 {
    Utc::now().timestamp_micros().unsigned_abs()
}

pub struct Game {
    config: GameConfig,
    pub villages: Vec<Village>,
    pub trader: Trader,
    day: u32,
    phase: Phase,
    rng: StdRng,
    journal: EventLogger,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::debug!("new game with seed {}", seed);
        let villages = config
            .villages
            .iter()
            .map(|name| Village::new(name.as_str(), &config.commodities))
            .collect();
        let trader = Trader::new(
            config.trader_name.as_str(),
            config.starting_gold,
            config.carrying_capacity,
        );

        Self {
            config,
            villages,
            trader,
            day: 1,
            phase: Phase::DayStart,
            rng: StdRng::seed_from_u64(seed),
            journal: EventLogger::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn travel_cost(&self) -> u32 {
        self.config.travel_cost
    }

    pub fn journal(&self) -> &EventLogger {
        &self.journal
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn current_village(&self) -> Option<&Village> {
        match self.phase {
            Phase::InVillage { village } => self.villages.get(village),
            _ => None,
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        log::debug!("day {}: {:?} -> {:?}", self.day, self.phase, phase);
        self.phase = phase;
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }

    fn village_index(&self, action: &'static str) -> Result<usize, GameError> {
        match self.phase {
            Phase::InVillage { village } => Ok(village),
            phase => Err(GameError::WrongPhase { action, phase }),
        }
    }

    /// Redraw every village's prices and head out.
    pub fn start_day(&mut self) -> Result<(), GameError> {
        self.expect_phase(Phase::DayStart, "start a day")?;

        let range = self.config.min_price..=self.config.max_price;
        for village in self.villages.iter_mut() {
            village.generate_prices(&mut self.rng, range.clone());
        }

        self.journal.log(
            self.day,
            EventType::DayStarted {
                gold: self.trader.gold,
                load: self.trader.current_load(),
            },
        );
        self.set_phase(Phase::Traveling);
        Ok(())
    }

    /// Travel to the village at `choice` (zero-based).
    ///
    /// A failed trip still uses up the day: the phase moves to `DayEnd`
    /// and the trader visits nowhere.
    pub fn travel(&mut self, choice: usize) -> Result<&Village, GameError> {
        self.expect_phase(Phase::Traveling, "travel")?;

        if choice >= self.villages.len() {
            self.abandon_travel("invalid destination")?;
            return Err(GameError::InvalidChoice);
        }

        let cost = self.config.travel_cost;
        if self.trader.gold < cost {
            self.abandon_travel("not enough gold")?;
            return Err(GameError::CannotAffordTravel {
                cost,
                gold: self.trader.gold,
            });
        }

        self.trader.gold -= cost;
        self.journal.log(
            self.day,
            EventType::Traveled {
                village: self.villages[choice].name.clone(),
                cost,
                gold_after: self.trader.gold,
            },
        );
        self.set_phase(Phase::InVillage { village: choice });
        Ok(&self.villages[choice])
    }

    /// Give up on travelling today.
    pub fn abandon_travel(&mut self, reason: &str) -> Result<(), GameError> {
        self.expect_phase(Phase::Traveling, "stay put")?;
        self.journal.log(
            self.day,
            EventType::TravelFailed {
                reason: reason.to_string(),
            },
        );
        self.set_phase(Phase::DayEnd);
        Ok(())
    }

    /// Buy `quantity` of the commodity at `index` in the current village.
    pub fn buy(&mut self, index: usize, quantity: u32) -> Result<Trade, GameError> {
        let village = self.village_index("buy")?;
        let commodity = self.villages[village]
            .commodity(index)
            .ok_or(GameError::InvalidChoice)?
            .clone();
        if quantity == 0 {
            return Err(GameError::InvalidQuantity);
        }

        let cost = u64::from(commodity.price) * u64::from(quantity);
        if cost > u64::from(self.trader.gold) {
            return Err(GameError::InsufficientGold {
                commodity: commodity.name,
                quantity,
                cost,
                gold: self.trader.gold,
            });
        }

        let load = self.trader.current_load();
        if u64::from(load) + u64::from(quantity) > u64::from(self.trader.carrying_capacity) {
            return Err(GameError::InsufficientCapacity {
                quantity,
                load,
                capacity: self.trader.carrying_capacity,
            });
        }

        // cost <= gold, so it fits in a u32.
        let total = cost as u32;
        self.trader.gold -= total;
        *self
            .trader
            .inventory
            .entry(commodity.name.clone())
            .or_insert(0) += quantity;

        Ok(self.record_trade(village, TradeSide::Buy, commodity.name, quantity, commodity.price, total))
    }

    /// Sell `quantity` of the commodity at `index` in the current village.
    pub fn sell(&mut self, index: usize, quantity: u32) -> Result<Trade, GameError> {
        let village = self.village_index("sell")?;
        let commodity = self.villages[village]
            .commodity(index)
            .ok_or(GameError::InvalidChoice)?
            .clone();
        if quantity == 0 {
            return Err(GameError::InvalidQuantity);
        }

        let held = self.trader.quantity_of(&commodity.name);
        if held < quantity {
            return Err(GameError::InsufficientInventory {
                commodity: commodity.name,
                held,
            });
        }

        let total = commodity
            .price
            .checked_mul(quantity)
            .ok_or(GameError::PurseOverflow)?;
        self.trader.gold = self
            .trader
            .gold
            .checked_add(total)
            .ok_or(GameError::PurseOverflow)?;
        if held == quantity {
            self.trader.inventory.remove(&commodity.name);
        } else {
            self.trader
                .inventory
                .insert(commodity.name.clone(), held - quantity);
        }

        Ok(self.record_trade(village, TradeSide::Sell, commodity.name, quantity, commodity.price, total))
    }

    fn record_trade(
        &mut self,
        village: usize,
        side: TradeSide,
        commodity: String,
        quantity: u32,
        price: u32,
        total: u32,
    ) -> Trade {
        log::info!(
            "day {}: {} {} {} at {} in {}",
            self.day,
            side.as_str(),
            quantity,
            commodity,
            price,
            self.villages[village].name
        );
        self.journal.log(
            self.day,
            EventType::TradeExecuted {
                village: self.villages[village].name.clone(),
                commodity: commodity.clone(),
                side,
                quantity,
                price,
                gold_after: self.trader.gold,
            },
        );
        Trade {
            side,
            commodity,
            quantity,
            price,
            total,
        }
    }

    pub fn leave_village(&mut self) -> Result<(), GameError> {
        self.village_index("leave")?;
        self.set_phase(Phase::DayEnd);
        Ok(())
    }

    /// Close the day. Continuing advances to the next morning; otherwise the
    /// game is over.
    pub fn end_day(&mut self, keep_playing: bool) -> Result<(), GameError> {
        self.expect_phase(Phase::DayEnd, "end the day")?;

        self.journal.log(
            self.day,
            EventType::DayEnded {
                gold: self.trader.gold,
                load: self.trader.current_load(),
                continued: keep_playing,
            },
        );

        if keep_playing {
            self.day = self.day.saturating_add(1);
            self.set_phase(Phase::DayStart);
        } else {
            self.set_phase(Phase::Terminated);
        }
        Ok(())
    }

    /// Write the day and trader to `path`, replacing any previous save.
    pub fn save_game(&mut self, path: &Path) -> Result<(), GameError> {
        SaveState::capture(self.day, &self.trader).write_to(path)?;
        self.journal.log(
            self.day,
            EventType::GameSaved {
                path: path.display().to_string(),
            },
        );
        Ok(())
    }

    /// Restore the day and trader from `path`. Nothing changes unless the
    /// save was read successfully.
    pub fn load_game(&mut self, path: &Path) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::WrongPhase {
                action: "load a game",
                phase: self.phase,
            });
        }

        let state = SaveState::read_from(path)?;
        self.day = state.apply_to(&mut self.trader);
        self.journal.log(
            self.day,
            EventType::GameLoaded {
                path: path.display().to_string(),
                gold: self.trader.gold,
            },
        );
        Ok(())
    }
}
