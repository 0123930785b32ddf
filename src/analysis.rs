//! Summaries of a recorded trade journal.

use crate::events::{Event, EventLogger, EventType};
use crate::types::TradeSide;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommodityTotals {
    pub bought: u64,
    pub sold: u64,
    pub spent: u64,
    pub earned: u64,
}

#[derive(Debug, Default)]
pub struct JournalSummary {
    pub total_events: usize,
    pub days_played: usize,
    pub trips: usize,
    pub failed_trips: usize,
    pub travel_spent: u64,
    pub trade_spent: u64,
    pub trade_earned: u64,
    pub commodities: BTreeMap<String, CommodityTotals>,
    pub starting_gold: Option<u32>,
    pub final_gold: Option<u32>,
}

impl JournalSummary {
    /// Sale proceeds minus purchase costs, ignoring travel.
    pub fn trading_profit(&self) -> i64 {
        self.trade_earned as i64 - self.trade_spent as i64
    }

    /// Change in gold from the first recorded amount to the last.
    pub fn net_change(&self) -> Option<i64> {
        Some(i64::from(self.final_gold?) - i64::from(self.starting_gold?))
    }
}

/// Load and summarize a journal file.
pub fn summarize_journal(path: &Path) -> Result<JournalSummary, String> {
    let logger = EventLogger::load_from_file(path)
        .map_err(|e| format!("Failed to read journal {}: {}", path.display(), e))?;
    Ok(summarize_events(logger.get_events()))
}

pub fn summarize_events(events: &[Event]) -> JournalSummary {
    let mut summary = JournalSummary {
        total_events: events.len(),
        ..Default::default()
    };
    let mut days = BTreeSet::new();

    for event in events {
        days.insert(event.day);

        if let Some(gold) = event.event_type.gold() {
            summary.starting_gold.get_or_insert(gold);
            summary.final_gold = Some(gold);
        }

        match &event.event_type {
            EventType::Traveled { cost, .. } => {
                summary.trips += 1;
                summary.travel_spent += u64::from(*cost);
            }
            EventType::TravelFailed { .. } => summary.failed_trips += 1,
            EventType::TradeExecuted {
                commodity,
                side,
                quantity,
                price,
                ..
            } => {
                let total = u64::from(*quantity) * u64::from(*price);
                let entry = summary.commodities.entry(commodity.clone()).or_default();
                match side {
                    TradeSide::Buy => {
                        entry.bought += u64::from(*quantity);
                        entry.spent += total;
                        summary.trade_spent += total;
                    }
                    TradeSide::Sell => {
                        entry.sold += u64::from(*quantity);
                        entry.earned += total;
                        summary.trade_earned += total;
                    }
                }
            }
            _ => {}
        }
    }

    summary.days_played = days.len();
    summary
}

impl fmt::Display for JournalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Trade Journal Summary ===")?;
        writeln!(f, "Events: {}", self.total_events)?;
        writeln!(f, "Days played: {}", self.days_played)?;
        writeln!(
            f,
            "Trips: {} ({} failed), {} gold spent on travel",
            self.trips, self.failed_trips, self.travel_spent
        )?;
        writeln!(
            f,
            "Trading: spent {}, earned {}, profit {:+}",
            self.trade_spent,
            self.trade_earned,
            self.trading_profit()
        )?;

        if !self.commodities.is_empty() {
            writeln!(f, "\nBy commodity:")?;
            for (name, totals) in &self.commodities {
                writeln!(
                    f,
                    "  {:<8} bought {:>4} for {:>6}  sold {:>4} for {:>6}",
                    name, totals.bought, totals.spent, totals.sold, totals.earned
                )?;
            }
        }

        if let (Some(start), Some(end)) = (self.starting_gold, self.final_gold) {
            writeln!(f, "\nGold: {} -> {}", start, end)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;

    fn played_game() -> Game {
        let mut game = Game::new(GameConfig::default(), 3);
        game.start_day().unwrap();
        game.travel(0).unwrap();
        for commodity in game.villages[0].commodities.iter_mut() {
            commodity.price = 10;
        }
        game.buy(0, 4).unwrap();
        game.villages[0].commodities[0].price = 15;
        game.sell(0, 4).unwrap();
        game.buy(1, 2).unwrap();
        game.leave_village().unwrap();
        game.end_day(true).unwrap();

        game.start_day().unwrap();
        game.travel(7).unwrap_err();
        game.end_day(false).unwrap();
        game
    }

    #[test]
    fn test_summary_totals() {
        let game = played_game();
        let summary = summarize_events(game.journal().get_events());

        assert_eq!(summary.days_played, 2);
        assert_eq!(summary.trips, 1);
        assert_eq!(summary.failed_trips, 1);
        assert_eq!(summary.travel_spent, 10);
        assert_eq!(summary.trade_spent, 60);
        assert_eq!(summary.trade_earned, 60);
        assert_eq!(summary.trading_profit(), 0);
        assert_eq!(summary.starting_gold, Some(100));
        assert_eq!(summary.final_gold, Some(90));
        assert_eq!(summary.net_change(), Some(-10));

        assert_eq!(
            summary.commodities["Wheat"],
            CommodityTotals {
                bought: 4,
                sold: 4,
                spent: 40,
                earned: 60
            }
        );
        assert_eq!(summary.commodities["Iron"].bought, 2);
    }

    #[test]
    fn test_summary_display() {
        let game = played_game();
        let display = format!("{}", summarize_events(game.journal().get_events()));

        assert!(display.contains("Days played: 2"));
        assert!(display.contains("Trips: 1 (1 failed)"));
        assert!(display.contains("Wheat"));
        assert!(display.contains("Gold: 100 -> 90"));
    }

    #[test]
    fn test_summarize_journal_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        played_game().journal().save_to_file(&path).unwrap();

        let summary = summarize_journal(&path).unwrap();
        assert_eq!(summary.trips, 1);

        assert!(summarize_journal(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_empty_journal() {
        let summary = summarize_events(&[]);
        assert_eq!(summary.days_played, 0);
        assert_eq!(summary.net_change(), None);
    }
}
