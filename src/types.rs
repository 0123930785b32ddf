use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the game is within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    DayStart,
    Traveling,
    /// Index into the game's village list.
    InVillage { village: usize },
    DayEnd,
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::DayStart => write!(f, "the day has not started"),
            Phase::Traveling => write!(f, "choosing a destination"),
            Phase::InVillage { .. } => write!(f, "visiting a village"),
            Phase::DayEnd => write!(f, "the day is over"),
            Phase::Terminated => write!(f, "the game is over"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

/// A completed buy or sell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub side: TradeSide,
    pub commodity: String,
    pub quantity: u32,
    /// Unit price at the time of the trade.
    pub price: u32,
    pub total: u32,
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            TradeSide::Buy => write!(
                f,
                "Purchased {} {} for {} gold.",
                self.quantity, self.commodity, self.total
            ),
            TradeSide::Sell => write!(
                f,
                "Sold {} {} for {} gold.",
                self.quantity, self.commodity, self.total
            ),
        }
    }
}
