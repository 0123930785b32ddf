use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::types::TradeSide;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub day: u32,
    pub event_type: EventType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventType {
    DayStarted {
        gold: u32,
        load: u32,
    },
    Traveled {
        village: String,
        cost: u32,
        gold_after: u32,
    },
    TravelFailed {
        reason: String,
    },
    TradeExecuted {
        village: String,
        commodity: String,
        side: TradeSide,
        quantity: u32,
        price: u32,
        gold_after: u32,
    },
    DayEnded {
        gold: u32,
        load: u32,
        continued: bool,
    },
    GameSaved {
        path: String,
    },
    GameLoaded {
        path: String,
        gold: u32,
    },
}

impl EventType {
    /// Gold on hand right after the event, when the event records it.
    pub fn gold(&self) -> Option<u32> {
        match self {
            EventType::DayStarted { gold, .. }
            | EventType::DayEnded { gold, .. }
            | EventType::GameLoaded { gold, .. } => Some(*gold),
            EventType::Traveled { gold_after, .. }
            | EventType::TradeExecuted { gold_after, .. } => Some(*gold_after),
            EventType::TravelFailed { .. } | EventType::GameSaved { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Day {}] ", self.day)?;

        match &self.event_type {
            EventType::DayStarted { gold, load } => {
                write!(f, "Day started with {} gold, load {}", gold, load)
            }
            EventType::Traveled {
                village,
                cost,
                gold_after,
            } => {
                write!(
                    f,
                    "Traveled to {} for {} gold ({} left)",
                    village, cost, gold_after
                )
            }
            EventType::TravelFailed { reason } => write!(f, "Stayed put: {}", reason),
            EventType::TradeExecuted {
                village,
                commodity,
                side,
                quantity,
                price,
                gold_after,
            } => {
                let verb = match side {
                    TradeSide::Buy => "Bought",
                    TradeSide::Sell => "Sold",
                };
                write!(
                    f,
                    "{} {} {} at {} in {} ({} gold left)",
                    verb, quantity, commodity, price, village, gold_after
                )
            }
            EventType::DayEnded {
                gold,
                load,
                continued,
            } => {
                write!(f, "Day ended with {} gold, load {}", gold, load)?;
                if !*continued {
                    write!(f, " (game over)")?;
                }
                Ok(())
            }
            EventType::GameSaved { path } => write!(f, "Saved to {}", path),
            EventType::GameLoaded { path, gold } => {
                write!(f, "Loaded {} ({} gold)", path, gold)
            }
        }
    }
}

#[derive(Default)]
pub struct EventLogger {
    events: Vec<Event>,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, day: u32, event_type: EventType) {
        self.events.push(Event {
            timestamp: Utc::now(),
            day,
            event_type,
        });
    }

    pub fn get_events(&self) -> &[Event] {
        &self.events
    }

    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let events: Vec<Event> = serde_json::from_str(&json)?;
        Ok(Self { events })
    }
}
