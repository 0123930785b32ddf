//! Error types for the trading game.
//!
//! Every variant is recoverable: the `Display` text is what the player sees
//! and the game state is left exactly as it was before the failed action.

use crate::types::Phase;

/// Failures of game actions, persistence and console I/O.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A menu index was outside the listed options.
    #[error("Invalid choice.")]
    InvalidChoice,

    /// Quantities must be positive whole numbers.
    #[error("Quantity must be a positive whole number.")]
    InvalidQuantity,

    /// The trader cannot pay the travel cost.
    #[error("Not enough gold to travel! (cost {cost}, have {gold})")]
    CannotAffordTravel {
        /// Travel cost.
        cost: u32,
        /// Gold on hand.
        gold: u32,
    },

    /// The purchase costs more than the trader holds.
    #[error("Not enough gold! {quantity} {commodity} costs {cost}, you have {gold}.")]
    InsufficientGold {
        /// Commodity being bought.
        commodity: String,
        /// Requested quantity.
        quantity: u32,
        /// Total price of the purchase.
        cost: u64,
        /// Gold on hand.
        gold: u32,
    },

    /// The purchase would exceed the carrying capacity.
    #[error("Not enough carrying capacity! Load {load}/{capacity}, cannot add {quantity}.")]
    InsufficientCapacity {
        /// Requested quantity.
        quantity: u32,
        /// Current load.
        load: u32,
        /// Carrying capacity.
        capacity: u32,
    },

    /// The trader holds less of the commodity than requested.
    #[error("Not enough inventory! You have {held} {commodity}.")]
    InsufficientInventory {
        /// Commodity being sold.
        commodity: String,
        /// Quantity held.
        held: u32,
    },

    /// Sale proceeds do not fit in the purse.
    #[error("Your purse cannot hold that much gold.")]
    PurseOverflow,

    /// An action was attempted outside the phase that allows it.
    #[error("Cannot {action} right now ({phase}).")]
    WrongPhase {
        /// The attempted action.
        action: &'static str,
        /// The phase the game was in.
        phase: Phase,
    },

    /// `load_game` found no file at the save path.
    #[error("No save file found.")]
    NoSaveFile,

    /// The save file header could not be parsed.
    #[error("Save file is corrupt: {0}")]
    CorruptSave(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
