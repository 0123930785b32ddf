//! Line-oriented console driver around [`Game`].
//!
//! Each prompt reads one line and expects a whole number. Input that is not a
//! number is reported and either aborts the current action or repeats the
//! prompt. End of input finishes the game.

use std::io::{self, BufRead, Write};

use crate::error::GameError;
use crate::game::Game;
use crate::types::{Phase, TradeSide};

const NOT_A_NUMBER: &str = "Please enter a whole number.";

enum Reply {
    Number(i64),
    Malformed,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Turn a 1-based menu answer into an index.
fn menu_index(answer: i64) -> Option<usize> {
    usize::try_from(answer).ok()?.checked_sub(1)
}

pub struct Session<R, W> {
    game: Game,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(game: Game, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_parts(self) -> (Game, W) {
        (self.game, self.output)
    }

    /// Play until the player quits or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        if self.offer_load()? == Flow::Quit {
            return self.finish();
        }

        loop {
            self.start_day()?;
            if self.travel()? == Flow::Quit {
                return self.finish();
            }
            if self.end_day()? == Flow::Quit {
                return Ok(());
            }
        }
    }

    fn read_reply(&mut self) -> io::Result<Reply> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(Reply::Closed);
        }
        Ok(match line.trim().parse::<i64>() {
            Ok(n) => Reply::Number(n),
            Err(_) => Reply::Malformed,
        })
    }

    fn report(&mut self, error: &GameError) -> io::Result<()> {
        log::debug!("rejected: {:?}", error);
        writeln!(self.output, "{}", error)
    }

    /// End the game without the day-end prompt.
    fn finish(&mut self) -> io::Result<()> {
        let closed = match self.game.phase() {
            Phase::InVillage { .. } => self
                .game
                .leave_village()
                .and_then(|()| self.game.end_day(false)),
            Phase::Traveling => self
                .game
                .abandon_travel("input closed")
                .and_then(|()| self.game.end_day(false)),
            Phase::DayEnd => self.game.end_day(false),
            Phase::DayStart | Phase::Terminated => Ok(()),
        };
        if let Err(e) = closed {
            log::warn!("could not close day {}: {}", self.game.day(), e);
        }
        writeln!(self.output, "\nGame Over. Thanks for playing!")
    }

    fn offer_load(&mut self) -> io::Result<Flow> {
        loop {
            write!(
                self.output,
                "Would you like to load a saved game? (1: Yes, 0: No): "
            )?;
            match self.read_reply()? {
                Reply::Closed => return Ok(Flow::Quit),
                Reply::Malformed => writeln!(self.output, "{}", NOT_A_NUMBER)?,
                Reply::Number(1) => {
                    let path = self.game.config().save_file.clone();
                    match self.game.load_game(&path) {
                        Ok(()) => writeln!(self.output, "Game loaded.")?,
                        Err(e) => self.report(&e)?,
                    }
                    return Ok(Flow::Continue);
                }
                Reply::Number(_) => return Ok(Flow::Continue),
            }
        }
    }

    fn start_day(&mut self) -> io::Result<()> {
        if let Err(e) = self.game.start_day() {
            self.report(&e)?;
        }
        writeln!(self.output, "\n--- Day {} ---", self.game.day())?;
        write!(self.output, "{}", self.game.trader)
    }

    fn travel(&mut self) -> io::Result<Flow> {
        writeln!(
            self.output,
            "Where would you like to travel? (Travel cost: {} gold)",
            self.game.travel_cost()
        )?;
        for (i, village) in self.game.villages.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, village.name)?;
        }

        let choice = match self.read_reply()? {
            Reply::Closed => return Ok(Flow::Quit),
            Reply::Malformed => {
                writeln!(self.output, "{}", NOT_A_NUMBER)?;
                if let Err(e) = self.game.abandon_travel("unreadable destination") {
                    self.report(&e)?;
                }
                return Ok(Flow::Continue);
            }
            Reply::Number(n) => menu_index(n).unwrap_or(usize::MAX),
        };

        match self.game.travel(choice) {
            Ok(village) => {
                let name = village.name.clone();
                writeln!(self.output, "Traveled to {}.", name)?;
                self.visit_village()
            }
            Err(e) => {
                self.report(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn visit_village(&mut self) -> io::Result<Flow> {
        loop {
            if let Some(village) = self.game.current_village() {
                write!(self.output, "{}", village)?;
            }
            write!(self.output, "{}", self.game.trader)?;
            write!(
                self.output,
                "What would you like to do? (1: Buy, 2: Sell, 3: Leave): "
            )?;

            let flow = match self.read_reply()? {
                Reply::Closed => Flow::Quit,
                Reply::Malformed => {
                    writeln!(self.output, "{}", NOT_A_NUMBER)?;
                    Flow::Continue
                }
                Reply::Number(1) => self.trade(TradeSide::Buy)?,
                Reply::Number(2) => self.trade(TradeSide::Sell)?,
                Reply::Number(3) => {
                    writeln!(self.output, "Leaving the village.")?;
                    if let Err(e) = self.game.leave_village() {
                        self.report(&e)?;
                    }
                    return Ok(Flow::Continue);
                }
                Reply::Number(_) => {
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    /// One buy or sell attempt; any failure returns to the village menu.
    fn trade(&mut self, side: TradeSide) -> io::Result<Flow> {
        let Some(village) = self.game.current_village() else {
            return Ok(Flow::Continue);
        };
        let listing = village.price_list();
        let commodity_count = village.commodities.len();
        writeln!(self.output, "Select a commodity to {}:", side.as_str())?;
        write!(self.output, "{}", listing)?;

        let index = match self.read_reply()? {
            Reply::Closed => return Ok(Flow::Quit),
            Reply::Malformed => {
                writeln!(self.output, "{}", NOT_A_NUMBER)?;
                return Ok(Flow::Continue);
            }
            Reply::Number(n) => match menu_index(n).filter(|i| *i < commodity_count) {
                Some(index) => index,
                None => {
                    self.report(&GameError::InvalidChoice)?;
                    return Ok(Flow::Continue);
                }
            },
        };

        write!(self.output, "Enter quantity: ")?;
        let quantity = match self.read_reply()? {
            Reply::Closed => return Ok(Flow::Quit),
            Reply::Malformed => {
                writeln!(self.output, "{}", NOT_A_NUMBER)?;
                return Ok(Flow::Continue);
            }
            Reply::Number(n) => match u32::try_from(n) {
                Ok(q) if q > 0 => q,
                _ => {
                    self.report(&GameError::InvalidQuantity)?;
                    return Ok(Flow::Continue);
                }
            },
        };

        let result = match side {
            TradeSide::Buy => self.game.buy(index, quantity),
            TradeSide::Sell => self.game.sell(index, quantity),
        };
        match result {
            Ok(trade) => writeln!(self.output, "{}", trade)?,
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Continue)
    }

    fn end_day(&mut self) -> io::Result<Flow> {
        let day = self.game.day();
        writeln!(self.output, "\n--- End of Day {} ---", day)?;
        write!(self.output, "{}", self.game.trader)?;

        loop {
            write!(
                self.output,
                "Continue to Day {}? (1: Yes, 2: Save and continue, 0: No): ",
                day.saturating_add(1)
            )?;
            match self.read_reply()? {
                Reply::Malformed => writeln!(self.output, "{}", NOT_A_NUMBER)?,
                Reply::Number(choice @ (1 | 2)) => {
                    if choice == 2 {
                        self.save()?;
                    }
                    if let Err(e) = self.game.end_day(true) {
                        self.report(&e)?;
                    }
                    return Ok(Flow::Continue);
                }
                Reply::Number(_) | Reply::Closed => {
                    if let Err(e) = self.game.end_day(false) {
                        self.report(&e)?;
                    }
                    writeln!(self.output, "Game Over. Thanks for playing!")?;
                    return Ok(Flow::Quit);
                }
            }
        }
    }

    fn save(&mut self) -> io::Result<()> {
        let path = self.game.config().save_file.clone();
        match self.game.save_game(&path) {
            Ok(()) => writeln!(self.output, "Game saved."),
            Err(e) => self.report(&e),
        }
    }
}
