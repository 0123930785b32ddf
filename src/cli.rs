//! Command-line interface for the village trader.

use crate::config::GameConfig;
use lexopt::prelude::*;
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_JOURNAL_FILE: &str = "trade_journal.json";

/// Command-line arguments for the game.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub command: Command,
    pub config_file: Option<PathBuf>,
    pub random_seed: Option<u64>,
    pub starting_gold: Option<u32>,
    pub carrying_capacity: Option<u32>,
    pub save_file: Option<PathBuf>,
    pub journal_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Command {
    #[default]
    Play,
    Replay {
        file: PathBuf,
    },
    Summary {
        file: PathBuf,
    },
    InitConfig {
        file: PathBuf,
    },
    Help,
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    parse_from(std::env::args_os().skip(1))
}

/// Parse arguments, not including the program name.
pub fn parse_from<I>(args: I) -> Result<CliArgs, lexopt::Error>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    let mut args = lexopt::Parser::from_args(args);
    let mut cli_args = CliArgs::default();
    let mut subcommand: Option<String> = None;
    let mut file: Option<PathBuf> = None;
    let mut help = false;

    while let Some(arg) = args.next()? {
        match arg {
            Value(val) => {
                let val_str = val.string()?;
                if subcommand.is_none() {
                    subcommand = Some(val_str);
                } else if file.is_none() {
                    file = Some(PathBuf::from(val_str));
                } else {
                    return Err(lexopt::Error::from(format!(
                        "unexpected argument {:?}",
                        val_str
                    )));
                }
            }
            Long("config") | Short('c') => {
                cli_args.config_file = Some(PathBuf::from(args.value()?));
            }
            Long("seed") => {
                cli_args.random_seed = Some(args.value()?.parse()?);
            }
            Long("gold") => {
                cli_args.starting_gold = Some(args.value()?.parse()?);
            }
            Long("capacity") => {
                cli_args.carrying_capacity = Some(args.value()?.parse()?);
            }
            Long("save-file") => {
                cli_args.save_file = Some(PathBuf::from(args.value()?));
            }
            Long("journal") | Short('j') => {
                cli_args.journal_file = Some(PathBuf::from(args.value()?));
            }
            Long("help") | Short('h') => help = true,
            _ => return Err(arg.unexpected()),
        }
    }

    let journal_or_default = |file: Option<PathBuf>| {
        file.unwrap_or_else(|| PathBuf::from(DEFAULT_JOURNAL_FILE))
    };

    cli_args.command = match subcommand.as_deref() {
        _ if help => Command::Help,
        Some("play") | None => Command::Play,
        Some("replay") => Command::Replay {
            file: journal_or_default(file),
        },
        Some("summary") => Command::Summary {
            file: journal_or_default(file),
        },
        Some("init-config") => Command::InitConfig {
            file: file.unwrap_or_else(|| PathBuf::from("village_trader.json")),
        },
        Some(cmd) => {
            return Err(lexopt::Error::from(format!("unknown command: {}", cmd)));
        }
    };

    Ok(cli_args)
}

/// Apply CLI overrides to a loaded configuration.
pub fn apply_overrides(config: &mut GameConfig, args: &CliArgs) {
    if let Some(gold) = args.starting_gold {
        config.starting_gold = gold;
    }
    if let Some(capacity) = args.carrying_capacity {
        config.carrying_capacity = capacity;
    }
    if let Some(path) = &args.save_file {
        config.save_file = path.clone();
    }
}

pub fn print_help() {
    println!("\nVillage Trader\n");
    println!("USAGE:");
    println!("    village-trader [COMMAND] [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    play                 Play the game (default)");
    println!("    replay [FILE]        Browse a trade journal in the terminal");
    println!("    summary [FILE]       Print a report of a trade journal");
    println!("    init-config [FILE]   Write the effective configuration as JSON\n");

    println!("OPTIONS:");
    println!("    -c, --config <FILE>    Load configuration from JSON or YAML");
    println!("    --seed <N>             Seed for price generation (default: clock)");
    println!("    --gold <N>             Override starting gold");
    println!("    --capacity <N>         Override carrying capacity");
    println!("    --save-file <FILE>     Save file path (default: savegame.txt)");
    println!("    -j, --journal <FILE>   Write the trade journal to FILE on exit");
    println!("    -h, --help             Print help information\n");

    println!("REPLAY CONTROLS:");
    println!("    Space            Play/Pause");
    println!("    ←/→              Step between days");
    println!("    Home/End         Jump to first/last day");
    println!("    Q                Quit\n");

    println!("EXAMPLES:");
    println!("    village-trader play --seed 12345 --journal run.json");
    println!("    village-trader summary run.json");
}
