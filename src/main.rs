use std::io;
use std::process;

use village_trader::analysis::summarize_journal;
use village_trader::cli::{self, CliArgs, Command};
use village_trader::config::GameConfig;
use village_trader::game::{Game, wall_clock_seed};
use village_trader::session::Session;
use village_trader::ui::run_replay;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_help();
            process::exit(2);
        }
    };

    let result = match &args.command {
        Command::Play => play(&args),
        Command::Replay { file } => {
            run_replay(file).map_err(|e| format!("Error running replay: {}", e))
        }
        Command::Summary { file } => summarize_journal(file).map(|summary| print!("{}", summary)),
        Command::InitConfig { file } => init_config(&args, file),
        Command::Help => {
            cli::print_help();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn load_config(args: &CliArgs) -> Result<GameConfig, String> {
    let mut config = match &args.config_file {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    cli::apply_overrides(&mut config, args);
    config.validate()?;
    Ok(config)
}

fn play(args: &CliArgs) -> Result<(), String> {
    let config = load_config(args)?;
    let seed = args.random_seed.unwrap_or_else(wall_clock_seed);
    log::info!("starting game with seed {}", seed);
    log::debug!("config:\n{}", config);

    let stdin = io::stdin();
    let mut session = Session::new(Game::new(config, seed), stdin.lock(), io::stdout());
    session
        .run()
        .map_err(|e| format!("Console error: {}", e))?;

    if let Some(path) = &args.journal_file {
        session
            .game()
            .journal()
            .save_to_file(path)
            .map_err(|e| format!("Failed to write journal {}: {}", path.display(), e))?;
        log::info!("journal written to {}", path.display());
    }
    Ok(())
}

fn init_config(args: &CliArgs, file: &std::path::Path) -> Result<(), String> {
    let config = load_config(args)?;
    config
        .save_to_file(file)
        .map_err(|e| format!("Failed to write {}: {}", file.display(), e))?;
    println!("Wrote configuration to {}", file.display());
    print!("{}", config);
    Ok(())
}
