//! bingo90 terminal game.
//!
//! Loads configuration and the wallet, then hands stdin/stdout to the
//! terminal loop. `RUST_LOG=debug` shows generation and draw details.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use bingo90::terminal::Terminal;
use bingo90::{BingoResult, GameConfig, GameSession, Wallet};

#[derive(Parser, Debug)]
#[command(name = "bingo90")]
#[command(about = "Play 90-ball bingo in the terminal", long_about = None)]
struct Args {
    /// Reset the saved wallet to the starting balance before playing
    #[arg(long)]
    reset_wallet: bool,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wallet file location
    #[arg(long)]
    wallet: Option<PathBuf>,

    /// Price of one ticket
    #[arg(long)]
    ticket_cost: Option<u64>,

    /// Prize for a completed line
    #[arg(long)]
    line_prize: Option<u64>,

    /// Prize for a full house (default: 4 x line prize)
    #[arg(long)]
    bingo_prize: Option<u64>,

    /// Balance for a new or reset wallet
    #[arg(long)]
    starting_balance: Option<u64>,

    /// RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> BingoResult<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        config.reset_wallet |= self.reset_wallet;
        if let Some(path) = self.wallet {
            config.wallet_path = path;
        }
        if let Some(cost) = self.ticket_cost {
            config.ticket_cost = cost;
        }
        if let Some(prize) = self.line_prize {
            config.line_prize = prize;
        }
        if self.bingo_prize.is_some() {
            config.bingo_prize = self.bingo_prize;
        }
        if let Some(balance) = self.starting_balance {
            config.starting_balance = balance;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Open the configured wallet. If storage cannot be read the game still runs
/// on an in-memory wallet and the player is told why.
fn open_wallet(config: &GameConfig) -> Wallet {
    match Wallet::from_config(config) {
        Ok(wallet) => wallet,
        Err(err) => {
            error!("{}", err);
            eprintln!("Warning: {}. Playing with an unsaved wallet.", err);
            Wallet::in_memory(config.starting_balance, config.prizes())
        }
    }
}

fn run(args: Args) -> BingoResult<()> {
    let config = args.into_config()?;
    info!("starting with {:?}", config);

    let mut wallet = open_wallet(&config);
    if config.reset_wallet {
        let update = wallet.reset();
        println!("Wallet reset to {}", update.balance);
        if let Some(err) = update.save_error {
            eprintln!("Warning: reset not saved: {}", err);
        }
    }

    let mut session = GameSession::new(wallet, config.seed);
    let stdin = io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), io::stdout());
    terminal.run(&mut session)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
