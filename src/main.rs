use std::fs::File;
use std::io::Read;

use clap::Parser;

use stock_ledger::account_store::FlatFileStore;
use stock_ledger::config::{Command, Config};
use stock_ledger::diagnostics::{FileLog, StdErrLog};
use stock_ledger::domain::{DiagnosticSink, Error, NewAccount, PasswordHasher};
use stock_ledger::engine::Engine;
use stock_ledger::hashing::{Argon2Hasher, LegacyHasher};
use stock_ledger::ingestion::CsvReader;
use stock_ledger::output_repository::StdOutOutput;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    let log: Box<dyn DiagnosticSink> = if config.no_log_file {
        Box::new(StdErrLog::default())
    } else {
        Box::new(FileLog::new(&config.log))
    };

    match config.command {
        Command::Portfolio { ref file } => {
            let file = File::open(file)?;
            let mut engine = Engine::new(CsvReader::new(file), StdOutOutput::new(), log);
            let failed = engine.process().await?;
            engine.flush();
            if failed > 0 {
                tracing::warn!(failed, "some rows were rejected");
            }
        }
        Command::Register | Command::Login | Command::NextKey if config.legacy_hash => {
            run_account_command(&config, FlatFileStore::new(&config.store, LegacyHasher, log))?;
        }
        Command::Register | Command::Login | Command::NextKey => {
            run_account_command(&config, FlatFileStore::new(&config.store, Argon2Hasher, log))?;
        }
    }

    Ok(())
}

fn run_account_command<H, D>(config: &Config, store: FlatFileStore<H, D>) -> Result<(), Error>
where
    H: PasswordHasher,
    D: DiagnosticSink,
{
    match config.command {
        Command::Register => {
            let input = read_stdin()?;
            let mut tokens = input.split_whitespace().map(str::to_string);
            let mut next = |field: &'static str| tokens.next().ok_or(Error::InvalidField { field });
            let account = NewAccount {
                username: next("username")?,
                password: next("password")?,
                email: next("email")?,
                phone_number: next("phone number")?,
            };
            let key = store.register(&account)?;
            println!("Registered {} with primary key {}", account.username, key);
        }
        Command::Login => {
            let input = read_stdin()?;
            let mut tokens = input.split_whitespace();
            let username = tokens.next().unwrap_or_default();
            let password = tokens.next().unwrap_or_default();
            let key = store.login(username, password)?;
            println!("Welcome, {} (primary key {})", username, key);
        }
        Command::NextKey => println!("{}", store.next_primary_key()?),
        Command::Portfolio { .. } => {}
    }
    Ok(())
}

fn read_stdin() -> Result<String, Error> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}
