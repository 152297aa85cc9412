use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stock_ledger")]
#[command(about = "Stock holdings replay and flat-file account store", long_about = None)]
pub struct Config {
    /// Account store file.
    #[arg(long, env = "STOCK_LEDGER_STORE", default_value = "user.sq", global = true)]
    pub store: PathBuf,

    /// Diagnostic log file.
    #[arg(long, env = "STOCK_LEDGER_LOG", default_value = "cout.log", global = true)]
    pub log: PathBuf,

    /// Report failures through tracing only, without writing the log file.
    #[arg(long, global = true, conflicts_with = "log")]
    pub no_log_file: bool,

    /// Use the old unsalted password hash instead of Argon2id.
    #[arg(long, global = true)]
    pub legacy_hash: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a CSV of acquire/buy/sell/update rows and print the holdings.
    Portfolio { file: PathBuf },
    /// Read `username password email phone` from stdin and register.
    Register,
    /// Read `username password` from stdin and log in.
    Login,
    /// Print the primary key the next registration would get.
    NextKey,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Command, Config};

    #[test]
    fn defaults_and_overrides() {
        let cfg = Config::try_parse_from(["stock_ledger", "login"]).unwrap();
        assert!(matches!(cfg.command, Command::Login));
        assert!(!cfg.legacy_hash);
        assert!(!cfg.no_log_file);
        assert_eq!(cfg.log.to_str(), Some("cout.log"));

        let cfg = Config::try_parse_from([
            "stock_ledger",
            "portfolio",
            "trades.csv",
            "--store",
            "/tmp/u.sq",
            "--legacy-hash",
        ])
        .unwrap();
        assert_eq!(cfg.store.to_str(), Some("/tmp/u.sq"));
        assert!(cfg.legacy_hash);
        assert!(matches!(cfg.command, Command::Portfolio { ref file } if file.to_str() == Some("trades.csv")));
    }

    #[test]
    fn no_log_file_conflicts_with_explicit_log() {
        let cfg = Config::try_parse_from(["stock_ledger", "--no-log-file", "next-key"]).unwrap();
        assert!(cfg.no_log_file);
        assert!(
            Config::try_parse_from(["stock_ledger", "--no-log-file", "--log", "x.log", "next-key"])
                .is_err()
        );
    }

    #[test]
    fn command_is_required() {
        assert!(Config::try_parse_from(["stock_ledger"]).is_err());
    }
}
