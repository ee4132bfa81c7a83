use clap::{Parser, Subcommand};
use colored::*;
use timetravel_miner::params::DEFAULT_NTIME;

/// timetravel-miner - TimeTravel10 hashing toolkit
#[derive(Parser, Debug)]
#[command(name = "timetravel-miner")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "TimeTravel10 proof-of-work schedule and target tools", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the twisted label (_<index>_<order>_) for a block timestamp
    Label {
        /// Block timestamp as 8 hex digits (e.g. 58fcf713)
        #[arg(short, long, value_name = "NTIME", default_value = DEFAULT_NTIME)]
        ntime: String,
    },

    /// Print the primitive chain selected for a block timestamp
    Order {
        /// Block timestamp as 8 hex digits (e.g. 58fcf713)
        #[arg(short, long, value_name = "NTIME", default_value = DEFAULT_NTIME)]
        ntime: String,
    },

    /// Expand a compact nBits value into a 256-bit target
    Target {
        /// Compact target as hex (e.g. 1d00ffff)
        #[arg(short, long, value_name = "NBITS")]
        nbits: String,
    },
}

pub fn display_banner() {
    let rule = "=".repeat(56);
    println!("{}", rule.bright_cyan());
    println!("  {}", "timetravel-miner - TimeTravel10 toolkit".bright_white().bold());
    println!(
        "  {}",
        format!("Version {} | 10 primitives, 40320 orders", env!("CARGO_PKG_VERSION")).bright_green()
    );
    println!("{}", rule.bright_cyan());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parsing() {
        let args = Args::try_parse_from(["timetravel-miner", "label", "--ntime", "58fcf713"]).unwrap();
        match args.command {
            Command::Label { ntime } => assert_eq!(ntime, "58fcf713"),
            other => panic!("unexpected command {:?}", other),
        }

        let args = Args::try_parse_from(["timetravel-miner", "target", "-n", "1d00ffff", "--debug"]).unwrap();
        assert!(args.debug);
        assert!(matches!(args.command, Command::Target { .. }));

        assert!(Args::try_parse_from(["timetravel-miner", "target"]).is_err());

        let args = Args::try_parse_from(["timetravel-miner", "order"]).unwrap();
        match args.command {
            Command::Order { ntime } => assert_eq!(ntime, DEFAULT_NTIME),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
