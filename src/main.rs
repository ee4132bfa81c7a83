use anyhow::{Context, Result};
use clap::Parser;
use colored::*;

mod cli;

use cli::{display_banner, Args, Command};
use timetravel_miner::{Ntime, Target};

fn parse_nbits(text: &str) -> Result<u32> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    u32::from_str_radix(digits, 16).with_context(|| format!("invalid nBits {:?}", text))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Label { ntime } => {
            let ntime = Ntime::from_hex(&ntime)?;
            tracing::debug!("ntime {} = {} seconds", ntime, ntime.value());
            println!("{}", ntime.label().to_string().bright_white().bold());
        }
        Command::Order { ntime } => {
            let ntime = Ntime::from_hex(&ntime)?;
            let label = ntime.label();
            println!(
                "{} {} (index {})",
                "ntime".bright_cyan(),
                ntime,
                label.index
            );
            for (step, primitive) in label.order.primitives().iter().enumerate() {
                println!("  {:>2}. {} [{}]", step + 1, primitive.as_str().bright_white(), primitive.code());
            }
        }
        Command::Target { nbits } => {
            let nbits = parse_nbits(&nbits)?;
            let target = Target::from_compact(nbits);
            println!("{} 0x{:08x}", "nbits ".bright_cyan(), nbits);
            println!("{} {}", "target".bright_cyan(), target);
            println!("{} {:08x}", "word 7".bright_cyan(), target.word7());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    display_banner();

    if let Err(e) = run(args.command) {
        eprintln!("{}", format!("Error: {:#}", e).red().bold());
        std::process::exit(1);
    }
    Ok(())
}
