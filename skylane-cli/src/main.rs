use anyhow::Context;
use skylane_cli::commands::Command;
use skylane_cli::parser;
use skylane_core::Registry;
use skylane_store::FlatFileStore;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylane_core=info,skylane_store=info,skylane_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skylane_store::Config::load().context("Failed to load config")?;
    let store = FlatFileStore::new(&config);

    let mut registry = Registry::new();
    store
        .load(&mut registry)
        .context("Failed to load record files")?;

    println!("Flight Booking System");
    println!("Enter 'help' to see the available commands.");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parser::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Exit {
            break;
        }
        match command.execute(&mut registry) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    store
        .store(&registry)
        .context("Failed to write record files")?;
    tracing::info!("State saved, exiting");
    Ok(())
}
