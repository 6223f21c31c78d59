mod cards;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cards::Shuffle;

#[derive(Parser, Debug)]
#[command(name = "seqdeal", about = "Deterministic card dealer over a seekable shuffle")]
struct Args {
    /// Number of 52-card decks shuffled into the shoe.
    #[arg(long, default_value_t = 1)]
    decks: u32,

    /// Shuffle seed; omitted, the wall clock picks one.
    #[arg(long, value_name = "NUMBER")]
    seed: Option<u64>,

    /// Number of hands to deal.
    #[arg(long, default_value_t = 1)]
    hands: u32,

    /// Cards in each hand.
    #[arg(long = "cards-per-hand", default_value_t = 5)]
    cards_per_hand: u32,

    /// Emit hands as NDJSON records instead of text lines.
    #[arg(long)]
    ndjson: bool,

    /// Output file path (defaults to stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Serialize)]
struct HandRecord {
    hand: u32,
    seed: u64,
    cards: Vec<String>,
    values: Vec<u16>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    // The wall-clock fallback is for casual runs; pass --seed to reproduce.
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut shuffle = Shuffle::new(args.decks, seed)?;
    info!(seed, decks = args.decks, "shoe shuffled");

    let mut writer: Box<dyn Write> = match &args.out {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {:?}", path))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    for hand in 0..args.hands {
        let dealt = shuffle.deal(i64::from(args.cards_per_hand))?;
        if args.ndjson {
            let record = HandRecord {
                hand,
                seed,
                cards: dealt.iter().map(|card| card.to_string()).collect(),
                values: dealt.iter().map(|card| card.0).collect(),
            };
            let line = serde_json::to_string(&record)?;
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        } else {
            let labels: Vec<String> = dealt.iter().map(|card| card.to_string()).collect();
            writeln!(writer, "hand {}: {}", hand + 1, labels.join(" "))?;
        }
    }
    writer.flush()?;

    Ok(())
}
