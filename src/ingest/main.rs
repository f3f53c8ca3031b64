//! Feature document annotator for the external bulk importer.
//!
//! Reads newline-delimited JSON feature documents, attaches the fuzzy
//! housenumber variant array to every document carrying a housenumber,
//! and writes the annotated documents back out. The variants become
//! the searchable housenumber field matched verbatim at query time.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use larch::housenumber;

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Annotate feature documents with housenumber variants")]
struct Args {
    /// Input NDJSON dump ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Output path ("-" for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,
}

fn main() -> Result<()> {
    // Log to stderr; stdout may carry the annotated documents
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let reader: Box<dyn BufRead> = if args.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("Failed to open input file: {}", args.input))?;
        Box::new(BufReader::new(file))
    };

    let mut writer: Box<dyn Write> = if args.output == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("Failed to create output file: {}", args.output))?;
        Box::new(BufWriter::new(file))
    };

    let mut total = 0usize;
    let mut annotated = 0usize;

    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }

        let mut doc: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                warn!("Skipping unparseable document: {}", err);
                continue;
            }
        };
        total += 1;

        if let Some(number) = doc.get("housenumber").and_then(|v| v.as_str()) {
            let mut variants: Vec<String> = housenumber::variants(number).into_iter().collect();
            if !variants.is_empty() {
                // deterministic output for diffable dumps
                variants.sort();
                doc["housenumber_variants"] = serde_json::Value::from(variants);
                annotated += 1;
            }
        }

        serde_json::to_writer(&mut writer, &doc)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    info!("Annotated {} of {} documents", annotated, total);

    Ok(())
}
