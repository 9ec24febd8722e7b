//! recordkv CLI
//!
//! Runs queries against the built-in student roster and prints each
//! result with its comparison cost.

use clap::{Parser, Subcommand};
use recordkv::{Config, Engine, Record, RecordId};
use tracing_subscriber::{fmt, EnvFilter};

/// recordkv CLI
#[derive(Parser, Debug)]
#[command(name = "recordkv-cli")]
#[command(about = "Query an in-memory dual-index record store")]
#[command(version)]
struct Args {
    /// Fold surnames with ASCII rules instead of full Unicode lowercase
    #[arg(long)]
    ascii: bool,

    /// Warn when a query costs more than this many comparisons
    #[arg(short, long)]
    warn_above: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up a record by id
    Find {
        id: RecordId,
    },

    /// List records with lo <= id <= hi
    Range {
        lo: RecordId,
        hi: RecordId,
    },

    /// List records whose last name starts with a prefix (case-insensitive)
    Prefix {
        prefix: String,
    },

    /// Delete a record, then look it up again
    Delete {
        id: RecordId,
    },

    /// Run the full seeded walkthrough
    Scenario,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,recordkv=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let mut builder = Config::builder();
    if args.ascii {
        builder = builder.case_folding(recordkv::CaseFolding::Ascii);
    }
    if let Some(limit) = args.warn_above {
        builder = builder.cost_warn_threshold(limit);
    }

    let mut engine = Engine::with_config(builder.build());
    for record in roster() {
        if let Err(e) = engine.insert_record(record) {
            tracing::error!("Failed to seed roster: {}", e);
            std::process::exit(1);
        }
    }
    tracing::info!("recordkv v{} seeded with {} records", recordkv::VERSION, engine.len());

    match args.command {
        Commands::Find { id } => find(&engine, id),
        Commands::Range { lo, hi } => range(&engine, lo, hi),
        Commands::Prefix { prefix } => by_prefix(&engine, &prefix),
        Commands::Delete { id } => delete(&mut engine, id),
        Commands::Scenario => scenario(&mut engine),
    }
}

/// Students inserted in increasing id order (a right-skewed primary tree)
fn roster() -> Vec<Record> {
    vec![
        Record::new(1000123, "Nguyen", "Anya", "CS", 3.87),
        Record::new(1000456, "Patel", "Dev", "Math", 3.55),
        Record::new(1000789, "Gonzalez", "Lucia", "EE", 3.92),
        Record::new(1000811, "Smith", "Riley", "CS", 2.98),
        Record::new(1001022, "Ali", "Omar", "Bio", 3.20),
        Record::new(1001099, "Smith", "Avery", "EE", 3.70),
        Record::new(1002042, "Green", "Jamie", "CS", 3.65),
    ]
}

fn print_record(record: &Record) {
    println!(
        "  {:>8}  {:<10} {:<8} {:<5} {:.2}",
        record.id, record.last, record.first, record.major, record.gpa
    );
}

fn find(engine: &Engine, id: RecordId) {
    let (record, comparisons) = engine.find_by_id(id).into_parts();
    println!("find {} ({} comparisons)", id, comparisons);
    match record {
        Some(record) => print_record(record),
        None => println!("  not found"),
    }
}

fn range(engine: &Engine, lo: RecordId, hi: RecordId) {
    let (rows, comparisons) = engine.range_by_id(lo, hi).into_parts();
    println!("range {}..={} ({} rows, {} comparisons)", lo, hi, rows.len(), comparisons);
    rows.into_iter().for_each(print_record);
}

fn by_prefix(engine: &Engine, prefix: &str) {
    let (rows, comparisons) = engine.prefix_by_last(prefix).into_parts();
    println!("prefix {:?} ({} rows, {} comparisons)", prefix, rows.len(), comparisons);
    rows.into_iter().for_each(print_record);
}

fn delete(engine: &mut Engine, id: RecordId) {
    if engine.delete_by_id(id) {
        println!("deleted {}", id);
    } else {
        println!("delete {}: no such record", id);
    }
    find(engine, id);
}

fn scenario(engine: &mut Engine) {
    find(engine, 1000789);
    find(engine, 9999999);
    range(engine, 1000400, 1001000);
    by_prefix(engine, "smi");
    delete(engine, 1000811);
    by_prefix(engine, "smith");

    let late = Record::new(1003000, "Smith", "Jordan", "Math", 3.80);
    if let Err(e) = engine.insert_record(late) {
        tracing::error!("Insert failed: {}", e);
        return;
    }
    by_prefix(engine, "SMI");
}
