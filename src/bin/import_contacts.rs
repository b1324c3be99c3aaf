use std::io;
use std::path::PathBuf;

use addrbook::{AddressBook, ContactRecord, DEFAULT_FILE_NAME};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One-off import of a contacts CSV export into the address book
///
/// Reads an export whose rows carry a display name up front and two
/// email columns near the end, and appends one record per row. No
/// deduplication happens here; run the address file through `uniq`
/// afterwards.
#[derive(Parser)]
#[command(name = "import-contacts", version)]
struct Cli {
    /// Path of the exported CSV
    #[arg(default_value = "contacts.csv")]
    csv: PathBuf,

    /// Directory holding the address file
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Name of the address file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    file: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut reader = csv::Reader::from_path(&cli.csv)
        .with_context(|| format!("Failed to open {}", cli.csv.display()))?;
    let mut book = AddressBook::load(&cli.dir, &cli.file)?;

    let mut imported = 0usize;
    for row in reader.records() {
        let row = row?;
        let Some(line) = contact_line(&row) else {
            continue;
        };
        book.append(ContactRecord::from_line(&line)?);
        imported += 1;
    }
    book.persist()?;

    info!("Imported {} contacts into {}", imported, book.path().display());
    Ok(())
}

/// Derive a tab-joined record line from one export row
///
/// Rows without a primary email are skipped; a missing display name
/// falls back to the local part of the primary address. A secondary
/// address rides in the searchable-but-hidden fourth field.
fn contact_line(row: &csv::StringRecord) -> Option<String> {
    let name = row.get(0).unwrap_or_default().trim();
    let email1 = row.get(row.len().checked_sub(9)?)?.trim();
    let email2 = row.get(row.len().checked_sub(7)?)?.trim();
    if email1.is_empty() {
        return None;
    }

    let name = if name.is_empty() {
        email1.split('@').next().unwrap_or(email1).trim()
    } else {
        name
    };

    if email2.is_empty() {
        Some(format!("{email1}\t{name}"))
    } else {
        Some(format!("{email1}\t{name}\t\t{email2}"))
    }
}
