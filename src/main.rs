use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use addrbook::{AddressBook, ContactRecord, DEFAULT_FILE_NAME, extract_sender};
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Flat-file address book for a terminal mail client's query command
///
/// With no flags, a non-empty EXPRESSION is a substring search and an
/// empty one prints the whole collection.
#[derive(Parser)]
#[command(name = "addrbook", version, disable_version_flag = true)]
struct Cli {
    /// Search terms, or tab-joined record fields with --add
    expression: Vec<String>,

    /// Interpret EXPRESSION as one record and append it
    #[arg(short, long)]
    add: bool,

    /// Prompt for each field of a new record
    #[arg(short = 'I', long)]
    interactive_add: bool,

    /// Read an email message on stdin and append its sender
    #[arg(long)]
    mutt_add: bool,

    /// Directory holding the address file
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Name of the address file
    #[arg(short, long, default_value = DEFAULT_FILE_NAME)]
    file: String,

    /// Print matches as JSON instead of tab-separated lines
    #[arg(long)]
    json: bool,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut book = AddressBook::load(&cli.dir, &cli.file)?;

    if cli.add {
        let line = cli.expression.join("\t");
        book.append(ContactRecord::from_line(&line)?);
        book.persist()?;
    } else if cli.interactive_add {
        let record = prompt_record()?;
        book.append(record);
        book.persist()?;
    } else if cli.mutt_add {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        let sender = extract_sender(&raw)?;
        // Headers like `From: <a@b.com>` carry no display name; the
        // local part stands in for it.
        let name = if sender.name.is_empty() {
            sender
                .address
                .split('@')
                .next()
                .unwrap_or(&sender.address)
                .to_string()
        } else {
            sender.name.clone()
        };
        book.append(ContactRecord::new(sender.address, name, "", "", Vec::new())?);
        book.persist()?;
    } else if cli.expression.is_empty() {
        print_records(book.records(), cli.json)?;
    } else {
        let term = cli.expression.join(" ");
        print_records(book.substring_search(&term), cli.json)?;
    }

    Ok(())
}

fn print_records<'a, I>(records: I, json: bool) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a ContactRecord>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in records {
        if json {
            writeln!(out, "{}", serde_json::to_string(record)?)?;
        } else {
            writeln!(out, "{record}")?;
        }
    }
    Ok(())
}

fn prompt_record() -> anyhow::Result<ContactRecord> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let email = prompt(&mut lines, "Email address: ")?;
    let name = prompt(&mut lines, "Name: ")?;
    let other_info = prompt(&mut lines, "Other info (shown in the mail client): ")?;
    let extra_info = prompt(&mut lines, "Extra info (stored but not shown): ")?;

    let mut misc = Vec::new();
    loop {
        let entry = prompt(&mut lines, "Misc entry as key=value (blank to finish): ")?;
        if entry.is_empty() {
            break;
        }
        let (key, value) = entry.split_once('=').unwrap_or((entry.as_str(), ""));
        misc.push((key.trim().to_string(), value.trim().to_string()));
    }

    Ok(ContactRecord::new(email, name, other_info, extra_info, misc)?)
}

fn prompt(
    lines: &mut io::Lines<io::StdinLock<'_>>,
    label: &str,
) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let answer = lines.next().transpose()?.unwrap_or_default();
    Ok(answer.trim().to_string())
}
