//! Piecemeal - apply a script of edits to a document and print each result

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use piecemeal::{cursor, loader, PieceTable, RangeError, TableOptions};

const DEMO_TEXT: &str = "Hola, mundo!";

#[derive(Parser, Debug)]
#[command(name = "piecemeal", version, about = "Edit text through a piece table")]
struct Args {
    /// Load the initial document from a UTF-8 file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Use TEXT as the initial document
    #[arg(short, long)]
    text: Option<String>,

    /// Table option, e.g. `coalesce=off` or `cap=4096`
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Print the piece layout after the last edit
    #[arg(long)]
    show_pieces: bool,

    /// Print the row, column and visual column of POS after the last edit.
    /// The visual column expands tabs to the `tab_width` option.
    #[arg(long, value_name = "POS")]
    cursor: Option<usize>,

    /// Edits applied in order: `insert:POS:TEXT` or `erase:POS:LEN`.
    /// `\n` and `\t` in TEXT stand for newline and tab.
    #[arg(value_name = "EDIT")]
    edits: Vec<Edit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Edit {
    Insert { position: usize, text: String },
    Erase { position: usize, length: usize },
}

fn parse_number(field: &str, what: &str) -> std::result::Result<usize, String> {
    field
        .parse()
        .map_err(|_| format!("invalid {} '{}'", what, field))
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

impl FromStr for Edit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let kind = parts.next().unwrap_or_default();
        let position = parse_number(parts.next().unwrap_or_default(), "position")?;
        let rest = parts
            .next()
            .ok_or_else(|| format!("edit '{}' is missing its last field", s))?;

        match kind {
            "insert" | "i" => Ok(Edit::Insert {
                position,
                text: unescape(rest),
            }),
            "erase" | "e" => Ok(Edit::Erase {
                position,
                length: parse_number(rest, "length")?,
            }),
            other => Err(format!("unknown edit kind '{}'", other)),
        }
    }
}

impl std::fmt::Display for Edit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edit::Insert { position, text } => write!(f, "insert {:?} at {}", text, position),
            Edit::Erase { position, length } => write!(f, "erase {} at {}", length, position),
        }
    }
}

fn initial_table(args: &Args, options: TableOptions) -> Result<PieceTable> {
    if let Some(path) = &args.file {
        return loader::load_path(path, options)
            .with_context(|| format!("could not load {}", path.display()));
    }
    let text = args.text.as_deref().unwrap_or(DEMO_TEXT);
    Ok(PieceTable::with_options(text, options))
}

fn run(args: Args) -> Result<bool> {
    let options = TableOptions::default()
        .with_assignments(args.set.iter().map(String::as_str))
        .context("invalid --set option")?;

    let mut table = initial_table(&args, options)?;
    info!(len = table.len(), "document ready");
    println!("{}", table);

    let mut all_applied = true;
    for edit in &args.edits {
        let result = match edit {
            Edit::Insert { position, text } => table.insert(*position, text),
            Edit::Erase { position, length } => table.erase(*position, *length),
        };
        match result {
            Ok(()) => println!("{}", table),
            Err(err) => {
                eprintln!("{}", rejection_message(edit, &err));
                all_applied = false;
            }
        }
    }

    if args.show_pieces {
        for piece in table.pieces() {
            println!("{}", piece);
        }
    }
    if let Some(position) = args.cursor {
        match describe_position(&table, position) {
            Ok(line) => println!("{}", line),
            Err(err) => {
                eprintln!("piecemeal: cursor {}: {}", position, err);
                all_applied = false;
            }
        }
    }
    Ok(all_applied)
}

/// User-facing line for an edit the table refused
fn rejection_message(edit: &Edit, err: &RangeError) -> String {
    format!("piecemeal: rejected {} [{}]: {}", edit, err.code(), err)
}

fn describe_position(table: &PieceTable, position: usize) -> Result<String, RangeError> {
    let at = cursor::cursor_at(table, position)?;
    let visual = cursor::visual_column(table, position)?;
    Ok(format!("{} (visual column {})", at, visual + 1))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("piecemeal: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
