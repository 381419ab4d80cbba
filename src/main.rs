//! Prints SLR(1) parsing tables for the built-in grammars or a grammar file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use slrgen::{print, Builtin, Grammar, SlrParser};

#[derive(Parser)]
#[command(version, about = "Build LR(0) automata and SLR(1) tables for small grammars")]
struct Args {
  /// Built-in grammar to print.
  #[arg(short = 'g', long, value_enum, default_value = "all")]
  grammar: Selection,

  /// Grammar file with `A -> x y | z` rules; overrides --grammar.
  #[arg(short = 'f', long)]
  file: Option<PathBuf>,

  /// Write to this file instead of stdout.
  #[arg(short = 'o', long)]
  output: Option<PathBuf>,

  /// Also dump the canonical collection of item sets.
  #[arg(long)]
  states: bool,

  /// Also dump FIRST and FOLLOW.
  #[arg(long)]
  sets: bool,

  /// Also list cells written with more than one action.
  #[arg(long)]
  conflicts: bool,

  /// Enable debug logging.
  #[arg(short = 'v', long)]
  verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Selection {
  Arithmetic,
  Boolean,
  Statement,
  /// the three built-ins, in that order
  All,
}

impl Selection {
  fn builtins(self) -> Vec<Builtin> {
    match self {
      Selection::Arithmetic => vec![Builtin::Arithmetic],
      Selection::Boolean => vec![Builtin::Boolean],
      Selection::Statement => vec![Builtin::Statement],
      Selection::All => Builtin::ALL.to_vec(),
    }
  }
}

fn main() -> Result<()> {
  let args = Args::parse();

  logger(args.verbose).init();

  let mut out: Box<dyn Write> = match &args.output {
    Some(path) => Box::new(BufWriter::new(File::create(path)
      .with_context(|| format!("cannot create `{}`", path.display()))?)),
    None => Box::new(io::stdout().lock()),
  };

  run(&args, &mut out)
}

/// `warn` by default, `debug` with `--verbose`; `RUST_LOG` overrides both.
fn logger(verbose: bool) -> env_logger::Builder {
  let mut builder = env_logger::Builder::new();
  builder
    .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Warn })
    .parse_default_env()
    .format_timestamp(None);
  builder
}

/// Writes one section per selected grammar, separated by blank lines.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
  let grammars = select_grammars(args)?;

  for (i, (name, grammar)) in grammars.into_iter().enumerate() {
    info!("generating table for {}", name);
    let parser = SlrParser::new(grammar);

    if i > 0 {
      writeln!(out)?;
    }
    writeln!(out, "== {} ==", name)?;
    if args.sets {
      print::write_sets(out, &parser)?;
      writeln!(out)?;
    }
    if args.states {
      print::write_states(out, &parser)?;
      writeln!(out)?;
    }
    print::write_table(out, &parser)?;
    if args.conflicts {
      writeln!(out)?;
      print::write_conflicts(out, &parser)?;
    }
  }
  out.flush()?;

  Ok(())
}

fn select_grammars(args: &Args) -> Result<Vec<(String, Grammar)>> {
  if let Some(path) = &args.file {
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("cannot read `{}`", path.display()))?;
    let grammar = Grammar::parse(&text)
      .with_context(|| format!("invalid grammar in `{}`", path.display()))?;
    return Ok(vec![(path.display().to_string(), grammar)]);
  }

  Ok(args.grammar.builtins()
    .into_iter()
    .map(|b| (b.name().to_owned(), b.grammar()))
    .collect())
}
