//! Plain-text dumps of the generated tables for inspection.

use std::io::{self, Write};
use crate::grammar::{END_MARKER, EPSILON};
use crate::parser::SlrParser;

/// Writes the ACTION/GOTO table: terminals (with `#`) first, then every
/// nonterminal except the augmented start symbol, one row per state.
pub fn write_table<W: Write>(
  out: &mut W,
  parser: &SlrParser,
) -> io::Result<()> {
  out.write_all(render_table(parser).as_bytes())
}

pub fn render_table(parser: &SlrParser) -> String {
  let grammar = parser.grammar();
  let table = parser.table();

  let mut terminals = grammar.terminals();
  terminals.insert(END_MARKER);
  terminals.remove(EPSILON);
  let nonterms = grammar.used_nonterms()
    .into_iter()
    .filter(|&nt| Some(nt) != grammar.start())
    .collect::<Vec<_>>();

  let mut rows = vec![];
  rows.push(
    std::iter::once("State")
      .chain(terminals.iter().copied())
      .chain(nonterms.iter().copied())
      .map(str::to_owned)
      .collect::<Vec<_>>());

  for state in 0..table.num_states() {
    let mut row = vec![state.to_string()];
    for &t in &terminals {
      row.push(table.action(state, t).map(|a| a.to_string()).unwrap_or_default());
    }
    for &nt in &nonterms {
      row.push(table.goto(state, nt).map(|s| s.to_string()).unwrap_or_default());
    }
    rows.push(row);
  }

  format_columns(&rows)
}

/// Left-aligned columns, two spaces apart, no trailing whitespace.
fn format_columns(rows: &[Vec<String>]) -> String {
  let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
  let widths = (0..num_cols)
    .map(|i| {
      rows.iter()
        .filter_map(|row| row.get(i))
        .map(|cell| cell.chars().count())
        .max()
        .unwrap_or(0)
    })
    .collect::<Vec<_>>();

  let mut text = String::new();
  for row in rows {
    let mut line = String::new();
    for (i, cell) in row.iter().enumerate() {
      if i > 0 {
        line.push_str("  ");
      }
      line.push_str(cell);
      let pad = widths[i] - cell.chars().count();
      line.extend(std::iter::repeat(' ').take(pad));
    }
    text.push_str(line.trim_end());
    text.push('\n');
  }
  text
}

/// Writes every state with its items and transitions.
pub fn write_states<W: Write>(
  out: &mut W,
  parser: &SlrParser,
) -> io::Result<()> {
  let grammar = parser.grammar();
  let states = parser.states();

  writeln!(out, "{} states", states.len())?;
  for state in states {
    writeln!(out)?;
    writeln!(out, "State {}", state.id)?;

    let mut items = state.items.iter().collect::<Vec<_>>();
    items.sort_by(|a, b| a.cmp_structural(b, grammar));
    for item in items {
      writeln!(out, "  {}", item.display(grammar))?;
    }
    for (sym, target) in &state.transitions {
      writeln!(out, "  on {} goto {}", sym, target)?;
    }
  }
  Ok(())
}

/// Writes FIRST and FOLLOW of every nonterminal.
pub fn write_sets<W: Write>(
  out: &mut W,
  parser: &SlrParser,
) -> io::Result<()> {
  for (name, sets) in [("FIRST", parser.first()), ("FOLLOW", parser.follow())].iter() {
    writeln!(out, "{}", name)?;
    for (nt, syms) in sets.iter() {
      let syms = syms.iter().map(String::as_str).collect::<Vec<_>>();
      writeln!(out, "  {} = {{ {} }}", nt, syms.join(", "))?;
    }
  }
  Ok(())
}

pub fn write_conflicts<W: Write>(
  out: &mut W,
  parser: &SlrParser,
) -> io::Result<()> {
  let conflicts = parser.table().conflicts();
  for conflict in conflicts {
    writeln!(out, "conflict in {}", conflict)?;
  }
  writeln!(out, "found {} conflicts", conflicts.len())?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::{grammar, Builtin};
  use crate::parser::Action;
  use pretty_assertions::assert_eq;

  fn render<F>(parser: &SlrParser, f: F) -> String
  where
    F: Fn(&mut Vec<u8>, &SlrParser) -> io::Result<()>,
  {
    let mut buf = vec![];
    f(&mut buf, parser).unwrap();
    String::from_utf8(buf).unwrap()
  }

  #[test]
  fn table_header() {
    let parser = SlrParser::new(Builtin::Boolean.grammar());
    let text = render_table(&parser);
    let header = text.lines().next().unwrap();

    assert_eq!(
      header.split_whitespace().collect::<Vec<_>>(),
      vec!["State", "#", "(", ")", "and", "i", "not", "or", "rop", "A", "B", "O"]);
    assert_eq!(text.lines().count(), 1 + 16);
  }

  #[test]
  fn epsilon_is_not_a_column() {
    let g = grammar(&["Z", "X", "Y"], &[
      ("Z", &["X", "Y", "c"]),
      ("X", &["a"]),
      ("Y", &[]),
    ]);
    let parser = SlrParser::new(g);

    assert_eq!(parser.table().action(2, "ε"), Some(Action::Reduce(1)));
    assert_eq!(render_table(&parser), "\
State  #    a   c   X  Y
0           s2      1
1               r2     3
2
3               s4
4      acc
");
  }

  #[test]
  fn states_dump() {
    let parser = SlrParser::new(Builtin::Arithmetic.grammar());
    let text = render(&parser, write_states);

    assert!(text.starts_with("10 states\n\nState 0\n  E -> . ( E )\n"));
    assert!(text.contains("State 2\n  E -> E . * E\n  E -> E . + E\n  S' -> E .\n  on * goto 5\n  on + goto 6\n"));
  }

  #[test]
  fn sets_dump() {
    let parser = SlrParser::new(Builtin::Statement.grammar());

    assert_eq!(render(&parser, write_sets), "\
FIRST
  L = { a, begin, if, while }
  S = { a, begin, if, while }
  S' = { a, begin, if, while }
FOLLOW
  L = { end }
  S = { #, ;, else, end }
  S' = { # }
");
  }

  #[test]
  fn conflicts_dump() {
    let parser = SlrParser::new(Builtin::Arithmetic.grammar());
    let text = render(&parser, write_conflicts);

    assert!(text.starts_with("conflict in state 8, `*`: s5 r2\n"));
    assert!(text.ends_with("found 4 conflicts\n"));
  }
}
