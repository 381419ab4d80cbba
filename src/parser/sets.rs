use std::collections::{BTreeMap, BTreeSet};
use log::trace;
use crate::grammar::{Grammar, END_MARKER, EPSILON};

/// nonterminal -> set of symbols
pub type SymbolSets = BTreeMap<String, BTreeSet<String>>;

/// An empty set for every nonterminal the grammar mentions.
fn empty_sets(grammar: &Grammar) -> SymbolSets {
  grammar.used_nonterms()
    .into_iter()
    .map(|nt| (nt.to_owned(), BTreeSet::new()))
    .collect()
}

/// Adds `syms` to `sets[key]`, returns whether the set has grown.
fn union_into<'a>(
  sets: &mut SymbolSets,
  key: &str,
  syms: impl IntoIterator<Item = &'a String>,
) -> bool {
  let set = sets.entry(key.to_owned()).or_default();
  let old_len = set.len();
  set.extend(syms.into_iter().cloned());
  set.len() != old_len
}

/// FIRST sets, looking at the first right-hand symbol only: a nullable
/// leading nonterminal does not expose the symbols behind it.
pub(crate) fn gen_first(
  grammar: &Grammar,
) -> SymbolSets {
  let mut first = empty_sets(grammar);
  let epsilon = EPSILON.to_owned();

  for round in 1.. {
    let mut changed = false;
    for prod in grammar.prods() {
      let added: Vec<String> = match prod.right.first() {
        None => vec![epsilon.clone()],
        Some(sym) if grammar.is_terminal(sym) => vec![sym.clone()],
        Some(sym) => first.get(sym)
          .map(|set| set.iter().cloned().collect())
          .unwrap_or_default(),
      };
      changed |= union_into(&mut first, &prod.left, &added);
    }
    trace!("FIRST round {}: changed = {}", round, changed);
    if !changed {
      break;
    }
  }

  first
}

/// FOLLOW sets. FIRST of a following nonterminal is copied as is, `ε`
/// included.
pub(crate) fn gen_follow(
  grammar: &Grammar,
  first: &SymbolSets,
) -> SymbolSets {
  let mut follow = empty_sets(grammar);
  if let Some(start) = grammar.start() {
    follow.entry(start.to_owned())
      .or_default()
      .insert(END_MARKER.to_owned());
  }

  for round in 1.. {
    let mut changed = false;
    for prod in grammar.prods() {
      for (i, sym) in prod.right.iter().enumerate() {
        if grammar.is_terminal(sym) {
          continue;
        }
        let added: Vec<String> = match prod.right.get(i + 1) {
          Some(next) if grammar.is_terminal(next) => vec![next.clone()],
          Some(next) => first.get(next)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default(),
          None => follow.get(&prod.left)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default(),
        };
        changed |= union_into(&mut follow, sym, &added);
      }
    }
    trace!("FOLLOW round {}: changed = {}", round, changed);
    if !changed {
      break;
    }
  }

  follow
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::{grammar, Builtin};
  use pretty_assertions::assert_eq;

  fn set(syms: &[&str]) -> BTreeSet<String> {
    syms.iter().map(|s| (*s).to_owned()).collect()
  }

  #[test]
  fn arithmetic_sets() {
    let g = Builtin::Arithmetic.grammar();
    let first = gen_first(&g);
    let follow = gen_follow(&g, &first);

    assert_eq!(first["S'"], set(&["(", "i"]));
    assert_eq!(first["E"], set(&["(", "i"]));
    assert_eq!(follow["S'"], set(&["#"]));
    assert_eq!(follow["E"], set(&["#", ")", "*", "+"]));
  }

  #[test]
  fn boolean_sets() {
    let g = Builtin::Boolean.grammar();
    let first = gen_first(&g);
    let follow = gen_follow(&g, &first);

    for nt in &["S'", "A", "B", "O"] {
      assert_eq!(first[*nt], set(&["(", "i", "not"]));
    }
    assert_eq!(follow["S'"], set(&["#"]));
    assert_eq!(follow["A"], set(&["(", "i", "not"]));
    assert_eq!(follow["O"], set(&["(", "i", "not"]));
    assert_eq!(follow["B"], set(&["#", ")", "and", "or"]));
  }

  #[test]
  fn statement_sets() {
    let g = Builtin::Statement.grammar();
    let first = gen_first(&g);
    let follow = gen_follow(&g, &first);

    assert_eq!(first["S"], set(&["a", "begin", "if", "while"]));
    assert_eq!(first["L"], set(&["a", "begin", "if", "while"]));
    assert_eq!(follow["S'"], set(&["#"]));
    assert_eq!(follow["S"], set(&["#", ";", "else", "end"]));
    assert_eq!(follow["L"], set(&["end"]));
  }

  #[test]
  fn start_follow_is_end_marker() {
    for b in Builtin::ALL.iter() {
      let g = b.grammar();
      let follow = gen_follow(&g, &gen_first(&g));
      assert_eq!(follow[g.start().unwrap()], set(&[END_MARKER]));
    }
  }

  #[test]
  fn only_first_symbol_is_inspected() {
    let g = grammar(&["Z", "X", "Y"], &[
      ("Z", &["X", "Y"]),
      ("X", &[]),
      ("X", &["a"]),
      ("Y", &["b", "X"]),
    ]);
    let first = gen_first(&g);
    let follow = gen_follow(&g, &first);

    assert_eq!(first["X"], set(&["a", "ε"]));
    // `b` would be in FIRST(Z) with nullable propagation
    assert_eq!(first["Z"], set(&["a", "ε"]));
    assert_eq!(follow["X"], set(&["#", "b"]));
    assert_eq!(follow["Y"], set(&["#"]));
  }

  #[test]
  fn epsilon_leaks_into_follow() {
    let g = grammar(&["Z", "X", "Y"], &[
      ("Z", &["X", "Y", "c"]),
      ("X", &["a"]),
      ("Y", &[]),
    ]);
    let follow = gen_follow(&g, &gen_first(&g));

    assert_eq!(follow["X"], set(&["ε"]));
    assert_eq!(follow["Y"], set(&["c"]));
  }

  #[test]
  fn undeclared_nonterminal_is_a_terminal() {
    let g = grammar(&["Z"], &[
      ("Z", &["X"]),
      ("X", &["a"]),
    ]);
    let first = gen_first(&g);
    let follow = gen_follow(&g, &first);

    assert_eq!(first["Z"], set(&["X"]));
    assert_eq!(follow.get("X"), None);
  }
}
