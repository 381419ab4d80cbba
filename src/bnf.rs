use thiserror::Error;
use crate::grammar::{Grammar, Production};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BnfError {
  #[error("grammar has no productions")]
  Empty,
  #[error("line {line}: expected `->`")]
  MissingArrow {
    line: usize,
  },
  #[error("line {line}: invalid left side `{left}`")]
  InvalidLeft {
    line: usize,
    left: String,
  },
}

impl Grammar {
  /// Parses rules of the form `A -> x y | z`, one left side per line.
  ///
  /// Every left side is a nonterminal and an empty alternative is an
  /// ε-production. The first rule is kept as the augmented start production
  /// when it has the form `S' -> X` and `S'` occurs nowhere else; otherwise
  /// a fresh `<left>' -> <left>` is prepended, with more `'` until unused.
  pub fn parse(text: &str) -> Result<Grammar, BnfError> {
    let mut prods = vec![];

    for (i, line) in text.lines().enumerate() {
      let line_no = i + 1;
      let line = line.trim();
      if line.is_empty() || line.starts_with("//") {
        continue;
      }

      let (left, right) = line.split_once("->")
        .ok_or(BnfError::MissingArrow { line: line_no })?;

      let left = left.trim();
      if left.is_empty() || left.split_whitespace().count() != 1 {
        return Err(BnfError::InvalidLeft {
          line: line_no,
          left: left.to_owned(),
        });
      }

      for alt in right.split('|') {
        prods.push(Production::new(left, alt.split_whitespace()));
      }
    }

    if prods.is_empty() {
      return Err(BnfError::Empty);
    }
    if !is_augmented(&prods) {
      let left = prods[0].left.clone();
      let mut start = format!("{}'", left);
      while prods.iter().any(|p| p.left == start || p.right.contains(&start)) {
        start.push('\'');
      }
      prods.insert(0, Production::new(start, vec![left]));
    }

    let nonterms = prods.iter()
      .map(|p| p.left.clone())
      .collect::<Vec<_>>();

    Ok(Grammar::new(prods, nonterms))
  }
}

fn is_augmented(prods: &[Production]) -> bool {
  let start = &prods[0];
  start.right.len() == 1
    && prods.iter()
      .all(|p| !p.right.contains(&start.left))
    && prods[1..].iter()
      .all(|p| p.left != start.left)
}
