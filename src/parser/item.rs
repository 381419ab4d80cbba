use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use crate::grammar::{Grammar, ProdId};

/// A production with a dot in its right side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lr0Item {
  pub prod: ProdId,
  /// `0..=right.len()`
  pub dot: usize,
}

/// Canonically ordered by `(prod, dot)`, so equal sets hash and compare equal.
pub type ItemSet = BTreeSet<Lr0Item>;

impl Lr0Item {
  pub fn new(prod: ProdId, dot: usize) -> Self {
    Lr0Item { prod, dot }
  }

  /// The symbol right after the dot, `None` for a complete item.
  pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g str> {
    grammar.prod(self.prod).right.get(self.dot).map(String::as_str)
  }

  pub fn is_complete(&self, grammar: &Grammar) -> bool {
    self.dot == grammar.prod(self.prod).right.len()
  }

  /// Orders by the production's `(left, right)` and then by the dot.
  pub fn cmp_structural(&self, other: &Lr0Item, grammar: &Grammar) -> Ordering {
    grammar.prod(self.prod).cmp(grammar.prod(other.prod))
      .then(self.dot.cmp(&other.dot))
  }

  pub fn display<'a>(&'a self, grammar: &'a Grammar) -> ItemDisplay<'a> {
    ItemDisplay {
      item: self,
      grammar,
    }
  }
}

pub struct ItemDisplay<'a> {
  item: &'a Lr0Item,
  grammar: &'a Grammar,
}

impl Display for ItemDisplay<'_> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let prod = self.grammar.prod(self.item.prod);
    write!(f, "{} ->", prod.left)?;
    for (i, sym) in prod.right.iter().enumerate() {
      if i == self.item.dot {
        f.write_str(" .")?;
      }
      write!(f, " {}", sym)?;
    }
    if self.item.dot == prod.right.len() {
      f.write_str(" .")?;
    }
    Ok(())
  }
}

/// Adds the initial items of every nonterminal that follows a dot, until
/// nothing new appears.
pub fn closure(
  grammar: &Grammar,
  items: &ItemSet,
) -> ItemSet {
  let mut result = items.clone();
  let mut pending = items.iter().copied().collect::<Vec<_>>();

  while let Some(item) = pending.pop() {
    let sym = match item.next_symbol(grammar) {
      Some(sym) if !grammar.is_terminal(sym) => sym,
      _ => continue,
    };
    for (id, _) in grammar.prods_of(sym) {
      let new_item = Lr0Item::new(grammar.canonical_id(id), 0);
      if result.insert(new_item) {
        pending.push(new_item);
      }
    }
  }

  result
}

/// Advances the dot over `sym` wherever possible and closes the result.
/// An empty set means there is no transition on `sym`.
pub fn goto(
  grammar: &Grammar,
  items: &ItemSet,
  sym: &str,
) -> ItemSet {
  let moved: ItemSet = items.iter()
    .filter(|item| item.next_symbol(grammar) == Some(sym))
    .map(|item| Lr0Item::new(item.prod, item.dot + 1))
    .collect();

  closure(grammar, &moved)
}
