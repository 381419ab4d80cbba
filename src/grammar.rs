use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Sentinel placed in FIRST sets by ε-productions.
pub const EPSILON: &str = "ε";

/// End-of-input marker, always in FOLLOW of the augmented start symbol.
pub const END_MARKER: &str = "#";

/// Index of a production in [`Grammar::prods`].
pub type ProdId = usize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production {
  pub left: String,
  /// empty for an ε-production
  pub right: Vec<String>,
}

/// A context-free grammar. Production 0, when present, is the augmented
/// start rule.
#[derive(Debug, Clone)]
pub struct Grammar {
  prods: Vec<Production>,
  nonterms: BTreeSet<String>,
  /// first index holding a production equal to the one at each index
  canonical: Vec<ProdId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
  Arithmetic,
  Boolean,
  Statement,
}

impl Production {
  pub fn new(
    left: impl Into<String>,
    right: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Production {
      left: left.into(),
      right: right.into_iter().map(Into::into).collect(),
    }
  }
}

impl Display for Production {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} ->", self.left)?;
    for sym in &self.right {
      write!(f, " {}", sym)?;
    }
    Ok(())
  }
}

impl Grammar {
  pub fn new(
    prods: Vec<Production>,
    nonterms: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    let canonical = (0..prods.len())
      .map(|i| {
        prods.iter()
          .position(|p| *p == prods[i])
          .unwrap_or(i)
      })
      .collect();

    Grammar {
      prods,
      nonterms: nonterms.into_iter().map(Into::into).collect(),
      canonical,
    }
  }

  pub fn prods(&self) -> &[Production] {
    &self.prods
  }

  pub fn prod(&self, id: ProdId) -> &Production {
    &self.prods[id]
  }

  /// Index used for items and reduce actions: duplicates collapse onto the
  /// first occurrence.
  pub fn canonical_id(&self, id: ProdId) -> ProdId {
    self.canonical[id]
  }

  pub fn nonterms(&self) -> &BTreeSet<String> {
    &self.nonterms
  }

  /// Left side of production 0, `None` for a grammar without productions.
  pub fn start(&self) -> Option<&str> {
    self.prods.first().map(|p| p.left.as_str())
  }

  /// Anything outside the nonterminal set is a terminal, including symbols
  /// that were never declared anywhere.
  pub fn is_terminal(&self, sym: &str) -> bool {
    !self.nonterms.contains(sym)
  }

  /// Productions with the given left side, in declaration order.
  pub fn prods_of<'a>(
    &'a self,
    nonterm: &'a str,
  ) -> impl Iterator<Item = (ProdId, &'a Production)> + 'a {
    self.prods.iter()
      .enumerate()
      .filter(move |(_, p)| p.left == nonterm)
  }

  /// Terminals occurring in some right side, in ascending order.
  pub fn terminals(&self) -> BTreeSet<&str> {
    self.prods.iter()
      .flat_map(|p| p.right.iter())
      .map(String::as_str)
      .filter(|sym| self.is_terminal(sym))
      .collect()
  }

  /// Nonterminals occurring anywhere in the productions, in ascending order.
  pub fn used_nonterms(&self) -> BTreeSet<&str> {
    self.prods.iter()
      .flat_map(|p| std::iter::once(&p.left).chain(p.right.iter()))
      .map(String::as_str)
      .filter(|sym| !self.is_terminal(sym))
      .collect()
  }
}

/// Builds a grammar from string slices.
///
/// ```
/// use slrgen::grammar::grammar;
///
/// let g = grammar(&["S'", "S"], &[
///   ("S'", &["S"]),
///   ("S", &["a", "S"]),
///   ("S", &[]),
/// ]);
/// assert!(g.is_terminal("a"));
/// ```
pub fn grammar(
  nonterms: &[&str],
  prods: &[(&str, &[&str])],
) -> Grammar {
  Grammar::new(
    prods.iter()
      .map(|&(left, right)| Production::new(left, right.iter().copied()))
      .collect(),
    nonterms.iter().copied(),
  )
}

impl Builtin {
  pub const ALL: [Builtin; 3] = [
    Builtin::Arithmetic,
    Builtin::Boolean,
    Builtin::Statement,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Builtin::Arithmetic => "arithmetic",
      Builtin::Boolean => "boolean",
      Builtin::Statement => "statement",
    }
  }

  pub fn grammar(self) -> Grammar {
    match self {
      Builtin::Arithmetic => grammar(&["S'", "E"], &[
        ("S'", &["E"]),
        ("E", &["E", "+", "E"]),
        ("E", &["E", "*", "E"]),
        ("E", &["(", "E", ")"]),
        ("E", &["i"]),
      ]),
      Builtin::Boolean => grammar(&["S'", "B", "A", "O"], &[
        ("S'", &["B"]),
        ("B", &["i"]),
        ("B", &["i", "rop", "i"]),
        ("B", &["(", "B", ")"]),
        ("B", &["not", "B"]),
        ("A", &["B", "and"]),
        ("B", &["A", "B"]),
        ("O", &["B", "or"]),
        ("B", &["O", "B"]),
      ]),
      Builtin::Statement => grammar(&["S'", "S", "L"], &[
        ("S'", &["S"]),
        ("S", &["if", "e", "then", "S", "else", "S"]),
        ("S", &["while", "e", "do", "S"]),
        ("S", &["begin", "L", "end"]),
        ("S", &["a"]),
        ("L", &["S"]),
        ("L", &["S", ";", "L"]),
      ]),
    }
  }
}

impl Display for Builtin {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Builtin {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, String> {
    Builtin::ALL.iter()
      .copied()
      .find(|b| b.name() == s)
      .ok_or_else(|| format!("unknown grammar `{}`", s))
  }
}
