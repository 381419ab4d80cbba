use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use log::debug;
use crate::grammar::{Grammar, ProdId, END_MARKER};
use super::sets::SymbolSets;
use super::state::{StateId, States};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
  Shift(StateId),
  Reduce(ProdId),
  Accept,
}

/// A cell written with more than one distinct action. `actions` is ordered
/// by last write, so the final entry is what the table holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
  pub state: StateId,
  pub symbol: String,
  pub actions: Vec<Action>,
}

/// SLR(1) ACTION and GOTO tables, one row per state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
  action: Vec<BTreeMap<String, Action>>,
  goto: Vec<BTreeMap<String, StateId>>,
  conflicts: Vec<Conflict>,
}

impl Display for Action {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Action::Shift(state) => write!(f, "s{}", state),
      Action::Reduce(prod) => write!(f, "r{}", prod),
      Action::Accept => f.write_str("acc"),
    }
  }
}

impl Display for Conflict {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "state {}, `{}`:", self.state, self.symbol)?;
    for action in &self.actions {
      write!(f, " {}", action)?;
    }
    Ok(())
  }
}

impl Table {
  pub fn num_states(&self) -> usize {
    self.action.len()
  }

  pub fn action(&self, state: StateId, symbol: &str) -> Option<Action> {
    self.action.get(state)?.get(symbol).copied()
  }

  pub fn goto(&self, state: StateId, nonterm: &str) -> Option<StateId> {
    self.goto.get(state)?.get(nonterm).copied()
  }

  pub fn action_row(&self, state: StateId) -> &BTreeMap<String, Action> {
    &self.action[state]
  }

  pub fn goto_row(&self, state: StateId) -> &BTreeMap<String, StateId> {
    &self.goto[state]
  }

  /// Cells where one action silently replaced another, ordered by state and
  /// symbol. Empty for SLR(1) grammars.
  pub fn conflicts(&self) -> &[Conflict] {
    &self.conflicts
  }
}

struct TableBuilder {
  action: Vec<BTreeMap<String, Action>>,
  goto: Vec<BTreeMap<String, StateId>>,
  /// distinct actions per ACTION cell, ordered by last write
  writes: BTreeMap<(StateId, String), Vec<Action>>,
}

impl TableBuilder {
  fn new(num_states: usize) -> Self {
    TableBuilder {
      action: vec![BTreeMap::new(); num_states],
      goto: vec![BTreeMap::new(); num_states],
      writes: BTreeMap::new(),
    }
  }

  fn set_action(&mut self, state: StateId, symbol: &str, action: Action) {
    self.action[state].insert(symbol.to_owned(), action);

    let writes = self.writes.entry((state, symbol.to_owned())).or_default();
    writes.retain(|&a| a != action);
    writes.push(action);
  }

  fn set_goto(&mut self, state: StateId, nonterm: &str, target: StateId) {
    self.goto[state].insert(nonterm.to_owned(), target);
  }

  fn build(self) -> Table {
    let conflicts = self.writes.into_iter()
      .filter(|(_, actions)| actions.len() > 1)
      .map(|((state, symbol), actions)| Conflict {
        state,
        symbol,
        actions,
      })
      .collect::<Vec<_>>();

    for conflict in &conflicts {
      debug!("conflict: {}", conflict);
    }

    Table {
      action: self.action,
      goto: self.goto,
      conflicts,
    }
  }
}

/// Derives the tables from the canonical collection. Overlapping writes to
/// a cell are resolved by keeping the last one.
pub(crate) fn gen_table(
  grammar: &Grammar,
  follow: &SymbolSets,
  states: &States,
) -> Table {
  let mut builder = TableBuilder::new(states.len());

  for state in states {
    let mut items = state.items.iter().collect::<Vec<_>>();
    items.sort_by(|a, b| a.cmp_structural(b, grammar));

    for item in items {
      let prod = grammar.prod(item.prod);
      match item.next_symbol(grammar) {
        None if Some(prod.left.as_str()) == grammar.start() => {
          builder.set_action(state.id, END_MARKER, Action::Accept);
        }
        None => {
          let reduce = Action::Reduce(grammar.canonical_id(item.prod));
          for sym in follow.get(&prod.left).into_iter().flatten() {
            builder.set_action(state.id, sym, reduce);
          }
        }
        Some(sym) => {
          let target = match state.transitions.get(sym) {
            Some(&target) => target,
            None => continue,
          };
          if grammar.is_terminal(sym) {
            builder.set_action(state.id, sym, Action::Shift(target));
          } else {
            builder.set_goto(state.id, sym, target);
          }
        }
      }
    }
  }

  builder.build()
}
