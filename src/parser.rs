use log::info;
use crate::grammar::Grammar;

pub mod item;
pub mod state;
pub mod table;
mod sets;

pub use sets::SymbolSets;
pub use state::{State, StateId, States};
pub use table::{Action, Conflict, Table};

/// Everything computed for one grammar: FIRST/FOLLOW, the canonical LR(0)
/// collection and the SLR(1) tables.
#[derive(Debug, Clone)]
pub struct SlrParser {
  grammar: Grammar,
  first: SymbolSets,
  follow: SymbolSets,
  states: States,
  table: Table,
}

impl SlrParser {
  pub fn new(grammar: Grammar) -> Self {
    info!(
      "grammar has {} productions, {} nonterminals, {} terminals",
      grammar.prods().len(),
      grammar.used_nonterms().len(),
      grammar.terminals().len(),
    );

    let first = sets::gen_first(&grammar);
    let follow = sets::gen_follow(&grammar, &first);
    let states = state::gen_states(&grammar);
    let table = table::gen_table(&grammar, &follow, &states);

    info!(
      "created {} states, {} conflicting cells",
      states.len(),
      table.conflicts().len(),
    );

    SlrParser {
      grammar,
      first,
      follow,
      states,
      table,
    }
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn first(&self) -> &SymbolSets {
    &self.first
  }

  pub fn follow(&self) -> &SymbolSets {
    &self.follow
  }

  pub fn states(&self) -> &States {
    &self.states
  }

  pub fn table(&self) -> &Table {
    &self.table
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::grammar::Builtin;
  use pretty_assertions::assert_eq;

  #[test]
  fn runs_do_not_share_state() {
    let statement = SlrParser::new(Builtin::Statement.grammar());
    let arithmetic = SlrParser::new(Builtin::Arithmetic.grammar());
    let again = SlrParser::new(Builtin::Statement.grammar());

    assert_eq!(arithmetic.states().len(), 10);
    assert!(arithmetic.first().get("S").is_none());
    assert_eq!(statement.first(), again.first());
    assert_eq!(statement.follow(), again.follow());
    assert_eq!(statement.states(), again.states());
    assert_eq!(statement.table(), again.table());
  }

  #[test]
  fn empty_grammar() {
    let parser = SlrParser::new(Grammar::new(vec![], Vec::<String>::new()));

    assert!(parser.states().is_empty());
    assert_eq!(parser.table().num_states(), 0);
    assert!(parser.first().is_empty());
    assert!(parser.follow().is_empty());
    assert_eq!(crate::print::render_table(&parser), "State  #\n");
  }

  #[test]
  fn is_send_and_sync() {
    fn check<T: Send + Sync>() {}
    check::<SlrParser>();
  }
}
