use std::collections::{BTreeSet, HashMap, VecDeque};
use indexmap::IndexMap;
use log::debug;
use crate::grammar::Grammar;
use super::item::{closure, goto, ItemSet, Lr0Item};

pub type StateId = usize;

/// The canonical collection of LR(0) item sets, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct States {
  states: Vec<State>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
  pub id: StateId,
  /// closed
  pub items: ItemSet,
  /// symbol -> index of target state, in ascending symbol order
  pub transitions: IndexMap<String, StateId>,
}

impl States {
  pub fn len(&self) -> usize {
    self.states.len()
  }

  pub fn is_empty(&self) -> bool {
    self.states.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, State> {
    self.states.iter()
  }

  pub fn get(&self, id: StateId) -> Option<&State> {
    self.states.get(id)
  }
}

impl std::ops::Index<StateId> for States {
  type Output = State;

  fn index(&self, id: StateId) -> &State {
    &self.states[id]
  }
}

impl<'a> IntoIterator for &'a States {
  type Item = &'a State;
  type IntoIter = std::slice::Iter<'a, State>;

  fn into_iter(self) -> Self::IntoIter {
    self.states.iter()
  }
}

/// Breadth-first construction of every state reachable from
/// `closure({S' -> . S})`. A grammar without productions has no states.
pub(crate) fn gen_states(
  grammar: &Grammar,
) -> States {
  if grammar.prods().is_empty() {
    return States {
      states: vec![],
    };
  }

  let start = closure(grammar, &ItemSet::from([Lr0Item::new(0, 0)]));

  let mut states = vec![State {
    id: 0,
    items: start.clone(),
    transitions: IndexMap::new(),
  }];
  let mut lookup = HashMap::new();
  lookup.insert(start, 0);

  let mut todo = VecDeque::new();
  todo.push_back(0);

  while let Some(id) = todo.pop_front() {
    let symbols = states[id].items.iter()
      .filter_map(|item| item.next_symbol(grammar))
      .collect::<BTreeSet<_>>();

    let mut transitions = IndexMap::new();
    for sym in symbols {
      let items = goto(grammar, &states[id].items, sym);
      if items.is_empty() {
        continue;
      }

      let target = match lookup.get(&items) {
        Some(&target) => target,
        None => {
          let target = states.len();
          debug!("state {} = goto({}, {}), {} items", target, id, sym, items.len());
          lookup.insert(items.clone(), target);
          states.push(State {
            id: target,
            items,
            transitions: IndexMap::new(),
          });
          todo.push_back(target);
          target
        }
      };
      transitions.insert(sym.to_owned(), target);
    }
    states[id].transitions = transitions;
  }

  States {
    states,
  }
}
