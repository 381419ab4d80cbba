pub mod grammar;
pub mod parser;
pub mod print;
mod bnf;

pub use bnf::BnfError;
pub use grammar::{Builtin, Grammar, Production};
pub use parser::SlrParser;

pub fn build(grammar: Grammar) -> SlrParser {
  SlrParser::new(grammar)
}
