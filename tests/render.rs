use slrgen::print::render_table;
use slrgen::{Builtin, SlrParser};

#[test]
fn arithmetic() {
  let parser = SlrParser::new(Builtin::Arithmetic.grammar());
  insta::assert_snapshot!("arithmetic", render_table(&parser));
}

#[test]
fn boolean() {
  let parser = SlrParser::new(Builtin::Boolean.grammar());
  insta::assert_snapshot!("boolean", render_table(&parser));
}

#[test]
fn statement() {
  let parser = SlrParser::new(Builtin::Statement.grammar());
  insta::assert_snapshot!("statement", render_table(&parser));
}

#[test]
fn text_grammar_matches_builtin() {
  let grammar = slrgen::Grammar::parse(r#"
    S' -> E
    E -> E + E | E * E | ( E ) | i
  "#).unwrap();

  assert_eq!(
    render_table(&slrgen::build(grammar)),
    render_table(&SlrParser::new(Builtin::Arithmetic.grammar())));
}
