use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::sexp::Sexp;
use crate::sexp::ToSexp;
use crate::token::TT;
use crate::util::test::evaluate_test_input_files;
use crate::Dialect;
use crate::ParseOptions;

fn parse_stmt_with_options(input: &str, options: ParseOptions) -> SyntaxResult<Node<Stmt>> {
  let mut parser = Parser::new(Lexer::new(input), options);
  let stmt = parser.stmt(ParseCtx::new())?;
  parser.require(TT::EOF)?;
  Ok(stmt)
}

fn parse_stmt(input: &str) -> SyntaxResult<Node<Stmt>> {
  parse_stmt_with_options(input, ParseOptions::default())
}

fn parse_stmt_and_serialize(input: String) -> Sexp {
  parse_stmt(&input).unwrap().to_sexp()
}

#[test]
fn test_parse_statement() {
  evaluate_test_input_files("parse/tests/stmt", parse_stmt_and_serialize);
}

#[test]
fn for_header_chooses_loop_kind() {
  assert!(matches!(*parse_stmt("for (a in b);").unwrap().stx, Stmt::ForIn(_)));
  assert!(matches!(*parse_stmt("for (a; b;);").unwrap().stx, Stmt::ForTriple(_)));
  assert!(matches!(*parse_stmt("for (var a = (b in c); ;);").unwrap().stx, Stmt::ForTriple(_)));
}

#[test]
fn for_in_requires_single_declarator_or_target() {
  assert!(parse_stmt("for (var a, b in c);").is_err());
  let err = parse_stmt("for (a + b in c);").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget);
}

#[test]
fn try_requires_handler() {
  let err = parse_stmt("try {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
}

#[test]
fn const_depends_on_dialect() {
  assert!(parse_stmt("const a = 1").is_ok());
  let err = parse_stmt_with_options("const a = 1", ParseOptions {
    dialect: Dialect::Ecma,
  })
  .unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ReservedWord);
}

#[test]
fn statements_on_one_line_need_separator() {
  let err = parse_stmt("a b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedStatementEnd);
  assert!(parse_stmt("a\n").is_ok());
}
