use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::operator::OperatorName;
use crate::parse::ParseCtx;
use crate::parse::Parser;
use crate::sexp::Sexp;
use crate::sexp::ToSexp;
use crate::token::TT;
use crate::util::test::evaluate_test_input_files;
use crate::ParseOptions;

fn parse_expr(input: &str) -> SyntaxResult<Node<Expr>> {
  let mut parser = Parser::new(Lexer::new(input), ParseOptions::default());
  let expr = parser.expr(ParseCtx::new())?;
  parser.require(TT::EOF)?;
  Ok(expr)
}

fn parse_expr_and_serialize(input: String) -> Sexp {
  parse_expr(&input).unwrap().to_sexp()
}

#[test]
fn test_parse_expression() {
  evaluate_test_input_files("parse/tests/expr", parse_expr_and_serialize);
}

#[test]
fn binary_operators_associate_left() {
  let expr = parse_expr("a - b - c").unwrap();
  let Expr::Binary(outer) = *expr.stx else {
    panic!("expected binary expression");
  };
  assert_eq!(outer.stx.operator, OperatorName::Subtraction);
  assert!(matches!(*outer.stx.left.stx, Expr::Binary(_)));
  assert!(matches!(*outer.stx.right.stx, Expr::Id(_)));
}

#[test]
fn node_locations_exclude_surrounding_trivia() {
  let expr = parse_expr("  foo . bar /* x */ ").unwrap();
  assert_eq!(expr.loc.0, 2);
  assert_eq!(expr.loc.1, 11);
}

#[test]
fn rejects_invalid_assignment_targets() {
  for src in ["1 = 2", "a + b = c", "f() = 1", "++this", "(a, b)++"] {
    let err = parse_expr(src).unwrap_err();
    assert_eq!(err.typ, SyntaxErrorType::InvalidAssignmentTarget, "{}", src);
  }
  assert!(parse_expr("(a) = 1").is_ok());
  assert!(parse_expr("a[0].b = 1").is_ok());
}

#[test]
fn getters_and_setters_check_arity() {
  assert!(parse_expr("{get a(x) {}}").is_err());
  assert!(parse_expr("{set a() {}}").is_err());
  // A property may be named `get`.
  assert!(parse_expr("{get: 1, set: 2}").is_ok());
}
