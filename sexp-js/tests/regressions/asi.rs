use sexp_js::ast::stmt::Stmt;
use sexp_js::error::SyntaxErrorType;
use sexp_js::parse;
use sexp_js::to_sexp;
use sexp_js::token::TT;
use sexp_js::Sexp;

fn sexp_of(source: &str) -> Sexp {
  to_sexp(&parse(source).expect("expected source to parse"))
}

fn expected(text: &str) -> Sexp {
  text.parse().unwrap()
}

#[test]
fn asi_splits_identifiers_only_across_line_terminators() {
  let parsed = parse("a\nb").expect("expected ASI split");
  assert_eq!(parsed.stx.body.len(), 2);
  assert!(matches!(parsed.stx.body[0].stx.as_ref(), Stmt::Expr(_)));
  assert!(matches!(parsed.stx.body[1].stx.as_ref(), Stmt::Expr(_)));

  let err = parse("a b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedStatementEnd);
}

#[test]
fn multiline_comment_counts_as_line_terminator() {
  assert_eq!(parse("a /* one\ntwo */ b").unwrap().stx.body.len(), 2);
  assert!(parse("a /* one line */ b").is_err());
}

#[test]
fn postfix_operator_must_be_on_same_line() {
  assert_eq!(
    sexp_of("x\n++y"),
    expected(r#"[[:expression, [:resolve, "x"]], [:expression, [:prefix, [:resolve, "y"], "++"]]]"#)
  );
}

#[test]
fn restricted_productions_end_at_line_terminator() {
  assert_eq!(
    sexp_of("return\n1"),
    expected("[[:return], [:expression, [:lit, 1]]]")
  );
  assert_eq!(
    sexp_of("break\nfoo"),
    expected(r#"[[:break], [:expression, [:resolve, "foo"]]]"#)
  );
  assert_eq!(
    sexp_of("continue\nfoo"),
    expected(r#"[[:continue], [:expression, [:resolve, "foo"]]]"#)
  );
  assert_eq!(
    sexp_of("throw\nerr"),
    expected(r#"[[:throw], [:expression, [:resolve, "err"]]]"#)
  );
}

#[test]
fn no_insertion_before_open_parenthesis() {
  assert_eq!(
    sexp_of("a = b\n(c)"),
    expected(
      r#"[[:expression, [:op_equal, [:resolve, "a"], [:function_call, [:resolve, "b"], [:args, [[:resolve, "c"]]]]]]]"#
    )
  );
}

#[test]
fn statements_end_before_closing_brace() {
  assert_eq!(
    sexp_of("{ a } b"),
    expected(r#"[[:block, [[:expression, [:resolve, "a"]]]], [:expression, [:resolve, "b"]]]"#)
  );
  assert_eq!(
    sexp_of("do {} while (false) x"),
    expected(r#"[[:do_while, [:block, []], [:false]], [:expression, [:resolve, "x"]]]"#)
  );
}

#[test]
fn declarations_on_one_line_need_separator() {
  let err = parse("var a = 1 var b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedStatementEnd);
  assert_eq!(err.actual_token, Some(TT::KeywordVar));
  assert!(parse("var a = 1\nvar b").is_ok());
}

#[test]
fn no_insertion_inside_for_header() {
  let err = parse("for (a\nb) {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon));
}
