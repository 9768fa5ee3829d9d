use sexp_js::error::ErrorKind;
use sexp_js::error::SyntaxErrorType;
use sexp_js::loc::Loc;
use sexp_js::loc::Position;
use sexp_js::parse;
use sexp_js::token::TT;

#[test]
fn reports_code_location_and_position() {
  let err = parse("var 1;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("identifier"));
  assert_eq!(err.typ.code(), "SX0008");
  assert_eq!(err.kind(), ErrorKind::Syntax);
  assert_eq!(err.loc, Loc(4, 5));
  assert_eq!(err.actual_token, Some(TT::LiteralNumber));
  assert_eq!(err.position, Some(Position { line: 1, column: 5 }));
  assert!(err.to_string().starts_with("SX0008 expected identifier at 1:5"));
}

#[test]
fn position_counts_lines_and_characters() {
  let err = parse("var a = 1;\r\nvar é = ;").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ExpectedSyntax("expression operand"));
  assert_eq!(err.position, Some(Position { line: 2, column: 9 }));
}

#[test]
fn lexical_errors_are_distinguished() {
  let err = parse("var s = \"abc").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
  assert_eq!(err.kind(), ErrorKind::Lexical);
  assert_eq!(err.position, Some(Position { line: 1, column: 9 }));

  let err = parse("a = 'bad \\u12';").unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Lexical);

  let err = parse("x = 08a").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::MalformedLiteralNumber);
}

#[test]
fn truncated_input_is_unexpected_end() {
  for source in ["foo(", "var a =", "if (a) {", "a ? b :"] {
    let err = parse(source).unwrap_err();
    assert_eq!(err.typ.code(), "SX0014", "{source}");
    assert_eq!(err.actual_token, Some(TT::EOF), "{source}");
  }
}

#[test]
fn structural_errors() {
  assert_eq!(
    parse("try { a }").unwrap_err().typ,
    SyntaxErrorType::TryStatementHasNoCatchOrFinally
  );
  assert_eq!(
    parse("a + 1 = 2").unwrap_err().typ,
    SyntaxErrorType::InvalidAssignmentTarget
  );
  assert_eq!(
    parse("while a {}").unwrap_err().typ,
    SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisOpen)
  );
  assert_eq!(
    parse("var if = 1").unwrap_err().typ,
    SyntaxErrorType::ReservedWord
  );
}
