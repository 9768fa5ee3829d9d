use sexp_js::error::SyntaxErrorType;
use sexp_js::parse;
use sexp_js::parse_with_options;
use sexp_js::Dialect;
use sexp_js::ParseOptions;

fn ecma_opts() -> ParseOptions {
  ParseOptions {
    dialect: Dialect::Ecma,
  }
}

#[test]
fn const_is_reserved_in_ecma_dialect() {
  assert!(parse("const a = 1;").is_ok());
  let err = parse_with_options("const a = 1;", ecma_opts()).unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::ReservedWord);
  assert!(parse_with_options("var a = 1;", ecma_opts()).is_ok());
}

#[test]
fn future_reserved_words_are_rejected_in_every_dialect() {
  for source in ["class", "var enum;", "super.x", "import"] {
    for options in [ParseOptions::default(), ecma_opts()] {
      let err = parse_with_options(source, options).unwrap_err();
      assert_eq!(err.typ, SyntaxErrorType::ReservedWord, "{source}");
    }
  }
}

#[test]
fn keywords_are_valid_property_names() {
  assert!(parse("a.class; a.if = { var: 1, enum: 2 };").is_ok());
}
