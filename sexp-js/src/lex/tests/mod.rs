use crate::error::SyntaxErrorType;
use crate::lex::lex_next;
use crate::lex::tokenize;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check_with_mode<const N: usize>(code: &str, mode: LexMode, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, mode);
    assert_eq!(t.typ, expected, "lexing {:?}", code);
  }
  let t = lex_next(&mut lexer, mode);
  assert_eq!(EOF, t.typ, "lexing {:?}", code);
}

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  check_with_mode(code, LexMode::Standard, expecteds);
}

fn lex_error(code: &str, mode: LexMode) -> Option<SyntaxErrorType> {
  let mut lexer = Lexer::new(code);
  loop {
    let t = lex_next(&mut lexer, mode);
    match t.typ {
      EOF => return None,
      Invalid => return t.lex_error,
      _ => {}
    };
  }
}

#[test]
fn test_lex_keywords() {
  check("instanceof", [KeywordInstanceof]);
  check("var function while", [KeywordVar, KeywordFunction, KeywordWhile]);
  check("true false null", [LiteralTrue, LiteralFalse, LiteralNull]);
  check("class enum", [KeywordClass, KeywordEnum]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("vara", [Identifier]);
  check("instanceofx", [Identifier]);
  check("$_", [Identifier]);
  check("é", [Identifier]);
  check("varé", [Identifier]);
  check("\\u0061bc", [Identifier]);
  check("in\\u0061", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check("1.5e10", [LiteralNumber]);
  check("1E-3", [LiteralNumber]);
  check("0x1F", [LiteralNumber]);
  check("017", [LiteralNumber]);
  check("1 .toString", [LiteralNumber, Dot, Identifier]);
  check("1..toString", [LiteralNumber, Dot, Identifier]);
}

#[test]
fn test_lex_malformed_numbers() {
  assert_eq!(
    lex_error("3in x", LexMode::Standard),
    Some(SyntaxErrorType::MalformedLiteralNumber)
  );
  assert_eq!(
    lex_error("0x", LexMode::Standard),
    Some(SyntaxErrorType::MalformedLiteralNumber)
  );
  assert_eq!(
    lex_error("1e+", LexMode::Standard),
    Some(SyntaxErrorType::MalformedLiteralNumber)
  );
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"it's\"", [LiteralString]);
  check("'a\\'b'", [LiteralString]);
  check("'line\\\ncontinued'", [LiteralString]);
  check("'hello world\n'", [Invalid, Invalid]);
  assert_eq!(
    lex_error("'abc", LexMode::Standard),
    Some(SyntaxErrorType::UnterminatedString)
  );
  assert_eq!(
    lex_error("'abc\ndef'", LexMode::Standard),
    Some(SyntaxErrorType::LineTerminatorInString)
  );
}

#[test]
fn test_lex_slash_depends_on_mode() {
  check("a / b", [Identifier, Slash, Identifier]);
  check("/= 2", [SlashEquals, LiteralNumber]);
  check_with_mode("/a/g", LexMode::SlashIsRegex, [LiteralRegex]);
  check_with_mode("/[/]/", LexMode::SlashIsRegex, [LiteralRegex]);
  check_with_mode("/\\//", LexMode::SlashIsRegex, [LiteralRegex]);
  check_with_mode("/=a/", LexMode::SlashIsRegex, [LiteralRegex]);
  assert_eq!(
    lex_error("/abc\n/", LexMode::SlashIsRegex),
    Some(SyntaxErrorType::UnterminatedRegex)
  );
}

#[test]
fn test_lex_punctuators() {
  check(">>>=", [ChevronRightChevronRightChevronRightEquals]);
  check("a>>>b", [Identifier, ChevronRightChevronRightChevronRight, Identifier]);
  check("!==", [ExclamationEqualsEquals]);
  check("a+++b", [Identifier, PlusPlus, Plus, Identifier]);
}

#[test]
fn test_lex_comments() {
  check("a /* b */ c", [Identifier, Identifier]);
  check("a // b\nc", [Identifier, Identifier]);
  check("// only a comment", []);
  assert_eq!(
    lex_error("a /* never closed", LexMode::Standard),
    Some(SyntaxErrorType::UnterminatedComment)
  );
}

#[test]
fn test_lex_line_terminator_flag() {
  let mut lexer = Lexer::new("a\nb /*\n*/ c /* */ d // x\ne\u{2028}f");
  let flags: Vec<bool> = (0..6)
    .map(|_| lex_next(&mut lexer, LexMode::Standard).preceded_by_line_terminator)
    .collect();
  assert_eq!(flags, vec![false, true, true, false, true, true]);
}

#[test]
fn test_lex_unexpected_character() {
  let mut lexer = Lexer::new("a # b");
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(t.typ, Invalid);
  assert_eq!(t.lex_error, Some(SyntaxErrorType::UnexpectedCharacter));
  assert_eq!((t.loc.0, t.loc.1), (2, 3));
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
}

#[test]
fn test_tokenize() {
  let types: Vec<TT> = tokenize("x = a / b; y = /re/g;")
    .unwrap()
    .into_iter()
    .map(|t| t.typ)
    .collect();
  assert_eq!(types, vec![
    Identifier,
    Equals,
    Identifier,
    Slash,
    Identifier,
    Semicolon,
    Identifier,
    Equals,
    LiteralRegex,
    Semicolon,
    EOF,
  ]);

  let err = tokenize("var a = 1;\nvar b = 'oops").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnterminatedString);
  let position = err.position.unwrap();
  assert_eq!((position.line, position.column), (2, 9));
}
