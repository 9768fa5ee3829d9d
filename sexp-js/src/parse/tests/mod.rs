mod expr;
mod stmt;

use super::Parser;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::TT;
use crate::ParseOptions;

#[test]
fn test_parser() {
  let lexer = Lexer::new("var x = /a/ / 1;");
  let mut p = Parser::new(lexer, ParseOptions::default());
  // Initial state.
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  // Peek the first token.
  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordVar);

  // Consume the first token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordVar);

  // Consume the second token.
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::Identifier);
  assert_eq!(p.since_checkpoint(&cp), Loc(0, 5));

  // Reset to a past point.
  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);

  // A token not starting with a slash is reused whatever the mode.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.buf.len(), 2);
  assert_eq!(t.typ, TT::KeywordVar);

  p.consume();
  p.consume();
  p.consume();
  let t = p.peek();
  assert_eq!(t.typ, TT::Slash);
  assert_eq!(p.buf.len(), 4);

  // Peeking a slash using a different mode truncates the buffer and lexes again.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.next_tok_i, 3);
  assert_eq!(p.buf.len(), 4);
  assert_eq!(t.typ, TT::LiteralRegex);
  assert_eq!(t.loc, Loc(8, 11));

  let t = p.consume();
  assert_eq!(t.typ, TT::Slash);
  assert_eq!(t.loc, Loc(8, 9));
}

#[test]
fn test_peek_n_does_not_consume() {
  let mut p = Parser::new(Lexer::new("foo: bar"), ParseOptions::default());
  let [a, b, c] = p.peek_n::<3>();
  assert_eq!(a.typ, TT::Identifier);
  assert_eq!(b.typ, TT::Colon);
  assert_eq!(c.typ, TT::Identifier);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.consume().typ, TT::Identifier);
}
