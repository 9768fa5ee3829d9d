use ast::node::Node;
use ast::stx::Program;
use error::SyntaxResult;
use lex::Lexer;
use loc::LineIndex;
use parse::Parser;
use tracing::debug;
use tracing::debug_span;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod num;
pub mod operator;
pub mod parse;
pub mod sexp;
pub mod token;
#[cfg(test)]
mod util;

pub use lex::tokenize;
pub use sexp::read::SexpParseError;
pub use sexp::to_sexp;
pub use sexp::Sexp;
pub use sexp::ToSexp;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dialect {
  /// Accepts `const` declarations.
  #[default]
  Js,
  /// ECMAScript 5 keywords only; `const` is reserved.
  Ecma,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
  pub dialect: Dialect,
}

pub fn parse(source: &str) -> SyntaxResult<Node<Program>> {
  parse_with_options(source, ParseOptions::default())
}

/// Parses a whole program. On failure no tree is returned, and the error's position is resolved to a line and column.
pub fn parse_with_options(source: &str, options: ParseOptions) -> SyntaxResult<Node<Program>> {
  let span = debug_span!("parse", bytes = source.len(), dialect = ?options.dialect);
  let _guard = span.enter();
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer, options);
  match parser.parse_program() {
    Ok(program) => {
      debug!(statements = program.stx.body.len(), "parsed program");
      Ok(program)
    }
    Err(err) => {
      let err = err.with_position(&LineIndex::new(source));
      debug!(code = err.typ.code(), position = ?err.position, "parse failed");
      Err(err)
    }
  }
}
