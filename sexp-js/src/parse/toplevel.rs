use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stx::Program;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_program(&mut self) -> SyntaxResult<Node<Program>> {
    let body = self.stmts(ParseCtx::new(), TT::EOF)?;
    self.require(TT::EOF)?;
    Ok(Node::new(self.source_range(), Program { body }))
  }
}
