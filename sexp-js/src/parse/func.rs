use super::ParseCtx;
use super::Parser;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::ParamDecl;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn func_params(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenthesisOpen)?;
    self.strict_list_with_loc(TT::Comma, TT::ParenthesisClose, |p| {
      let name = p.require_identifier()?;
      Ok(ParamDecl { name })
    })
  }

  pub fn func_body(&mut self) -> SyntaxResult<Node<FuncBody>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      // A function body starts a fresh context; an enclosing `for` header doesn't restrict `in` here.
      let body = p.stmts(ParseCtx::new(), TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(FuncBody { body })
    })
  }

  /// Parameter list and body, shared by declarations, expressions and object accessors.
  pub fn func(&mut self) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let parameters = p.func_params()?;
      let body = p.func_body()?;
      Ok(Func { parameters, body })
    })
  }

  pub fn func_decl(&mut self) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let name = p.require_identifier()?;
      let function = p.func()?;
      Ok(FuncDecl { name, function })
    })
  }

  pub fn func_expr(&mut self) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFunction)?;
      let name = match p.peek().typ {
        TT::ParenthesisOpen => None,
        _ => Some(p.require_identifier()?),
      };
      let function = p.func()?;
      Ok(FuncExpr { name, function })
    })
  }
}
