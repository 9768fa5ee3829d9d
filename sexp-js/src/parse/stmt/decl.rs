use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::decl::Symbol;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::decl::VarInitializer;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  // Standard parsing mode for var/const statement.
  Asi,
  // Parse as many valid declarators as possible, then break before the first invalid token (i.e. not a comma). Used by for-loop parser.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    self.check_reserved(&t)?;
    Ok(match t.typ {
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  fn var_declarator(&mut self, ctx: ParseCtx) -> SyntaxResult<VarDeclarator> {
    let name = Symbol(self.require_identifier()?);
    let initializer = self.consume_if(TT::Equals).and_then(|| {
      self.with_loc(|p| {
        let value = p.assign_expr(ctx)?;
        Ok(VarInitializer { value })
      })
    })?;
    Ok(VarDeclarator { name, initializer })
  }

  /// Parses a variable declaration, which contains one or more declarators, each with an optional initializer. Examples of variable declarations:
  /// - `const a = 1`
  /// - `var a, b = 2, c`
  /// - `var a`
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    parse_mode: VarDeclParseMode,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let mode = p.var_decl_mode()?;
      let mut declarators = Vec::new();
      loop {
        declarators.push(p.var_declarator(ctx)?);
        if p.consume_if(TT::Comma).is_match() {
          continue;
        };
        if parse_mode == VarDeclParseMode::Asi {
          p.require_stmt_end()?;
        };
        break;
      }
      Ok(VarDecl { mode, declarators })
    })
  }
}
