pub mod decl;

use decl::VarDeclParseMode;

use super::ParseCtx;
use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn stmts(&mut self, ctx: ParseCtx, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.repeat_until_tt(end, |p| p.stmt(ctx))
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let [t0, t1] = self.peek_n();
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.into_wrapped(),
      TT::KeywordBreak => self.break_stmt()?.into_wrapped(),
      TT::KeywordConst | TT::KeywordVar => self.var_decl(ctx, VarDeclParseMode::Asi)?.into_wrapped(),
      TT::KeywordContinue => self.continue_stmt()?.into_wrapped(),
      TT::KeywordDebugger => self.debugger_stmt()?.into_wrapped(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into_wrapped(),
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordFunction => self.func_decl()?.into_wrapped(),
      TT::KeywordIf => self.if_stmt(ctx)?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into_wrapped(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into_wrapped(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into_wrapped(),
      TT::KeywordTry => self.try_stmt(ctx)?.into_wrapped(),
      TT::KeywordWhile => self.while_stmt(ctx)?.into_wrapped(),
      TT::KeywordWith => self.with_stmt(ctx)?.into_wrapped(),
      TT::Semicolon => self.empty_stmt()?.into_wrapped(),
      TT::Identifier if t1.typ == TT::Colon => self.label_stmt(ctx)?.into_wrapped(),
      _ => self.expr_stmt(ctx)?.into_wrapped(),
    };
    Ok(stmt)
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    self.with_loc(|p| {
      let name = p.require_identifier()?;
      p.require(TT::Colon)?;
      let statement = p.stmt(ctx)?;
      Ok(LabelStmt { name, statement })
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| EmptyStmt {}))
  }

  // `debugger` has no observable effect, so it produces the same node as `;`.
  pub fn debugger_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.require_stmt_end()?;
      Ok(EmptyStmt {})
    })
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmts(ctx, TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  // A label is only attached when it's on the same line as the keyword.
  fn break_or_continue_label(&mut self) -> SyntaxResult<Option<String>> {
    let t = self.peek();
    let label = if t.typ == TT::Identifier && !t.preceded_by_line_terminator {
      self.consume();
      Some(self.identifier_name(t.loc))
    } else {
      None
    };
    self.require_stmt_end()?;
    Ok(label)
  }

  pub fn break_stmt(&mut self) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordBreak)?;
      let label = p.break_or_continue_label()?;
      Ok(BreakStmt { label })
    })
  }

  pub fn continue_stmt(&mut self) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordContinue)?;
      let label = p.break_or_continue_label()?;
      Ok(ContinueStmt { label })
    })
  }

  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let expr = p.expr(ctx)?;
      p.require_stmt_end()?;
      Ok(ExprStmt { expr })
    })
  }

  // The operand of `return` and `throw` must start on the same line as the keyword.
  fn restricted_operand(&mut self, ctx: ParseCtx) -> SyntaxResult<Option<Node<Expr>>> {
    let t = self.peek();
    let value = match t.typ {
      TT::Semicolon | TT::BraceClose | TT::EOF => None,
      _ if t.preceded_by_line_terminator => None,
      _ => Some(self.expr(ctx)?),
    };
    self.require_stmt_end()?;
    Ok(value)
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let value = p.restricted_operand(ctx)?;
      Ok(ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordThrow)?;
      let value = p.restricted_operand(ctx)?;
      Ok(ThrowStmt { value })
    })
  }

  pub fn for_triple_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ForTripleStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFor)?;
      p.require(TT::ParenthesisOpen)?;
      let header_ctx = ctx.with_in_allowed(false);
      let init = match p.peek().typ {
        TT::KeywordVar | TT::KeywordConst => ForTripleStmtInit::Decl(p.var_decl(header_ctx, VarDeclParseMode::Leftmost)?),
        TT::Semicolon => ForTripleStmtInit::None,
        _ => ForTripleStmtInit::Expr(p.expr(header_ctx)?),
      };
      p.require(TT::Semicolon)?;
      let cond = (p.peek().typ != TT::Semicolon).then(|| p.expr(ctx)).transpose()?;
      p.require(TT::Semicolon)?;
      let post = (p.peek().typ != TT::ParenthesisClose).then(|| p.expr(ctx)).transpose()?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(ForTripleStmt { init, cond, post, body })
    })
  }

  fn for_in_lhs(&mut self, ctx: ParseCtx) -> SyntaxResult<ForInLhs> {
    Ok(match self.peek().typ {
      TT::KeywordVar | TT::KeywordConst => {
        let decl = self.var_decl(ctx, VarDeclParseMode::Leftmost)?;
        if decl.stx.declarators.len() != 1 {
          return Err(decl.error(SyntaxErrorType::ExpectedSyntax("single variable declaration")));
        };
        ForInLhs::Decl(decl)
      }
      _ => {
        let target = self.expr(ctx)?;
        if !target.stx.is_valid_assignment_target() {
          return Err(target.error(SyntaxErrorType::InvalidAssignmentTarget));
        };
        ForInLhs::Assign(target)
      }
    })
  }

  pub fn for_in_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ForInStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordFor)?;
      p.require(TT::ParenthesisOpen)?;
      let lhs = p.for_in_lhs(ctx.with_in_allowed(false))?;
      p.require(TT::KeywordIn)?;
      let rhs = p.expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(ForInStmt { lhs, rhs, body })
    })
  }

  /// One of:
  /// - for ( [<expr> | <var decls> ]? ; <expr>? ; <expr>? )
  /// - for ( [<expr> | <var decl>] in <expr> )
  pub fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    // Determine the type of for stmt by driving the parser through the first header clause, then rewinding.
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Type {
      In,
      Triple,
    }
    impl Type {
      fn determine(p: &mut Parser, ctx: ParseCtx) -> SyntaxResult<Self> {
        p.require(TT::KeywordFor)?;
        p.require(TT::ParenthesisOpen)?;
        let header_ctx = ctx.with_in_allowed(false);
        match p.peek().typ {
          TT::KeywordVar | TT::KeywordConst => {
            p.var_decl(header_ctx, VarDeclParseMode::Leftmost)?;
          }
          // Only for(;;) loops have semicolons in the header.
          TT::Semicolon => return Ok(Self::Triple),
          _ => {
            p.expr(header_ctx)?;
          }
        };
        Ok(match p.peek().typ {
          TT::KeywordIn => Self::In,
          _ => Self::Triple,
        })
      }
    }

    let cp = self.checkpoint();
    let typ = Type::determine(self, ctx)?;
    self.restore_checkpoint(cp);
    Ok(match typ {
      Type::Triple => self.for_triple_stmt(ctx)?.into_wrapped(),
      Type::In => self.for_in_stmt(ctx)?.into_wrapped(),
    })
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let consequent = p.stmt(ctx)?;
      let alternate = p.consume_if(TT::KeywordElse).and_then(|| p.stmt(ctx))?;
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordTry)?;
      let wrapped = p.block_stmt(ctx)?;
      let catch = p.consume_if(TT::KeywordCatch).and_then(|| {
        p.with_loc(|p| {
          p.require(TT::ParenthesisOpen)?;
          let parameter = p.require_identifier()?;
          p.require(TT::ParenthesisClose)?;
          let body = p.block_stmt(ctx)?;
          Ok(CatchBlock { parameter, body })
        })
      })?;
      let finally = p.consume_if(TT::KeywordFinally).and_then(|| p.block_stmt(ctx))?;
      if catch.is_none() && finally.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      }
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WhileStmt { condition, body })
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWith)?;
      p.require(TT::ParenthesisOpen)?;
      let object = p.expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.stmt(ctx)?;
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      // A semicolon is always inserted after the closing parenthesis if missing.
      p.consume_if(TT::Semicolon);
      Ok(DoWhileStmt { condition, body })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx)?;
      p.require(TT::ParenthesisClose)?;
      p.require(TT::BraceOpen)?;
      let branches = p.repeat_until_tt(TT::BraceClose, |p| {
        p.with_loc(|p| {
          let case = if p.consume_if(TT::KeywordCase).is_match() {
            Some(p.expr(ctx)?)
          } else {
            p.require(TT::KeywordDefault)?;
            None
          };
          p.require(TT::Colon)?;
          let body = p.repeat_while(
            |p| {
              !matches!(
                p.peek().typ,
                TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
              )
            },
            |p| p.stmt(ctx),
          )?;
          Ok(SwitchBranch { case, body })
        })
      })?;
      p.require(TT::BraceClose)?;
      Ok(SwitchStmt { test, branches })
    })
  }
}
