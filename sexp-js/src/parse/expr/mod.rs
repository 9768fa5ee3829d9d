pub mod lit;

use super::operator::MULTARY_OPERATOR_MAPPING;
use super::operator::UNARY_OPERATOR_MAPPING;
use super::unexpected;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArgs;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::ParenExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::TT;

fn require_assignment_target(target: Node<Expr>) -> SyntaxResult<Node<Expr>> {
  if target.stx.is_valid_assignment_target() {
    Ok(target)
  } else {
    Err(target.error(SyntaxErrorType::InvalidAssignmentTarget))
  }
}

impl<'a> Parser<'a> {
  pub fn call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<CallArgs>> {
    self.with_loc(|p| {
      p.require(TT::ParenthesisOpen)?;
      let mut args = Vec::new();
      if !p.consume_if(TT::ParenthesisClose).is_match() {
        loop {
          args.push(p.assign_expr(ctx.with_in_allowed(true))?);
          if !p.consume_if(TT::Comma).is_match() {
            p.require(TT::ParenthesisClose)?;
            break;
          };
        }
      };
      Ok(CallArgs { args })
    })
  }

  /// Parses an expression, including the comma operator.
  pub fn expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, 1)
  }

  /// Parses an expression that stops before a top-level comma, as in arguments and initializers.
  pub fn assign_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT)
  }

  pub fn id_expr(&mut self) -> SyntaxResult<Node<IdExpr>> {
    self.with_loc(|p| {
      let t = p.require(TT::Identifier)?;
      Ok(IdExpr {
        name: p.identifier_name(t.loc),
      })
    })
  }

  pub fn this_expr(&mut self) -> SyntaxResult<Node<ThisExpr>> {
    self.with_loc(|p| {
      p.require(TT::KeywordThis)?;
      Ok(ThisExpr {})
    })
  }

  pub fn paren_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ParenExpr>> {
    self.with_loc(|p| {
      p.require(TT::ParenthesisOpen)?;
      let expression = p.expr(ctx.with_in_allowed(true))?;
      p.require(TT::ParenthesisClose)?;
      Ok(ParenExpr { expression })
    })
  }

  /// A primary expression: a literal, identifier, `this`, a parenthesised expression, or a function, array, object or `new` expression.
  fn primary_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    // A `/` at the start of an operand always begins a regex.
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    #[rustfmt::skip]
    let expr: Node<Expr> = match t.typ {
      TT::BraceOpen => self.lit_obj(ctx)?.into_wrapped(),
      TT::BracketOpen => self.lit_arr(ctx)?.into_wrapped(),
      TT::Identifier => self.id_expr()?.into_wrapped(),
      TT::KeywordFunction => self.func_expr()?.into_wrapped(),
      TT::KeywordNew => self.new_expr(ctx)?,
      TT::KeywordThis => self.this_expr()?.into_wrapped(),
      TT::LiteralFalse | TT::LiteralTrue => self.lit_bool()?.into_wrapped(),
      TT::LiteralNull => self.lit_null()?.into_wrapped(),
      TT::LiteralNumber => self.lit_num()?.into_wrapped(),
      TT::LiteralRegex => self.lit_regex()?.into_wrapped(),
      TT::LiteralString => self.lit_str()?.into_wrapped(),
      TT::ParenthesisOpen => self.paren_expr(ctx)?.into_wrapped(),
      _ => {
        let t = self.consume_with_mode(LexMode::SlashIsRegex);
        self.check_reserved(&t)?;
        return Err(unexpected(&t, "expression operand"));
      }
    };
    Ok(expr)
  }

  /// `new` followed by a member expression and optional arguments. When the parentheses are omitted, the arguments are empty.
  pub fn new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let start = self.require(TT::KeywordNew)?;
    let mut constructor = self.primary_expr(ctx)?;
    // Only member accesses bind to the constructor; the first call's parentheses are the `new` arguments.
    loop {
      let t = self.peek();
      constructor = match t.typ {
        TT::Dot => self.member_access(constructor)?,
        TT::BracketOpen => self.computed_member_access(ctx, constructor)?,
        _ => break,
      };
    }
    let arguments = if self.peek().typ == TT::ParenthesisOpen {
      self.call_args(ctx)?
    } else {
      let end = constructor.loc.1;
      Node::new(Loc(end, end), CallArgs { args: Vec::new() })
    };
    let end = if arguments.loc.is_empty() {
      constructor.loc
    } else {
      arguments.loc
    };
    Ok(Node::new(start.loc + end, NewExpr {
      constructor,
      arguments,
    }).into_wrapped())
  }

  fn member_access(&mut self, left: Node<Expr>) -> SyntaxResult<Node<Expr>> {
    self.require(TT::Dot)?;
    let right_tok = self.consume();
    match right_tok.typ {
      TT::Identifier => {}
      t if KEYWORDS_MAPPING.contains_key(&t) => {}
      _ => return Err(unexpected(&right_tok, "member access property")),
    };
    let right = right_tok.loc;
    Ok(Node::new(left.loc + right, MemberExpr {
      left,
      right: self.identifier_name(right),
    }).into_wrapped())
  }

  fn computed_member_access(&mut self, ctx: ParseCtx, object: Node<Expr>) -> SyntaxResult<Node<Expr>> {
    self.require(TT::BracketOpen)?;
    let member = self.expr(ctx.with_in_allowed(true))?;
    let end = self.require(TT::BracketClose)?;
    Ok(Node::new(object.loc + end.loc, ComputedMemberExpr {
      object,
      member,
    }).into_wrapped())
  }

  fn expr_operand(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let t = self.peek_with_mode(LexMode::SlashIsRegex);
    let Some(operator) = UNARY_OPERATOR_MAPPING.get(&t.typ) else {
      return self.primary_expr(ctx);
    };
    self.consume_with_mode(LexMode::SlashIsRegex);
    let next_min_prec =
      operator.precedence + (operator.associativity == Associativity::Left) as u8;
    let mut argument = self.expr_with_min_prec(ctx, next_min_prec)?;
    if matches!(
      operator.name,
      OperatorName::PrefixDecrement | OperatorName::PrefixIncrement
    ) {
      argument = require_assignment_target(argument)?;
    };
    Ok(Node::new(t.loc + argument.loc, UnaryExpr {
      operator: operator.name,
      argument,
    }).into_wrapped())
  }

  pub fn expr_with_min_prec(&mut self, ctx: ParseCtx, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.expr_operand(ctx)?;

    loop {
      let cp = self.checkpoint();
      let t = self.consume();

      match t.typ {
        // Automatic Semicolon Insertion rules: no newline between operand and postfix operator.
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          let operator_name = match t.typ {
            TT::PlusPlus => OperatorName::PostfixIncrement,
            _ => OperatorName::PostfixDecrement,
          };
          let operator = &OPERATORS[&operator_name];
          if operator.precedence < min_prec {
            self.restore_checkpoint(cp);
            break;
          };
          let argument = require_assignment_target(left)?;
          left = Node::new(argument.loc + t.loc, UnaryPostfixExpr {
            operator: operator_name,
            argument,
          }).into_wrapped();
          continue;
        }
        _ => {}
      };

      let Some(operator) = MULTARY_OPERATOR_MAPPING.get(&t.typ) else {
        // Not an operator; the caller decides whether the expression may end here.
        self.restore_checkpoint(cp);
        break;
      };
      if operator.precedence < min_prec || (operator.name == OperatorName::In && !ctx.in_allowed) {
        self.restore_checkpoint(cp);
        break;
      };

      let next_min_prec =
        operator.precedence + (operator.associativity == Associativity::Left) as u8;

      left = match operator.name {
        OperatorName::Call => {
          self.restore_checkpoint(cp);
          let arguments = self.call_args(ctx)?;
          Node::new(left.loc + arguments.loc, CallExpr {
            callee: left,
            arguments,
          }).into_wrapped()
        }
        OperatorName::ComputedMemberAccess => {
          self.restore_checkpoint(cp);
          self.computed_member_access(ctx, left)?
        }
        OperatorName::MemberAccess => {
          self.restore_checkpoint(cp);
          self.member_access(left)?
        }
        OperatorName::Conditional => {
          let consequent = self.assign_expr(ctx.with_in_allowed(true))?;
          self.require(TT::Colon)?;
          let alternate = self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT)?;
          Node::new(left.loc + alternate.loc, CondExpr {
            test: left,
            consequent,
            alternate,
          }).into_wrapped()
        }
        _ => {
          if operator.name.is_assignment() {
            left = require_assignment_target(left)?;
          };
          let right = self.expr_with_min_prec(ctx, next_min_prec)?;
          Node::new(left.loc + right.loc, BinaryExpr {
            operator: operator.name,
            left,
            right,
          }).into_wrapped()
        }
      };
    }

    Ok(left)
  }
}
