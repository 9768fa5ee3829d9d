use super::Sexp;
use super::ToSexp;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::ObjMember;
use crate::ast::expr::lit::ObjMemberType;
use crate::ast::expr::CallArgs;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::ForInLhs;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stx::Program;
use crate::operator::OperatorName;

/// The tag a binary, assignment or unary operator renders as.
pub fn operator_tag(name: OperatorName) -> &'static str {
  use OperatorName::*;
  match name {
    Addition => "add",
    Assignment => "op_equal",
    AssignmentAddition => "op_plus_equal",
    AssignmentBitwiseAnd => "op_and_equal",
    AssignmentBitwiseLeftShift => "op_l_shift_equal",
    AssignmentBitwiseOr => "op_or_equal",
    AssignmentBitwiseRightShift => "op_r_shift_equal",
    AssignmentBitwiseUnsignedRightShift => "op_u_r_shift_equal",
    AssignmentBitwiseXor => "op_x_or_equal",
    AssignmentDivision => "op_divide_equal",
    AssignmentMultiplication => "op_multiply_equal",
    AssignmentRemainder => "op_mod_equal",
    AssignmentSubtraction => "op_minus_equal",
    BitwiseAnd => "bit_and",
    BitwiseLeftShift => "l_shift",
    BitwiseNot => "bitwise_not",
    BitwiseOr => "bit_or",
    BitwiseRightShift => "r_shift",
    BitwiseUnsignedRightShift => "unsigned_r_shift",
    BitwiseXor => "bit_xor",
    Call => "function_call",
    Comma => "comma",
    ComputedMemberAccess => "bracket_access",
    Conditional => "conditional",
    Delete => "delete",
    Division => "divide",
    Equality => "equal",
    GreaterThan => "greater",
    GreaterThanOrEqual => "greater_or_equal",
    In => "in",
    Inequality => "not_equal",
    Instanceof => "instance_of",
    LessThan => "less",
    LessThanOrEqual => "less_or_equal",
    LogicalAnd => "and",
    LogicalNot => "not",
    LogicalOr => "or",
    MemberAccess => "dot_access",
    Multiplication => "multiply",
    New => "new_expr",
    PostfixDecrement | PostfixIncrement => "postfix",
    PrefixDecrement | PrefixIncrement => "prefix",
    Remainder => "modulus",
    StrictEquality => "strict_equal",
    StrictInequality => "not_strict_equal",
    Subtraction => "subtract",
    Typeof => "typeof",
    UnaryNegation => "u_minus",
    UnaryPlus => "u_plus",
    Void => "void",
  }
}

fn update_operator_text(name: OperatorName) -> &'static str {
  match name {
    OperatorName::PrefixIncrement | OperatorName::PostfixIncrement => "++",
    _ => "--",
  }
}

fn text(value: &str) -> Sexp {
  Sexp::str(value)
}

fn opt_text(value: &Option<String>) -> Sexp {
  value.as_deref().map(text).unwrap_or(Sexp::Nil)
}

impl ToSexp for Program {
  fn to_sexp(&self) -> Sexp {
    self.body.to_sexp()
  }
}

impl ToSexp for ParamDecl {
  fn to_sexp(&self) -> Sexp {
    Sexp::tagged("param", [text(&self.name)])
  }
}

// An empty body renders as `[]`, a single statement as itself, and more as a list.
impl ToSexp for FuncBody {
  fn to_sexp(&self) -> Sexp {
    let elements = match self.body.as_slice() {
      [single] => single.to_sexp(),
      body => Sexp::List(body.iter().map(ToSexp::to_sexp).collect()),
    };
    Sexp::tagged("func_body", [elements])
  }
}

fn func_parts(tag: &str, name: Sexp, func: &Node<Func>) -> Sexp {
  Sexp::tagged(tag, [
    name,
    func.stx.parameters.to_sexp(),
    func.stx.body.to_sexp(),
  ])
}

impl ToSexp for CallArgs {
  fn to_sexp(&self) -> Sexp {
    Sexp::tagged("args", [self.args.to_sexp()])
  }
}

impl ToSexp for BlockStmt {
  fn to_sexp(&self) -> Sexp {
    Sexp::tagged("block", [self.body.to_sexp()])
  }
}

fn declarator_sexp(mode: VarDeclMode, declarator: &VarDeclarator) -> Sexp {
  let tag = match mode {
    VarDeclMode::Const => "const_decl",
    VarDeclMode::Var => "var_decl",
  };
  let initializer = declarator
    .initializer
    .as_ref()
    .map(|init| Sexp::tagged("assign", [init.stx.value.to_sexp()]))
    .unwrap_or(Sexp::Nil);
  Sexp::tagged(tag, [Sexp::atom(declarator.name.as_str()), initializer])
}

impl ToSexp for VarDecl {
  fn to_sexp(&self) -> Sexp {
    let tag = match self.mode {
      VarDeclMode::Const => "const",
      VarDeclMode::Var => "var",
    };
    let declarators = self
      .declarators
      .iter()
      .map(|d| declarator_sexp(self.mode, d))
      .collect();
    Sexp::tagged(tag, [Sexp::List(declarators)])
  }
}

impl ToSexp for SwitchBranch {
  fn to_sexp(&self) -> Sexp {
    Sexp::tagged("case", [self.case.to_sexp(), self.body.to_sexp()])
  }
}

impl ToSexp for Stmt {
  fn to_sexp(&self) -> Sexp {
    match self {
      Stmt::Block(n) => n.to_sexp(),
      Stmt::Break(n) => Sexp::tagged("break", n.stx.label.as_deref().map(text)),
      Stmt::Continue(n) => Sexp::tagged("continue", n.stx.label.as_deref().map(text)),
      Stmt::DoWhile(n) => Sexp::tagged("do_while", [n.stx.body.to_sexp(), n.stx.condition.to_sexp()]),
      Stmt::Empty(_) => Sexp::leaf("empty"),
      Stmt::Expr(n) => Sexp::tagged("expression", [n.stx.expr.to_sexp()]),
      Stmt::ForIn(n) => {
        let lhs = match &n.stx.lhs {
          ForInLhs::Decl(decl) => match decl.stx.declarators.as_slice() {
            [declarator] => declarator_sexp(decl.stx.mode, declarator),
            _ => decl.to_sexp(),
          },
          ForInLhs::Assign(target) => target.to_sexp(),
        };
        Sexp::tagged("for_in", [lhs, n.stx.rhs.to_sexp(), n.stx.body.to_sexp()])
      }
      Stmt::ForTriple(n) => {
        let init = match &n.stx.init {
          ForTripleStmtInit::None => Sexp::Nil,
          ForTripleStmtInit::Expr(e) => e.to_sexp(),
          ForTripleStmtInit::Decl(d) => d.to_sexp(),
        };
        Sexp::tagged("for", [
          init,
          n.stx.cond.to_sexp(),
          n.stx.post.to_sexp(),
          n.stx.body.to_sexp(),
        ])
      }
      Stmt::If(n) => {
        let mut items = vec![n.stx.test.to_sexp(), n.stx.consequent.to_sexp()];
        items.extend(n.stx.alternate.as_ref().map(ToSexp::to_sexp));
        Sexp::tagged("if", items)
      }
      Stmt::Label(n) => Sexp::tagged("label", [text(&n.stx.name), n.stx.statement.to_sexp()]),
      Stmt::Return(n) => Sexp::tagged("return", n.stx.value.as_ref().map(ToSexp::to_sexp)),
      Stmt::Switch(n) => Sexp::tagged("switch", [
        n.stx.test.to_sexp(),
        Sexp::tagged("case_block", [n.stx.branches.to_sexp()]),
      ]),
      Stmt::Throw(n) => Sexp::tagged("throw", n.stx.value.as_ref().map(ToSexp::to_sexp)),
      Stmt::Try(n) => {
        let (parameter, catch_body) = match &n.stx.catch {
          Some(c) => (text(&c.stx.parameter), c.stx.body.to_sexp()),
          None => (Sexp::Nil, Sexp::Nil),
        };
        Sexp::tagged("try", [
          n.stx.wrapped.to_sexp(),
          parameter,
          catch_body,
          n.stx.finally.to_sexp(),
        ])
      }
      Stmt::While(n) => Sexp::tagged("while", [n.stx.condition.to_sexp(), n.stx.body.to_sexp()]),
      Stmt::With(n) => Sexp::tagged("with", [n.stx.object.to_sexp(), n.stx.body.to_sexp()]),
      Stmt::FunctionDecl(n) => func_parts("func_decl", text(&n.stx.name), &n.stx.function),
      Stmt::VarDecl(n) => n.to_sexp(),
    }
  }
}

impl ToSexp for LitArrExpr {
  fn to_sexp(&self) -> Sexp {
    let elements = self
      .elements
      .iter()
      .map(|e| match e {
        LitArrElem::Single(value) => Sexp::tagged("element", [value.to_sexp()]),
        LitArrElem::Empty => Sexp::Nil,
      })
      .collect();
    Sexp::tagged("array", [Sexp::List(elements)])
  }
}

impl ToSexp for ObjMember {
  fn to_sexp(&self) -> Sexp {
    let key = text(&self.key);
    match &self.typ {
      ObjMemberType::Valued { value } => Sexp::tagged("property", [key, value.to_sexp()]),
      ObjMemberType::Getter { function } => {
        Sexp::tagged("getter", [key, func_parts("func_expr", Sexp::Nil, function)])
      }
      ObjMemberType::Setter { function } => {
        Sexp::tagged("setter", [key, func_parts("func_expr", Sexp::Nil, function)])
      }
    }
  }
}

impl ToSexp for LitObjExpr {
  fn to_sexp(&self) -> Sexp {
    Sexp::tagged("object", [self.members.to_sexp()])
  }
}

impl ToSexp for Expr {
  fn to_sexp(&self) -> Sexp {
    match self {
      Expr::Binary(n) => Sexp::tagged(operator_tag(n.stx.operator), [
        n.stx.left.to_sexp(),
        n.stx.right.to_sexp(),
      ]),
      Expr::Call(n) => Sexp::tagged("function_call", [
        n.stx.callee.to_sexp(),
        n.stx.arguments.to_sexp(),
      ]),
      Expr::ComputedMember(n) => Sexp::tagged("bracket_access", [
        n.stx.object.to_sexp(),
        n.stx.member.to_sexp(),
      ]),
      Expr::Cond(n) => Sexp::tagged("conditional", [
        n.stx.test.to_sexp(),
        n.stx.consequent.to_sexp(),
        n.stx.alternate.to_sexp(),
      ]),
      Expr::Func(n) => func_parts("func_expr", opt_text(&n.stx.name), &n.stx.function),
      Expr::Id(n) => Sexp::tagged("resolve", [text(&n.stx.name)]),
      Expr::Member(n) => Sexp::tagged("dot_access", [n.stx.left.to_sexp(), text(&n.stx.right)]),
      Expr::New(n) => Sexp::tagged("new_expr", [
        n.stx.constructor.to_sexp(),
        n.stx.arguments.to_sexp(),
      ]),
      Expr::Paren(n) => Sexp::tagged("parenthetical", [n.stx.expression.to_sexp()]),
      Expr::This(_) => Sexp::leaf("this"),
      Expr::Unary(n) => match n.stx.operator {
        OperatorName::PrefixIncrement | OperatorName::PrefixDecrement => Sexp::tagged("prefix", [
          n.stx.argument.to_sexp(),
          text(update_operator_text(n.stx.operator)),
        ]),
        operator => Sexp::tagged(operator_tag(operator), [n.stx.argument.to_sexp()]),
      },
      Expr::UnaryPostfix(n) => Sexp::tagged("postfix", [
        n.stx.argument.to_sexp(),
        text(update_operator_text(n.stx.operator)),
      ]),
      Expr::LitArr(n) => n.to_sexp(),
      Expr::LitBool(n) => Sexp::leaf(if n.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => Sexp::leaf("nil"),
      Expr::LitNum(n) => Sexp::tagged("lit", [Sexp::Num(n.stx.value)]),
      Expr::LitObj(n) => n.to_sexp(),
      Expr::LitRegex(n) => Sexp::tagged("regexp", [text(&n.stx.value)]),
      Expr::LitStr(n) => Sexp::tagged("str", [text(&n.stx.value)]),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::operator_tag;
  use crate::operator::OperatorName;

  #[test]
  fn test_operator_tags() {
    assert_eq!(operator_tag(OperatorName::Assignment), "op_equal");
    assert_eq!(operator_tag(OperatorName::AssignmentBitwiseXor), "op_x_or_equal");
    assert_eq!(operator_tag(OperatorName::StrictInequality), "not_strict_equal");
    assert_eq!(operator_tag(OperatorName::Instanceof), "instance_of");
  }
}
