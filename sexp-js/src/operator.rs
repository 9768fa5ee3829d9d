use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentMultiplication,
  AssignmentRemainder,
  AssignmentSubtraction,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  Delete,
  Division,
  Equality,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  // Higher binds tighter.
  pub precedence: u8,
  pub associativity: Associativity,
}

/// Precedence of an assignment expression. Parsing at this level excludes the comma operator.
pub const PRECEDENCE_ASSIGNMENT: u8 = 2;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, precedence: u8, associativity: Associativity| {
    map.insert(name, Operator { name, precedence, associativity });
  };
  add(Call, 17, Left);
  add(ComputedMemberAccess, 17, Left);
  add(MemberAccess, 17, Left);
  add(New, 16, Right);
  add(PostfixDecrement, 15, Left);
  add(PostfixIncrement, 15, Left);
  add(BitwiseNot, 14, Right);
  add(Delete, 14, Right);
  add(LogicalNot, 14, Right);
  add(PrefixDecrement, 14, Right);
  add(PrefixIncrement, 14, Right);
  add(Typeof, 14, Right);
  add(UnaryNegation, 14, Right);
  add(UnaryPlus, 14, Right);
  add(Void, 14, Right);
  add(Division, 13, Left);
  add(Multiplication, 13, Left);
  add(Remainder, 13, Left);
  add(Addition, 12, Left);
  add(Subtraction, 12, Left);
  add(BitwiseLeftShift, 11, Left);
  add(BitwiseRightShift, 11, Left);
  add(BitwiseUnsignedRightShift, 11, Left);
  add(GreaterThan, 10, Left);
  add(GreaterThanOrEqual, 10, Left);
  add(In, 10, Left);
  add(Instanceof, 10, Left);
  add(LessThan, 10, Left);
  add(LessThanOrEqual, 10, Left);
  add(Equality, 9, Left);
  add(Inequality, 9, Left);
  add(StrictEquality, 9, Left);
  add(StrictInequality, 9, Left);
  add(BitwiseAnd, 8, Left);
  add(BitwiseXor, 7, Left);
  add(BitwiseOr, 6, Left);
  add(LogicalAnd, 5, Left);
  add(LogicalOr, 4, Left);
  add(Conditional, 3, Right);
  add(Assignment, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentAddition, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseAnd, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseLeftShift, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseOr, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseRightShift, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseUnsignedRightShift, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentBitwiseXor, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentDivision, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentMultiplication, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentRemainder, PRECEDENCE_ASSIGNMENT, Right);
  add(AssignmentSubtraction, PRECEDENCE_ASSIGNMENT, Right);
  add(Comma, 1, Left);
  map
});
