/*! Operator families inlined as JavaScript operators.
 *
 * A call like `(+ a b c)` would otherwise become a runtime call to `sum`. Each installer below
 * registers a whole family of such names with the arity rules and fallback values of the family,
 * so the writer emits `a + b + c` directly.
 */

use super::errors::{LowerError, Result};
use super::special_forms::SpecialForms;
use super::writer::Writer;
use kelp_core::estree::{BinaryOperator, LogicalOperator, UnaryOperator};
use kelp_core::ir::Invoke;
use kelp_core::{Expression, SourceLocation};

/// Operand counts an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Any,
    AtLeast(usize),
    Exactly(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Any => true,
            Arity::AtLeast(min) => count >= min,
            Arity::Exactly(n) => count == n,
        }
    }
}

pub fn install_builtins(forms: &mut SpecialForms) {
    install_logical_operator(forms, "or", LogicalOperator::Or, Expression::void);
    install_logical_operator(forms, "and", LogicalOperator::And, || Expression::boolean(true));

    install_unary_operator(forms, "not", UnaryOperator::Not);
    install_unary_operator(forms, "bit-not", UnaryOperator::BitNot);

    install_bitwise_operator(forms, "bit-and", BinaryOperator::BitAnd);
    install_bitwise_operator(forms, "bit-or", BinaryOperator::BitOr);
    install_bitwise_operator(forms, "bit-xor", BinaryOperator::BitXor);
    install_bitwise_operator(forms, "bit-shift-left", BinaryOperator::ShiftLeft);
    install_bitwise_operator(forms, "bit-shift-right", BinaryOperator::ShiftRight);
    install_bitwise_operator(
        forms,
        "bit-shift-right-unsigned",
        BinaryOperator::ShiftRightUnsigned,
    );

    install_arithmetic_operator(forms, "+", BinaryOperator::Add, 0, Arity::Any);
    install_arithmetic_operator(forms, "-", BinaryOperator::Subtract, 0, Arity::AtLeast(1));
    install_arithmetic_operator(forms, "*", BinaryOperator::Multiply, 1, Arity::Any);
    install_arithmetic_operator(forms, "/", BinaryOperator::Divide, 1, Arity::AtLeast(1));
    install_arithmetic_operator(forms, "mod", BinaryOperator::Remainder, 1, Arity::Exactly(2));

    install_comparison_operator(forms, "==", BinaryOperator::Equal, true);
    install_comparison_operator(forms, ">", BinaryOperator::Greater, true);
    install_comparison_operator(forms, ">=", BinaryOperator::GreaterEqual, true);
    install_comparison_operator(forms, "<", BinaryOperator::Less, true);
    install_comparison_operator(forms, "<=", BinaryOperator::LessEqual, true);

    install_identity_tests(forms);
}

fn check_arity(
    name: &str,
    arity: Arity,
    invoke: &Invoke,
    loc: Option<&SourceLocation>,
) -> Result<()> {
    if arity.accepts(invoke.params.len()) {
        Ok(())
    } else {
        Err(LowerError::arity(name, invoke.params.len(), loc))
    }
}

fn fold_left(
    operands: Vec<Expression>,
    combine: impl Fn(Expression, Expression) -> Expression,
) -> Option<Expression> {
    let mut operands = operands.into_iter();
    let first = operands.next()?;
    Some(operands.fold(first, combine))
}

/// `or`/`and`: no operands yields `fallback`, one yields the operand itself,
/// more chain left to right with short-circuiting.
pub fn install_logical_operator(
    forms: &mut SpecialForms,
    name: &'static str,
    operator: LogicalOperator,
    fallback: fn() -> Expression,
) {
    forms.register(name, move |writer: &Writer<'_>, invoke: &Invoke, loc| {
        let operands = writer.write_all(&invoke.params)?;
        let expression = fold_left(operands, |left, right| {
            Expression::logical(operator, left, right)
        })
        .unwrap_or_else(fallback);
        Ok(expression.with_loc(loc.cloned()))
    });
}

pub fn install_unary_operator(forms: &mut SpecialForms, name: &'static str, operator: UnaryOperator) {
    forms.register(name, move |writer: &Writer<'_>, invoke: &Invoke, loc| {
        check_arity(name, Arity::Exactly(1), invoke, loc)?;
        let operand = writer.write(&invoke.params[0])?;
        Ok(Expression::unary(operator, operand).with_loc(loc.cloned()))
    });
}

pub fn install_bitwise_operator(
    forms: &mut SpecialForms,
    name: &'static str,
    operator: BinaryOperator,
) {
    forms.register(name, move |writer: &Writer<'_>, invoke: &Invoke, loc| {
        check_arity(name, Arity::AtLeast(2), invoke, loc)?;
        let operands = writer.write_all(&invoke.params)?;
        let expression = fold_left(operands, |left, right| {
            Expression::binary(operator, left, right)
        })
        .ok_or_else(|| LowerError::arity(name, 0, loc))?;
        Ok(expression.with_loc(loc.cloned()))
    });
}

/// Arithmetic with an identity element: `(+)` is `0`, `(- x)` is `0 - x`,
/// longer forms fold left without the identity.
pub fn install_arithmetic_operator(
    forms: &mut SpecialForms,
    name: &'static str,
    operator: BinaryOperator,
    identity: i64,
    arity: Arity,
) {
    forms.register(name, move |writer: &Writer<'_>, invoke: &Invoke, loc| {
        check_arity(name, arity, invoke, loc)?;
        let mut operands = writer.write_all(&invoke.params)?;
        let expression = match operands.len() {
            0 => Expression::number(identity),
            1 => Expression::binary(operator, Expression::number(identity), operands.remove(0)),
            _ => fold_left(operands, |left, right| {
                Expression::binary(operator, left, right)
            })
            .ok_or_else(|| LowerError::arity(name, 0, loc))?,
        };
        Ok(expression.with_loc(loc.cloned()))
    });
}

/// Chained comparison. `(< a b c)` becomes `a < b && b < c`, where the second
/// `b` is the already lowered right operand of the first comparison. A middle
/// operand with side effects is therefore evaluated twice.
pub fn install_comparison_operator(
    forms: &mut SpecialForms,
    name: &'static str,
    operator: BinaryOperator,
    fallback: bool,
) {
    forms.register(name, move |writer: &Writer<'_>, invoke: &Invoke, loc| {
        check_arity(name, Arity::AtLeast(1), invoke, loc)?;
        let mut operands = writer.write_all(&invoke.params)?.into_iter();
        let first = operands
            .next()
            .ok_or_else(|| LowerError::arity(name, 0, loc))?;

        let Some(second) = operands.next() else {
            return Ok(
                Expression::sequence(vec![first, Expression::boolean(fallback)])
                    .with_loc(loc.cloned()),
            );
        };

        let mut previous_right = second.clone();
        let mut chain = Expression::binary(operator, first, second);
        for operand in operands {
            let comparison = Expression::binary(operator, previous_right, operand.clone());
            previous_right = operand;
            chain = Expression::logical(LogicalOperator::And, chain, comparison);
        }
        Ok(chain.with_loc(loc.cloned()))
    });
}

/// `identical?` (strict equality of exactly two operands) and `instance?`
/// (`(instance? Type x)` is `x instanceof Type`; a missing instance is `void 0`).
pub fn install_identity_tests(forms: &mut SpecialForms) {
    forms.register(
        "identical?",
        |writer: &Writer<'_>, invoke: &Invoke, loc: Option<&SourceLocation>| {
            check_arity("identical?", Arity::Exactly(2), invoke, loc)?;
            let left = writer.write(&invoke.params[0])?;
            let right = writer.write(&invoke.params[1])?;
            Ok(Expression::binary(BinaryOperator::StrictEqual, left, right).with_loc(loc.cloned()))
        },
    );

    forms.register(
        "instance?",
        |writer: &Writer<'_>, invoke: &Invoke, loc: Option<&SourceLocation>| {
            check_arity("instance?", Arity::AtLeast(1), invoke, loc)?;
            let constructor = writer.write(&invoke.params[0])?;
            let instance = match invoke.params.get(1) {
                Some(instance) => writer.write(instance)?,
                None => Expression::void(),
            };
            Ok(Expression::binary(BinaryOperator::InstanceOf, instance, constructor)
                .with_loc(loc.cloned()))
        },
    );
}
