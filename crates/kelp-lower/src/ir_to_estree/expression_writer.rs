use super::errors::{LowerError, Result};
use super::identifier::{translate_identifier, translate_path};
use super::writer::Writer;
use kelp_core::estree::{MemberExpression, Pattern, Property};
use kelp_core::ir::{ConstantType, Invoke, NodeKind};
use kelp_core::{Expression, Node, SourceLocation, Statement};
use serde_json::Value;

/// The assignable form of an already lowered expression.
pub(crate) fn as_pattern(expression: Expression) -> Option<Pattern> {
    match expression {
        Expression::Identifier(identifier) => Some(Pattern::Identifier(identifier)),
        Expression::Member(member) => Some(Pattern::Member(member)),
        _ => None,
    }
}

impl<'a> Writer<'a> {
    pub(crate) fn write_constant(
        &self,
        value: &Value,
        ty: ConstantType,
        loc: Option<&SourceLocation>,
    ) -> Result<Expression> {
        if ty == ConstantType::Nil {
            return Ok(Expression::void());
        }
        match value {
            Value::Null => Ok(Expression::void()),
            Value::Bool(b) => Ok(Expression::boolean(*b)),
            Value::Number(n) => Ok(Expression::number(n.clone())),
            Value::String(s) => Ok(Expression::string(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(LowerError::malformed(
                "constant",
                "value is not a scalar",
                loc,
            )),
        }
    }

    pub(crate) fn write_var(&self, name: &str) -> Expression {
        translate_path(name)
    }

    /// Keyword and scalar keys become plain property keys; anything else is a
    /// computed key.
    pub(crate) fn write_dictionary(
        &self,
        keys: &[Node],
        values: &[Node],
        loc: Option<&SourceLocation>,
    ) -> Result<Expression> {
        if keys.len() != values.len() {
            return Err(LowerError::malformed(
                "dictionary",
                format!("{} keys for {} values", keys.len(), values.len()),
                loc,
            ));
        }

        let properties = keys
            .iter()
            .zip(values)
            .map(|(key, value)| {
                let value = self.write(value)?;
                let property = match &key.kind {
                    NodeKind::Keyword { name } => Property::init(Expression::string(name.clone()), value),
                    NodeKind::Constant {
                        value: key_value @ (Value::String(_) | Value::Number(_)),
                        ..
                    } => Property::init(
                        self.write_constant(key_value, ConstantType::String, key.loc.as_ref())?,
                        value,
                    ),
                    _ => Property {
                        computed: true,
                        ..Property::init(self.write(key)?, value)
                    },
                };
                Ok(property)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Expression::object(properties))
    }

    pub(crate) fn write_invoke(&self, invoke: &Invoke) -> Result<Expression> {
        Ok(Expression::call(
            self.write(&invoke.callee)?,
            self.write_all(&invoke.params)?,
        ))
    }

    pub(crate) fn write_set(&self, target: &Node, value: &Node) -> Result<Expression> {
        let pattern = as_pattern(self.write(target)?).ok_or_else(|| {
            LowerError::malformed(
                "set!",
                format!("cannot assign to {}", target.op()),
                target.loc.as_ref(),
            )
        })?;
        Ok(Expression::assign(pattern, self.write(value)?))
    }

    pub(crate) fn write_member_access(
        &self,
        target: &Node,
        property: &Node,
        computed: bool,
    ) -> Result<Expression> {
        let object = self.write(target)?;
        if computed {
            return Ok(Expression::index(object, self.write(property)?));
        }

        match &property.kind {
            NodeKind::Var { name } => Ok(Expression::member(object, translate_identifier(name))),
            other => Err(LowerError::malformed(
                "member-access",
                format!("non-computed property must be a var, got {}", other.op()),
                property.loc.as_ref(),
            )),
        }
    }

    /// `var name = init;`, or `var name = exports.name = init;` when exported.
    pub(crate) fn write_def(
        &self,
        var: &Node,
        init: Option<&Node>,
        export: bool,
        loc: Option<&SourceLocation>,
    ) -> Result<Statement> {
        let NodeKind::Var { name } = &var.kind else {
            return Err(LowerError::malformed(
                "def",
                format!("target must be a var, got {}", var.op()),
                loc,
            ));
        };
        let id = translate_identifier(name);
        let mut init = init.map(|init| self.write(init)).transpose()?;

        if export {
            let exported = MemberExpression {
                object: Box::new(Expression::identifier("exports")),
                property: Box::new(Expression::identifier(id.clone())),
                computed: false,
                loc: None,
            };
            init = Some(Expression::assign(
                Pattern::Member(exported),
                init.unwrap_or_else(Expression::void),
            ));
        }

        Ok(Statement::var(id, init).with_loc(loc.cloned()))
    }
}
