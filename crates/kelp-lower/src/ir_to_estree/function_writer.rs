use super::errors::{LowerError, Result};
use super::identifier::translate_identifier;
use super::writer::Writer;
use kelp_core::estree::{Identifier, SwitchCase};
use kelp_core::ir::{FnMethod, Function};
use kelp_core::{Expression, SourceLocation, Statement};
use std::collections::HashSet;

const ARITY_ERROR: &str = "Wrong number of arguments passed";

fn arguments() -> Expression {
    Expression::identifier("arguments")
}

/// `Array.prototype.slice.call(arguments, from)`.
fn rest_arguments(from: usize) -> Expression {
    let slice = Expression::member(
        Expression::member(Expression::identifier("Array"), "prototype"),
        "slice",
    );
    Expression::call(
        Expression::member(slice, "call"),
        vec![arguments(), Expression::number(from)],
    )
}

fn param_names(method: &FnMethod) -> Vec<String> {
    method
        .params
        .iter()
        .map(|param| translate_identifier(&param.name))
        .collect()
}

/// A `case` body must not fall through into the next one.
fn ensure_return(mut body: Vec<Statement>) -> Vec<Statement> {
    match body.last() {
        Some(Statement::Return(_) | Statement::Throw(_) | Statement::DoWhile(_)) => {}
        _ => body.push(Statement::ret(None)),
    }
    body
}

impl<'a> Writer<'a> {
    pub(crate) fn write_fn(
        &self,
        function: &Function,
        loc: Option<&SourceLocation>,
    ) -> Result<Expression> {
        let id = function
            .name
            .as_deref()
            .map(|name| Identifier::new(translate_identifier(name)));

        match function.methods.as_slice() {
            [] => Err(LowerError::malformed("fn", "no methods", loc)),
            [method] => {
                let names = param_names(method);
                let params = names[..method.fixed_params().len()]
                    .iter()
                    .cloned()
                    .map(Identifier::new)
                    .collect();
                let body = self.write_method_body(method, names)?;
                Ok(Expression::function(id, params, body))
            }
            methods => {
                let body = vec![self.write_overloads(methods, loc)?];
                Ok(Expression::function(id, vec![], body))
            }
        }
    }

    /// Method body, starting with the rest-parameter declaration when the
    /// method is variadic.
    fn write_method_body(&self, method: &FnMethod, names: Vec<String>) -> Result<Vec<Statement>> {
        let mut body = Vec::new();
        if let Some(rest) = method.rest_param() {
            body.push(Statement::var(
                translate_identifier(&rest.name),
                Some(rest_arguments(method.fixed_params().len())),
            ));
        }
        body.extend(self.write_recur_frame(
            names,
            &method.statements,
            method.result.as_deref(),
        )?);
        Ok(body)
    }

    /// `switch (arguments.length)` with one case per fixed arity. The variadic
    /// method, if any, is the default case; otherwise the default throws.
    fn write_overloads(&self, methods: &[FnMethod], loc: Option<&SourceLocation>) -> Result<Statement> {
        let mut cases = Vec::with_capacity(methods.len() + 1);
        let mut arities = HashSet::new();
        let mut default = None;

        for method in methods {
            let arity = method.fixed_params().len();
            let names = param_names(method);
            let mut consequent: Vec<Statement> = names[..arity]
                .iter()
                .enumerate()
                .map(|(index, name)| {
                    Statement::var(
                        name.clone(),
                        Some(Expression::index(arguments(), Expression::number(index))),
                    )
                })
                .collect();
            consequent.extend(self.write_method_body(method, names)?);
            let consequent = ensure_return(consequent);

            if method.variadic {
                if default.is_some() {
                    return Err(LowerError::malformed(
                        "fn",
                        "more than one variadic method",
                        loc,
                    ));
                }
                default = Some(SwitchCase::default(consequent));
            } else {
                if !arities.insert(arity) {
                    return Err(LowerError::malformed(
                        "fn",
                        format!("duplicate method of arity {}", arity),
                        loc,
                    ));
                }
                cases.push(SwitchCase::case(Expression::number(arity), consequent));
            }
        }

        cases.push(default.unwrap_or_else(|| {
            SwitchCase::default(vec![Statement::throw(Expression::new_instance(
                Expression::identifier("RangeError"),
                vec![Expression::string(ARITY_ERROR)],
            ))])
        }));

        Ok(Statement::switch(
            Expression::member(arguments(), "length"),
            cases,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_return() {
        let body = ensure_return(vec![Statement::expression(Expression::identifier("x"))]);
        assert_eq!(body.len(), 2);
        assert_eq!(body[1], Statement::ret(None));

        let body = ensure_return(vec![Statement::ret(Some(Expression::number(1)))]);
        assert_eq!(body.len(), 1);

        assert_eq!(ensure_return(vec![]), vec![Statement::ret(None)]);
    }
}
