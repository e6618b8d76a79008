use super::errors::{LowerError, Result};
use super::special_forms::SpecialForms;
use kelp_core::ir::NodeKind;
use kelp_core::{Expression, Node, Statement};
use std::cell::Cell;
use tracing::trace;

/// One lowering session.
///
/// Borrows the special-form table and owns the counter behind generated
/// names (`recur$0`, `let$1`, ...), so names never repeat within a program.
pub struct Writer<'a> {
    special_forms: &'a SpecialForms,
    next_frame: Cell<usize>,
}

impl<'a> Writer<'a> {
    pub fn new(special_forms: &'a SpecialForms) -> Self {
        Self {
            special_forms,
            next_frame: Cell::new(0),
        }
    }

    pub fn special_forms(&self) -> &SpecialForms {
        self.special_forms
    }

    /// Lowers `node` in expression position.
    pub fn write(&self, node: &Node) -> Result<Expression> {
        let loc = node.loc.as_ref();

        if let NodeKind::Invoke(invoke) = &node.kind {
            if let Some(name) = node.invoked_name() {
                if let Some(special) = self.special_forms.get(name) {
                    trace!("special form {}", name);
                    return (**special)(self, invoke, loc);
                }
            }
        }

        let expression = match &node.kind {
            NodeKind::Nil => Expression::void(),
            NodeKind::Constant { value, ty } => self.write_constant(value, *ty, loc)?,
            NodeKind::Keyword { name } => Expression::string(name.clone()),
            NodeKind::Var { name } => self.write_var(name),
            NodeKind::Vector { items } => Expression::array(self.write_all(items)?),
            NodeKind::Dictionary { keys, values } => self.write_dictionary(keys, values, loc)?,
            NodeKind::Invoke(invoke) => self.write_invoke(invoke)?,
            NodeKind::New {
                constructor,
                params,
            } => Expression::new_instance(self.write(constructor)?, self.write_all(params)?),
            NodeKind::Set { target, value } => self.write_set(target, value)?,
            NodeKind::MemberAccess {
                target,
                property,
                computed,
            } => self.write_member_access(target, property, *computed)?,
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => Expression::conditional(
                self.write(test)?,
                self.write(consequent)?,
                self.write(alternate)?,
            ),
            NodeKind::Throw { value } => self.write_throw(value)?,
            NodeKind::Try(try_) => self.write_try(try_)?,
            NodeKind::Do(do_) => self.write_do(do_)?,
            NodeKind::Let(block) => self.write_let(block)?,
            NodeKind::Loop(block) => self.write_loop(block)?,
            NodeKind::Fn(function) => self.write_fn(function, loc)?,
            NodeKind::Recur { .. } | NodeKind::Def { .. } | NodeKind::Ns(_) => {
                return Err(LowerError::unsupported(node.op(), loc));
            }
        };

        Ok(expression.with_loc(node.loc.clone()))
    }

    pub fn write_all(&self, nodes: &[Node]) -> Result<Vec<Expression>> {
        nodes.iter().map(|node| self.write(node)).collect()
    }

    /// Lowers `node` in statement position. `def` and `ns` only make sense
    /// here; everything else becomes an expression statement.
    pub fn write_statement(&self, node: &Node) -> Result<Vec<Statement>> {
        let loc = node.loc.as_ref();
        match &node.kind {
            NodeKind::Def { var, init, export } => {
                Ok(vec![self.write_def(var, init.as_deref(), *export, loc)?])
            }
            NodeKind::Ns(ns) => self.write_ns(ns, loc),
            _ => Ok(vec![Statement::expression(self.write(node)?)]),
        }
    }

    pub fn write_statements(&self, nodes: &[Node]) -> Result<Vec<Statement>> {
        let mut statements = Vec::with_capacity(nodes.len());
        for node in nodes {
            statements.extend(self.write_statement(node)?);
        }
        Ok(statements)
    }

    /// Function-body shape: every statement, then `return result` when there
    /// is a result.
    pub fn write_body(&self, statements: &[Node], result: Option<&Node>) -> Result<Vec<Statement>> {
        let mut body = self.write_statements(statements)?;
        if let Some(result) = result {
            body.push(Statement::ret(Some(self.write(result)?)));
        }
        Ok(body)
    }

    /// `(function () { body })()`.
    pub fn iife(&self, body: Vec<Statement>) -> Expression {
        Expression::call(Expression::function(None, vec![], body), vec![])
    }

    pub(crate) fn next_frame_id(&self) -> usize {
        let id = self.next_frame.get();
        self.next_frame.set(id + 1);
        id
    }
}
