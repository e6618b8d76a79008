use super::errors::Result;
use super::identifier::translate_identifier;
use super::writer::Writer;
use kelp_core::estree::{CatchClause, Identifier};
use kelp_core::ir::{BindingBlock, Do, NodeKind, Try};
use kelp_core::{Expression, Node, Statement};

impl<'a> Writer<'a> {
    /// A `do` with statements needs a function body; one without is just its result.
    pub(crate) fn write_do(&self, do_: &Do) -> Result<Expression> {
        if do_.statements.is_empty() {
            return match &do_.result {
                Some(result) => self.write(result),
                None => Ok(Expression::void()),
            };
        }
        Ok(self.iife(self.write_body(&do_.statements, do_.result.as_deref())?))
    }

    pub(crate) fn write_throw(&self, value: &Node) -> Result<Expression> {
        Ok(self.iife(vec![Statement::throw(self.write(value)?)]))
    }

    pub(crate) fn write_try(&self, try_: &Try) -> Result<Expression> {
        let block = self.write_returning(&try_.body)?;
        if try_.handler.is_none() && try_.finalizer.is_none() {
            return Ok(self.iife(block));
        }

        let handler = try_
            .handler
            .as_ref()
            .map(|handler| {
                Ok(CatchClause::new(
                    translate_identifier(&handler.name),
                    self.write_returning(&handler.body)?,
                ))
            })
            .transpose()?;
        let finalizer = try_
            .finalizer
            .as_deref()
            .map(|finalizer| self.write_discarding(finalizer))
            .transpose()?;

        Ok(self.iife(vec![Statement::try_(block, handler, finalizer)]))
    }

    /// `(function (a, b) { body })(initA, initB)`.
    pub(crate) fn write_let(&self, block: &BindingBlock) -> Result<Expression> {
        let params = block
            .bindings
            .iter()
            .map(|binding| Identifier::new(translate_identifier(&binding.name)))
            .collect();
        let inits = block
            .bindings
            .iter()
            .map(|binding| self.write(&binding.init))
            .collect::<Result<Vec<_>>>()?;
        let body = self.write_body(&block.statements, block.result.as_deref())?;

        Ok(Expression::call(Expression::function(None, params, body), inits))
    }

    /// Statements that evaluate `node` and return its value. A `do` is
    /// spliced in rather than wrapped.
    pub(crate) fn write_returning(&self, node: &Node) -> Result<Vec<Statement>> {
        match &node.kind {
            NodeKind::Do(do_) => self.write_body(&do_.statements, do_.result.as_deref()),
            _ => Ok(vec![Statement::ret(Some(self.write(node)?))]),
        }
    }

    /// Statements that evaluate `node` for effect only.
    pub(crate) fn write_discarding(&self, node: &Node) -> Result<Vec<Statement>> {
        match &node.kind {
            NodeKind::Do(do_) => {
                let mut statements = self.write_statements(&do_.statements)?;
                if let Some(result) = &do_.result {
                    statements.extend(self.write_statement(result)?);
                }
                Ok(statements)
            }
            _ => self.write_statement(node),
        }
    }
}
