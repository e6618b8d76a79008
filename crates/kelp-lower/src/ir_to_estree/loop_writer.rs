/*! `loop`/`recur` as a `do`/`while` frame.
 *
 * A body whose tail reaches `recur` is rewritten so that every tail path ends in one of two
 * signals: Continue stages the next binding values and jumps to the loop test, Done returns. The
 * test copies staged values into the bindings only after all of them were computed, so
 * `(recur b a)` swaps correctly.
 */

use super::errors::{LowerError, Result};
use super::identifier::translate_identifier;
use super::writer::Writer;
use kelp_core::estree::{CatchClause, Identifier, Pattern, VariableDeclarator, VariableKind};
use kelp_core::ir::{BindingBlock, NodeKind};
use kelp_core::{Expression, Node, Statement};

/// How one tail path of a loop body ends.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopSignal {
    Continue(Vec<Expression>),
    Done(Option<Expression>),
}

/// Bindings rebound by `recur`, plus the variable their next values are staged in.
#[derive(Debug, Clone)]
pub struct RecurFrame {
    staging: String,
    bindings: Vec<String>,
}

impl RecurFrame {
    pub fn new(id: usize, bindings: Vec<String>) -> Self {
        Self {
            staging: format!("recur${}", id),
            bindings,
        }
    }

    pub fn staging(&self) -> &str {
        &self.staging
    }

    pub fn emit(&self, signal: LoopSignal) -> Vec<Statement> {
        match signal {
            LoopSignal::Continue(values) => vec![
                Statement::expression(Expression::assign(
                    Pattern::identifier(self.staging.clone()),
                    Expression::array(values),
                )),
                Statement::continue_(),
            ],
            LoopSignal::Done(value) => vec![Statement::ret(value)],
        }
    }

    /// `(a = recur$N[0], b = recur$N[1], true)`, or just `true` without bindings.
    pub fn test(&self) -> Expression {
        if self.bindings.is_empty() {
            return Expression::boolean(true);
        }
        let mut expressions: Vec<Expression> = self
            .bindings
            .iter()
            .enumerate()
            .map(|(index, binding)| {
                Expression::assign(
                    Pattern::identifier(binding.clone()),
                    Expression::index(
                        Expression::identifier(self.staging.clone()),
                        Expression::number(index),
                    ),
                )
            })
            .collect();
        expressions.push(Expression::boolean(true));
        Expression::sequence(expressions)
    }
}

/// Whether some tail path of `node` is a `recur`.
pub fn tail_recurs(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Recur { .. } => true,
        NodeKind::If {
            consequent,
            alternate,
            ..
        } => tail_recurs(consequent) || tail_recurs(alternate),
        NodeKind::Do(do_) => do_.result.as_deref().is_some_and(tail_recurs),
        NodeKind::Let(block) => block.result.as_deref().is_some_and(tail_recurs),
        NodeKind::Try(try_) => {
            tail_recurs(&try_.body)
                || try_
                    .handler
                    .as_ref()
                    .is_some_and(|handler| tail_recurs(&handler.body))
        }
        _ => false,
    }
}

impl<'a> Writer<'a> {
    pub(crate) fn write_loop(&self, block: &BindingBlock) -> Result<Expression> {
        let names: Vec<String> = block
            .bindings
            .iter()
            .map(|binding| translate_identifier(&binding.name))
            .collect();
        let inits = block
            .bindings
            .iter()
            .map(|binding| self.write(&binding.init))
            .collect::<Result<Vec<_>>>()?;
        let params = names.iter().cloned().map(Identifier::new).collect();
        let body = self.write_recur_frame(names, &block.statements, block.result.as_deref())?;

        Ok(Expression::call(Expression::function(None, params, body), inits))
    }

    /// Function body for `statements` and `result` where `recur` in tail
    /// position rebinds `bindings`. Without such a `recur` this is the plain body.
    pub(crate) fn write_recur_frame(
        &self,
        bindings: Vec<String>,
        statements: &[Node],
        result: Option<&Node>,
    ) -> Result<Vec<Statement>> {
        let Some(result) = result.filter(|result| tail_recurs(result)) else {
            return self.write_body(statements, result);
        };

        let frame = RecurFrame::new(self.next_frame_id(), bindings);
        let mut body = self.write_statements(statements)?;
        body.extend(self.write_tail(result, &frame)?);

        Ok(vec![
            Statement::var(frame.staging(), None),
            Statement::do_while(body, frame.test()),
        ])
    }

    fn write_tail(&self, node: &Node, frame: &RecurFrame) -> Result<Vec<Statement>> {
        if !tail_recurs(node) {
            return Ok(frame.emit(LoopSignal::Done(Some(self.write(node)?))));
        }

        let loc = node.loc.as_ref();
        let statements = match &node.kind {
            NodeKind::Recur { params } => {
                if params.len() != frame.bindings.len() {
                    return Err(LowerError::arity("recur", params.len(), loc));
                }
                frame.emit(LoopSignal::Continue(self.write_all(params)?))
            }
            NodeKind::If {
                test,
                consequent,
                alternate,
            } => vec![Statement::if_else(
                self.write(test)?,
                self.write_tail(consequent, frame)?,
                self.write_tail(alternate, frame)?,
            )
            .with_loc(loc.cloned())],
            NodeKind::Do(do_) => {
                let mut statements = self.write_statements(&do_.statements)?;
                match do_.result.as_deref() {
                    Some(result) => statements.extend(self.write_tail(result, frame)?),
                    None => statements.extend(frame.emit(LoopSignal::Done(None))),
                }
                statements
            }
            NodeKind::Let(block) => vec![self.write_tail_let(block, frame)?],
            NodeKind::Try(try_) => {
                let block = self.write_tail(&try_.body, frame)?;
                let handler = try_
                    .handler
                    .as_ref()
                    .map(|handler| {
                        Ok(CatchClause::new(
                            translate_identifier(&handler.name),
                            self.write_tail(&handler.body, frame)?,
                        ))
                    })
                    .transpose()?;
                let finalizer = try_
                    .finalizer
                    .as_deref()
                    .map(|finalizer| self.write_discarding(finalizer))
                    .transpose()?;
                if handler.is_none() && finalizer.is_none() {
                    block
                } else {
                    vec![Statement::try_(block, handler, finalizer).with_loc(loc.cloned())]
                }
            }
            _ => frame.emit(LoopSignal::Done(Some(self.write(node)?))),
        };
        Ok(statements)
    }

    /// `{ let let$N = [inits]; { let a = let$N[0], ...; body } }`. Initialisers
    /// are evaluated before the new names are in scope, matching the closure
    /// form of `let`.
    fn write_tail_let(&self, block: &BindingBlock, frame: &RecurFrame) -> Result<Statement> {
        let mut inner = Vec::new();
        let mut outer = Vec::new();

        if !block.bindings.is_empty() {
            let temp = format!("let${}", self.next_frame_id());
            let inits = block
                .bindings
                .iter()
                .map(|binding| self.write(&binding.init))
                .collect::<Result<Vec<_>>>()?;
            outer.push(Statement::declare(
                VariableKind::Let,
                vec![VariableDeclarator::new(temp.clone(), Some(Expression::array(inits)))],
            ));

            let declarators = block
                .bindings
                .iter()
                .enumerate()
                .map(|(index, binding)| {
                    VariableDeclarator::new(
                        translate_identifier(&binding.name),
                        Some(Expression::index(
                            Expression::identifier(temp.clone()),
                            Expression::number(index),
                        )),
                    )
                })
                .collect();
            inner.push(Statement::declare(VariableKind::Let, declarators));
        }

        inner.extend(self.write_statements(&block.statements)?);
        match block.result.as_deref() {
            Some(result) => inner.extend(self.write_tail(result, frame)?),
            None => inner.extend(frame.emit(LoopSignal::Done(None))),
        }

        if outer.is_empty() {
            return Ok(Statement::block(inner));
        }
        outer.push(Statement::block(inner));
        Ok(Statement::block(outer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kelp_core::ir::{Handler, Try};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tail_positions() {
        let recur = Node::recur(vec![]);
        assert!(tail_recurs(&recur));
        assert!(tail_recurs(&Node::if_(Node::var("x"), Node::nil(), recur.clone())));
        assert!(tail_recurs(&Node::do_(vec![], Some(recur.clone()))));
        assert!(tail_recurs(&Node::let_(vec![("a", Node::nil())], vec![], Some(recur.clone()))));

        // a recur inside a nested loop belongs to that loop
        assert!(!tail_recurs(&Node::loop_(vec![], vec![], Some(recur.clone()))));
        assert!(!tail_recurs(&Node::do_(vec![recur.clone()], None)));
        assert!(!tail_recurs(&Node::call("f", vec![recur])));
    }

    #[test]
    fn test_try_tail_positions() {
        let try_node = |body: Node, handler: Node| {
            Node::new(NodeKind::Try(Try {
                body: Box::new(body),
                handler: Some(Handler {
                    name: "e".into(),
                    body: Box::new(handler),
                }),
                finalizer: Some(Box::new(Node::recur(vec![]))),
            }))
        };

        assert!(tail_recurs(&try_node(Node::recur(vec![]), Node::var("e"))));
        assert!(tail_recurs(&try_node(Node::var("x"), Node::recur(vec![]))));
        // finally runs for effect only
        assert!(!tail_recurs(&try_node(Node::var("x"), Node::var("e"))));
    }

    #[test]
    fn test_frame_test_expression() {
        let frame = RecurFrame::new(3, vec!["a".into(), "b".into()]);
        assert_eq!(
            serde_json::to_value(frame.test()).unwrap(),
            json!({
                "type": "SequenceExpression",
                "expressions": [
                    {
                        "type": "AssignmentExpression",
                        "operator": "=",
                        "left": {"type": "Identifier", "name": "a"},
                        "right": {
                            "type": "MemberExpression",
                            "object": {"type": "Identifier", "name": "recur$3"},
                            "property": {"type": "Literal", "value": 0},
                            "computed": true
                        }
                    },
                    {
                        "type": "AssignmentExpression",
                        "operator": "=",
                        "left": {"type": "Identifier", "name": "b"},
                        "right": {
                            "type": "MemberExpression",
                            "object": {"type": "Identifier", "name": "recur$3"},
                            "property": {"type": "Literal", "value": 1},
                            "computed": true
                        }
                    },
                    {"type": "Literal", "value": true}
                ]
            })
        );
        assert_eq!(RecurFrame::new(0, vec![]).test(), Expression::boolean(true));
    }

    #[test]
    fn test_emit_signals() {
        let frame = RecurFrame::new(0, vec!["i".into()]);
        let done = frame.emit(LoopSignal::Done(None));
        assert_eq!(done, vec![Statement::ret(None)]);

        let next = frame.emit(LoopSignal::Continue(vec![Expression::number(1)]));
        assert_eq!(next.len(), 2);
        assert_eq!(next[1], Statement::continue_());
    }
}
