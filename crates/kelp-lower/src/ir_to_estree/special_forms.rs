use super::errors::Result;
use super::operators;
use super::writer::Writer;
use indexmap::IndexMap;
use kelp_core::ir::Invoke;
use kelp_core::{Expression, SourceLocation};
use std::fmt;
use std::sync::Arc;

/// Lowering for an invocation whose callee names a special form. Receives the
/// whole invocation and its location.
pub type SpecialWriter =
    Arc<dyn Fn(&Writer<'_>, &Invoke, Option<&SourceLocation>) -> Result<Expression> + Send + Sync>;

/// Name-keyed table of special forms.
///
/// Built once before lowering (builtins plus whatever the macro layer
/// registers), then handed to the writer by shared reference.
#[derive(Clone, Default)]
pub struct SpecialForms {
    writers: IndexMap<String, SpecialWriter>,
}

impl SpecialForms {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every operator family from [`operators::install_builtins`].
    pub fn builtin() -> Self {
        let mut forms = Self::empty();
        operators::install_builtins(&mut forms);
        forms
    }

    /// Registers `writer` under `name`. A later registration for the same name
    /// replaces the earlier one.
    pub fn register<F>(&mut self, name: impl Into<String>, writer: F) -> &mut Self
    where
        F: Fn(&Writer<'_>, &Invoke, Option<&SourceLocation>) -> Result<Expression>
            + Send
            + Sync
            + 'static,
    {
        self.writers.insert(name.into(), Arc::new(writer));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SpecialWriter> {
        self.writers.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.writers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.writers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl fmt::Debug for SpecialForms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
