/// What the emitted document contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The bare ESTree `Program`.
    #[default]
    Program,
    /// `{"program": ..., "options": ...}` for printers that take both.
    WithOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Compact,
    Pretty,
}
