use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start/end pair carried by IR nodes and copied verbatim onto the ESTree
/// `loc` field so the printer can emit source maps.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SourceLocation {
    pub fn new(start_line: u32, start_column: u32, end_line: u32, end_column: u32) -> Self {
        Self {
            start: Position::new(start_line, start_column),
            end: Position::new(end_line, end_column),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn merge(&self, other: &SourceLocation) -> Option<SourceLocation> {
        if self.source != other.source {
            return None;
        }

        Some(SourceLocation {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            source: self.source.clone(),
        })
    }

    pub fn merge_all<'a>(locations: impl IntoIterator<Item = Option<&'a SourceLocation>>) -> Option<SourceLocation> {
        let mut merged: Option<SourceLocation> = None;
        for loc in locations.into_iter().flatten() {
            merged = match merged {
                None => Some(loc.clone()),
                Some(acc) => Some(acc.merge(loc)?),
            };
        }
        merged
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "{}:", source)?;
        }
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_spans_outer_bounds() {
        let a = SourceLocation::new(1, 4, 1, 10);
        let b = SourceLocation::new(3, 0, 3, 2);
        let merged = a.merge(&b).unwrap();
        assert_eq!(merged.start, Position::new(1, 4));
        assert_eq!(merged.end, Position::new(3, 2));
        assert_eq!(merged.source, None);
    }

    #[test]
    fn test_merge_rejects_different_sources() {
        let a = SourceLocation::new(1, 0, 1, 1).with_source("a.kelp");
        let b = SourceLocation::new(1, 0, 1, 1).with_source("b.kelp");
        assert!(a.merge(&b).is_none());
    }

    #[test]
    fn test_merge_all_skips_missing() {
        let a = SourceLocation::new(2, 0, 2, 5);
        let b = SourceLocation::new(7, 1, 9, 0);
        let merged = SourceLocation::merge_all([None, Some(&a), None, Some(&b)]).unwrap();
        assert_eq!(merged, SourceLocation::new(2, 0, 9, 0));
        assert!(SourceLocation::merge_all([None, None]).is_none());
    }

    #[test]
    fn test_display_with_source() {
        let loc = SourceLocation::new(12, 3, 12, 9).with_source("core.kelp");
        assert_eq!(loc.to_string(), "core.kelp:12:3");
        assert_eq!(SourceLocation::new(1, 0, 1, 1).to_string(), "1:0");
    }
}
