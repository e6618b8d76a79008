use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Options forwarded to the JavaScript printer alongside the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmitterConfig {
    pub indent_style: IndentStyle,
    pub quotes: QuoteStyle,
    pub compact: bool,
    pub comment: bool,
    /// Source file name recorded in the source map; no map is produced without it.
    pub source_map: Option<String>,
    pub source_map_with_code: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Spaces(2),
            quotes: QuoteStyle::Auto,
            compact: false,
            comment: false,
            source_map: None,
            source_map_with_code: false,
        }
    }
}

impl EmitterConfig {
    pub fn with_source_map(mut self, source: impl Into<String>) -> Self {
        self.source_map = Some(source.into());
        self
    }

    /// The options object in the shape the printer reads.
    pub fn printer_options(&self) -> Value {
        let mut options = json!({
            "format": {
                "indent": {"style": self.indent_style.to_string()},
                "quotes": self.quotes,
                "compact": self.compact,
            },
            "comment": self.comment,
        });
        if let Some(source) = &self.source_map {
            options["sourceMap"] = json!(source);
            options["sourceMapWithCode"] = json!(self.source_map_with_code);
        }
        options
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl IndentStyle {
    pub fn to_string(&self) -> String {
        match self {
            IndentStyle::Spaces(n) => " ".repeat(*n),
            IndentStyle::Tabs => "\t".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_printer_options() {
        assert_eq!(
            EmitterConfig::default().printer_options(),
            json!({
                "format": {"indent": {"style": "  "}, "quotes": "auto", "compact": false},
                "comment": false
            })
        );
    }

    #[test]
    fn test_source_map_options() {
        let config = EmitterConfig {
            source_map_with_code: true,
            indent_style: IndentStyle::Tabs,
            ..EmitterConfig::default()
        }
        .with_source_map("main.kelp");

        let options = config.printer_options();
        assert_eq!(options["sourceMap"], json!("main.kelp"));
        assert_eq!(options["sourceMapWithCode"], json!(true));
        assert_eq!(options["format"]["indent"]["style"], json!("\t"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EmitterConfig =
            serde_json::from_str(r#"{"compact": true, "quotes": "single"}"#).unwrap();
        assert!(config.compact);
        assert_eq!(config.quotes, QuoteStyle::Single);
        assert_eq!(config.indent_style, IndentStyle::Spaces(2));
        assert_eq!(config.source_map, None);
    }
}
