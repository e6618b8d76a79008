//! Source names to JavaScript identifiers.

use kelp_core::Expression;

const OPERATOR_NAMES: &[(&str, &str)] = &[
    ("*", "multiply"),
    ("/", "divide"),
    ("+", "sum"),
    ("-", "subtract"),
    ("=", "equal?"),
    ("==", "strict-equal?"),
    ("<=", "not-greater-than"),
    (">=", "not-less-than"),
    (">", "greater-than"),
    ("<", "less-than"),
];

const CHARACTER_REWRITES: &[(&str, &str)] = &[
    ("*", "_"),
    ("->", "-to-"),
    ("!", ""),
    ("%", "$"),
    ("=", "-equal-"),
    ("+", "-plus-"),
    ("&", "-and-"),
];

/// Rewrites a kebab-case source name into a legal camelCase identifier.
///
/// `list->vector` becomes `listToVector`, `number?` becomes `isNumber`.
/// Names that are already legal identifiers pass through untouched.
pub fn translate_identifier(name: &str) -> String {
    let mut id = OPERATOR_NAMES
        .iter()
        .find(|(operator, _)| *operator == name)
        .map(|(_, word)| word.to_string())
        .unwrap_or_else(|| name.to_string());

    for (from, to) in CHARACTER_REWRITES {
        id = id.split(*from).collect::<Vec<_>>().join(*to);
    }

    if let Some(predicate) = id.strip_suffix('?') {
        id = format!("is-{}", predicate);
    }

    camel_case(&id)
}

fn camel_case(id: &str) -> String {
    id.split('-')
        .filter(|segment| !segment.is_empty())
        .fold(String::with_capacity(id.len()), |mut acc, segment| {
            if acc.is_empty() {
                acc.push_str(segment);
            } else {
                let mut chars = segment.chars();
                if let Some(first) = chars.next() {
                    acc.extend(first.to_uppercase());
                    acc.push_str(chars.as_str());
                }
            }
            acc
        })
}

/// Local name bound to a required module, e.g. `app.string-utils` -> `app_stringUtils`.
pub fn module_identifier(ns: &str) -> String {
    translate_identifier(&ns.replace('.', "_"))
}

/// Lowers a reference that may be qualified: `console.log` becomes a member
/// chain, `app.util/format` reads `format` off the module's local binding.
pub fn translate_path(name: &str) -> Expression {
    if let Some((ns, symbol)) = name.split_once('/') {
        if !ns.is_empty() && !symbol.is_empty() && !symbol.contains('/') {
            return Expression::member(
                Expression::identifier(module_identifier(ns)),
                translate_identifier(symbol),
            );
        }
    }

    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() > 1 && segments.iter().all(|segment| !segment.is_empty()) {
        let mut segments = segments.into_iter();
        let head = segments
            .next()
            .map(translate_identifier)
            .unwrap_or_default();
        return segments.fold(Expression::identifier(head), |object, segment| {
            Expression::member(object, translate_identifier(segment))
        });
    }

    Expression::identifier(translate_identifier(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_documented_examples() {
        assert_eq!(translate_identifier("list->vector"), "listToVector");
        assert_eq!(translate_identifier("number?"), "isNumber");
        assert_eq!(translate_identifier("create-server"), "createServer");
        assert_eq!(translate_identifier("set!"), "set");
        assert_eq!(translate_identifier("**macros**"), "__macros__");
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(translate_identifier("+"), "sum");
        assert_eq!(translate_identifier("-"), "subtract");
        assert_eq!(translate_identifier("*"), "multiply");
        assert_eq!(translate_identifier("/"), "divide");
        assert_eq!(translate_identifier("="), "isEqual");
        assert_eq!(translate_identifier("=="), "isStrictEqual");
        assert_eq!(translate_identifier("<="), "notGreaterThan");
        assert_eq!(translate_identifier(">="), "notLessThan");
        assert_eq!(translate_identifier(">"), "greaterThan");
        assert_eq!(translate_identifier("<"), "lessThan");
    }

    #[test]
    fn test_punctuation_rewrites() {
        assert_eq!(translate_identifier("swap!"), "swap");
        assert_eq!(translate_identifier("%rest"), "$rest");
        assert_eq!(translate_identifier("not="), "notEqual");
        assert_eq!(translate_identifier("a+b"), "aPlusB");
        assert_eq!(translate_identifier("this&that"), "thisAndThat");
        assert_eq!(translate_identifier("map->js"), "mapToJs");
        assert_eq!(translate_identifier("empty-seq?"), "isEmptySeq");
    }

    #[test]
    fn test_empty_segments_are_skipped() {
        assert_eq!(translate_identifier("foo--bar"), "fooBar");
        assert_eq!(translate_identifier("trailing-"), "trailing");
        assert_eq!(translate_identifier("-main"), "main");
    }

    #[test]
    fn test_idempotent_on_legal_identifiers() {
        for id in ["fooBar", "x", "$scope", "_private", "Array", "createServer", "__macros__"] {
            assert_eq!(translate_identifier(id), id);
            assert_eq!(translate_identifier(&translate_identifier(id)), id);
        }
    }

    #[test]
    fn test_module_identifier() {
        assert_eq!(module_identifier("wisp.runtime"), "wisp_runtime");
        assert_eq!(module_identifier("app.string-utils"), "app_stringUtils");
    }

    #[test]
    fn test_translate_path_member_chains() {
        assert_eq!(
            translate_path("console.log"),
            Expression::member(Expression::identifier("console"), "log")
        );
        assert_eq!(
            translate_path("app.util/format-date"),
            Expression::member(Expression::identifier("app_util"), "formatDate")
        );
        assert_eq!(translate_path("/"), Expression::identifier("divide"));
        assert_eq!(translate_path(".."), Expression::identifier(".."));
        assert_eq!(translate_path("empty?"), Expression::identifier("isEmpty"));
    }
}
