use super::errors::Result;
use super::identifier::{module_identifier, translate_identifier};
use super::writer::Writer;
use kelp_core::estree::Property;
use kelp_core::ir::Ns;
use kelp_core::{Expression, SourceLocation, Statement};
use std::iter;

/// Module path of `requirement` as seen from `requirer`.
///
/// Namespaces sharing a root resolve relative to each other
/// (`resolve("a.b.c", "a.b.d.e") == "./d/e"`); anything else is a path from
/// the module root (`resolve("a.b", "x.y") == "x/y"`).
pub fn resolve(requirer: &str, requirement: &str) -> String {
    let from: Vec<&str> = requirer.split('.').collect();
    let to: Vec<&str> = requirement.split('.').collect();

    let relative = requirer != requirement && from.first() == to.first();
    if !relative {
        return to.join("/");
    }

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();
    let parents = (from.len() - common).saturating_sub(1);

    iter::once(".")
        .chain(iter::repeat("..").take(parents))
        .chain(to[common..].iter().copied())
        .collect::<Vec<_>>()
        .join("/")
}

impl<'a> Writer<'a> {
    /// `var _ns_ = {...};` followed by one `require` per dependency and a
    /// binding per alias and referred name.
    pub(crate) fn write_ns(&self, ns: &Ns, loc: Option<&SourceLocation>) -> Result<Vec<Statement>> {
        let doc = match &ns.doc {
            Some(doc) => Expression::string(doc.clone()),
            None => Expression::void(),
        };
        let mut statements = vec![Statement::var(
            "_ns_",
            Some(Expression::object(vec![
                Property::init(Expression::identifier("id"), Expression::string(ns.name.clone())),
                Property::init(Expression::identifier("doc"), doc),
            ])),
        )
        .with_loc(loc.cloned())];

        for require in &ns.require {
            let local = module_identifier(&require.ns);
            statements.push(Statement::var(
                local.clone(),
                Some(Expression::call(
                    Expression::identifier("require"),
                    vec![Expression::string(resolve(&ns.name, &require.ns))],
                )),
            ));

            if let Some(alias) = &require.alias {
                statements.push(Statement::var(
                    translate_identifier(alias),
                    Some(Expression::identifier(local.clone())),
                ));
            }

            for refer in &require.refer {
                let binding = refer.rename.as_deref().unwrap_or(&refer.name);
                statements.push(Statement::var(
                    translate_identifier(binding),
                    Some(Expression::member(
                        Expression::identifier(local.clone()),
                        translate_identifier(&refer.name),
                    )),
                ));
            }
        }

        Ok(statements)
    }
}
