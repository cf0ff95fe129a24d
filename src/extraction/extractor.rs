//! Walk a resolved interface and build its pre-fixup method list.

use crate::config::GeneratorOptions;
use crate::core::errors::{Error, Result};
use crate::core::model::MethodModel;
use crate::database::{MethodObject, TypeDatabase, Underlying};
use crate::extraction::signature::build_parameters;
use crate::types::PackageRef;

/// Interface data straight out of the database, before reference fixup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedInterface {
    pub name: String,
    pub package: PackageRef,
    pub documentation: String,
    /// Declaration order. Descriptor text still carries full import paths.
    pub methods: Vec<MethodModel>,
}

/// Resolve the queried interface and decompose every method of it.
///
/// # Errors
///
/// [`Error::NotFound`] when the database has no such declaration and
/// [`Error::WrongKind`] when it is not an interface.
pub fn extract_interface<D: TypeDatabase + ?Sized>(
    db: &D,
    options: &GeneratorOptions,
) -> Result<ExtractedInterface> {
    let query = &options.query;
    let object = db.resolve(&query.package, &query.name)?;

    let methods = match &object.underlying {
        Underlying::Interface(methods) => methods,
        Underlying::Other(kind) => {
            return Err(Error::WrongKind {
                name: query.name.clone(),
                package: query.package.clone(),
                kind: kind.clone(),
            })
        }
    };

    let documentation = object
        .position
        .as_ref()
        .map(|pos| db.leading_comment(pos))
        .unwrap_or_default();

    let home = object.package.path.as_str();
    let methods = methods
        .iter()
        .map(|method| extract_method(db, method, home, options))
        .collect();

    Ok(ExtractedInterface {
        name: object.name.clone(),
        package: object.package.clone(),
        documentation,
        methods,
    })
}

fn extract_method<D: TypeDatabase + ?Sized>(
    db: &D,
    method: &MethodObject,
    home: &str,
    options: &GeneratorOptions,
) -> MethodModel {
    log::debug!("Extracting method {}", method.name);

    let documentation = method
        .position
        .as_ref()
        .map(|pos| db.leading_comment(pos))
        .unwrap_or_default();

    MethodModel {
        name: method.name.clone(),
        documentation,
        params: build_parameters(&method.signature.params, &options.param_prefix, home),
        results: build_parameters(&method.signature.results, &options.result_prefix, home),
        is_variadic: method.signature.variadic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InterfaceQuery;
    use crate::testkit::InMemoryDatabase;
    use crate::types::{GoType, Signature, Variable};
    use pretty_assertions::assert_eq;

    fn options() -> GeneratorOptions {
        GeneratorOptions::new(InterfaceQuery::parse("example.com/svc.Store").unwrap())
    }

    #[test]
    fn test_methods_keep_declaration_order_and_docs() {
        let db = InMemoryDatabase::new()
            .with_interface("example.com/svc", "Store", "// Store persists things.\n")
            .with_method(
                "Put",
                "// Put stores v.\n",
                Signature::new(vec![Variable::named("v", GoType::basic("string"))], vec![]),
            )
            .with_method(
                "Get",
                "",
                Signature::new(vec![], vec![Variable::unnamed(GoType::basic("string"))]),
            )
            .finish();

        let extracted = extract_interface(&db, &options()).unwrap();

        assert_eq!(extracted.documentation, "// Store persists things.\n");
        let names: Vec<_> = extracted.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Put", "Get"]);
        assert_eq!(extracted.methods[0].documentation, "// Put stores v.\n");
        assert_eq!(extracted.methods[1].documentation, "");
        assert_eq!(extracted.methods[1].results[0].name, "ret1");
    }

    #[test]
    fn test_missing_type_is_not_found() {
        let db = InMemoryDatabase::new();
        let err = extract_interface(&db, &options()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_struct_is_wrong_kind() {
        let db = InMemoryDatabase::new().with_other("example.com/svc", "Store", "struct");
        let err = extract_interface(&db, &options()).unwrap_err();
        assert!(matches!(err, Error::WrongKind { ref kind, .. } if kind == "struct"));
    }

    #[test]
    fn test_empty_interface_is_valid() {
        let db = InMemoryDatabase::new()
            .with_interface("example.com/svc", "Store", "")
            .finish();
        let extracted = extract_interface(&db, &options()).unwrap();
        assert!(extracted.methods.is_empty());
    }
}
