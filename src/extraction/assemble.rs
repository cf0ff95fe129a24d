use crate::config::GeneratorOptions;
use crate::core::errors::Result;
use crate::core::model::{InterfaceModel, NamingConfig};
use crate::database::TypeDatabase;
use crate::extraction::extractor::{extract_interface, ExtractedInterface};
use crate::extraction::fixup::{fixup_methods, FixupOutput};

impl NamingConfig {
    /// Derive wrapper names from an optional `package.Type` override.
    ///
    /// - `pkg.Type` gives package `pkg` and type `Type`
    /// - `Type` keeps the interface package's last path segment as package
    /// - no override gives the interface name with a lower-cased first letter
    pub fn resolve(
        wrapper: Option<&str>,
        interface_name: &str,
        package_path: &str,
        factory_function_name: &str,
    ) -> Self {
        let wrapper = wrapper.map(str::trim).filter(|w| !w.is_empty());

        let (package, type_name) = match wrapper {
            Some(w) => match w.split_once('.') {
                Some((package, type_name)) => (package.to_string(), type_name.to_string()),
                None => (last_segment(package_path).to_string(), w.to_string()),
            },
            None => (
                last_segment(package_path).to_string(),
                lower_first(interface_name),
            ),
        };

        Self {
            wrapper_type_name: type_name,
            wrapper_package_name: package,
            factory_function_name: factory_function_name.to_string(),
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Combine extracted data, fixup output and naming into the final model.
pub fn assemble_model(
    extracted: ExtractedInterface,
    fixup: FixupOutput,
    naming: NamingConfig,
) -> InterfaceModel {
    InterfaceModel {
        name: extracted.name,
        documentation: extracted.documentation,
        methods: fixup.methods,
        references: fixup.references,
        naming,
    }
}

/// Extract, fix up and assemble the model of the queried interface.
pub fn build_interface<D: TypeDatabase + ?Sized>(
    db: &D,
    options: &GeneratorOptions,
) -> Result<InterfaceModel> {
    let mut extracted = extract_interface(db, options)?;
    let methods = std::mem::take(&mut extracted.methods);
    let fixup = fixup_methods(methods);

    let naming = NamingConfig::resolve(
        options.wrapper.as_deref(),
        &extracted.name,
        &extracted.package.path,
        &options.factory_function_name,
    );

    let model = assemble_model(extracted, fixup, naming);
    log::info!(
        "Built model for {} with {} methods and {} imports",
        model.name,
        model.methods.len(),
        model.references.len()
    );
    Ok(model)
}
