//! Serializable model of an interface contract.
//!
//! The model is what the emitters consume: one [`InterfaceModel`] per
//! generation run, built bottom-up by the extraction pipeline and never
//! mutated after assembly.

use serde::{Deserialize, Serialize};

/// An external package a type expression refers to.
///
/// `alias` is the short name used to qualify types in generated code,
/// `path` the import path that has to be imported for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleReference {
    pub alias: String,
    pub path: String,
}

impl ModuleReference {
    pub fn new(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            path: path.into(),
        }
    }
}

/// Linear textual form of one parameter or result type plus every external
/// package mentioned in that text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ModuleReference>,
}

impl TypeDescriptor {
    /// Descriptor that mentions no external package.
    pub fn local(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            references: Vec::new(),
        }
    }

    /// Record a reference unless one with the same path is already present.
    pub fn add_reference(&mut self, reference: ModuleReference) {
        if !self.references.iter().any(|r| r.path == reference.path) {
            self.references.push(reference);
        }
    }

    /// Merge the references of `other`, keeping first-seen order.
    pub fn merge_references(&mut self, other: &TypeDescriptor) {
        for reference in &other.references {
            self.add_reference(reference.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_variadic: bool,
}

impl MethodModel {
    /// All parameter and result descriptors, parameters first.
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.params.iter().chain(self.results.iter()).map(|p| &p.ty)
    }
}

/// Names of the generated wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamingConfig {
    pub wrapper_type_name: String,
    pub wrapper_package_name: String,
    pub factory_function_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ModuleReference>,
    #[serde(flatten)]
    pub naming: NamingConfig,
}
