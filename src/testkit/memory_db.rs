//! In-memory [`TypeDatabase`] for tests and for callers that already hold
//! resolved types.
//!
//! Documentation is keyed by synthetic positions handed out while building,
//! so lookups exercise the same position-based path as the Go adapter.
//!
//! # Example
//!
//! ```rust
//! use middleware_gen::testkit::InMemoryDatabase;
//! use middleware_gen::types::{GoType, Signature, Variable};
//! use middleware_gen::database::TypeDatabase;
//!
//! let db = InMemoryDatabase::new()
//!     .with_interface("io", "Closer", "// Closer closes.\n")
//!     .with_method("Close", "", Signature::new(vec![], vec![Variable::unnamed(GoType::error())]))
//!     .finish();
//!
//! let closer = db.resolve("io", "Closer").unwrap();
//! assert_eq!(closer.methods().unwrap().len(), 1);
//! ```

use crate::core::errors::{Error, Result};
use crate::database::{MethodObject, Position, TypeDatabase, TypeObject, Underlying};
use crate::types::{PackageRef, Signature};
use std::collections::HashMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    objects: HashMap<(String, String), TypeObject>,
    comments: HashMap<Position, String>,
    next_offset: usize,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start declaring an interface; add methods on the returned builder.
    pub fn with_interface(
        self,
        package: &str,
        name: &str,
        documentation: &str,
    ) -> InterfaceBuilder {
        InterfaceBuilder {
            db: self,
            package: package.to_string(),
            name: name.to_string(),
            documentation: documentation.to_string(),
            methods: Vec::new(),
        }
    }

    /// Declare a non-interface type of the given kind.
    pub fn with_other(mut self, package: &str, name: &str, kind: &str) -> Self {
        let position = self.position_for("");
        self.insert(TypeObject {
            name: name.to_string(),
            package: package_ref(package),
            position: Some(position),
            underlying: Underlying::Other(kind.to_string()),
        });
        self
    }

    /// Insert a fully built object as is.
    pub fn insert(&mut self, object: TypeObject) {
        self.objects.insert(
            (object.package.path.clone(), object.name.clone()),
            object,
        );
    }

    fn position_for(&mut self, documentation: &str) -> Position {
        let position = Position {
            file: PathBuf::from("memory.go"),
            offset: self.next_offset,
            line: self.next_offset + 1,
            column: 1,
        };
        self.next_offset += 1;
        if !documentation.is_empty() {
            self.comments
                .insert(position.clone(), documentation.to_string());
        }
        position
    }
}

impl TypeDatabase for InMemoryDatabase {
    fn resolve(&self, package: &str, name: &str) -> Result<TypeObject> {
        self.objects
            .get(&(package.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                name: name.to_string(),
                package: package.to_string(),
            })
    }

    fn leading_comment(&self, position: &Position) -> String {
        self.comments.get(position).cloned().unwrap_or_default()
    }
}

/// Fluent builder returned by [`InMemoryDatabase::with_interface`].
pub struct InterfaceBuilder {
    db: InMemoryDatabase,
    package: String,
    name: String,
    documentation: String,
    methods: Vec<(String, String, Signature)>,
}

impl InterfaceBuilder {
    pub fn with_method(mut self, name: &str, documentation: &str, signature: Signature) -> Self {
        self.methods
            .push((name.to_string(), documentation.to_string(), signature));
        self
    }

    pub fn finish(self) -> InMemoryDatabase {
        let InterfaceBuilder {
            mut db,
            package,
            name,
            documentation,
            methods,
        } = self;

        let position = db.position_for(&documentation);
        let methods = methods
            .into_iter()
            .map(|(name, documentation, signature)| MethodObject {
                name,
                signature,
                position: Some(db.position_for(&documentation)),
            })
            .collect();

        db.insert(TypeObject {
            name,
            package: package_ref(&package),
            position: Some(position),
            underlying: Underlying::Interface(methods),
        });
        db
    }
}

fn package_ref(path: &str) -> PackageRef {
    let name = path.rsplit('/').next().unwrap_or(path);
    PackageRef::new(name, path)
}
