//! [`TypeDatabase`] over Go source trees.

use super::comments;
use super::loader::{load_package_dir, GoPackage, PackageLocator, SearchConfig};
use super::resolve::{guess_package_name, Scope};
use crate::core::errors::{Error, Result};
use crate::database::{Position, TypeDatabase, TypeObject};
use crate::types::PackageRef;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Loads packages on demand and caches them for the lifetime of the
/// database. One database serves one extraction run.
#[derive(Debug)]
pub struct GoSourceDatabase {
    locator: PackageLocator,
    packages: RefCell<HashMap<String, Rc<GoPackage>>>,
    names: RefCell<HashMap<String, String>>,
}

impl GoSourceDatabase {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            locator: PackageLocator::new(config),
            packages: RefCell::new(HashMap::new()),
            names: RefCell::new(HashMap::new()),
        }
    }

    pub fn locator(&self) -> &PackageLocator {
        &self.locator
    }

    /// Load (or fetch from cache) the package at `import_path`.
    pub fn package(&self, import_path: &str) -> Result<Rc<GoPackage>> {
        if let Some(package) = self.packages.borrow().get(import_path) {
            return Ok(Rc::clone(package));
        }

        let dir = self.locator.locate(import_path)?;
        let package = Rc::new(load_package_dir(import_path, &dir)?);
        self.packages
            .borrow_mut()
            .insert(import_path.to_string(), Rc::clone(&package));
        Ok(package)
    }

    /// Package clause name for `import_path`; a guess from the path when
    /// the package cannot be loaded.
    pub fn package_name(&self, import_path: &str) -> String {
        if let Some(name) = self.names.borrow().get(import_path) {
            return name.clone();
        }

        let name = match self.package(import_path) {
            Ok(package) if !package.name.is_empty() => package.name.clone(),
            Ok(_) | Err(_) => {
                let guess = guess_package_name(import_path);
                log::warn!("Could not load {import_path:?}; assuming package name {guess:?}");
                guess
            }
        };

        self.names
            .borrow_mut()
            .insert(import_path.to_string(), name.clone());
        name
    }

    pub(crate) fn package_ref(&self, import_path: &str) -> PackageRef {
        PackageRef::new(self.package_name(import_path), import_path)
    }
}

impl TypeDatabase for GoSourceDatabase {
    fn resolve(&self, package: &str, name: &str) -> Result<TypeObject> {
        let loaded = self.package(package)?;
        let (file, spec) = loaded.lookup(name).ok_or_else(|| Error::NotFound {
            name: name.to_string(),
            package: package.to_string(),
        })?;

        let scope = Scope::new(self, &loaded, file, &spec.type_params);
        let underlying = scope.underlying(spec);

        Ok(TypeObject {
            name: spec.name.clone(),
            package: PackageRef::new(loaded.name.clone(), loaded.path.clone()),
            position: Some(scope.position(spec.span)),
            underlying,
        })
    }

    fn leading_comment(&self, position: &Position) -> String {
        let packages = self.packages.borrow();
        packages
            .values()
            .find_map(|package| package.file(&position.file))
            .map(|file| comments::leading_comment(file, position.offset))
            .unwrap_or_default()
    }
}
