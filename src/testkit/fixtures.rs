//! On-disk Go module fixtures.
//!
//! ```rust,ignore
//! let temp = tempfile::TempDir::new()?;
//! let fixture = GoPackageFixture::new(temp.path(), "example.com/app")?
//!     .with_file("store", "store.go", "package store\n\ntype Store interface{}\n")?;
//! let db = fixture.database();
//! ```

use crate::analyzers::go::{GoSourceDatabase, SearchConfig};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A Go module rooted in a caller-owned directory.
#[derive(Debug, Clone)]
pub struct GoPackageFixture {
    root: PathBuf,
    module: String,
}

impl GoPackageFixture {
    /// Write `go.mod` declaring `module` into `root`.
    pub fn new(root: &Path, module: &str) -> io::Result<Self> {
        fs::create_dir_all(root)?;
        fs::write(root.join("go.mod"), format!("module {module}\n\ngo 1.22\n"))?;
        Ok(Self {
            root: root.to_path_buf(),
            module: module.to_string(),
        })
    }

    /// Write `file_name` into the package directory `package_dir`, relative
    /// to the module root (`""` for the root package).
    pub fn with_file(self, package_dir: &str, file_name: &str, contents: &str) -> io::Result<Self> {
        let dir = self.root.join(package_dir);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(file_name), contents)?;
        Ok(self)
    }

    /// Write a file anywhere below the root, e.g. into `vendor/`.
    pub fn with_path(self, relative: &str, contents: &str) -> io::Result<Self> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)?;
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Import path of a package directory inside the module.
    pub fn import_path(&self, package_dir: &str) -> String {
        if package_dir.is_empty() {
            self.module.clone()
        } else {
            format!("{}/{}", self.module, package_dir)
        }
    }

    /// A database over this module that ignores GOPATH, GOROOT and the
    /// module cache of the machine running the tests.
    pub fn database(&self) -> GoSourceDatabase {
        GoSourceDatabase::new(SearchConfig::isolated(&self.root))
    }
}
