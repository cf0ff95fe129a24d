//! Import path to directory mapping, and package loading.

use super::gomod::{escape_module_path, subpath, GoMod, ReplaceTarget};
use super::parser::parse_source;
use super::syntax::{SourceFile, TypeSpec};
use crate::core::errors::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Where Go packages are looked for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    /// Starting point for the `go.mod` lookup.
    pub working_dir: PathBuf,
    /// Extra roots holding `<import path>` directories.
    pub search_paths: Vec<PathBuf>,
    pub gopath: Option<PathBuf>,
    pub goroot: Option<PathBuf>,
    pub module_cache: Option<PathBuf>,
}

impl SearchConfig {
    /// Locations from `GOPATH`, `GOROOT` and `GOMODCACHE`, falling back to
    /// `~/go` and the toolchain of the `go` binary on `PATH`.
    pub fn from_environment(working_dir: &Path, search_paths: Vec<PathBuf>) -> Self {
        let gopath = env::var_os("GOPATH")
            .and_then(|value| env::split_paths(&value).next())
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| dirs::home_dir().map(|home| home.join("go")));

        let goroot = env::var_os("GOROOT")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(goroot_from_binary);

        let module_cache = env::var_os("GOMODCACHE")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| gopath.as_ref().map(|p| p.join("pkg").join("mod")));

        Self {
            working_dir: working_dir.to_path_buf(),
            search_paths,
            gopath,
            goroot,
            module_cache,
        }
    }

    /// Only the module around `working_dir`; nothing from the environment.
    pub fn isolated(working_dir: &Path) -> Self {
        Self {
            working_dir: working_dir.to_path_buf(),
            ..Self::default()
        }
    }
}

fn goroot_from_binary() -> Option<PathBuf> {
    let go = which::which("go").ok()?;
    let go = fs::canonicalize(&go).unwrap_or(go);
    // <goroot>/bin/go
    go.parent()?.parent().map(Path::to_path_buf)
}

#[derive(Debug, Clone)]
struct MainModule {
    root: PathBuf,
    gomod: GoMod,
}

/// Maps import paths to package directories.
#[derive(Debug, Clone)]
pub struct PackageLocator {
    config: SearchConfig,
    module: Option<MainModule>,
}

impl PackageLocator {
    pub fn new(config: SearchConfig) -> Self {
        let module = find_main_module(&config.working_dir);
        match &module {
            Some(m) => log::debug!("Main module {} at {}", m.gomod.module, m.root.display()),
            None => log::debug!(
                "No go.mod above {}; using search paths only",
                config.working_dir.display()
            ),
        }
        Self { config, module }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Candidate directories for `import_path`, in search order.
    pub fn candidates(&self, import_path: &str) -> Vec<PathBuf> {
        let mut dirs = Vec::new();

        if let Some(module) = &self.module {
            let gomod = &module.gomod;

            if let Some(rest) = subpath(import_path, &gomod.module) {
                dirs.push(join_subpath(&module.root, rest));
            }

            if let Some((replacement, rest)) = gomod.replacement_for(import_path) {
                match &replacement.target {
                    ReplaceTarget::Dir(dir) => dirs.push(join_subpath(dir, rest)),
                    ReplaceTarget::Module { path, version } => {
                        if let Some(dir) = self.cached_module(path, version) {
                            dirs.push(join_subpath(&dir, rest));
                        }
                    }
                }
            }

            dirs.push(module.root.join("vendor").join(import_path));

            if let Some((requirement, rest)) = gomod.requirement_for(import_path) {
                if let Some(dir) = self.cached_module(&requirement.path, &requirement.version) {
                    dirs.push(join_subpath(&dir, rest));
                }
            }
        }

        for root in &self.config.search_paths {
            dirs.push(root.join(import_path));
        }
        if let Some(gopath) = &self.config.gopath {
            dirs.push(gopath.join("src").join(import_path));
        }
        if let Some(goroot) = &self.config.goroot {
            dirs.push(goroot.join("src").join(import_path));
        }

        dirs
    }

    /// First candidate directory that holds Go files.
    pub fn locate(&self, import_path: &str) -> Result<PathBuf> {
        let candidates = self.candidates(import_path);
        match candidates.iter().find(|dir| has_go_files(dir)) {
            Some(dir) => Ok(dir.clone()),
            None => Err(Error::PackageNotFound {
                package: import_path.to_string(),
                searched: candidates,
            }),
        }
    }

    fn cached_module(&self, path: &str, version: &str) -> Option<PathBuf> {
        let cache = self.config.module_cache.as_ref()?;
        Some(cache.join(format!(
            "{}@{}",
            escape_module_path(path),
            escape_module_path(version)
        )))
    }
}

fn join_subpath(root: &Path, rest: &str) -> PathBuf {
    if rest.is_empty() {
        root.to_path_buf()
    } else {
        root.join(rest)
    }
}

fn find_main_module(start: &Path) -> Option<MainModule> {
    start.ancestors().find_map(|dir| {
        let path = dir.join("go.mod");
        let contents = fs::read_to_string(&path).ok()?;
        let gomod = GoMod::parse(&contents, dir);
        if gomod.module.is_empty() {
            log::warn!("{} has no module directive", path.display());
            return None;
        }
        Some(MainModule {
            root: dir.to_path_buf(),
            gomod,
        })
    })
}

fn go_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "go"))
        .collect()
}

fn has_go_files(dir: &Path) -> bool {
    dir.is_dir() && !go_files(dir).is_empty()
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("_test.go"))
}

/// The parsed files of one package directory.
#[derive(Debug)]
pub struct GoPackage {
    /// Import path.
    pub path: String,
    /// Package clause name.
    pub name: String,
    pub dir: PathBuf,
    /// Sorted by file name.
    pub files: Vec<SourceFile>,
}

impl GoPackage {
    /// First declaration of `name` in file order.
    pub fn lookup(&self, name: &str) -> Option<(&SourceFile, &TypeSpec)> {
        self.files.iter().find_map(|file| {
            file.type_specs
                .iter()
                .find(|spec| spec.name == name)
                .map(|spec| (file, spec))
        })
    }

    pub fn file(&self, path: &Path) -> Option<&SourceFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

/// Parse every `.go` file directly inside `dir`.
///
/// The package name comes from the first non-test file. Files declaring a
/// different package, such as external `_test` packages, are dropped.
pub fn load_package_dir(import_path: &str, dir: &Path) -> Result<GoPackage> {
    let mut parsed = Vec::new();
    for path in go_files(dir) {
        let source = fs::read_to_string(&path)
            .map_err(|e| Error::file_system("Failed to read Go source", &path, e))?;
        parsed.push(parse_source(&source, &path)?);
    }

    let name = parsed
        .iter()
        .find(|file| !is_test_file(&file.path))
        .or_else(|| parsed.first())
        .map(|file| file.package_name.clone())
        .unwrap_or_default();

    let files: Vec<SourceFile> = parsed
        .into_iter()
        .filter(|file| {
            let keep = file.package_name == name;
            if !keep {
                log::debug!(
                    "Skipping {} (package {}, expected {})",
                    file.path.display(),
                    file.package_name,
                    name
                );
            }
            keep
        })
        .collect();

    log::debug!(
        "Loaded package {} ({}) from {} with {} files",
        import_path,
        name,
        dir.display(),
        files.len()
    );

    Ok(GoPackage {
        path: import_path.to_string(),
        name,
        dir: dir.to_path_buf(),
        files,
    })
}
