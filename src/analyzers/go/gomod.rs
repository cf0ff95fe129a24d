//! Minimal `go.mod` reader.
//!
//! Only the directives package location needs are read: `module`,
//! `require` and `replace`. Everything else (`go`, `toolchain`, `exclude`,
//! `retract`, ...) is skipped.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub path: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceTarget {
    /// `=> ./local/dir`, already joined onto the module root.
    Dir(PathBuf),
    /// `=> other/module v1.2.3`
    Module { path: String, version: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub path: String,
    pub target: ReplaceTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoMod {
    pub module: String,
    pub requires: Vec<Requirement>,
    pub replaces: Vec<Replacement>,
}

impl GoMod {
    /// Parse `go.mod` contents. Local replacement directories are resolved
    /// against `root`.
    pub fn parse(contents: &str, root: &Path) -> Self {
        let mut gomod = GoMod::default();
        let mut block: Option<String> = None;

        for raw in contents.lines() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(verb) = &block {
                if line == ")" {
                    block = None;
                } else {
                    gomod.directive(verb, line, root);
                }
                continue;
            }

            let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            let rest = rest.trim();
            if rest == "(" {
                block = Some(verb.to_string());
            } else {
                gomod.directive(verb, rest, root);
            }
        }

        gomod
    }

    fn directive(&mut self, verb: &str, args: &str, root: &Path) {
        match verb {
            "module" => self.module = unquote(args).to_string(),
            "require" => {
                let fields: Vec<&str> = args.split_whitespace().collect();
                if let [path, version, ..] = fields.as_slice() {
                    self.requires.push(Requirement {
                        path: unquote(path).to_string(),
                        version: version.to_string(),
                    });
                }
            }
            "replace" => {
                let Some((from, to)) = args.split_once("=>") else {
                    return;
                };
                let Some(path) = from.split_whitespace().next() else {
                    return;
                };
                let to: Vec<&str> = to.split_whitespace().collect();
                let target = match to.as_slice() {
                    [dir] if is_local_path(dir) => ReplaceTarget::Dir(root.join(unquote(dir))),
                    [module, version] => ReplaceTarget::Module {
                        path: unquote(module).to_string(),
                        version: version.to_string(),
                    },
                    _ => return,
                };
                self.replaces.push(Replacement {
                    path: unquote(path).to_string(),
                    target,
                });
            }
            _ => {}
        }
    }

    /// Version required for the module providing `import_path`, longest
    /// module path first.
    pub fn requirement_for<'a>(
        &'a self,
        import_path: &'a str,
    ) -> Option<(&'a Requirement, &'a str)> {
        self.requires
            .iter()
            .filter_map(|req| subpath(import_path, &req.path).map(|rest| (req, rest)))
            .max_by_key(|(req, _)| req.path.len())
    }

    /// Replacement covering `import_path`, with the remaining sub-path.
    pub fn replacement_for<'a>(
        &'a self,
        import_path: &'a str,
    ) -> Option<(&'a Replacement, &'a str)> {
        self.replaces
            .iter()
            .filter_map(|rep| subpath(import_path, &rep.path).map(|rest| (rep, rest)))
            .max_by_key(|(rep, _)| rep.path.len())
    }
}

/// The part of `import_path` below `module`, `""` for the module itself.
pub fn subpath<'a>(import_path: &'a str, module: &str) -> Option<&'a str> {
    let rest = import_path.strip_prefix(module)?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix('/')
    }
}

/// Module cache escaping: each upper-case letter becomes `!` plus its
/// lower-case form.
pub fn escape_module_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

fn is_local_path(target: &str) -> bool {
    let target = unquote(target);
    target.starts_with("./") || target.starts_with("../") || Path::new(target).is_absolute()
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn unquote(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '`')
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const GO_MOD: &str = indoc! {r#"
        module github.com/example/app // main module

        go 1.22

        require github.com/google/uuid v1.6.0

        require (
            github.com/rs/zerolog v1.33.0
            github.com/BurntSushi/toml v1.4.0 // indirect
        )

        replace github.com/example/lib => ../lib

        replace (
            golang.org/x/tools => golang.org/x/tools v0.20.0
        )
    "#};

    #[test]
    fn test_parse_directives() {
        let gomod = GoMod::parse(GO_MOD, Path::new("/src/app"));

        assert_eq!(gomod.module, "github.com/example/app");
        assert_eq!(gomod.requires.len(), 3);
        assert_eq!(gomod.requires[1].path, "github.com/rs/zerolog");
        assert_eq!(gomod.requires[2].version, "v1.4.0");
        assert_eq!(
            gomod.replaces,
            vec![
                Replacement {
                    path: "github.com/example/lib".into(),
                    target: ReplaceTarget::Dir(PathBuf::from("/src/app/../lib")),
                },
                Replacement {
                    path: "golang.org/x/tools".into(),
                    target: ReplaceTarget::Module {
                        path: "golang.org/x/tools".into(),
                        version: "v0.20.0".into(),
                    },
                },
            ]
        );
    }

    #[test]
    fn test_requirement_for_subpackage() {
        let gomod = GoMod::parse(GO_MOD, Path::new("/src/app"));
        let (req, rest) = gomod.requirement_for("github.com/rs/zerolog/log").unwrap();
        assert_eq!(req.path, "github.com/rs/zerolog");
        assert_eq!(rest, "log");
        assert!(gomod.requirement_for("github.com/rs/zerologx").is_none());
    }

    #[test]
    fn test_replacement_for_owned_import_path() {
        let gomod = GoMod::parse(GO_MOD, Path::new("/src/app"));
        let import_path = format!("{}/{}", "github.com/example/lib", "pkg/inner");
        let (replacement, rest) = gomod.replacement_for(&import_path).unwrap();
        assert_eq!(
            replacement.target,
            ReplaceTarget::Dir(PathBuf::from("/src/app/../lib"))
        );
        assert_eq!(rest, "pkg/inner");
        assert!(gomod.replacement_for("github.com/example/library").is_none());
    }

    #[test]
    fn test_subpath_requires_segment_boundary() {
        assert_eq!(subpath("example.com/a/b", "example.com/a"), Some("b"));
        assert_eq!(subpath("example.com/a", "example.com/a"), Some(""));
        assert_eq!(subpath("example.com/ab", "example.com/a"), None);
    }

    #[test]
    fn test_escape_module_path() {
        assert_eq!(
            escape_module_path("github.com/BurntSushi/toml"),
            "github.com/!burnt!sushi/toml"
        );
    }
}
