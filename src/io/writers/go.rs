//! Renders the logging middleware for an interface as Go source.

use crate::core::model::{InterfaceModel, MethodModel, ModuleReference, Parameter};
use crate::io::output::OutputWriter;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;

const LOGGER_IMPORT: &str = "github.com/rs/zerolog/log";

/// Identifiers the generated method body relies on.
const RESERVED: [&str; 4] = ["l", "begin", "time", "log"];

pub struct GoWriter<W: Write> {
    writer: W,
}

impl<W: Write> GoWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for GoWriter<W> {
    fn write_model(&mut self, model: &InterfaceModel) -> anyhow::Result<()> {
        self.write_header(model)?;
        self.write_wrapper(model)?;
        for method in &model.methods {
            self.write_method(model, method)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> GoWriter<W> {
    fn write_header(&mut self, model: &InterfaceModel) -> anyhow::Result<()> {
        writeln!(self.writer, "// Code generated by middleware-gen; DO NOT EDIT.")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "package {}", model.naming.wrapper_package_name)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "import (")?;
        writeln!(self.writer, "\t\"time\"")?;
        writeln!(self.writer)?;
        for line in import_lines(&model.references) {
            writeln!(self.writer, "\t{line}")?;
        }
        writeln!(self.writer, ")")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_wrapper(&mut self, model: &InterfaceModel) -> anyhow::Result<()> {
        let wrapper = &model.naming.wrapper_type_name;
        let factory = &model.naming.factory_function_name;
        let name = &model.name;

        write!(self.writer, "{}", model.documentation)?;
        writeln!(self.writer, "type {wrapper} struct {{")?;
        writeln!(self.writer, "\twrapper {name}")?;
        writeln!(self.writer, "}}")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "// {factory} adds logging for interface {name}")?;
        writeln!(self.writer, "func {factory}(wrapper {name}) {name} {{")?;
        writeln!(self.writer, "\treturn &{wrapper}{{")?;
        writeln!(self.writer, "\t\twrapper: wrapper,")?;
        writeln!(self.writer, "\t}}")?;
        writeln!(self.writer, "}}")?;
        Ok(())
    }

    fn write_method(&mut self, model: &InterfaceModel, method: &MethodModel) -> anyhow::Result<()> {
        let name = &method.name;
        let (params, results) = local_names(method);

        writeln!(self.writer)?;
        write!(self.writer, "{}", method.documentation)?;
        write!(
            self.writer,
            "func (l *{}) {name}({})",
            model.naming.wrapper_type_name,
            declaration_list(&params, &method.params)
        )?;
        if !method.results.is_empty() {
            write!(self.writer, " ({})", declaration_list(&results, &method.results))?;
        }
        writeln!(self.writer, " {{")?;

        writeln!(self.writer, "\tdefer func(begin time.Time) {{")?;
        writeln!(self.writer, "\t\tlog.Info().")?;
        for param in &params {
            writeln!(self.writer, "\t\t\tInterface({param:?}, {param}).")?;
        }
        writeln!(self.writer, "\t\t\tDur(\"took\", time.Since(begin)).")?;
        for result in &results {
            writeln!(self.writer, "\t\t\tInterface({result:?}, {result}).")?;
        }
        writeln!(self.writer, "\t\t\tMsg(\"Method {name} called\")")?;
        writeln!(self.writer, "\t}}(time.Now())")?;
        writeln!(self.writer)?;

        let ret = if method.results.is_empty() { "" } else { "return " };
        writeln!(
            self.writer,
            "\t{ret}l.wrapper.{name}({})",
            call_arguments(&params, method.is_variadic)
        )?;
        writeln!(self.writer, "}}")?;
        Ok(())
    }
}

/// Sorted, deduplicated import lines including the logger. An alias is
/// spelled out when it differs from the last path segment.
fn import_lines(references: &[ModuleReference]) -> Vec<String> {
    let mut imports: BTreeMap<&str, &str> = BTreeMap::new();
    imports.insert(LOGGER_IMPORT, "log");
    for reference in references {
        imports.entry(reference.path.as_str()).or_insert(reference.alias.as_str());
    }

    imports
        .into_iter()
        .map(|(path, alias)| {
            let last = path.rsplit('/').next().unwrap_or(path);
            if alias.is_empty() || alias == last {
                format!("{path:?}")
            } else {
                format!("{alias} {path:?}")
            }
        })
        .collect()
}

/// Identifiers used for the parameters and results inside the generated
/// method. Blank names and names shadowing the receiver, the deferred
/// argument or the imported packages are replaced with unused ones.
fn local_names(method: &MethodModel) -> (Vec<String>, Vec<String>) {
    let mut taken: HashSet<String> = RESERVED.iter().map(|r| r.to_string()).collect();
    taken.extend(
        method
            .params
            .iter()
            .chain(&method.results)
            .map(|p| p.name.clone()),
    );

    let mut rename = |list: &[Parameter], kind: &str| -> Vec<String> {
        list.iter()
            .enumerate()
            .map(|(i, p)| {
                let blank = p.name.is_empty() || p.name == "_";
                if !blank && !RESERVED.contains(&p.name.as_str()) {
                    return p.name.clone();
                }
                let mut candidate = if blank {
                    format!("{kind}{}", i + 1)
                } else {
                    format!("{}_", p.name)
                };
                while taken.contains(&candidate) {
                    candidate.push('_');
                }
                taken.insert(candidate.clone());
                candidate
            })
            .collect()
    };

    let params = rename(&method.params, "arg");
    let results = rename(&method.results, "res");
    (params, results)
}

fn declaration_list(names: &[String], params: &[Parameter]) -> String {
    names
        .iter()
        .zip(params)
        .map(|(name, p)| format!("{name} {}", p.ty.text))
        .collect::<Vec<_>>()
        .join(", ")
}

fn call_arguments(names: &[String], variadic: bool) -> String {
    let mut args = names.to_vec();
    if variadic {
        if let Some(last) = args.last_mut() {
            last.push_str("...");
        }
    }
    args.join(", ")
}
