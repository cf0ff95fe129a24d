use crate::core::model::Parameter;
use crate::extraction::descriptor::describe_type;
use crate::types::Variable;

/// Turn a parameter or result tuple into named [`Parameter`]s.
///
/// Unnamed positions get `{prefix}{n}`, `n` counting from 1 within this
/// list only, so parameters and results of one method are numbered
/// independently.
pub fn build_parameters(variables: &[Variable], prefix: &str, home: &str) -> Vec<Parameter> {
    variables
        .iter()
        .enumerate()
        .map(|(i, variable)| {
            let name = match variable.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => synthetic_name(prefix, i + 1),
            };
            Parameter::new(name, describe_type(&variable.ty, home))
        })
        .collect()
}

pub fn synthetic_name(prefix: &str, position: usize) -> String {
    format!("{prefix}{position}")
}
