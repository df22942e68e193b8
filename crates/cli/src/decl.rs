use anyhow::{Context, Result, bail};
use argspec::{Spec, SpecBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DECL_NAME: &str = "argspec.json";

/// JSON declaration file describing a program's parameters and options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declarations {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDecl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDecl>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub kind: ParameterKindDecl,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKindDecl {
    #[default]
    Required,
    Optional,
    Multi,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDecl {
    #[serde(default)]
    pub short: String,
    #[serde(default)]
    pub full: String,
    /// Present for options that take a value; absent for switches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_description: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub multi: bool,
}

impl Declarations {
    /// Register every declaration, in file order.
    pub fn to_spec(&self) -> Result<Spec> {
        let mut builder = SpecBuilder::new();

        for p in &self.parameters {
            builder = match p.kind {
                ParameterKindDecl::Required => builder.parameter(&p.name, &p.description),
                ParameterKindDecl::Optional => builder.optional_parameter(&p.name, &p.description),
                ParameterKindDecl::Multi => builder.multi_parameter(&p.name, &p.description),
            };
        }

        for (idx, o) in self.options.iter().enumerate() {
            builder = match (&o.value_description, o.multi) {
                (None, false) => builder.switch_option(&o.short, &o.full, &o.description),
                (None, true) => bail!(
                    "option #{} ({}): multi options need a valueDescription",
                    idx + 1,
                    display_name(o)
                ),
                (Some(value), false) => {
                    builder.value_option(&o.short, &o.full, value, &o.description)
                }
                (Some(value), true) => {
                    builder.multi_option(&o.short, &o.full, value, &o.description)
                }
            }
            .with_context(|| format!("option #{} ({})", idx + 1, display_name(o)))?;
        }

        Ok(builder.build())
    }
}

fn display_name(o: &OptionDecl) -> &str {
    if o.full.is_empty() { &o.short } else { &o.full }
}

/// Read the declaration file at `path`, or `./argspec.json` if none is given.
pub fn load(path: Option<&Path>) -> Result<(PathBuf, Declarations)> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("failed to get current directory")?;
            cwd.join(DEFAULT_DECL_NAME)
        }
    };

    if !path.exists() {
        bail!("declaration file not found: {}", path.display());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read declarations: {}", path.display()))?;
    let decls: Declarations = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse declarations JSON: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        parameters = decls.parameters.len(),
        options = decls.options.len(),
        "loaded declarations"
    );

    Ok((path, decls))
}
