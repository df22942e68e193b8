//! Parameter and option declarations.

use crate::error::SpecError;
use crate::format::{LINE_ENDING, tabularize};

/// How a positional parameter is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Must be present; reported as missing otherwise.
    Required,
    /// Takes at most one token.
    Optional,
    /// Optional, and soaks up every trailing positional once filled.
    Multi,
}

/// A declared positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    description: String,
    kind: ParameterKind,
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn required(&self) -> bool {
        self.kind == ParameterKind::Required
    }

    pub fn multi(&self) -> bool {
        self.kind == ParameterKind::Multi
    }

    fn usage(&self) -> String {
        match self.kind {
            ParameterKind::Required => format!("<{}>", self.name),
            ParameterKind::Optional => format!("[{}]", self.name),
            ParameterKind::Multi => format!("[{}*]", self.name),
        }
    }
}

/// A declared named option.
///
/// An option with a value description takes a value; one without is a switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    short_name: String,
    full_name: String,
    value_description: Option<String>,
    description: String,
    multi: bool,
    head: String,
}

impl OptionSpec {
    fn new(
        short_name: &str,
        full_name: &str,
        value_description: Option<&str>,
        description: &str,
        multi: bool,
    ) -> Result<Self, SpecError> {
        if short_name.trim().is_empty() || full_name.trim().is_empty() {
            return Err(SpecError::MissingOptionName {
                short: short_name.to_string(),
                full: full_name.to_string(),
            });
        }

        let mut head = format!("-{short_name}, --{full_name}");
        if let Some(value) = value_description {
            head.push_str(&format!("=<{value}>"));
        }

        Ok(Self {
            short_name: short_name.to_string(),
            full_name: full_name.to_string(),
            value_description: value_description.map(|s| s.to_string()),
            description: description.to_string(),
            multi,
            head,
        })
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn value_description(&self) -> Option<&str> {
        self.value_description.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether repeated occurrences accumulate into a list.
    pub fn multi(&self) -> bool {
        self.multi
    }

    pub fn requires_value(&self) -> bool {
        self.value_description.is_some()
    }

    /// Help-table label, e.g. `-o, --out=<FILE>`.
    pub fn head(&self) -> &str {
        &self.head
    }

    fn matches(&self, name: &str) -> bool {
        self.short_name == name || self.full_name == name
    }
}

/// Collects declarations; [`build`](SpecBuilder::build) freezes them.
///
/// Option registration validates names immediately and returns
/// [`SpecError`] on a missing short or full name.
#[derive(Debug, Clone, Default)]
pub struct SpecBuilder {
    parameters: Vec<Parameter>,
    options: Vec<OptionSpec>,
}

impl SpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required positional parameter.
    pub fn parameter(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.push_parameter(name.into(), description.into(), ParameterKind::Required)
    }

    /// Declare an optional single-value positional parameter.
    pub fn optional_parameter(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.push_parameter(name.into(), description.into(), ParameterKind::Optional)
    }

    /// Declare an optional positional parameter that collects every
    /// remaining positional token.
    pub fn multi_parameter(self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.push_parameter(name.into(), description.into(), ParameterKind::Multi)
    }

    /// Declare a boolean switch such as `-v/--verbose`.
    pub fn switch_option(
        self,
        short_name: &str,
        full_name: &str,
        description: &str,
    ) -> Result<Self, SpecError> {
        self.push_option(short_name, full_name, None, description, false)
    }

    /// Declare an option taking one value; later occurrences overwrite.
    pub fn value_option(
        self,
        short_name: &str,
        full_name: &str,
        value_description: &str,
        description: &str,
    ) -> Result<Self, SpecError> {
        self.push_option(
            short_name,
            full_name,
            Some(value_description),
            description,
            false,
        )
    }

    /// Declare an option taking a value that may be given repeatedly.
    pub fn multi_option(
        self,
        short_name: &str,
        full_name: &str,
        value_description: &str,
        description: &str,
    ) -> Result<Self, SpecError> {
        self.push_option(
            short_name,
            full_name,
            Some(value_description),
            description,
            true,
        )
    }

    pub fn build(self) -> Spec {
        tracing::debug!(
            parameters = self.parameters.len(),
            options = self.options.len(),
            "argument spec built"
        );
        Spec {
            parameters: self.parameters,
            options: self.options,
        }
    }

    fn push_parameter(mut self, name: String, description: String, kind: ParameterKind) -> Self {
        self.parameters.push(Parameter {
            name,
            description,
            kind,
        });
        self
    }

    fn push_option(
        mut self,
        short_name: &str,
        full_name: &str,
        value_description: Option<&str>,
        description: &str,
        multi: bool,
    ) -> Result<Self, SpecError> {
        let option = OptionSpec::new(short_name, full_name, value_description, description, multi)?;
        self.options.push(option);
        Ok(self)
    }
}

/// A frozen set of declarations.
///
/// Parsing and help rendering only borrow the spec, so one value can serve
/// any number of parses, including from several threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Spec {
    parameters: Vec<Parameter>,
    options: Vec<OptionSpec>,
}

impl Spec {
    pub fn builder() -> SpecBuilder {
        SpecBuilder::new()
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Look up an option by short or full name.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.matches(name))
    }

    /// One-line usage summary, e.g. `[options] <src> [dest*]`.
    pub fn arg_string(&self) -> String {
        let mut out = String::new();
        if !self.options.is_empty() {
            out.push_str("[options] ");
        }
        let params: Vec<String> = self.parameters.iter().map(Parameter::usage).collect();
        out.push_str(&params.join(" "));
        out
    }

    /// Help table of parameter names and descriptions.
    pub fn parameters_string(&self) -> String {
        let rows: Vec<(&str, &str)> = self
            .parameters
            .iter()
            .map(|p| (p.name(), p.description()))
            .collect();
        tabularize(&rows)
    }

    /// Help table of option heads and descriptions.
    pub fn options_string(&self) -> String {
        let rows: Vec<(&str, &str)> = self
            .options
            .iter()
            .map(|o| (o.head(), o.description()))
            .collect();
        tabularize(&rows)
    }

    /// Full help screen: usage line, then the parameter and option tables.
    pub fn help(&self, program: &str) -> String {
        let mut out = format!("Usage: {} {}", program, self.arg_string());
        let trimmed = out.trim_end().len();
        out.truncate(trimmed);
        out.push_str(LINE_ENDING);

        if !self.parameters.is_empty() {
            out.push_str(LINE_ENDING);
            out.push_str("Parameters:");
            out.push_str(LINE_ENDING);
            out.push_str(&self.parameters_string());
        }

        if !self.options.is_empty() {
            out.push_str(LINE_ENDING);
            out.push_str("Options:");
            out.push_str(LINE_ENDING);
            out.push_str(&self.options_string());
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nl(text: &str) -> String {
        text.replace('\n', LINE_ENDING)
    }

    fn sample() -> Spec {
        Spec::builder()
            .parameter("src", "Source file")
            .optional_parameter("dest", "Destination")
            .multi_parameter("extra", "Extra files")
            .switch_option("v", "verbose", "Chatty output")
            .unwrap()
            .value_option("o", "out", "FILE", "Output file")
            .unwrap()
            .build()
    }

    #[test]
    fn option_registration_requires_both_names() {
        let err = Spec::builder()
            .switch_option("", "verbose", "Chatty")
            .unwrap_err();
        assert_eq!(
            err,
            SpecError::MissingOptionName {
                short: String::new(),
                full: "verbose".into()
            }
        );

        assert!(Spec::builder().value_option("o", " ", "FILE", "Out").is_err());
        assert!(Spec::builder().multi_option("", "", "X", "Multi").is_err());
    }

    #[test]
    fn head_includes_value_description() {
        let spec = sample();
        assert_eq!(spec.options()[0].head(), "-v, --verbose");
        assert_eq!(spec.options()[1].head(), "-o, --out=<FILE>");
        assert!(spec.options()[1].requires_value());
        assert!(!spec.options()[0].requires_value());
    }

    #[test]
    fn find_option_matches_short_and_full_names() {
        let spec = sample();
        assert_eq!(spec.find_option("o").map(|o| o.full_name()), Some("out"));
        assert_eq!(spec.find_option("out").map(|o| o.full_name()), Some("out"));
        assert!(spec.find_option("output").is_none());
    }

    #[test]
    fn arg_string_renders_each_kind() {
        assert_eq!(sample().arg_string(), "[options] <src> [dest] [extra*]");
    }

    #[test]
    fn arg_string_without_options_has_no_prefix() {
        let spec = Spec::builder()
            .parameter("a", "")
            .optional_parameter("b", "")
            .build();
        assert_eq!(spec.arg_string(), "<a> [b]");
        assert_eq!(Spec::default().arg_string(), "");
    }

    #[test]
    fn parameters_string_aligns_descriptions() {
        assert_eq!(
            sample().parameters_string(),
            nl("  src    Source file\n  dest   Destination\n  extra  Extra files\n")
        );
    }

    #[test]
    fn options_string_uses_heads() {
        assert_eq!(
            sample().options_string(),
            nl("  -v, --verbose     Chatty output\n  -o, --out=<FILE>  Output file\n")
        );
    }

    #[test]
    fn help_is_stable() {
        let spec = sample();
        let first = spec.help("copy");
        assert_eq!(first, spec.help("copy"));
        assert!(first.starts_with(&nl("Usage: copy [options] <src> [dest] [extra*]\n")));
        assert!(first.contains(&nl("\nParameters:\n  src ")));
        assert!(first.contains(&nl("\nOptions:\n  -v, --verbose ")));
    }

    #[test]
    fn help_skips_empty_sections() {
        let spec = Spec::builder().parameter("src", "Source").build();
        let text = spec.help("prog");
        assert_eq!(text, nl("Usage: prog <src>\n\nParameters:\n  src  Source\n"));
        assert!(!text.contains("Options:"));
    }
}
