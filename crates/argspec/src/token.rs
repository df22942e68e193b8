//! Classification of single argv tokens.

/// An option-like token split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Name with the leading dashes removed (`out` for `--out=x`).
    pub name: &'a str,
    /// Inline value after `=`; only ever set for long-form tokens.
    pub value: Option<&'a str>,
    /// Whether the token carried an `=`, even if nothing followed it.
    pub using_equals: bool,
    /// `--name` (true) or `-name` (false).
    pub long: bool,
}

/// Whether `token` looks like an option (starts with `-`).
pub fn is_option_like(token: &str) -> bool {
    token.starts_with('-')
}

/// Split an option-like token into name and inline value.
///
/// Returns `None` for tokens that are not option-like. Short-form tokens are
/// never split on `=`: `-o=x` has the name `o=x`.
pub fn classify(token: &str) -> Option<Token<'_>> {
    if let Some(rest) = token.strip_prefix("--") {
        return Some(match rest.split_once('=') {
            Some((name, value)) => Token {
                name,
                value: Some(value),
                using_equals: true,
                long: true,
            },
            None => Token {
                name: rest,
                value: None,
                using_equals: false,
                long: true,
            },
        });
    }

    let name = token.strip_prefix('-')?;
    Some(Token {
        name,
        value: None,
        using_equals: false,
        long: false,
    })
}
