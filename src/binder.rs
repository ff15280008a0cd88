//! Parameter schemas and binding of argument tokens to them.

use std::collections::BTreeMap;

use crate::expand::{Env, expand};
use crate::parser::ParseErrorKind;
use crate::token::{Span, Token};

/// Parameters accepted by a directive.
///
/// Every schema has exactly one default parameter, which may also be
/// given by name, plus zero or more named-only parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub default: &'static str,
    pub required: bool,
    pub named: &'static [&'static str],
}

impl Schema {
    /// Schema with a mandatory default parameter and nothing else.
    #[must_use]
    pub const fn new(default: &'static str) -> Self {
        Self {
            default,
            required: true,
            named: &[],
        }
    }

    /// Allow the default parameter to be omitted.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    #[must_use]
    pub const fn named(mut self, named: &'static [&'static str]) -> Self {
        self.named = named;
        self
    }

    /// Resolve `name` to the declared parameter name, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        if name == self.default {
            return Some(self.default);
        }
        self.named.iter().copied().find(|n| *n == name)
    }
}

/// Parameter values bound for one directive occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bound {
    values: BTreeMap<&'static str, String>,
}

impl Bound {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Error from binding, located at the offending token.
pub type BindError = (ParseErrorKind, Span);

/// Bind raw argument tokens to `schema`, expanding their values.
///
/// A token binds by name only when its unquoted prefix has the form
/// `name:` for a declared name; every other token is a positional
/// value for the default parameter. The split is decided on the token
/// as written, so a variable's value is never read as a `name:`.
/// `keyword_span` locates errors about missing values.
///
/// # Errors
///
/// `Arity` when the default parameter receives more than one value,
/// or none while required; `DuplicateParameter` when a named
/// parameter is given twice.
pub fn bind(
    keyword: &str,
    keyword_span: Span,
    schema: &Schema,
    args: &[Token],
    env: &Env,
) -> Result<Bound, BindError> {
    let mut values = BTreeMap::new();
    let mut defaults = 0usize;

    for token in args {
        let (name, value) =
            split_named(token, schema).unwrap_or((schema.default, token.text.as_str()));

        if name == schema.default {
            defaults += 1;
            if defaults > 1 {
                return Err((
                    ParseErrorKind::Arity {
                        keyword: keyword.to_string(),
                        parameter: name.to_string(),
                        found: count_defaults(schema, args),
                    },
                    token.span,
                ));
            }
        } else if values.contains_key(name) {
            return Err((
                ParseErrorKind::DuplicateParameter {
                    keyword: keyword.to_string(),
                    parameter: name.to_string(),
                },
                token.span,
            ));
        }

        values.insert(name, expand(value, env));
    }

    if defaults == 0 && schema.required {
        return Err((
            ParseErrorKind::Arity {
                keyword: keyword.to_string(),
                parameter: schema.default.to_string(),
                found: 0,
            },
            keyword_span,
        ));
    }

    Ok(Bound { values })
}

/// Split `name:value` when `name` is declared and unquoted.
fn split_named<'t>(token: &'t Token, schema: &Schema) -> Option<(&'static str, &'t str)> {
    let colon = token.unquoted_prefix().find(':')?;
    let name = schema.lookup(&token.text[..colon])?;
    Some((name, &token.text[colon + 1..]))
}

fn count_defaults(schema: &Schema, args: &[Token]) -> usize {
    args.iter()
        .filter(|t| split_named(t, schema).is_none_or(|(name, _)| name == schema.default))
        .count()
}
