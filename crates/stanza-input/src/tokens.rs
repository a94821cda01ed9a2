//! Argument tokenizer.
//!
//! Splits an argument vector into bare positional tokens and a flag map.
//! The tokenizer is schema-agnostic: a flag followed by a bare word always
//! takes that word as its value, whatever the option's declared type.

use indexmap::IndexMap;

use crate::case::camel_case;
use crate::value::RawValue;

/// Prefix that turns a flag into an explicit `false`.
pub const NEGATION_PREFIX: &str = "--no-";

/// The tokenized form of an argument vector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Bare positional tokens, left to right as typed.
    pub commands: Vec<String>,
    /// camelCased flag names to their raw values, in order of first
    /// appearance in the working list.
    pub options: IndexMap<String, RawValue>,
}

impl ParsedArgs {
    /// Returns a copy whose options are `base` overlaid with this one's.
    ///
    /// Entries in `self` win over entries in `base` for the same name.
    pub fn overlay<I>(&self, base: I) -> ParsedArgs
    where
        I: IntoIterator<Item = (String, RawValue)>,
    {
        let mut options: IndexMap<String, RawValue> = base.into_iter().collect();
        for (name, value) in &self.options {
            options.insert(name.clone(), value.clone());
        }
        ParsedArgs {
            commands: self.commands.clone(),
            options,
        }
    }
}

/// Returns true if the token is a flag marker (`-x` or `--name`).
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

enum Token {
    Word(String),
    False,
}

/// Tokenizes an argument vector.
///
/// The vector must not include the program name. Negated flags are moved
/// to the end of the working list as `--name` + `false` pairs, and the list
/// is then consumed from the end: a bare word directly preceded by a flag
/// becomes that flag's value, any other bare word is positional.
///
/// ```
/// use stanza_input::{tokenize, RawValue};
///
/// let parsed = tokenize(["show", "--foo", "bar", "--verbose"]);
/// assert_eq!(parsed.commands, vec!["show"]);
/// assert_eq!(parsed.options["foo"], RawValue::Text("bar".into()));
/// assert_eq!(parsed.options["verbose"], RawValue::Present);
/// ```
pub fn tokenize<I, S>(args: I) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (negations, rest): (Vec<String>, Vec<String>) = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .partition(|arg| arg.starts_with(NEGATION_PREFIX));

    let mut work: Vec<Token> = rest.into_iter().map(Token::Word).collect();
    for negation in negations {
        work.push(Token::Word(format!("--{}", &negation[NEGATION_PREFIX.len()..])));
        work.push(Token::False);
    }

    let mut commands = Vec::new();
    let mut bound: Vec<(String, RawValue)> = Vec::new();

    while let Some(token) = work.pop() {
        let value = match token {
            Token::Word(word) if is_flag(&word) => {
                bound.push((camel_case(&word), RawValue::Present));
                continue;
            }
            Token::Word(word) => RawValue::Text(word),
            Token::False => RawValue::Negated,
        };

        match work.last() {
            Some(Token::Word(prev)) if is_flag(prev) => {
                bound.push((camel_case(prev), value));
                work.pop();
            }
            _ => {
                if let RawValue::Text(word) = value {
                    commands.push(word);
                }
            }
        }
    }

    commands.reverse();
    bound.reverse();

    let mut options = IndexMap::new();
    for (name, value) in bound {
        options.entry(name).or_insert(value);
    }

    tracing::trace!(?commands, flags = options.len(), "tokenized arguments");

    ParsedArgs { commands, options }
}
