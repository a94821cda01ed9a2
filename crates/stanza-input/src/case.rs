//! Name normalization.
//!
//! Flags, option names and environment suffixes are all matched through
//! their camelCase form, so `--first-name`, `first-name`, `firstName` and
//! `FIRST_NAME` name the same option.

/// Splits a name into words on separators and case transitions.
///
/// Runs of capitals stay together as one word unless the last capital starts
/// a lowercase word (`XMLHttp` splits into `XML` and `Http`).
fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Converts a flag, option or environment name to camelCase.
///
/// Leading dashes and any other separators are dropped.
///
/// ```
/// use stanza_input::camel_case;
///
/// assert_eq!(camel_case("--first-name"), "firstName");
/// assert_eq!(camel_case("FIRST_NAME"), "firstName");
/// assert_eq!(camel_case("firstName"), "firstName");
/// ```
pub fn camel_case(input: &str) -> String {
    words(input)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                word.to_lowercase()
            } else {
                capitalize(word)
            }
        })
        .collect()
}

/// Converts a name to kebab-case, the form flags are displayed in.
///
/// ```
/// use stanza_input::kebab_case;
///
/// assert_eq!(kebab_case("firstName"), "first-name");
/// assert_eq!(kebab_case("help"), "help");
/// ```
pub fn kebab_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}
