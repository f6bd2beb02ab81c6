//! Naming convention detection and conversion
//!
//! Identifiers are classified by a fixed priority cascade, split into words
//! according to the detected convention, then rejoined under the target
//! convention's casing and separator rules.
//!
//! Every function in this module is total: degenerate input (empty strings,
//! separator-only strings, mixed separators) produces a best-effort result,
//! never an error. [`NamingConvention::Unknown`] is a normal outcome.
//!
//! # Example
//!
//! ```
//! use devkit::core::naming::{convert, detect, NamingConvention};
//!
//! assert_eq!(detect("XMLParser"), NamingConvention::PascalCase);
//! assert_eq!(convert("XMLParser", NamingConvention::SnakeCase), "xml_parser");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// A textual convention for composing multi-word identifiers.
///
/// `Display` renders the canonical sample form (`snake_case`, `kebab-case`, ...),
/// `FromStr` additionally accepts short aliases such as `snake` or `constant`.
/// Serialized as the tag name (`camelCase`, `upperSnakeCase`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(ascii_case_insensitive)]
pub enum NamingConvention {
    /// `userName`
    #[strum(to_string = "camelCase", serialize = "camel", serialize = "lower-camel")]
    CamelCase,
    /// `UserName`
    #[strum(to_string = "PascalCase", serialize = "pascal", serialize = "upper-camel")]
    PascalCase,
    /// `user_name`
    #[strum(to_string = "snake_case", serialize = "snake")]
    SnakeCase,
    /// `user-name`
    #[strum(to_string = "kebab-case", serialize = "kebab")]
    KebabCase,
    /// `USER_NAME`
    #[strum(
        to_string = "UPPER_SNAKE_CASE",
        serialize = "upper-snake",
        serialize = "constant"
    )]
    UpperSnakeCase,
    /// `user name`
    #[strum(to_string = "spaced case", serialize = "spaced", serialize = "space")]
    SpacedCase,
    /// No recognizable separator or case transition
    #[strum(to_string = "unknown")]
    Unknown,
}

impl NamingConvention {
    /// Human-readable label for display next to conversion results
    pub const fn label(self) -> &'static str {
        match self {
            NamingConvention::CamelCase => "lower camel case (camelCase)",
            NamingConvention::PascalCase => "upper camel case (PascalCase)",
            NamingConvention::SnakeCase => "snake case (snake_case)",
            NamingConvention::KebabCase => "kebab case (kebab-case)",
            NamingConvention::UpperSnakeCase => "upper snake case (UPPER_SNAKE_CASE)",
            NamingConvention::SpacedCase => "spaced case (spaced case)",
            NamingConvention::Unknown => "unknown convention",
        }
    }

    /// The six conventions an identifier can be converted into, in declaration order.
    pub fn targets() -> impl Iterator<Item = NamingConvention> {
        Self::iter().filter(|convention| *convention != NamingConvention::Unknown)
    }
}

/// Classifies an identifier by its surface form.
///
/// Rules are checked in order and the first match wins, so `user-name_x`
/// (both `-` and `_`) is kebab case.
pub fn detect(identifier: &str) -> NamingConvention {
    let has_marker = identifier
        .chars()
        .any(|c| c.is_uppercase() || matches!(c, '_' | '-' | ' '));
    if !has_marker {
        return NamingConvention::Unknown;
    }

    if identifier.contains('-') {
        return NamingConvention::KebabCase;
    }

    if identifier.contains(' ') {
        return NamingConvention::SpacedCase;
    }

    if identifier.contains('_') {
        let all_upper = identifier
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase);
        return if all_upper {
            NamingConvention::UpperSnakeCase
        } else {
            NamingConvention::SnakeCase
        };
    }

    if identifier.chars().next().is_some_and(char::is_uppercase) {
        return NamingConvention::PascalCase;
    }

    if identifier.chars().skip(1).any(char::is_uppercase) {
        return NamingConvention::CamelCase;
    }

    NamingConvention::Unknown
}

/// Splits an identifier into words according to its detected convention.
///
/// Tokens keep their original casing and are never empty. An empty
/// identifier yields no tokens; an unknown one yields itself as the only token.
pub fn tokenize(identifier: &str) -> Vec<String> {
    if identifier.is_empty() {
        return Vec::new();
    }

    match detect(identifier) {
        NamingConvention::CamelCase | NamingConvention::PascalCase => split_camel(identifier),
        NamingConvention::SnakeCase | NamingConvention::UpperSnakeCase => {
            split_on(identifier, '_')
        }
        NamingConvention::KebabCase => split_on(identifier, '-'),
        NamingConvention::SpacedCase => split_on(identifier, ' '),
        NamingConvention::Unknown => vec![identifier.to_string()],
    }
}

fn split_on(identifier: &str, separator: char) -> Vec<String> {
    identifier
        .split(separator)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Word boundaries sit between a lowercase and an uppercase letter, and
/// before the last capital of an acronym that runs into a capitalized word
/// (`XMLParser` -> `XML`, `Parser`).
fn split_camel(identifier: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = identifier.char_indices().collect();
    let mut words = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);

        let lower_to_upper = prev.is_lowercase() && current.is_uppercase();
        let acronym_end =
            prev.is_uppercase() && current.is_uppercase() && next.is_some_and(char::is_lowercase);

        if lower_to_upper || acronym_end {
            words.push(identifier[start..offset].to_string());
            start = offset;
        }
    }

    words.push(identifier[start..].to_string());
    words
}

/// Converts an identifier to the target convention.
///
/// Identifiers with no words (empty, or separators only) are returned
/// unchanged, as is any identifier when the target is
/// [`NamingConvention::Unknown`].
pub fn convert(identifier: &str, target: NamingConvention) -> String {
    let words = tokenize(identifier);
    if words.is_empty() {
        return identifier.to_string();
    }

    match target {
        NamingConvention::CamelCase => {
            let mut out = String::with_capacity(identifier.len());
            for (index, word) in words.iter().enumerate() {
                if index == 0 {
                    out.push_str(&word.to_lowercase());
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
        NamingConvention::PascalCase => words.iter().map(|word| capitalize(word)).collect(),
        NamingConvention::SnakeCase => join_lowercase(&words, "_"),
        NamingConvention::KebabCase => join_lowercase(&words, "-"),
        NamingConvention::SpacedCase => join_lowercase(&words, " "),
        NamingConvention::UpperSnakeCase => words
            .iter()
            .map(|word| word.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
        NamingConvention::Unknown => identifier.to_string(),
    }
}

/// Converts an identifier into every target convention.
///
/// Empty input yields an empty map rather than a map of empty strings.
pub fn convert_all(identifier: &str) -> BTreeMap<NamingConvention, String> {
    if identifier.is_empty() {
        return BTreeMap::new();
    }

    NamingConvention::targets()
        .map(|target| (target, convert(identifier, target)))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

fn join_lowercase(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_basic_conventions() {
        assert_eq!(detect(""), NamingConvention::Unknown);
        assert_eq!(detect("userName"), NamingConvention::CamelCase);
        assert_eq!(detect("UserName"), NamingConvention::PascalCase);
        assert_eq!(detect("user_name"), NamingConvention::SnakeCase);
        assert_eq!(detect("USER_NAME"), NamingConvention::UpperSnakeCase);
        assert_eq!(detect("user-name"), NamingConvention::KebabCase);
        assert_eq!(detect("user name"), NamingConvention::SpacedCase);
        assert_eq!(detect("username"), NamingConvention::Unknown);
    }

    #[test]
    fn test_detect_precedence() {
        // Hyphen beats underscore
        assert_eq!(detect("user-name_x"), NamingConvention::KebabCase);
        // Hyphen beats space
        assert_eq!(detect("user name-x"), NamingConvention::KebabCase);
        // Space beats underscore
        assert_eq!(detect("user_name x"), NamingConvention::SpacedCase);
        // Underscore beats capitals
        assert_eq!(detect("User_Name"), NamingConvention::SnakeCase);
    }

    #[test]
    fn test_detect_upper_snake_ignores_non_letters() {
        assert_eq!(detect("HTTP_2_CLIENT"), NamingConvention::UpperSnakeCase);
        assert_eq!(detect("__"), NamingConvention::UpperSnakeCase);
        assert_eq!(detect("v2_api"), NamingConvention::SnakeCase);
    }

    #[test]
    fn test_detect_unicode_capitals() {
        assert_eq!(detect("ÉtéBrûlant"), NamingConvention::PascalCase);
        assert_eq!(detect("étéBrûlant"), NamingConvention::CamelCase);
    }

    #[test]
    fn test_tokenize_camel_and_pascal() {
        assert_eq!(tokenize("userName"), vec!["user", "Name"]);
        assert_eq!(tokenize("UserAccountId"), vec!["User", "Account", "Id"]);
        assert_eq!(tokenize("XMLParser"), vec!["XML", "Parser"]);
        assert_eq!(tokenize("getHTTPResponse"), vec!["get", "HTTP", "Response"]);
        assert_eq!(tokenize("parseURL"), vec!["parse", "URL"]);
    }

    #[test]
    fn test_tokenize_digits_do_not_split() {
        assert_eq!(tokenize("user2Name"), vec!["user2Name"]);
        assert_eq!(tokenize("base64Encode"), vec!["base64Encode"]);
    }

    #[test]
    fn test_tokenize_separators_discard_empty_tokens() {
        assert_eq!(tokenize("__user__name_"), vec!["user", "name"]);
        assert_eq!(tokenize("-user--name-"), vec!["user", "name"]);
        assert_eq!(tokenize("  user   name "), vec!["user", "name"]);
        assert!(tokenize("___").is_empty());
        assert!(tokenize("--").is_empty());
        assert_eq!(tokenize("- -"), vec![" "]);
    }

    #[test]
    fn test_tokenize_empty_and_unknown() {
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("username"), vec!["username"]);
        assert_eq!(tokenize("42"), vec!["42"]);
    }

    #[test]
    fn test_tokenize_mixed_separators_follow_detection() {
        assert_eq!(tokenize("user-name_x"), vec!["user", "name_x"]);
    }

    #[test]
    fn test_convert_each_target() {
        let input = "XMLHttpRequest";
        assert_eq!(convert(input, NamingConvention::CamelCase), "xmlHttpRequest");
        assert_eq!(convert(input, NamingConvention::PascalCase), "XmlHttpRequest");
        assert_eq!(convert(input, NamingConvention::SnakeCase), "xml_http_request");
        assert_eq!(convert(input, NamingConvention::KebabCase), "xml-http-request");
        assert_eq!(
            convert(input, NamingConvention::UpperSnakeCase),
            "XML_HTTP_REQUEST"
        );
        assert_eq!(convert(input, NamingConvention::SpacedCase), "xml http request");
    }

    #[test]
    fn test_convert_passes_through_wordless_input() {
        assert_eq!(convert("", NamingConvention::SnakeCase), "");
        assert_eq!(convert("___", NamingConvention::CamelCase), "___");
        assert_eq!(convert("--", NamingConvention::PascalCase), "--");
    }

    #[test]
    fn test_convert_to_unknown_is_identity() {
        assert_eq!(convert("user_name", NamingConvention::Unknown), "user_name");
    }

    #[test]
    fn test_convert_unknown_input_is_single_word() {
        assert_eq!(convert("username", NamingConvention::PascalCase), "Username");
        assert_eq!(convert("username", NamingConvention::UpperSnakeCase), "USERNAME");
    }

    #[test]
    fn test_convert_all_snake_input() {
        let all = convert_all("user_name");
        assert_eq!(all.len(), 6);
        assert_eq!(all[&NamingConvention::CamelCase], "userName");
        assert_eq!(all[&NamingConvention::PascalCase], "UserName");
        assert_eq!(all[&NamingConvention::SnakeCase], "user_name");
        assert_eq!(all[&NamingConvention::KebabCase], "user-name");
        assert_eq!(all[&NamingConvention::UpperSnakeCase], "USER_NAME");
        assert_eq!(all[&NamingConvention::SpacedCase], "user name");
        assert!(!all.contains_key(&NamingConvention::Unknown));
    }

    #[test]
    fn test_convert_all_empty_is_empty_map() {
        assert!(convert_all("").is_empty());
    }

    #[test]
    fn test_convert_all_separator_only_echoes_input() {
        let all = convert_all("__");
        assert_eq!(all.len(), 6);
        assert!(all.values().all(|value| value == "__"));
    }

    #[test]
    fn test_convert_is_idempotent_on_samples() {
        for input in ["userName", "UserName", "user_name", "USER_NAME", "user-name", "user name"] {
            for target in NamingConvention::targets() {
                let once = convert(input, target);
                assert_eq!(convert(&once, target), once, "{input} -> {target}");
            }
        }
    }

    #[test]
    fn test_round_trip_through_detected_convention() {
        for input in ["userName", "UserName", "user_name", "USER_NAME", "user-name", "user name"] {
            let convention = detect(input);
            assert_eq!(convert(input, convention), input);
        }
        // Acronyms are re-cased but keep their word boundaries
        assert_eq!(convert("XMLParser", NamingConvention::PascalCase), "XmlParser");
        assert_eq!(tokenize("XmlParser"), vec!["Xml", "Parser"]);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(NamingConvention::SnakeCase.to_string(), "snake_case");
        assert_eq!(NamingConvention::UpperSnakeCase.to_string(), "UPPER_SNAKE_CASE");
        assert_eq!(
            "constant".parse::<NamingConvention>().unwrap(),
            NamingConvention::UpperSnakeCase
        );
        assert_eq!(
            "KEBAB".parse::<NamingConvention>().unwrap(),
            NamingConvention::KebabCase
        );
        assert_eq!(
            "PascalCase".parse::<NamingConvention>().unwrap(),
            NamingConvention::PascalCase
        );
        assert!("screaming".parse::<NamingConvention>().is_err());
    }

    #[test]
    fn test_targets_excludes_unknown() {
        let targets: Vec<_> = NamingConvention::targets().collect();
        assert_eq!(targets.len(), 6);
        assert_eq!(targets[0], NamingConvention::CamelCase);
        assert!(!targets.contains(&NamingConvention::Unknown));
    }

    #[test]
    fn test_serde_uses_tag_names() {
        let json = serde_json::to_string(&NamingConvention::UpperSnakeCase).unwrap();
        assert_eq!(json, "\"upperSnakeCase\"");

        let map = serde_json::to_value(convert_all("user_name")).unwrap();
        assert_eq!(map["kebabCase"], "user-name");
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<_> = NamingConvention::iter().map(NamingConvention::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 7);
    }
}
