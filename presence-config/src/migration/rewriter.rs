//! Ordered find/replace over a single string.

// External crates
use indexmap::IndexMap;
use regex::{NoExpand, Regex, RegexBuilder};
use tracing::debug;

/// How a rule's search text is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteOptions {
    pub match_case: bool,
    pub whole_word: bool,
    pub use_regex: bool,
}

impl RewriteOptions {
    pub const fn new(match_case: bool, whole_word: bool, use_regex: bool) -> Self {
        Self {
            match_case,
            whole_word,
            use_regex,
        }
    }

    /// Case-insensitive literal substring matching.
    pub const fn any_case() -> Self {
        Self::new(false, false, false)
    }
}

fn compile(target: &str, options: RewriteOptions) -> Option<Regex> {
    if target.is_empty() {
        return None;
    }

    let body = if options.use_regex {
        target.to_string()
    } else {
        regex::escape(target)
    };
    let pattern = if options.whole_word {
        format!(r"\b(?:{body})\b")
    } else {
        body
    };

    match RegexBuilder::new(&pattern)
        .case_insensitive(!options.match_case)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            debug!("Skipping unusable pattern '{}': {}", target, e);
            None
        }
    }
}

/// Replaces every match of `target` in `source`. The replacement is inserted literally.
pub fn replace_all(source: &str, target: &str, replacement: &str, options: RewriteOptions) -> String {
    match compile(target, options) {
        Some(regex) => regex.replace_all(source, NoExpand(replacement)).into_owned(),
        None => source.to_string(),
    }
}

/// Applies each `(old, new)` rule in order to the running result.
///
/// Rule N sees the output of rule N-1, so later rules can wrap text inserted by
/// earlier ones.
pub fn rewrite(source: &str, rules: &IndexMap<String, String>, options: RewriteOptions) -> String {
    rules
        .iter()
        .fold(source.to_string(), |current, (old, new)| {
            if current.is_empty() {
                current
            } else {
                replace_all(&current, old, new, options)
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_rules_and_empty_source() {
        assert_eq!(rewrite("abc", &IndexMap::new(), RewriteOptions::default()), "abc");
        assert_eq!(rewrite("", &rules(&[("a", "b")]), RewriteOptions::default()), "");
    }

    #[test]
    fn test_rules_compose_in_order() {
        let table = rules(&[("name", "{player.name}"), ("{player.name}", "{toUpper(player.name)}")]);
        assert_eq!(
            rewrite("hi name", &table, RewriteOptions::new(true, false, false)),
            "hi {toUpper(player.name)}"
        );
    }

    #[test]
    fn test_case_insensitive_keeps_replacement_casing() {
        let table = rules(&[("&ign&", "{Player.Name}")]);
        assert_eq!(
            rewrite("&IGN& and &Ign&", &table, RewriteOptions::any_case()),
            "{Player.Name} and {Player.Name}"
        );
    }

    #[test]
    fn test_match_case_is_exact() {
        let table = rules(&[("day", "night")]);
        assert_eq!(
            rewrite("Day day", &table, RewriteOptions::new(true, false, false)),
            "Day night"
        );
    }

    #[test]
    fn test_whole_word_respects_boundaries() {
        let table = rules(&[("day", "night")]);
        assert_eq!(
            rewrite("day today", &table, RewriteOptions::new(false, true, false)),
            "night today"
        );
    }

    #[test]
    fn test_literal_mode_escapes_metacharacters() {
        let table = rules(&[("a.b", "x")]);
        assert_eq!(rewrite("a.b axb", &table, RewriteOptions::any_case()), "x axb");
    }

    #[test]
    fn test_regex_mode_and_literal_replacement() {
        let table = rules(&[(r"\d+", "$0")]);
        assert_eq!(
            rewrite("v12", &table, RewriteOptions::new(true, false, true)),
            "v$0"
        );
    }

    #[test]
    fn test_invalid_regex_is_skipped() {
        let table = rules(&[("(", "x"), ("a", "b")]);
        assert_eq!(rewrite("(a", &table, RewriteOptions::new(true, false, true)), "(b");
    }

    #[test]
    fn test_empty_search_text_is_ignored() {
        let table = rules(&[("", "x")]);
        assert_eq!(rewrite("abc", &table, RewriteOptions::any_case()), "abc");
    }
}
