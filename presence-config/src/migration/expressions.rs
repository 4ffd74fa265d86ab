//! Detection of `{...}` expressions inside placeholder strings.

// Standard library
use std::sync::OnceLock;

// External crates
use regex::Regex;

static BRACE_EXPRESSION_RE: OnceLock<Option<Regex>> = OnceLock::new();
static PIPE_JOIN_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn brace_expression_regex() -> Option<&'static Regex> {
    BRACE_EXPRESSION_RE
        .get_or_init(|| Regex::new(r"\{[^{}]*\}").ok())
        .as_ref()
}

fn pipe_join_regex() -> Option<&'static Regex> {
    PIPE_JOIN_RE
        .get_or_init(|| Regex::new(r"\{([^{}]*)\}\|\{([^{}]*)\}").ok())
        .as_ref()
}

/// Every innermost `{...}` span in `value`, in order of appearance.
pub fn find_brace_expressions(value: &str) -> Vec<&str> {
    brace_expression_regex()
        .map(|re| re.find_iter(value).map(|m| m.as_str()).collect())
        .unwrap_or_default()
}

pub fn has_expression(value: &str) -> bool {
    brace_expression_regex().is_some_and(|re| re.is_match(value))
}

/// A legacy `{first}|{second}` either-or pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipeJoin<'a> {
    pub text: &'a str,
    pub first: &'a str,
    pub second: &'a str,
}

impl PipeJoin<'_> {
    /// The single-expression form, `{getOrDefault(first, second)}`.
    pub fn to_expression(&self) -> String {
        format!("{{getOrDefault({}, {})}}", self.first, self.second)
    }
}

pub fn find_pipe_joins(value: &str) -> Vec<PipeJoin<'_>> {
    let Some(re) = pipe_join_regex() else {
        return Vec::new();
    };

    re.captures_iter(value)
        .filter_map(|caps| {
            Some(PipeJoin {
                text: caps.get(0)?.as_str(),
                first: caps.get(1)?.as_str(),
                second: caps.get(2)?.as_str(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_brace_expressions_returns_innermost_spans() {
        assert_eq!(
            find_brace_expressions("a {x.y} b {f({z})}"),
            vec!["{x.y}", "{z}"]
        );
        assert!(find_brace_expressions("no braces").is_empty());
    }

    #[test]
    fn test_find_pipe_joins() {
        let joins = find_pipe_joins("pre {a.b}|{c.d} post");
        assert_eq!(joins.len(), 1);
        assert_eq!(joins[0].text, "{a.b}|{c.d}");
        assert_eq!(joins[0].to_expression(), "{getOrDefault(a.b, c.d)}");
    }

    #[test]
    fn test_pipe_without_braces_on_both_sides_is_ignored() {
        assert!(find_pipe_joins("{a}|b").is_empty());
        assert!(find_pipe_joins("a|{b}").is_empty());
        assert!(find_pipe_joins("{a} | {b}").is_empty());
    }

    #[test]
    fn test_has_expression() {
        assert!(has_expression("'{player.name}'"));
        assert!(!has_expression("'plain'"));
    }
}
