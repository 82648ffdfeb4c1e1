use regex::Regex;

use crate::errors::{GatherError, GatherResult};

/// Glob-based allow/deny matcher for cluster, consumer group and topic names.
///
/// Patterns support `*`, `?` and `[...]` character classes (with `[!...]`
/// negation), matched against the whole name. An empty include list admits
/// every candidate; exclusion is applied after inclusion and always wins.
#[derive(Debug, Default)]
pub struct ResourceFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl ResourceFilter {
    /// Compile the given include/exclude globs into a filter.
    pub fn new(include: &[String], exclude: &[String]) -> GatherResult<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// `true` if `name` matches at least one include pattern (or the include
    /// list is empty) and no exclude pattern.
    pub fn is_allowed(&self, name: &str) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|re| re.is_match(name));

        included && !self.exclude.iter().any(|re| re.is_match(name))
    }

    /// Restrict `candidates` to the allowed subset, preserving their order.
    pub fn filter(&self, candidates: Vec<String>) -> Vec<String> {
        candidates.into_iter().filter(|c| self.is_allowed(c)).collect()
    }
}

fn compile(patterns: &[String]) -> GatherResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&glob_to_regex(pattern)).map_err(|e| GatherError::Pattern {
                pattern: pattern.clone(),
                source: e,
            })
        })
        .collect()
}

/// Translate a glob into an anchored regular expression.
fn glob_to_regex(pattern: &str) -> String {
    let mut re = String::with_capacity(pattern.len() + 4);
    re.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            '[' => {
                let mut negated = false;
                if chars.peek() == Some(&'!') {
                    chars.next();
                    negated = true;
                }

                let mut class = String::new();
                if chars.peek() == Some(&']') {
                    // A ']' right after the opening bracket is a literal member.
                    chars.next();
                    class.push(']');
                }

                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == ']' {
                        closed = true;
                        break;
                    }
                    class.push(inner);
                }

                if closed {
                    re.push('[');
                    if negated {
                        re.push('^');
                    }
                    for member in class.chars() {
                        if member == '\\' || member == '[' || member == ']' {
                            re.push('\\');
                        }
                        re.push(member);
                    }
                    re.push(']');
                } else {
                    // Unterminated class: match the characters literally.
                    re.push_str(&regex::escape("["));
                    if negated {
                        re.push('!');
                    }
                    re.push_str(&regex::escape(&class));
                }
            },
            _ => re.push_str(&regex::escape(&c.to_string())),
        }
    }

    re.push('$');
    re
}
