//! Include/exclude filter over module identifiers
//!
//! Globs are compiled to anchored regular expressions:
//!
//! | Glob     | Matches                                   |
//! |----------|-------------------------------------------|
//! | `**/`    | zero or more leading directories          |
//! | `**`     | anything, across `/`                      |
//! | `*`      | anything within one path segment          |
//! | `?`      | one character other than `/`              |
//! | `{a,b}`  | either alternative                        |
//! | `[abc]`  | one character from the class (`[!x]` negates) |
//!
//! Regex patterns are used as-is and match anywhere in the identifier.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;

/// A single include or exclude pattern.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "PatternRepr")]
pub enum FilterPattern {
    Glob(String),
    Regex(Regex),
}

impl FilterPattern {
    pub fn glob(pattern: impl Into<String>) -> Self {
        FilterPattern::Glob(pattern.into())
    }

    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(FilterPattern::Regex)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }
}

impl From<&str> for FilterPattern {
    fn from(pattern: &str) -> Self {
        FilterPattern::glob(pattern)
    }
}

impl From<Regex> for FilterPattern {
    fn from(regex: Regex) -> Self {
        FilterPattern::Regex(regex)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PatternRepr {
    Glob(String),
    Regex { regex: String },
}

impl TryFrom<PatternRepr> for FilterPattern {
    type Error = Error;

    fn try_from(repr: PatternRepr) -> Result<Self> {
        match repr {
            PatternRepr::Glob(glob) => Ok(FilterPattern::Glob(glob)),
            PatternRepr::Regex { regex } => FilterPattern::regex(&regex),
        }
    }
}

/// Predicate deciding whether a module is handled.
///
/// Exclusions win over inclusions. An empty include list matches every
/// identifier. Identifiers starting with `\0` are virtual modules and never
/// match.
#[derive(Debug, Clone)]
pub struct Filter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl Filter {
    pub fn new(include: &[FilterPattern], exclude: &[FilterPattern]) -> Result<Self> {
        Self::build(include, exclude, None)
    }

    /// Like [`Filter::new`], but relative globs are anchored at `base`.
    ///
    /// Globs starting with `/` or `**` are left alone.
    pub fn with_base(
        include: &[FilterPattern],
        exclude: &[FilterPattern],
        base: &str,
    ) -> Result<Self> {
        Self::build(include, exclude, Some(base))
    }

    fn build(
        include: &[FilterPattern],
        exclude: &[FilterPattern],
        base: Option<&str>,
    ) -> Result<Self> {
        let compile = |patterns: &[FilterPattern]| -> Result<Vec<Regex>> {
            patterns.iter().map(|p| compile_pattern(p, base)).collect()
        };

        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn matches(&self, id: &str) -> bool {
        if id.starts_with('\0') {
            return false;
        }

        let id = id.replace('\\', "/");

        if self.exclude.iter().any(|re| re.is_match(&id)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|re| re.is_match(&id))
    }
}

fn compile_pattern(pattern: &FilterPattern, base: Option<&str>) -> Result<Regex> {
    match pattern {
        FilterPattern::Regex(regex) => Ok(regex.clone()),
        FilterPattern::Glob(glob) => {
            let glob = glob.replace('\\', "/");
            let prefix = match base {
                Some(base) if !glob.starts_with('/') && !glob.starts_with("**") => {
                    format!("{}/", regex::escape(base.replace('\\', "/").trim_end_matches('/')))
                }
                _ => String::new(),
            };
            let source = format!("^{}{}$", prefix, glob_to_regex(&glob));

            Regex::new(&source).map_err(|source| Error::InvalidPattern {
                pattern: glob.clone(),
                source,
            })
        }
    }
}

/// Translate a glob into an unanchored regex body.
fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2);
    let mut braces = 0usize;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' if chars.get(i + 1) == Some(&'*') => {
                if chars.get(i + 2) == Some(&'/') {
                    out.push_str("(?:.*/)?");
                    i += 3;
                } else {
                    out.push_str(".*");
                    i += 2;
                }
                continue;
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' => {
                braces += 1;
                out.push_str("(?:");
            }
            '}' if braces > 0 => {
                braces -= 1;
                out.push(')');
            }
            ',' if braces > 0 => out.push('|'),
            '[' => match chars[i + 1..].iter().position(|&ch| ch == ']') {
                Some(len) if len > 0 => {
                    let class: String = chars[i + 1..i + 1 + len].iter().collect();
                    out.push('[');
                    match class.strip_prefix('!') {
                        Some(negated) => {
                            out.push('^');
                            out.push_str(&negated.replace('\\', "\\\\"));
                        }
                        None => out.push_str(&class.replace('\\', "\\\\")),
                    }
                    out.push(']');
                    i += len + 2;
                    continue;
                }
                _ => out.push_str(r"\["),
            },
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
        i += 1;
    }

    out
}
