use regex::Regex;
use serde_json::Value;

use super::{PathMatcher, PatternMatch};
use crate::error::RouteError;
use crate::view::ArgVec;

/// Regex-backed [`PathMatcher`]
#[derive(Debug, Clone)]
pub struct RegexPattern {
    raw: String,
    regex: Regex,
    has_named_groups: bool,
}

impl RegexPattern {
    /// Compile `raw` verbatim; the text is kept uncanonicalized
    pub fn compile(raw: &str) -> Result<Self, RouteError> {
        let regex = Regex::new(raw).map_err(|e| RouteError::InvalidPattern {
            pattern: raw.to_string(),
            message: e.to_string(),
        })?;
        let has_named_groups = regex.capture_names().flatten().next().is_some();
        Ok(Self {
            raw: raw.to_string(),
            regex,
            has_named_groups,
        })
    }
}

impl PathMatcher for RegexPattern {
    fn as_str(&self) -> &str {
        &self.raw
    }

    fn match_path(&self, path: &str) -> Option<PatternMatch> {
        let caps = self.regex.captures(path)?;
        let end = caps.get(0).map_or(0, |m| m.end());

        let mut named = Vec::new();
        let mut positional = ArgVec::new();
        // Group 0 is the whole match
        for (idx, name) in self.regex.capture_names().enumerate().skip(1) {
            let value = caps
                .get(idx)
                .map_or(Value::Null, |m| Value::String(m.as_str().to_string()));
            match name {
                Some(name) => named.push((name.to_string(), value)),
                None => positional.push(value),
            }
        }

        Some(PatternMatch {
            named,
            positional,
            has_named_groups: self.has_named_groups,
            end,
        })
    }
}
