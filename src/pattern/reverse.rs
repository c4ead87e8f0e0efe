use std::collections::{BTreeMap, BTreeSet};

/// Build the path text a pattern would match for the given arguments.
///
/// Supported patterns are literal text (with escaped punctuation), optional
/// `^`/`$` anchors, and capture groups: `(?P<name>...)`/`(?<name>...)` take
/// their value from `kwargs`, unnamed groups consume `args` in order. Any
/// other regex construct outside a group makes the pattern irreversible and
/// yields `None`, as does a missing keyword, a keyword with no matching
/// group, or a positional count mismatch.
///
/// The result has no leading `/` and is not checked against the pattern;
/// callers verify it with the compiled matcher.
#[must_use]
pub fn reverse_pattern(
    raw: &str,
    args: &[&str],
    kwargs: &BTreeMap<String, String>,
) -> Option<String> {
    let (path, used) = reverse_consuming(raw, args, kwargs)?;
    (used.len() == kwargs.len()).then_some(path)
}

/// Like [`reverse_pattern`], but keywords the pattern has no group for are
/// left alone. Returns the path and the keywords it consumed.
pub(crate) fn reverse_consuming<'k>(
    raw: &str,
    args: &[&str],
    kwargs: &'k BTreeMap<String, String>,
) -> Option<(String, BTreeSet<&'k str>)> {
    let body = raw.strip_prefix('^').unwrap_or(raw);
    let body = match body.strip_suffix('$') {
        Some(stripped) if !stripped.ends_with('\\') => stripped,
        _ => body,
    };

    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(body.len());
    let mut used = BTreeSet::new();
    let mut positional = args.iter();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let escaped = *chars.get(i + 1)?;
                if escaped.is_ascii_alphanumeric() {
                    // \d, \w, \b ... are classes, not literals
                    return None;
                }
                out.push(escaped);
                i += 2;
            }
            '(' => {
                let (name, after_header) = group_header(&chars, i + 1)?;
                let close = group_end(&chars, after_header)?;
                match name {
                    Some(name) => {
                        let (key, value) = kwargs.get_key_value(&name)?;
                        out.push_str(value);
                        used.insert(key.as_str());
                    }
                    None => out.push_str(positional.next()?),
                }
                i = close + 1;
            }
            '.' | '*' | '+' | '?' | '[' | ']' | '{' | '}' | '|' | ')' | '^' | '$' => {
                return None;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    if positional.next().is_some() {
        return None;
    }
    Some((out, used))
}

/// Parse what follows `(`: returns the group name (if named) and the index
/// of the first body character. Non-capturing and lookaround groups are
/// not reversible.
fn group_header(chars: &[char], start: usize) -> Option<(Option<String>, usize)> {
    if chars.get(start) != Some(&'?') {
        return Some((None, start));
    }
    let name_start = match (chars.get(start + 1), chars.get(start + 2)) {
        (Some('P'), Some('<')) => start + 3,
        (Some('<'), Some(c)) if *c != '=' && *c != '!' => start + 2,
        _ => return None,
    };
    let rel_close = chars[name_start..].iter().position(|c| *c == '>')?;
    let name: String = chars[name_start..name_start + rel_close].iter().collect();
    if name.is_empty() {
        return None;
    }
    Some((Some(name), name_start + rel_close + 1))
}

/// Index of the `)` closing the group whose body starts at `start`
fn group_end(chars: &[char], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
