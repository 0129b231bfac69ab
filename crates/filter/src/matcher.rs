//! Glob matching for compiled filter rules
//!
//! Mirrors conventional ignore-file semantics: a pattern containing `/` is
//! matched against the full relative path, a bare name matches the basename
//! at any depth, and trailing `/**` or `/` select a path plus everything
//! beneath it. Glob tokens are translated to a regular expression scoped to
//! path components; a translation failure degrades to a plain wildcard
//! match instead of failing the run.

use glob::Pattern as GlobPattern;
use regex::Regex;

/// Decide whether `pattern` matches `rel_path`
///
/// `rel_path` is a `/`-separated path relative to the transfer root, with
/// no leading slash.
pub fn matches(pattern: &str, rel_path: &str) -> bool {
    let mut pattern = pattern.trim();
    if let Some(rest) = pattern.strip_prefix("./") {
        pattern = rest;
    }
    let rel_path = rel_path.strip_prefix("./").unwrap_or(rel_path);
    if pattern.is_empty() || rel_path.is_empty() {
        return false;
    }
    // `/` denotes the transfer root itself; no relative path is the root.
    if pattern == "/" {
        return false;
    }

    // A leading slash only anchors the pattern to the full path, which the
    // contains('/') scope choice below already captures.
    let full_path_scope = pattern.contains('/');
    let pattern = pattern.strip_prefix('/').unwrap_or(pattern);

    // Trailing `/**` and trailing `/` both select the prefix itself plus
    // anything strictly beneath it.
    if let Some(prefix) = pattern
        .strip_suffix("/**")
        .or_else(|| pattern.strip_suffix('/'))
    {
        if prefix.is_empty() {
            return false;
        }
        return match subtree_regex(prefix) {
            Some(re) => re.is_match(rel_path),
            None => fallback(pattern, rel_path),
        };
    }

    let subject = if full_path_scope {
        rel_path
    } else {
        basename(rel_path)
    };
    match anchored_regex(pattern) {
        Some(re) => re.is_match(subject),
        None => fallback(pattern, subject),
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Translate glob tokens into a regular expression body: `**` crosses
/// directory separators, `*` and `?` stop at them, everything else is
/// matched literally.
fn glob_body(pattern: &str) -> String {
    let mut body = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    body.push_str(".*");
                } else {
                    body.push_str("[^/]*");
                }
            }
            '?' => body.push_str("[^/]"),
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '\\' => {
                body.push('\\');
                body.push(c);
            }
            _ => body.push(c),
        }
    }
    body
}

fn anchored_regex(pattern: &str) -> Option<Regex> {
    compile(&format!("^{}$", glob_body(pattern)), pattern)
}

fn subtree_regex(prefix: &str) -> Option<Regex> {
    compile(&format!("^{}(/.*)?$", glob_body(prefix)), prefix)
}

fn compile(expr: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(expr) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::debug!(pattern, %err, "glob translation failed, using wildcard fallback");
            None
        }
    }
}

/// Conservative fallback when translation fails: plain wildcard matching
/// where `*` may also cross directory separators.
fn fallback(pattern: &str, subject: &str) -> bool {
    GlobPattern::new(pattern).is_ok_and(|p| p.matches(subject))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_bare_name_matches_basename_at_any_depth() {
        assert!(matches("foo", "foo"));
        assert!(matches("foo", "a/foo"));
        assert!(!matches("foo", "a/bar"));
        assert!(!matches("foo", "a/foobar"));
    }

    #[test]
    fn test_anchored_pattern_matches_full_path_only() {
        assert!(matches("/a/b", "a/b"));
        assert!(!matches("/a/b", "a/b/c"));
        assert!(!matches("/a/b", "x/a/b"));
    }

    #[test]
    fn test_recursive_suffix_matches_prefix_and_descendants() {
        assert!(matches("/a/b/**", "a/b"));
        assert!(matches("/a/b/**", "a/b/c.txt"));
        assert!(matches("/a/b/**", "a/b/c/d.txt"));
        assert!(!matches("/a/b/**", "a/bc"));
    }

    #[test]
    fn test_directory_suffix_behaves_like_recursive() {
        assert!(matches("dir/", "dir"));
        assert!(matches("dir/", "dir/file.txt"));
        assert!(!matches("dir/", "otherdir/dirfile"));
    }

    #[test]
    fn test_star_does_not_cross_separators() {
        assert!(matches("*.txt", "readme.txt"));
        assert!(matches("*.txt", "sub/readme.txt")); // basename scope
        assert!(matches("**/*.txt", "sub/readme.txt"));
        assert!(!matches("**/*.txt", "deep/a/b/c.log"));
    }

    #[test]
    fn test_question_mark_matches_one_character() {
        assert!(matches("file?.txt", "file1.txt"));
        assert!(!matches("file?.txt", "file10.txt"));
        assert!(!matches("file?.txt", "file.txt"));
    }

    #[test]
    fn test_leading_dot_slash_is_stripped() {
        assert!(matches("./src/main.rs", "src/main.rs"));
        assert!(matches("/src/main.rs", "./src/main.rs"));
    }

    #[test]
    fn test_root_pattern_matches_nothing() {
        assert!(!matches("/", "a"));
        assert!(!matches("/", "a/b"));
    }

    #[test]
    fn test_literal_dots_are_not_wildcards() {
        assert!(matches("a.b", "a.b"));
        assert!(!matches("a.b", "axb"));
    }

    #[test]
    fn test_glob_prefix_with_subtree_suffix() {
        // Default exclude for hidden directories at the transfer root.
        assert!(matches(".*/", ".cache"));
        assert!(matches(".*/", ".cache/data"));
        assert!(!matches(".*/", "src/.cache"));
    }
}
