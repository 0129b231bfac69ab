//! User-authored pattern parsing
//!
//! Patterns arrive from ignore files, configuration arrays, and the command
//! line. Parsing happens exactly once; the resulting [`Pattern`] is an
//! immutable description of the text plus the flags the compiler cares
//! about (polarity, anchoring, recursion, directory marker).

/// Polarity of a user-authored pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Leading `!`: force the matched paths back into the transfer
    ForceInclude,
    /// No prefix: drop the matched paths from the transfer
    Exclude,
}

/// A user-authored filter pattern
///
/// Constructed via [`Pattern::parse`] and immutable afterwards. The raw
/// text is kept verbatim (whitespace-trimmed only) so exclude rules can be
/// emitted without any normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    polarity: Polarity,
    anchored: bool,
    recursive: bool,
    directory: bool,
}

impl Pattern {
    /// Parse one pattern line
    ///
    /// Returns `None` for empty or whitespace-only input; blank lines in
    /// ignore files are not patterns.
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.trim();
        if raw.is_empty() {
            return None;
        }

        let body = raw.strip_prefix('!').unwrap_or(raw);
        let polarity = if raw.starts_with('!') {
            Polarity::ForceInclude
        } else {
            Polarity::Exclude
        };
        let recursive = body.ends_with("/**");
        let directory = !recursive && body.ends_with('/');

        Some(Self {
            raw: raw.to_string(),
            polarity,
            anchored: body.starts_with('/'),
            recursive,
            directory,
        })
    }

    /// The pattern's polarity
    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// The trimmed original text, `!` prefix included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The pattern text without the `!` prefix
    pub fn body(&self) -> &str {
        self.raw.strip_prefix('!').unwrap_or(&self.raw)
    }

    /// Whether the pattern is anchored to the transfer root (leading `/`)
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Whether the pattern carries a recursive `/**` suffix
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Whether the pattern carries a trailing directory slash
    pub fn is_directory(&self) -> bool {
        self.directory
    }

    /// The body with any `./` prefix and trailing `/**` or `/` removed and
    /// a leading `/` ensured
    ///
    /// This is the form the include-chain emitter works from.
    pub fn anchored_stem(&self) -> String {
        let body = self.body();
        let body = body.strip_prefix("./").unwrap_or(body);
        let body = body.strip_suffix("/**").unwrap_or(body);
        let body = body.strip_suffix('/').unwrap_or(body);
        if body.starts_with('/') {
            body.to_string()
        } else {
            format!("/{body}")
        }
    }
}

/// Parse a batch of pattern lines, silently dropping blank entries
pub fn parse_all<I, S>(inputs: I) -> Vec<Pattern>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .filter_map(|s| Pattern::parse(s.as_ref()))
        .collect()
}
