//! Ant-style path patterns (`/admin/**`, `/css/*.css`).
//!
//! - `**` as a whole segment matches zero or more segments
//! - `*` matches any run of characters within one segment
//! - `?` matches exactly one character within one segment
//!
//! `/admin/**` therefore matches `/admin`, `/admin/` and `/admin/a/b`.
//! Patterns are compiled once into an anchored [`Regex`].

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern '{0}' must start with '/'")]
    NotAbsolute(String),
    #[error("pattern '{pattern}' could not be compiled: {source}")]
    Compile {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled Ant-style path pattern.
#[derive(Debug, Clone)]
pub struct AntPattern {
    source: String,
    regex: Regex,
}

impl AntPattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::NotAbsolute`] if the pattern does not start with `/`.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }

        let regex = Regex::new(&to_regex(pattern)).map_err(|source| PatternError::Compile {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Returns `true` if `path` matches this pattern.
    ///
    /// The path is compared as-is; query strings must already be stripped.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The pattern text this matcher was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn to_regex(pattern: &str) -> String {
    let mut out = String::from("^");

    for segment in pattern.split('/').skip(1) {
        if segment == "**" {
            out.push_str("(?:/[^/]*)*");
            continue;
        }

        out.push('/');
        for ch in segment.chars() {
            match ch {
                '*' => out.push_str("[^/]*"),
                '?' => out.push_str("[^/]"),
                other => out.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
            }
        }
    }

    // "/" on its own yields a single empty segment; it matches the root only.
    if out == "^/" {
        return "^/$".to_string();
    }

    out.push('$');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(p: &str) -> AntPattern {
        AntPattern::new(p).unwrap()
    }

    #[test]
    fn test_exact_pattern() {
        let p = pattern("/register");

        assert!(p.matches("/register"));
        assert!(!p.matches("/register/extra"));
        assert!(!p.matches("/registerx"));
        assert!(!p.matches("/"));
    }

    #[test]
    fn test_double_star_matches_zero_or_more_segments() {
        let p = pattern("/admin/**");

        assert!(p.matches("/admin"));
        assert!(p.matches("/admin/"));
        assert!(p.matches("/admin/x"));
        assert!(p.matches("/admin/x/y/z"));
        assert!(!p.matches("/administrator"));
        assert!(!p.matches("/user/admin"));
    }

    #[test]
    fn test_double_star_in_the_middle() {
        let p = pattern("/static/**/app.js");

        assert!(p.matches("/static/app.js"));
        assert!(p.matches("/static/js/v2/app.js"));
        assert!(!p.matches("/static/js/other.js"));
    }

    #[test]
    fn test_single_star_stays_within_segment() {
        let p = pattern("/css/*.css");

        assert!(p.matches("/css/login.css"));
        assert!(!p.matches("/css/vendor/login.css"));
        assert!(!p.matches("/css/login.js"));
    }

    #[test]
    fn test_question_mark_matches_one_char() {
        let p = pattern("/v?/info");

        assert!(p.matches("/v1/info"));
        assert!(!p.matches("/v10/info"));
        assert!(!p.matches("/v/info"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let p = pattern("/a.b/(c)");

        assert!(p.matches("/a.b/(c)"));
        assert!(!p.matches("/axb/(c)"));
    }

    #[test]
    fn test_case_sensitive() {
        let p = pattern("/Script/**");

        assert!(p.matches("/Script/app.js"));
        assert!(!p.matches("/script/app.js"));
    }

    #[test]
    fn test_root_pattern() {
        let p = pattern("/");

        assert!(p.matches("/"));
        assert!(!p.matches("/x"));
    }

    #[test]
    fn test_catch_all() {
        let p = pattern("/**");

        assert!(p.matches("/"));
        assert!(p.matches("/anything/at/all"));
    }

    #[test]
    fn test_relative_pattern_rejected() {
        assert!(matches!(
            AntPattern::new("admin/**"),
            Err(PatternError::NotAbsolute(_))
        ));
    }
}
