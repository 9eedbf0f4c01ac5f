use std::sync::OnceLock;

use regex::Regex;

use crate::error::{GenerateError, Result};

/// One `{name}` or `{name=pattern}` segment of an HTTP path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathVar {
    pub name: String,
    /// Sub-pattern after `=`; `None` when absent or empty.
    pub pattern: Option<String>,
}

fn variable_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)\{([a-z.0-9_\s]*)=?([^{}]*)\}").expect("path variable regex is valid")
    })
}

/// Extracts the path variables of `path` in order of first appearance.
///
/// A name that appears twice keeps its first position and takes the
/// sub-pattern of its last occurrence.
pub fn parse_path_vars(path: &str) -> Result<Vec<PathVar>> {
    if path.ends_with('/') {
        return Err(GenerateError::TrailingSlash {
            path: path.to_owned(),
        });
    }

    let mut vars: Vec<PathVar> = Vec::new();

    for captures in variable_regex().captures_iter(path) {
        let name = captures
            .get(1)
            .map_or("", |name| name.as_str())
            .trim()
            .to_owned();
        let pattern = captures
            .get(2)
            .map(|pattern| pattern.as_str())
            .filter(|pattern| !pattern.is_empty())
            .map(str::to_owned);

        match vars.iter_mut().find(|var| var.name == name) {
            Some(existing) => existing.pattern = pattern,
            None => vars.push(PathVar { name, pattern }),
        }
    }

    Ok(vars)
}

/// Rewrites `{name=pattern}` segments to Spring's `{name}` form.
pub fn mapping_path(path: &str) -> String {
    variable_regex()
        .replace_all(path, |captures: &regex::Captures| {
            format!("{{{}}}", captures.get(1).map_or("", |name| name.as_str()).trim())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_path_drops_sub_patterns() {
        assert_eq!(mapping_path("/v1/{name=shelves/*}/books/{ book }"), "/v1/{name}/books/{book}");
        assert_eq!(mapping_path("/v1/health"), "/v1/health");
    }

    fn var(name: &str, pattern: Option<&str>) -> PathVar {
        PathVar {
            name: name.to_owned(),
            pattern: pattern.map(str::to_owned),
        }
    }

    #[test]
    fn plain_variable() {
        assert_eq!(parse_path_vars("/v1/{name}").unwrap(), [var("name", None)]);
    }

    #[test]
    fn variable_with_sub_pattern() {
        assert_eq!(
            parse_path_vars("/v1/{name=users/*}").unwrap(),
            [var("name", Some("users/*"))]
        );
    }

    #[test]
    fn empty_sub_pattern_is_no_override() {
        assert_eq!(parse_path_vars("/v1/{name=}").unwrap(), [var("name", None)]);
    }

    #[test]
    fn names_are_trimmed_and_case_insensitive() {
        assert_eq!(
            parse_path_vars("/v1/{ Parent.Id }/items/{item_ID=**}:get").unwrap(),
            [var("Parent.Id", None), var("item_ID", Some("**"))]
        );
    }

    #[test]
    fn keeps_declaration_order() {
        let names: Vec<_> = parse_path_vars("/v1/{shelf}/books/{book}/pages/{page}")
            .unwrap()
            .into_iter()
            .map(|var| var.name)
            .collect();

        assert_eq!(names, ["shelf", "book", "page"]);
    }

    #[test]
    fn duplicates_take_the_last_pattern() {
        assert_eq!(
            parse_path_vars("/v1/{id=a/*}/{other}/{id=b/*}").unwrap(),
            [var("id", Some("b/*")), var("other", None)]
        );
    }

    #[test]
    fn no_variables() {
        assert!(parse_path_vars("/v1/health").unwrap().is_empty());
        assert!(parse_path_vars("").unwrap().is_empty());
    }

    #[test]
    fn trailing_slash_is_rejected() {
        for path in ["/", "/v1/users/", "/v1/{id}/"] {
            assert_eq!(
                parse_path_vars(path),
                Err(GenerateError::TrailingSlash {
                    path: path.to_owned()
                })
            );
        }
    }
}
