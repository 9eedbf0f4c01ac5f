use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Lower-cases the first character, leaving the rest untouched.
pub fn lcfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Java member name for a schema identifier: `user_id` becomes `userId`.
pub fn member_name(wire_name: &str) -> String {
    wire_name.to_lower_camel_case()
}

/// Java type-level name for a schema identifier: `user_id` becomes `UserId`.
pub fn type_name(wire_name: &str) -> String {
    wire_name.to_upper_camel_case()
}

/// Keeps the first occurrence of every item, in order.
pub fn remove_duplicates<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Strips comment markers and surrounding whitespace from a leading comment.
pub fn trim_comments(comments: &str) -> String {
    comments
        .trim_matches(|c: char| c == '/' || c == '*')
        .trim()
        .to_owned()
}

/// Quotes `value` as a Java string literal.
pub fn java_string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

/// `com.example.dto` becomes `com/example/dto`.
pub fn package_to_path(package: &str) -> String {
    package.replace('.', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_letter_case() {
        assert_eq!(lcfirst("SayHello"), "sayHello");
        assert_eq!(ucfirst("sayHello"), "SayHello");
        assert_eq!(lcfirst(""), "");
        assert_eq!(ucfirst("x"), "X");
    }

    #[test]
    fn identifier_casing() {
        assert_eq!(member_name("user_id"), "userId");
        assert_eq!(member_name("verbose"), "verbose");
        assert_eq!(type_name("payment_method"), "PaymentMethod");
    }

    #[test]
    fn duplicates_keep_first_appearance() {
        let items = ["b", "a", "b", "c", "a", "c", "d"].map(str::to_owned);
        assert_eq!(remove_duplicates(items), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn duplicates_of_nothing() {
        assert!(remove_duplicates(Vec::new()).is_empty());
    }

    #[test]
    fn comments_are_trimmed() {
        assert_eq!(trim_comments(" Says hello\n"), "Says hello");
        assert_eq!(trim_comments("/** Block */"), "Block");
        assert_eq!(trim_comments("// line"), "line");
        assert_eq!(trim_comments("   "), "");
    }

    #[test]
    fn string_literals_are_escaped() {
        assert_eq!(java_string_literal("Active"), "\"Active\"");
        assert_eq!(
            java_string_literal("say \"hi\"\\\nnow"),
            "\"say \\\"hi\\\"\\\\\\nnow\""
        );
    }

    #[test]
    fn packages_become_paths() {
        assert_eq!(package_to_path("com.example.dto"), "com/example/dto");
    }
}
