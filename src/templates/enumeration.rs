use indoc::indoc;

use super::{fill, header, type_comment, Template};
use crate::{
    naming::java_string_literal,
    schema::{Enum, EnumValue},
    string_builder::StringBuilder,
};

const ENUM: &str = indoc! {r#"
    <header>

    <comment>public enum <name> {

    <values>

        private final int code;
        private final String desc;

        <name>(int code, String desc) {
            this.code = code;
            this.desc = desc;
        }

        public int getCode() {
            return this.code;
        }

        public String getDesc() {
            return this.desc;
        }

        public static <name> fromCode(int code) {
            for (<name> value : values()) {
                if (value.code == code) {
                    return value;
                }
            }
            return null;
        }
    }
"#};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDescriptor {
    pub name: String,
    /// Declaration index, not the wire number.
    pub code: usize,
    /// The value's comment, or its name.
    pub desc: String,
    pub comment: String,
}

impl EnumValueDescriptor {
    pub fn new(value: &EnumValue) -> Self {
        let desc = if value.comments.is_empty() {
            value.name.clone()
        } else {
            value.comments.clone()
        };

        Self {
            name: value.name.clone(),
            code: value.index,
            desc,
            comment: value.comments.clone(),
        }
    }
}

#[derive(Debug)]
pub struct EnumTemplate {
    pub package_name: String,
    pub enum_name: String,
    pub comment: String,
    pub values: Vec<EnumValueDescriptor>,
}

impl EnumTemplate {
    pub fn new(enumeration: &Enum) -> Template {
        Template::Enum(EnumTemplate {
            package_name: enumeration.java_package.clone(),
            enum_name: enumeration.name.clone(),
            comment: enumeration.comments.clone(),
            values: enumeration
                .values
                .iter()
                .map(EnumValueDescriptor::new)
                .collect(),
        })
    }

    pub fn render(&self) -> String {
        let header = header(&self.package_name, &[]);
        let comment = type_comment(&self.comment);
        let values = self.render_values();

        fill(
            ENUM,
            &[
                ("<header>", header.as_str()),
                ("<comment>", comment.as_str()),
                ("<values>", values.as_str()),
                ("<name>", self.enum_name.as_str()),
            ],
        )
    }

    fn render_values(&self) -> String {
        let mut values = StringBuilder::with_depth(1);

        if self.values.is_empty() {
            values.push(";");
        }

        for (index, value) in self.values.iter().enumerate() {
            let terminator = if index + 1 == self.values.len() { ';' } else { ',' };
            values.doc_comment(&value.comment);
            values.push(format!(
                "{}({}, {}){terminator}",
                value.name,
                value.code,
                java_string_literal(&value.desc)
            ));
        }

        values.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Enum {
        Enum {
            name: "Status".to_owned(),
            full_name: "acme.User.Status".to_owned(),
            java_package: "com.acme.dto".to_owned(),
            comments: String::new(),
            values: vec![
                EnumValue {
                    name: "ACTIVE".to_owned(),
                    index: 0,
                    comments: "Can sign in".to_owned(),
                },
                EnumValue {
                    name: "BANNED".to_owned(),
                    index: 1,
                    comments: String::new(),
                },
            ],
        }
    }

    fn template(enumeration: &Enum) -> EnumTemplate {
        match EnumTemplate::new(enumeration) {
            Template::Enum(template) => template,
            _ => unreachable!("enums build enum templates"),
        }
    }

    #[test]
    fn values_fall_back_to_their_name() {
        let template = template(&status());

        assert_eq!(
            template.values,
            [
                EnumValueDescriptor {
                    name: "ACTIVE".to_owned(),
                    code: 0,
                    desc: "Can sign in".to_owned(),
                    comment: "Can sign in".to_owned(),
                },
                EnumValueDescriptor {
                    name: "BANNED".to_owned(),
                    code: 1,
                    desc: "BANNED".to_owned(),
                    comment: String::new(),
                },
            ]
        );
    }

    #[test]
    fn renders_enum() {
        let rendered = EnumTemplate::new(&status()).render();

        assert!(rendered.starts_with("package com.acme.dto;\n\npublic enum Status {\n"));
        assert!(rendered.contains(indoc! {r#"
            /**
                 * Can sign in
                 */
                ACTIVE(0, "Can sign in"),
                BANNED(1, "BANNED");"#}));
        assert!(rendered.contains("    public static Status fromCode(int code) {"));
        assert!(rendered.contains("        for (Status value : values()) {"));
        assert!(rendered.ends_with("    }\n}"));
    }

    #[test]
    fn empty_enum_still_compiles() {
        let empty = Enum {
            name: "Nothing".to_owned(),
            values: Vec::new(),
            ..status()
        };

        assert!(EnumTemplate::new(&empty)
            .render()
            .contains("public enum Nothing {\n\n    ;\n"));
    }

    #[test]
    fn file_path_uses_dto_package() {
        assert_eq!(
            EnumTemplate::new(&status()).file_path(),
            "com/acme/dto/Status.java"
        );
    }

    #[test]
    fn comments_keep_placeholder_like_text() {
        let mut enumeration = status();
        enumeration.comments = "Lifecycle of <name>.".to_owned();
        enumeration.values[1].comments = "Set by <values> sync".to_owned();

        let rendered = EnumTemplate::new(&enumeration).render();
        assert!(rendered.contains("/**\n * Lifecycle of <name>.\n */\npublic enum Status {"));
        assert!(rendered.contains("    BANNED(1, \"Set by <values> sync\");"));
    }
}
