use indoc::indoc;

use super::{fill, header, type_comment, Template};
use crate::{
    descriptors::{FieldDescriptor, OneofDescriptor},
    java_kind::field_imports,
    naming::{remove_duplicates, ucfirst},
    schema::Message,
    string_builder::StringBuilder,
};

const BEAN: &str = indoc! {r#"
    <header>

    <comment>public class <name> implements Serializable {
    <body>}
"#};

const FRAMEWORK_IMPORTS: [&str; 1] = ["java.io.Serializable"];
const NOT_NULL_IMPORT: &str = "jakarta.validation.constraints.NotNull";

/// A DTO class for one message.
#[derive(Debug)]
pub struct MessageTemplate {
    pub package_name: String,
    pub bean_name: String,
    pub comment: String,
    pub fields: Vec<FieldDescriptor>,
    pub imports: Vec<String>,
    pub oneofs: Vec<OneofDescriptor>,
}

impl MessageTemplate {
    pub fn new(message: &Message) -> Template {
        let fields = message.fields.iter().map(FieldDescriptor::new).collect();
        let imports = remove_duplicates(
            message
                .fields
                .iter()
                .flat_map(|field| field_imports(field, &message.java_package)),
        );
        let oneofs: Vec<_> = message.oneofs.iter().map(OneofDescriptor::new).collect();

        let bean = MessageTemplate {
            package_name: message.java_package.clone(),
            bean_name: message.name.clone(),
            comment: message.comments.clone(),
            fields,
            imports,
            oneofs,
        };

        if bean.oneofs.is_empty() {
            Template::Message(bean)
        } else {
            Template::OneofMessage(bean)
        }
    }

    pub fn render(&self) -> String {
        self.render_bean(false)
    }

    pub fn render_with_oneofs(&self) -> String {
        self.render_bean(true)
    }

    fn render_bean(&self, with_oneofs: bool) -> String {
        let mut imports: Vec<String> = FRAMEWORK_IMPORTS.iter().map(|&i| i.to_owned()).collect();
        if self.fields.iter().any(|field| field.is_required) {
            imports.push(NOT_NULL_IMPORT.to_owned());
        }
        imports.extend(self.imports.iter().cloned());

        let mut sections = vec![self.render_fields()];
        if with_oneofs {
            sections.push(self.render_oneofs());
        }
        sections.push(self.render_accessors());
        sections.retain(|section| !section.is_empty());

        let body = if sections.is_empty() {
            String::new()
        } else {
            format!("\n{}\n", sections.join("\n\n"))
        };

        let header = header(&self.package_name, &imports);
        let comment = type_comment(&self.comment);

        fill(
            BEAN,
            &[
                ("<header>", header.as_str()),
                ("<comment>", comment.as_str()),
                ("<name>", self.bean_name.as_str()),
                ("<body>", body.as_str()),
            ],
        )
    }

    fn render_fields(&self) -> String {
        let mut fields = StringBuilder::with_depth(1);

        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                fields.blank();
            }

            if field.has_comment() {
                fields.doc_comment(&field.comment);
            }
            if field.is_required {
                fields.push("@NotNull");
            }
            fields.push(format!("private {} {};", field.field_type, field.field_name));
        }

        fields.build()
    }

    fn render_oneofs(&self) -> String {
        let mut oneofs = StringBuilder::with_depth(1);

        for (index, oneof) in self.oneofs.iter().enumerate() {
            if index > 0 {
                oneofs.blank();
            }

            oneofs.push(format!("public enum {} {{", oneof.enum_name));
            oneofs.indent();
            for case in &oneof.cases {
                oneofs.push(format!("{case},"));
            }
            oneofs.push(oneof.not_set);
            oneofs.dedent();
            oneofs.push("}");
            oneofs.blank();

            oneofs.push(format!(
                "public {} get{}Case() {{",
                oneof.enum_name,
                ucfirst(&oneof.field_name)
            ));
            oneofs.indent();
            for (field, case) in oneof.fields.iter().zip(&oneof.cases) {
                oneofs.push(format!("if (this.{} != null) {{", field.field_name));
                oneofs.indent();
                oneofs.push(format!("return {}.{case};", oneof.enum_name));
                oneofs.dedent();
                oneofs.push("}");
            }
            oneofs.push(format!("return {}.{};", oneof.enum_name, oneof.not_set));
            oneofs.dedent();
            oneofs.push("}");
        }

        oneofs.build()
    }

    fn render_accessors(&self) -> String {
        let mut accessors = StringBuilder::with_depth(1);

        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                accessors.blank();
            }

            let property = ucfirst(&field.field_name);
            accessors.push(format!("public {} get{property}() {{", field.field_type));
            accessors.indent();
            accessors.push(format!("return this.{};", field.field_name));
            accessors.dedent();
            accessors.push("}");
            accessors.blank();

            accessors.push(format!(
                "public void set{property}({} {}) {{",
                field.field_type, field.field_name
            ));
            accessors.indent();
            accessors.push(format!("this.{0} = {0};", field.field_name));
            accessors.dedent();
            accessors.push("}");
        }

        accessors.build()
    }
}
