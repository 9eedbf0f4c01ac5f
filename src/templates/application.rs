use std::collections::HashMap;

use indoc::indoc;

use super::{
    application_package_name, application_service_name, fill, header, type_comment, Template,
};
use crate::{
    descriptors::MethodDescriptor,
    error::{GenerateError, Result},
    naming::remove_duplicates,
    options::Options,
    schema::{File, Service},
    string_builder::StringBuilder,
};

const INTERFACE: &str = indoc! {r#"
    <header>

    <comment>public interface <name> {

    <methods>
    }
"#};

/// The service interface a controller delegates to.
#[derive(Debug)]
pub struct ApplicationTemplate {
    pub package_name: String,
    pub service_name: String,
    pub comment: String,
    pub methods: Vec<MethodDescriptor>,
    pub imports: Vec<String>,
}

impl ApplicationTemplate {
    pub fn new(file: &File, service: &Service, options: &Options) -> Result<Template> {
        let methods: Vec<_> = service.methods.iter().map(MethodDescriptor::new).collect();

        // `GetUser` and `getUser` are distinct RPCs but the same Java method.
        let mut by_name: HashMap<&str, &MethodDescriptor> = HashMap::with_capacity(methods.len());
        for method in &methods {
            if let Some(first) = by_name.insert(&method.name, method) {
                return Err(GenerateError::DuplicateMethod {
                    service: service.full_name.clone(),
                    first: first.original_name.clone(),
                    second: method.original_name.clone(),
                    name: method.name.clone(),
                });
            }
        }

        let imports = remove_duplicates(
            service
                .methods
                .iter()
                .flat_map(|method| [method.input.import_path(), method.output.import_path()]),
        );

        Ok(Template::Application(ApplicationTemplate {
            package_name: application_package_name(file, options),
            service_name: application_service_name(service),
            comment: service.comments.clone(),
            methods,
            imports,
        }))
    }

    pub fn render(&self) -> String {
        let header = header(&self.package_name, &self.imports);
        let comment = type_comment(&self.comment);
        let methods = self.render_methods();

        fill(
            INTERFACE,
            &[
                ("<header>", header.as_str()),
                ("<comment>", comment.as_str()),
                ("<name>", self.service_name.as_str()),
                ("<methods>", methods.as_str()),
            ],
        )
    }

    fn render_methods(&self) -> String {
        let mut methods = StringBuilder::with_depth(1);

        for (index, method) in self.methods.iter().enumerate() {
            if index > 0 {
                methods.blank();
            }

            if method.has_comment() {
                methods.doc_comment(&method.comment);
            }
            methods.push(format!(
                "{} {}({} request);",
                method.response, method.name, method.request
            ));
        }

        methods.build()
    }
}
