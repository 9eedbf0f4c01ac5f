//! Generation units: each one knows where its Java file goes and how to
//! render it.

mod application;
mod controller;
mod enumeration;
mod message;

pub use application::ApplicationTemplate;
pub use controller::ControllerTemplate;
pub use enumeration::EnumTemplate;
pub use message::MessageTemplate;

use prost_types::compiler::Version;

use crate::{
    naming::package_to_path,
    options::Options,
    schema::{self, qualify},
    string_builder::StringBuilder,
};

pub enum Template {
    Application(ApplicationTemplate),
    Message(MessageTemplate),
    /// A message bean that also carries oneof case enums.
    OneofMessage(MessageTemplate),
    Enum(EnumTemplate),
    Controller(ControllerTemplate),
}

impl Template {
    pub fn file_path(&self) -> String {
        match self {
            Template::Application(application) => {
                java_file_path(&application.package_name, &application.service_name)
            }
            Template::Message(bean) | Template::OneofMessage(bean) => {
                java_file_path(&bean.package_name, &bean.bean_name)
            }
            Template::Enum(enumeration) => {
                java_file_path(&enumeration.package_name, &enumeration.enum_name)
            }
            Template::Controller(controller) => {
                java_file_path(&controller.package_name, &controller.controller_name)
            }
        }
    }

    pub fn render(&self) -> String {
        let code = match self {
            Template::Application(application) => application.render(),
            Template::Message(bean) => bean.render(),
            Template::OneofMessage(bean) => bean.render_with_oneofs(),
            Template::Enum(enumeration) => enumeration.render(),
            Template::Controller(controller) => controller.render(),
        };

        code.trim().to_owned()
    }
}

fn java_file_path(package: &str, name: &str) -> String {
    if package.is_empty() {
        format!("{name}.java")
    } else {
        format!("{}/{name}.java", package_to_path(package))
    }
}

pub fn application_package_name(file: &schema::File, options: &Options) -> String {
    qualify(&file.java_package, &options.service_package)
}

pub fn controller_package_name(file: &schema::File, options: &Options) -> String {
    qualify(&file.java_package, &options.controller_package)
}

/// Name of the service interface: `Greeter` becomes `GreeterService`,
/// `UserService` stays as is.
pub fn application_service_name(service: &schema::Service) -> String {
    if service.name.ends_with("Service") {
        service.name.clone()
    } else {
        format!("{}Service", service.name)
    }
}

/// `UserService` and `User` both become `UserController`.
pub fn controller_name(service: &schema::Service) -> String {
    let base = service
        .name
        .strip_suffix("Service")
        .unwrap_or(&service.name);
    format!("{base}Controller")
}

pub fn application_import_path(
    file: &schema::File,
    service: &schema::Service,
    options: &Options,
) -> String {
    qualify(
        &application_package_name(file, options),
        &application_service_name(service),
    )
}

/// `import` lines for everything outside `package` and `java.lang`.
fn import_lines(imports: &[String], package: &str) -> String {
    imports
        .iter()
        .filter(|import| {
            let owner = import.rsplit_once('.').map_or("", |(owner, _)| owner);
            owner != package && owner != "java.lang"
        })
        .map(|import| format!("import {import};"))
        .collect::<StringBuilder>()
        .build()
}

/// Leading comment of every generated file, naming this plugin's version and
/// the protoc that invoked it.
pub fn generated_banner(compiler_version: Option<&Version>) -> String {
    let protoc = match compiler_version {
        Some(version) => {
            let suffix = match version.suffix() {
                "" => String::new(),
                suffix => format!("-{suffix}"),
            };
            format!(
                "protoc v{}.{}.{}{suffix}",
                version.major(),
                version.minor(),
                version.patch()
            )
        }
        None => "protoc (unknown)".to_owned(),
    };

    [
        format!("// Code generated by {}. DO NOT EDIT.", env!("CARGO_PKG_NAME")),
        "// versions:".to_owned(),
        format!("// \t{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        format!("// \t{protoc}"),
    ]
    .join("\n")
}

/// Substitutes `<placeholder>`s in one left-to-right pass. Substituted text
/// is never scanned again, so comments may contain `<name>` and the like.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('<') {
        output.push_str(&rest[..start]);
        rest = &rest[start..];

        match values.iter().find(|(placeholder, _)| rest.starts_with(placeholder)) {
            Some((placeholder, value)) => {
                output.push_str(value);
                rest = &rest[placeholder.len()..];
            }
            None => {
                output.push('<');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Javadoc for a top-level declaration, followed by a newline when present.
fn type_comment(comment: &str) -> String {
    let mut builder = StringBuilder::new();
    builder.doc_comment(comment);
    let mut comment = builder.build();
    if !comment.is_empty() {
        comment.push('\n');
    }
    comment
}

/// `package` line followed by the import block, whichever are present.
fn header(package: &str, imports: &[String]) -> String {
    let mut sections = Vec::new();
    if !package.is_empty() {
        sections.push(format!("package {package};"));
    }

    let imports = import_lines(imports, package);
    if !imports.is_empty() {
        sections.push(imports);
    }

    sections.join("\n\n")
}
