use std::collections::{hash_map::Entry, HashMap};

use prost_types::compiler::{
    code_generator_response::{Feature, File},
    CodeGeneratorRequest, CodeGeneratorResponse,
};

use crate::{
    annotations::AnnotatedRequest,
    error::{GenerateError, Result},
    options::Options,
    schema,
    templates::{
        generated_banner, ApplicationTemplate, ControllerTemplate, EnumTemplate, MessageTemplate,
        Template,
    },
    walker::walk,
};

/// Runs the whole pipeline; failures are reported through the response's
/// `error` field, as protoc expects from a plugin.
pub fn generate_response(
    request: &CodeGeneratorRequest,
    annotations: &AnnotatedRequest,
) -> CodeGeneratorResponse {
    match generate(request, annotations) {
        Ok(files) => CodeGeneratorResponse {
            error: None,
            supported_features: Some(Feature::Proto3Optional as u64),
            file: files,
        },

        Err(error) => CodeGeneratorResponse {
            error: Some(error.to_string()),
            supported_features: Some(Feature::Proto3Optional as u64),
            file: Vec::new(),
        },
    }
}

pub fn generate(request: &CodeGeneratorRequest, annotations: &AnnotatedRequest) -> Result<Vec<File>> {
    let options = Options::parse(request.parameter.as_deref())?;
    let files = walk(request, annotations, &options)?;
    let banner = generated_banner(request.compiler_version.as_ref());

    // Output path -> the schema type that claimed it first.
    let mut outputs: HashMap<String, &str> = HashMap::new();
    let mut generated = Vec::new();

    for file in &files {
        for (template, source) in file_templates(file, &options)? {
            let name = template.file_path();
            match outputs.entry(name.clone()) {
                Entry::Occupied(first) => {
                    return Err(GenerateError::DuplicateOutput {
                        path: name,
                        first: (*first.get()).to_owned(),
                        second: source.to_owned(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(source);
                }
            }

            if options.verbose {
                eprintln!("Generating {name} from {}", file.name);
            }

            generated.push(File {
                name: Some(name),
                content: Some(format!("{banner}\n\n{}", template.render())),
                ..Default::default()
            });
        }
    }

    Ok(generated)
}

/// Beans and enums first, then the interface and controller of each service.
/// Each template comes with the full name of the type it was built from.
fn file_templates<'a>(
    file: &'a schema::File,
    options: &Options,
) -> Result<Vec<(Template, &'a str)>> {
    let mut templates = Vec::new();

    for message in &file.messages {
        templates.push((MessageTemplate::new(message), message.full_name.as_str()));
    }
    for enumeration in &file.enums {
        templates.push((EnumTemplate::new(enumeration), enumeration.full_name.as_str()));
    }

    for service in &file.services {
        templates.push((
            ApplicationTemplate::new(file, service, options)?,
            service.full_name.as_str(),
        ));
        templates.push((
            ControllerTemplate::new(file, service, options)?,
            service.full_name.as_str(),
        ));
    }

    Ok(templates)
}
