use std::io::{Read, Write};

use color_eyre::{eyre::WrapErr, owo_colors::OwoColorize};
use prost::Message;

mod annotations;
mod descriptors;
mod error;
mod generator;
mod http_rule;
mod java_kind;
mod naming;
mod options;
mod path_template;
mod schema;
mod string_builder;
mod templates;
mod walker;


fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let stdin = std::io::stdin();
    let mut bytes: Vec<u8> = Vec::new();
    stdin
        .lock()
        .read_to_end(&mut bytes)
        .wrap_err("couldn't read to end of stdin")?;

    let request = prost_types::compiler::CodeGeneratorRequest::decode(bytes.as_slice()).wrap_err(
        "couldn't parse CodeGeneratorRequest, make sure you're using this as a plugin to protoc",
    )?;
    let annotations = annotations::AnnotatedRequest::decode(bytes.as_slice())
        .wrap_err("couldn't read google.api options from CodeGeneratorRequest")?;

    let response = generator::generate_response(&request, &annotations);
    if let Some(error) = &response.error {
        eprintln!("{} {error}", "Error:".red().bold());
    }

    let mut output = Vec::new();
    response
        .encode(&mut output)
        .wrap_err("couldn't encode CodeGeneratorResponse")?;

    std::io::stdout()
        .write_all(&output)
        .wrap_err("couldn't write to stdout")?;

    Ok(())
}
