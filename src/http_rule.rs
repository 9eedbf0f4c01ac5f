//! Splits a request message into path, query and body parameters according
//! to its `google.api.http` binding.

use std::fmt;

use crate::{
    annotations::{http_rule::Pattern, HttpRule},
    descriptors::{FieldDescriptor, MethodDescriptor},
    error::{GenerateError, Result},
    java_kind::java_type,
    naming::{lcfirst, ucfirst},
    path_template::{mapping_path, parse_path_vars, PathVar},
    schema::{Message, Method},
};

const WILDCARD: &str = "*";

/// Constants of Spring's `RequestMethod` enum.
const REQUEST_METHODS: [&str; 8] = [
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "TRACE",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Custom(String),
}

impl HttpMethod {
    pub fn from_rule(rule: &HttpRule) -> Self {
        match &rule.pattern {
            Some(Pattern::Get(_)) => HttpMethod::Get,
            Some(Pattern::Put(_)) => HttpMethod::Put,
            Some(Pattern::Post(_)) => HttpMethod::Post,
            Some(Pattern::Delete(_)) => HttpMethod::Delete,
            Some(Pattern::Patch(_)) => HttpMethod::Patch,
            Some(Pattern::Custom(custom)) => HttpMethod::Custom(custom.kind.clone()),
            None => HttpMethod::Post,
        }
    }

    /// Spring request-mapping annotation for `path`.
    pub fn mapping_annotation(&self, path: &str) -> String {
        match self {
            HttpMethod::Custom(kind) => format!(
                "@RequestMapping(value = \"{path}\", method = RequestMethod.{})",
                kind.to_uppercase()
            ),
            standard => format!(
                "@{}Mapping(\"{path}\")",
                ucfirst(&standard.to_string().to_lowercase())
            ),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => f.write_str("GET"),
            HttpMethod::Put => f.write_str("PUT"),
            HttpMethod::Post => f.write_str("POST"),
            HttpMethod::Delete => f.write_str("DELETE"),
            HttpMethod::Patch => f.write_str("PATCH"),
            HttpMethod::Custom(kind) => f.write_str(kind),
        }
    }
}

pub fn http_path(rule: &HttpRule) -> &str {
    match &rule.pattern {
        Some(Pattern::Get(path))
        | Some(Pattern::Put(path))
        | Some(Pattern::Post(path))
        | Some(Pattern::Delete(path))
        | Some(Pattern::Patch(path)) => path,
        Some(Pattern::Custom(custom)) => &custom.path,
        None => "",
    }
}

/// A parameter of a generated controller handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parameter {
    pub annotation: String,
    pub r#type: String,
    pub name: String,
    pub required: bool,
    /// For requests, bound from the HTTP body. For responses, a single field
    /// of the response message is returned instead of the whole message.
    pub has_body: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRuleDescriptor {
    pub method: MethodDescriptor,
    pub http_method: HttpMethod,
    pub http_path: String,
    pub request_message: Parameter,
    pub request_body: Option<Parameter>,
    pub response_body: Parameter,
    pub path_params: Vec<Parameter>,
    pub query_params: Vec<Parameter>,
    /// Path parameters, then query parameters, then the body.
    pub params: Vec<Parameter>,
    pub is_wildcard: bool,
}

impl HttpRuleDescriptor {
    pub fn new(method: &Method) -> Result<Self> {
        // Without a binding the whole request is POSTed to the gRPC-style path.
        let fallback;
        let rule = match &method.http_rule {
            Some(rule) => rule,
            None => {
                fallback = default_rule(method);
                &fallback
            }
        };

        let http_method = HttpMethod::from_rule(rule);
        if let HttpMethod::Custom(kind) = &http_method {
            if !REQUEST_METHODS.contains(&kind.to_uppercase().as_str()) {
                return Err(GenerateError::UnsupportedHttpMethod {
                    kind: kind.clone(),
                    method: method.full_name.clone(),
                });
            }
        }

        let http_path = http_path(rule);
        let path_vars = parse_path_vars(http_path)?;

        let path_params = build_path_params(&path_vars, &method.input)?;
        let query_params = build_query_params(&method.input, rule, &path_vars);
        let request_body = build_request_body(&method.input, rule)?;

        let mut params = Vec::with_capacity(path_params.len() + query_params.len() + 1);
        params.extend(path_params.iter().cloned());
        params.extend(query_params.iter().cloned());
        params.extend(request_body.iter().cloned());

        Ok(Self {
            method: MethodDescriptor::new(method),
            http_method,
            http_path: http_path.to_owned(),
            request_message: Parameter {
                r#type: method.input.name.clone(),
                name: lcfirst(&method.input.name),
                ..Default::default()
            },
            request_body,
            response_body: build_response_body(&method.output, rule)?,
            path_params,
            query_params,
            params,
            is_wildcard: rule.body == WILDCARD,
        })
    }

    pub fn mapping_annotation(&self) -> String {
        self.http_method
            .mapping_annotation(&mapping_path(&self.http_path))
    }
}

fn default_rule(method: &Method) -> HttpRule {
    let path = match method.full_name.rsplit_once('.') {
        Some((service, name)) => format!("/{service}/{name}"),
        None => format!("/{}", method.full_name),
    };

    HttpRule {
        pattern: Some(Pattern::Post(path)),
        body: WILDCARD.to_owned(),
        ..Default::default()
    }
}

pub fn build_path_params(path_vars: &[PathVar], message: &Message) -> Result<Vec<Parameter>> {
    path_vars
        .iter()
        .map(|var| {
            let field = message
                .field(&var.name)
                .ok_or_else(|| GenerateError::PathParamNotFound {
                    file: message.file.clone(),
                    param: var.name.clone(),
                    message: message.name.clone(),
                })?;

            Ok(Parameter {
                annotation: format!("@PathVariable(\"{}\")", var.name),
                r#type: java_type(field),
                name: var.name.clone(),
                required: true,
                has_body: false,
            })
        })
        .collect()
}

pub fn build_query_params(message: &Message, rule: &HttpRule, path_vars: &[PathVar]) -> Vec<Parameter> {
    if rule.body == WILDCARD {
        return Vec::new();
    }

    message
        .fields
        .iter()
        .filter(|field| {
            !path_vars.iter().any(|var| var.name == field.wire_name) && field.wire_name != rule.body
        })
        .map(|field| {
            let descriptor = FieldDescriptor::new(field);
            let annotation = if descriptor.is_required {
                format!("@RequestParam(name = \"{}\", required = true)", field.wire_name)
            } else {
                format!("@RequestParam(name = \"{}\")", field.wire_name)
            };

            Parameter {
                annotation,
                r#type: descriptor.field_type,
                name: descriptor.field_name,
                required: descriptor.is_required,
                has_body: false,
            }
        })
        .collect()
}

pub fn build_request_body(message: &Message, rule: &HttpRule) -> Result<Option<Parameter>> {
    let param = match rule.body.as_str() {
        "" => return Ok(None),
        WILDCARD => Parameter {
            annotation: "@RequestBody".to_owned(),
            r#type: message.name.clone(),
            name: lcfirst(&message.name),
            required: true,
            has_body: true,
        },
        body => {
            let field = message
                .field(body)
                .ok_or_else(|| GenerateError::BodyFieldNotFound {
                    field: body.to_owned(),
                    message: message.name.clone(),
                })?;

            if !field.kind.is_message() {
                return Err(GenerateError::BodyFieldNotMessage {
                    field: body.to_owned(),
                    message: message.name.clone(),
                });
            }

            Parameter {
                annotation: "@RequestBody".to_owned(),
                r#type: java_type(field),
                name: body.to_owned(),
                required: true,
                has_body: true,
            }
        }
    };

    Ok(Some(param))
}

pub fn build_response_body(message: &Message, rule: &HttpRule) -> Result<Parameter> {
    match rule.response_body.as_str() {
        "" | WILDCARD => Ok(Parameter {
            r#type: message.name.clone(),
            name: lcfirst(&message.name),
            ..Default::default()
        }),
        response_body => {
            let field = message.field(response_body).ok_or_else(|| {
                GenerateError::ResponseBodyFieldNotFound {
                    field: response_body.to_owned(),
                    message: message.name.clone(),
                }
            })?;

            Ok(Parameter {
                r#type: java_type(field),
                name: response_body.to_owned(),
                has_body: true,
                ..Default::default()
            })
        }
    }
}
