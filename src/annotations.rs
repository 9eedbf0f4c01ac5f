//! `google.api` annotations and the descriptor paths that carry them.
//!
//! `prost-types` discards extension fields when it decodes `MethodOptions`
//! and `FieldOptions`, so the request bytes are decoded a second time into
//! these narrow mirrors. Only the fields on the way to an extension are
//! declared; everything else is skipped by the decoder.

/// `google.api.HttpRule`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HttpRule {
    #[prost(string, tag = "1")]
    pub selector: ::prost::alloc::string::String,
    #[prost(oneof = "http_rule::Pattern", tags = "2, 3, 4, 5, 6, 8")]
    pub pattern: ::core::option::Option<http_rule::Pattern>,
    #[prost(string, tag = "7")]
    pub body: ::prost::alloc::string::String,
    #[prost(string, tag = "12")]
    pub response_body: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "11")]
    pub additional_bindings: ::prost::alloc::vec::Vec<HttpRule>,
}

pub mod http_rule {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Pattern {
        #[prost(string, tag = "2")]
        Get(::prost::alloc::string::String),
        #[prost(string, tag = "3")]
        Put(::prost::alloc::string::String),
        #[prost(string, tag = "4")]
        Post(::prost::alloc::string::String),
        #[prost(string, tag = "5")]
        Delete(::prost::alloc::string::String),
        #[prost(string, tag = "6")]
        Patch(::prost::alloc::string::String),
        #[prost(message, tag = "8")]
        Custom(super::CustomHttpPattern),
    }
}

/// `google.api.CustomHttpPattern`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomHttpPattern {
    #[prost(string, tag = "1")]
    pub kind: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub path: ::prost::alloc::string::String,
}

/// `google.api.FieldBehavior`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FieldBehavior {
    Unspecified = 0,
    Optional = 1,
    Required = 2,
    OutputOnly = 3,
    InputOnly = 4,
    Immutable = 5,
    UnorderedList = 6,
    NonEmptyDefault = 7,
    Identifier = 8,
}

/// `CodeGeneratorRequest`, down to the options of methods and fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedRequest {
    #[prost(message, repeated, tag = "15")]
    pub proto_file: ::prost::alloc::vec::Vec<AnnotatedFile>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedFile {
    #[prost(string, optional, tag = "1")]
    pub name: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, repeated, tag = "4")]
    pub message_type: ::prost::alloc::vec::Vec<AnnotatedMessage>,
    #[prost(message, repeated, tag = "6")]
    pub service: ::prost::alloc::vec::Vec<AnnotatedService>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedMessage {
    #[prost(message, repeated, tag = "2")]
    pub field: ::prost::alloc::vec::Vec<AnnotatedField>,
    #[prost(message, repeated, tag = "3")]
    pub nested_type: ::prost::alloc::vec::Vec<AnnotatedMessage>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedField {
    #[prost(message, optional, tag = "8")]
    pub options: ::core::option::Option<FieldOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldOptions {
    #[prost(enumeration = "FieldBehavior", repeated, packed = "false", tag = "1052")]
    pub field_behavior: ::prost::alloc::vec::Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedService {
    #[prost(message, repeated, tag = "2")]
    pub method: ::prost::alloc::vec::Vec<AnnotatedMethod>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnnotatedMethod {
    #[prost(message, optional, tag = "4")]
    pub options: ::core::option::Option<MethodOptions>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MethodOptions {
    #[prost(message, optional, tag = "72295728")]
    pub http: ::core::option::Option<HttpRule>,
}

impl AnnotatedField {
    pub fn is_required(&self) -> bool {
        self.options.as_ref().is_some_and(|options| {
            options
                .field_behavior
                .iter()
                .any(|&behavior| behavior == FieldBehavior::Required as i32)
        })
    }
}

impl AnnotatedMethod {
    pub fn http_rule(&self) -> Option<&HttpRule> {
        self.options.as_ref().and_then(|options| options.http.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn recovers_extensions_skipped_by_prost_types() {
        let request = AnnotatedRequest {
            proto_file: vec![AnnotatedFile {
                name: Some("users.proto".to_owned()),
                message_type: vec![AnnotatedMessage {
                    field: vec![
                        AnnotatedField {
                            options: Some(FieldOptions {
                                field_behavior: vec![
                                    FieldBehavior::OutputOnly as i32,
                                    FieldBehavior::Required as i32,
                                ],
                            }),
                        },
                        AnnotatedField { options: None },
                    ],
                    nested_type: Vec::new(),
                }],
                service: vec![AnnotatedService {
                    method: vec![AnnotatedMethod {
                        options: Some(MethodOptions {
                            http: Some(HttpRule {
                                pattern: Some(http_rule::Pattern::Get("/v1/users/{id}".to_owned())),
                                ..Default::default()
                            }),
                        }),
                    }],
                }],
            }],
        };

        let bytes = request.encode_to_vec();

        // The standard descriptor types still read the same bytes.
        let standard = prost_types::compiler::CodeGeneratorRequest::decode(bytes.as_slice()).unwrap();
        assert_eq!(standard.proto_file[0].name(), "users.proto");

        let decoded = AnnotatedRequest::decode(bytes.as_slice()).unwrap();
        let file = &decoded.proto_file[0];
        assert!(file.message_type[0].field[0].is_required());
        assert!(!file.message_type[0].field[1].is_required());
        assert_eq!(
            file.service[0].method[0].http_rule().unwrap().pattern,
            Some(http_rule::Pattern::Get("/v1/users/{id}".to_owned()))
        );
    }
}
