use crate::{
    java_kind::java_type,
    naming::{lcfirst, member_name, type_name},
    schema::{Field, Kind, Method, Oneof},
};

/// Sentinel case rendered after the member cases of every oneof enum.
pub const ONEOF_NOT_SET: &str = "UNSPECIFIED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field_name: String,
    pub wire_name: String,
    pub field_type: String,
    pub comment: String,
    pub is_required: bool,
    /// Label for generated messages: the comment, or the field's name.
    pub i18n: String,
    /// Upper-cased wire name, used as enum constant.
    pub enum_name: String,
    /// Enum or message typed, as opposed to a scalar.
    pub is_object: bool,
}

impl FieldDescriptor {
    pub fn new(field: &Field) -> Self {
        let i18n = if field.comments.is_empty() {
            type_name(&field.wire_name)
        } else {
            field.comments.clone()
        };

        Self {
            field_name: member_name(&field.wire_name),
            wire_name: field.wire_name.clone(),
            field_type: java_type(field),
            comment: field.comments.clone(),
            is_required: field.required,
            i18n,
            enum_name: field.wire_name.to_uppercase(),
            is_object: matches!(field.kind, Kind::Enum(_) | Kind::Message(_)),
        }
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    /// Java method name: `GetUser` becomes `getUser`.
    pub name: String,
    /// Fully-qualified schema name, e.g. `acme.users.UserService.GetUser`.
    pub original_name: String,
    pub request: String,
    pub response: String,
    pub comment: String,
    pub i18n: String,
}

impl MethodDescriptor {
    pub fn new(method: &Method) -> Self {
        let declared = type_name(&method.name);
        let i18n = if method.comments.is_empty() {
            declared.clone()
        } else {
            method.comments.clone()
        };

        Self {
            name: lcfirst(&declared),
            original_name: method.full_name.clone(),
            request: method.input.name.clone(),
            response: method.output.name.clone(),
            comment: method.comments.clone(),
            i18n,
        }
    }

    pub fn has_comment(&self) -> bool {
        !self.comment.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofDescriptor {
    pub field_name: String,
    pub enum_name: String,
    /// One per member field, in declaration order.
    pub cases: Vec<String>,
    pub fields: Vec<FieldDescriptor>,
    pub not_set: &'static str,
}

impl OneofDescriptor {
    pub fn new(oneof: &Oneof) -> Self {
        let fields: Vec<_> = oneof.fields.iter().map(FieldDescriptor::new).collect();

        Self {
            field_name: member_name(&oneof.name),
            enum_name: format!("Oneof{}", type_name(&oneof.name)),
            cases: fields.iter().map(|field| field.enum_name.clone()).collect(),
            fields,
            not_set: ONEOF_NOT_SET,
        }
    }
}
