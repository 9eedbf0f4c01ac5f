//! Owned view of the parts of a compiled `.proto` schema the generator reads.
//!
//! Produced by [`crate::walker`] from the plugin request and consumed by the
//! descriptor builders. Nested messages and enums are flattened into their
//! file, and every type reference already knows the Java package it lives in.

use std::fmt;

use crate::annotations::HttpRule;

#[derive(Debug, Clone, Default)]
pub struct File {
    /// Path of the `.proto` file, e.g. `acme/users.proto`.
    pub name: String,
    /// Base Java package every generated class of this file derives from.
    pub java_package: String,
    pub services: Vec<Service>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
}

#[derive(Debug, Clone, Default)]
pub struct Service {
    pub name: String,
    pub full_name: String,
    pub comments: String,
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, Default)]
pub struct Method {
    pub name: String,
    pub full_name: String,
    pub comments: String,
    pub input: Message,
    pub output: Message,
    pub http_rule: Option<HttpRule>,
}

#[derive(Debug, Clone, Default)]
pub struct Message {
    pub name: String,
    pub full_name: String,
    /// `.proto` file the message is declared in.
    pub file: String,
    /// Package the message's Java class is imported from.
    pub java_package: String,
    pub comments: String,
    pub fields: Vec<Field>,
    pub oneofs: Vec<Oneof>,
}

impl Message {
    pub fn field(&self, wire_name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.wire_name == wire_name)
    }

    pub fn import_path(&self) -> String {
        qualify(&self.java_package, &self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Oneof {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub wire_name: String,
    pub kind: Kind,
    pub cardinality: Cardinality,
    /// Carries the `google.api.field_behavior` REQUIRED annotation.
    pub required: bool,
    pub comments: String,
}

#[cfg(test)]
impl Field {
    pub fn new(wire_name: impl Into<String>, kind: Kind) -> Self {
        Self {
            wire_name: wire_name.into(),
            kind,
            cardinality: Cardinality::Single,
            required: false,
            comments: String::new(),
        }
    }

    pub fn repeated(mut self) -> Self {
        self.cardinality = Cardinality::List;
        self
    }

    pub fn map(mut self, key: Kind, value: Kind) -> Self {
        self.cardinality = Cardinality::Map {
            key: Box::new(key),
            value: Box::new(value),
        };
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    List,
    Map { key: Box<Kind>, value: Box<Kind> },
}

/// A field's declared type. For maps this is the (synthetic) entry message;
/// key and value live in [`Cardinality::Map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message(TypeRef),
    Bytes,
    Uint32,
    Enum(TypeRef),
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    /// A type number this generator doesn't know about.
    Unknown(i32),
}

impl Kind {
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Kind::Message(type_ref) | Kind::Enum(type_ref) => Some(type_ref),
            _ => None,
        }
    }

    pub fn is_message(&self) -> bool {
        matches!(self, Kind::Message(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Double => f.write_str("double"),
            Kind::Float => f.write_str("float"),
            Kind::Int64 => f.write_str("int64"),
            Kind::Uint64 => f.write_str("uint64"),
            Kind::Int32 => f.write_str("int32"),
            Kind::Fixed64 => f.write_str("fixed64"),
            Kind::Fixed32 => f.write_str("fixed32"),
            Kind::Bool => f.write_str("bool"),
            Kind::String => f.write_str("string"),
            Kind::Group => f.write_str("group"),
            Kind::Message(type_ref) => write!(f, "message {}", type_ref.full_name),
            Kind::Bytes => f.write_str("bytes"),
            Kind::Uint32 => f.write_str("uint32"),
            Kind::Enum(type_ref) => write!(f, "enum {}", type_ref.full_name),
            Kind::Sfixed32 => f.write_str("sfixed32"),
            Kind::Sfixed64 => f.write_str("sfixed64"),
            Kind::Sint32 => f.write_str("sint32"),
            Kind::Sint64 => f.write_str("sint64"),
            Kind::Unknown(number) => write!(f, "{number}"),
        }
    }
}

/// Reference to a message or enum declared somewhere in the request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeRef {
    /// Declared (unqualified) name.
    pub name: String,
    /// Fully-qualified schema name without the leading dot.
    pub full_name: String,
    pub java_package: String,
}

impl TypeRef {
    pub fn import_path(&self) -> String {
        qualify(&self.java_package, &self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Enum {
    pub name: String,
    pub full_name: String,
    pub java_package: String,
    pub comments: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Default)]
pub struct EnumValue {
    pub name: String,
    /// Declaration position within the enum.
    pub index: usize,
    pub comments: String,
}

/// Joins a package and a name, skipping the dot for the default package.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_owned()
    } else {
        format!("{package}.{name}")
    }
}
