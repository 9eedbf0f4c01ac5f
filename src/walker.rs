//! Turns the plugin request into [`schema`] objects.

use std::collections::{HashMap, HashSet};

use prost_types::{
    compiler::CodeGeneratorRequest,
    field_descriptor_proto::{Label, Type},
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
};

use crate::{
    annotations::{AnnotatedFile, AnnotatedMessage, AnnotatedRequest},
    error::{GenerateError, Result},
    naming::trim_comments,
    options::Options,
    schema::{self, Cardinality, Kind, TypeRef},
};

// Field numbers inside descriptor.proto, used to address SourceCodeInfo locations.
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_ENUM_TYPE: i32 = 5;
const FILE_SERVICE: i32 = 6;
const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED_TYPE: i32 = 3;
const MESSAGE_ENUM_TYPE: i32 = 4;
const ENUM_VALUE: i32 = 2;
const SERVICE_METHOD: i32 = 2;

#[derive(Debug)]
struct MapType {
    key: FieldDescriptorProto,
    value: FieldDescriptorProto,
}

#[derive(Debug)]
struct Export {
    name: String,
    java_package: String,
    map: Option<MapType>,
}

/// Every message and enum of the request, keyed by fully-qualified name.
type TypeRegistry = HashMap<String, Export>;

/// Builds the schema of every file protoc asked us to generate.
pub fn walk(
    request: &CodeGeneratorRequest,
    annotations: &AnnotatedRequest,
    options: &Options,
) -> Result<Vec<schema::File>> {
    let generated: HashSet<&str> = request.file_to_generate.iter().map(String::as_str).collect();

    let annotated_files: HashMap<&str, &AnnotatedFile> = annotations
        .proto_file
        .iter()
        .filter_map(|file| Some((file.name.as_deref()?, file)))
        .collect();

    let walkers = request
        .proto_file
        .iter()
        .map(|file| {
            let is_generated = generated.contains(file.name());
            FileWalker {
                file,
                annotated: annotated_files.get(file.name()).copied(),
                java_package: base_package(file, options, is_generated),
                dto_package: dto_package(file, options, is_generated),
                comments: collect_comments(file),
                is_generated,
            }
        })
        .collect::<Vec<_>>();

    let registry = create_type_registry(&walkers);

    // Request and response messages may live in imported files, so every
    // message is converted before services are resolved.
    let mut messages = HashMap::new();
    let mut files = Vec::new();
    for walker in &walkers {
        let file_messages = walker.messages(&registry)?;
        for message in &file_messages {
            messages.insert(message.full_name.clone(), message.clone());
        }

        if walker.is_generated {
            files.push(schema::File {
                name: walker.file.name().to_owned(),
                java_package: walker.java_package.clone(),
                services: Vec::new(),
                messages: file_messages,
                enums: walker.enums(),
            });
        } else {
            eprintln!("Skipping {}, not listed for generation", walker.file.name());
        }
    }

    for (file, walker) in files
        .iter_mut()
        .zip(walkers.iter().filter(|walker| walker.is_generated))
    {
        file.services = walker.services(&messages)?;
    }

    Ok(files)
}

fn base_package(file: &FileDescriptorProto, options: &Options, is_generated: bool) -> String {
    if is_generated {
        if let Some(package) = &options.package {
            return package.clone();
        }
    }

    file.options
        .as_ref()
        .and_then(|file_options| file_options.java_package.clone())
        .unwrap_or_else(|| file.package().to_owned())
}

fn dto_package(file: &FileDescriptorProto, options: &Options, is_generated: bool) -> String {
    let java_package = file
        .options
        .as_ref()
        .and_then(|file_options| file_options.java_package.as_deref());

    match java_package {
        // Classes of files we don't generate (well-known types and friends)
        // come from their own Java package.
        Some(java_package) if !is_generated => java_package.to_owned(),
        _ => schema::qualify(
            &base_package(file, options, is_generated),
            &options.dto_package,
        ),
    }
}

fn collect_comments(file: &FileDescriptorProto) -> HashMap<Vec<i32>, String> {
    let Some(source_code_info) = &file.source_code_info else {
        return HashMap::new();
    };

    source_code_info
        .location
        .iter()
        .filter_map(|location| {
            let comments = trim_comments(location.leading_comments());
            (!comments.is_empty()).then(|| (location.path.clone(), comments))
        })
        .collect()
}

fn create_type_registry(walkers: &[FileWalker]) -> TypeRegistry {
    let mut registry = HashMap::new();

    for walker in walkers {
        let file = walker.file;

        for descriptor in &file.message_type {
            add_message_descriptors(descriptor, &mut registry, file.package(), &walker.dto_package);
        }

        for descriptor in &file.enum_type {
            add_enum_descriptor(descriptor, &mut registry, file.package(), &walker.dto_package);
        }
    }

    registry
}

fn add_message_descriptors(
    descriptor: &DescriptorProto,
    registry: &mut TypeRegistry,
    scope: &str,
    java_package: &str,
) {
    let full_name = schema::qualify(scope, descriptor.name());

    let is_map_entry = descriptor
        .options
        .as_ref()
        .is_some_and(|options| options.map_entry());
    let map = if is_map_entry {
        let entry_field = |number| descriptor.field.iter().find(|field| field.number() == number);
        match (entry_field(1), entry_field(2)) {
            (Some(key), Some(value)) => Some(MapType {
                key: key.clone(),
                value: value.clone(),
            }),
            _ => None,
        }
    } else {
        None
    };

    for nested_type in &descriptor.nested_type {
        add_message_descriptors(nested_type, registry, &full_name, java_package);
    }

    for nested_enum in &descriptor.enum_type {
        add_enum_descriptor(nested_enum, registry, &full_name, java_package);
    }

    registry.insert(
        full_name,
        Export {
            name: descriptor.name().to_owned(),
            java_package: java_package.to_owned(),
            map,
        },
    );
}

fn add_enum_descriptor(
    descriptor: &EnumDescriptorProto,
    registry: &mut TypeRegistry,
    scope: &str,
    java_package: &str,
) {
    registry.insert(
        schema::qualify(scope, descriptor.name()),
        Export {
            name: descriptor.name().to_owned(),
            java_package: java_package.to_owned(),
            map: None,
        },
    );
}

struct FileWalker<'a> {
    file: &'a FileDescriptorProto,
    annotated: Option<&'a AnnotatedFile>,
    java_package: String,
    dto_package: String,
    comments: HashMap<Vec<i32>, String>,
    is_generated: bool,
}

impl FileWalker<'_> {
    fn comments_at(&self, path: &[i32]) -> String {
        self.comments.get(path).cloned().unwrap_or_default()
    }

    fn messages(&self, registry: &TypeRegistry) -> Result<Vec<schema::Message>> {
        let mut messages = Vec::new();

        for (index, descriptor) in self.file.message_type.iter().enumerate() {
            let annotated = self
                .annotated
                .and_then(|file| file.message_type.get(index));

            self.add_message(
                descriptor,
                annotated,
                self.file.package(),
                vec![FILE_MESSAGE_TYPE, index as i32],
                registry,
                &mut messages,
            )?;
        }

        Ok(messages)
    }

    fn add_message(
        &self,
        descriptor: &DescriptorProto,
        annotated: Option<&AnnotatedMessage>,
        scope: &str,
        path: Vec<i32>,
        registry: &TypeRegistry,
        messages: &mut Vec<schema::Message>,
    ) -> Result<()> {
        let full_name = schema::qualify(scope, descriptor.name());

        let is_map_entry = descriptor
            .options
            .as_ref()
            .is_some_and(|options| options.map_entry());

        if !is_map_entry {
            let mut fields = Vec::with_capacity(descriptor.field.len());
            for (index, field) in descriptor.field.iter().enumerate() {
                let mut field_path = path.clone();
                field_path.extend([MESSAGE_FIELD, index as i32]);

                let required = annotated
                    .and_then(|message| message.field.get(index))
                    .is_some_and(|field| field.is_required());

                fields.push(schema::Field {
                    wire_name: field.name().to_owned(),
                    kind: kind_of_field_descriptor(field, registry, &full_name)?,
                    cardinality: cardinality_of_field_descriptor(field, registry, &full_name)?,
                    required,
                    comments: self.comments_at(&field_path),
                });
            }

            // Synthetic oneofs of proto3 `optional` fields end up empty here
            // and are dropped.
            let oneofs = descriptor
                .oneof_decl
                .iter()
                .enumerate()
                .map(|(index, oneof)| schema::Oneof {
                    name: oneof.name().to_owned(),
                    fields: descriptor
                        .field
                        .iter()
                        .zip(&fields)
                        .filter(|(field, _)| {
                            field.oneof_index == Some(index as i32) && !field.proto3_optional()
                        })
                        .map(|(_, field)| field.clone())
                        .collect(),
                })
                .filter(|oneof| !oneof.fields.is_empty())
                .collect();

            messages.push(schema::Message {
                name: descriptor.name().to_owned(),
                full_name: full_name.clone(),
                file: self.file.name().to_owned(),
                java_package: self.dto_package.clone(),
                comments: self.comments_at(&path),
                fields,
                oneofs,
            });
        }

        for (index, nested_type) in descriptor.nested_type.iter().enumerate() {
            let mut nested_path = path.clone();
            nested_path.extend([MESSAGE_NESTED_TYPE, index as i32]);

            self.add_message(
                nested_type,
                annotated.and_then(|message| message.nested_type.get(index)),
                &full_name,
                nested_path,
                registry,
                messages,
            )?;
        }

        Ok(())
    }

    fn enums(&self) -> Vec<schema::Enum> {
        let mut enums = Vec::new();

        for (index, descriptor) in self.file.enum_type.iter().enumerate() {
            enums.push(self.convert_enum(
                descriptor,
                self.file.package(),
                &[FILE_ENUM_TYPE, index as i32],
            ));
        }

        for (index, descriptor) in self.file.message_type.iter().enumerate() {
            self.add_nested_enums(
                descriptor,
                self.file.package(),
                vec![FILE_MESSAGE_TYPE, index as i32],
                &mut enums,
            );
        }

        enums
    }

    fn add_nested_enums(
        &self,
        descriptor: &DescriptorProto,
        scope: &str,
        path: Vec<i32>,
        enums: &mut Vec<schema::Enum>,
    ) {
        let full_name = schema::qualify(scope, descriptor.name());

        for (index, nested_enum) in descriptor.enum_type.iter().enumerate() {
            let mut enum_path = path.clone();
            enum_path.extend([MESSAGE_ENUM_TYPE, index as i32]);
            enums.push(self.convert_enum(nested_enum, &full_name, &enum_path));
        }

        for (index, nested_type) in descriptor.nested_type.iter().enumerate() {
            let mut nested_path = path.clone();
            nested_path.extend([MESSAGE_NESTED_TYPE, index as i32]);
            self.add_nested_enums(nested_type, &full_name, nested_path, enums);
        }
    }

    fn convert_enum(
        &self,
        descriptor: &EnumDescriptorProto,
        scope: &str,
        path: &[i32],
    ) -> schema::Enum {
        let values = descriptor
            .value
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let mut value_path = path.to_vec();
                value_path.extend([ENUM_VALUE, index as i32]);

                schema::EnumValue {
                    name: value.name().to_owned(),
                    index,
                    comments: self.comments_at(&value_path),
                }
            })
            .collect();

        schema::Enum {
            name: descriptor.name().to_owned(),
            full_name: schema::qualify(scope, descriptor.name()),
            java_package: self.dto_package.clone(),
            comments: self.comments_at(path),
            values,
        }
    }

    fn services(
        &self,
        messages: &HashMap<String, schema::Message>,
    ) -> Result<Vec<schema::Service>> {
        let lookup = |type_name: &str, referrer: &str| {
            messages
                .get(type_name.trim_start_matches('.'))
                .cloned()
                .ok_or_else(|| GenerateError::UnresolvedType {
                    type_name: type_name.to_owned(),
                    referrer: referrer.to_owned(),
                })
        };

        let mut services = Vec::new();

        for (service_index, service) in self.file.service.iter().enumerate() {
            let full_name = schema::qualify(self.file.package(), service.name());
            let service_path = [FILE_SERVICE, service_index as i32];
            let annotated = self
                .annotated
                .and_then(|file| file.service.get(service_index));

            let mut methods = Vec::new();
            for (method_index, method) in service.method.iter().enumerate() {
                let method_full_name = schema::qualify(&full_name, method.name());
                let mut method_path = service_path.to_vec();
                method_path.extend([SERVICE_METHOD, method_index as i32]);

                let http_rule = annotated
                    .and_then(|service| service.method.get(method_index))
                    .and_then(|method| method.http_rule())
                    .cloned();

                methods.push(schema::Method {
                    name: method.name().to_owned(),
                    input: lookup(method.input_type(), &method_full_name)?,
                    output: lookup(method.output_type(), &method_full_name)?,
                    full_name: method_full_name,
                    comments: self.comments_at(&method_path),
                    http_rule,
                });
            }

            services.push(schema::Service {
                name: service.name().to_owned(),
                full_name,
                comments: self.comments_at(&service_path),
                methods,
            });
        }

        Ok(services)
    }
}

fn kind_of_field_descriptor(
    field: &FieldDescriptorProto,
    registry: &TypeRegistry,
    referrer: &str,
) -> Result<Kind> {
    let Some(number) = field.r#type else {
        return Ok(Kind::Unknown(0));
    };

    let Ok(field_type) = Type::try_from(number) else {
        eprintln!(
            "Field `{}` of `{referrer}` has unrecognized type {number}",
            field.name()
        );
        return Ok(Kind::Unknown(number));
    };

    Ok(match field_type {
        Type::Double => Kind::Double,
        Type::Float => Kind::Float,
        Type::Int64 => Kind::Int64,
        Type::Uint64 => Kind::Uint64,
        Type::Int32 => Kind::Int32,
        Type::Fixed64 => Kind::Fixed64,
        Type::Fixed32 => Kind::Fixed32,
        Type::Bool => Kind::Bool,
        Type::String => Kind::String,
        Type::Group => Kind::Group,
        Type::Message => Kind::Message(type_ref(field, registry, referrer)?),
        Type::Bytes => Kind::Bytes,
        Type::Uint32 => Kind::Uint32,
        Type::Enum => Kind::Enum(type_ref(field, registry, referrer)?),
        Type::Sfixed32 => Kind::Sfixed32,
        Type::Sfixed64 => Kind::Sfixed64,
        Type::Sint32 => Kind::Sint32,
        Type::Sint64 => Kind::Sint64,
    })
}

fn cardinality_of_field_descriptor(
    field: &FieldDescriptorProto,
    registry: &TypeRegistry,
    referrer: &str,
) -> Result<Cardinality> {
    if field.label() != Label::Repeated {
        return Ok(Cardinality::Single);
    }

    let map_type = registry
        .get(field.type_name().trim_start_matches('.'))
        .and_then(|export| export.map.as_ref());

    Ok(match map_type {
        Some(map_type) => Cardinality::Map {
            key: Box::new(kind_of_field_descriptor(&map_type.key, registry, referrer)?),
            value: Box::new(kind_of_field_descriptor(&map_type.value, registry, referrer)?),
        },
        None => Cardinality::List,
    })
}

fn type_ref(field: &FieldDescriptorProto, registry: &TypeRegistry, referrer: &str) -> Result<TypeRef> {
    let full_name = field.type_name().trim_start_matches('.');

    let export = registry
        .get(full_name)
        .ok_or_else(|| GenerateError::UnresolvedType {
            type_name: field.type_name().to_owned(),
            referrer: referrer.to_owned(),
        })?;

    Ok(TypeRef {
        name: export.name.clone(),
        full_name: full_name.to_owned(),
        java_package: export.java_package.clone(),
    })
}
