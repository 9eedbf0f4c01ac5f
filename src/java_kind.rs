use crate::schema::{Cardinality, Field, Kind};

/// Java type of a field, collections included.
pub fn java_type(field: &Field) -> String {
    match &field.cardinality {
        Cardinality::Map { key, value } => {
            format!("Map<{}, {}>", low_level_java_kind(key), low_level_java_kind(value))
        }
        Cardinality::List => format!("List<{}>", high_level_java_kind(field)),
        Cardinality::Single => high_level_java_kind(field),
    }
}

/// Element type of a field, ignoring whether it is repeated.
pub fn high_level_java_kind(field: &Field) -> String {
    low_level_java_kind(&field.kind)
}

pub fn low_level_java_kind(kind: &Kind) -> String {
    match kind {
        Kind::Int32 | Kind::Sint32 | Kind::Uint32 | Kind::Sfixed32 | Kind::Fixed32 => {
            "Integer".to_owned()
        }
        Kind::Int64 | Kind::Sint64 | Kind::Uint64 | Kind::Sfixed64 | Kind::Fixed64 => {
            "Long".to_owned()
        }
        Kind::Float => "Float".to_owned(),
        Kind::Double => "Double".to_owned(),
        Kind::Bool => "Boolean".to_owned(),
        Kind::String => "String".to_owned(),
        Kind::Bytes => "ByteString".to_owned(),
        Kind::Enum(type_ref) | Kind::Message(type_ref) => type_ref.name.clone(),
        Kind::Group => "Object".to_owned(),
        unknown @ Kind::Unknown(_) => format!("Kind({unknown})"),
    }
}

/// Classes a bean must import to declare this field.
pub fn field_imports(field: &Field, package: &str) -> Vec<String> {
    let mut imports = Vec::new();

    let kinds: Vec<&Kind> = match &field.cardinality {
        Cardinality::Single => vec![&field.kind],
        Cardinality::List => {
            imports.push("java.util.List".to_owned());
            vec![&field.kind]
        }
        Cardinality::Map { key, value } => {
            imports.push("java.util.Map".to_owned());
            vec![&**key, &**value]
        }
    };

    for kind in kinds {
        if *kind == Kind::Bytes {
            imports.push("com.google.protobuf.ByteString".to_owned());
        }

        match kind.type_ref() {
            Some(type_ref) if type_ref.java_package != package => {
                imports.push(type_ref.import_path())
            }
            _ => {}
        }
    }

    imports
}
