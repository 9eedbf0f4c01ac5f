use crate::error::{GenerateError, Result};

/// Settings passed through protoc's `--spring_opt=key=value,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Replaces the base Java package of every generated file.
    pub package: Option<String>,
    pub dto_package: String,
    pub service_package: String,
    pub controller_package: String,
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            package: None,
            dto_package: "dto".to_owned(),
            service_package: "service".to_owned(),
            controller_package: "controller".to_owned(),
            verbose: false,
        }
    }
}

impl Options {
    pub fn parse(parameter: Option<&str>) -> Result<Self> {
        let mut options = Options::default();
        let Some(parameter) = parameter else {
            return Ok(options);
        };

        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = match part.split_once('=') {
                Some((key, value)) => (key.trim(), Some(value.trim())),
                None => (part, None),
            };

            match (key, value) {
                ("package", Some(value)) => options.package = Some(package_value(part, value)?),
                ("dto_package", Some(value)) => options.dto_package = package_value(part, value)?,
                ("service_package", Some(value)) => {
                    options.service_package = package_value(part, value)?
                }
                ("controller_package", Some(value)) => {
                    options.controller_package = package_value(part, value)?
                }
                ("verbose", None) => options.verbose = true,
                ("verbose", Some(value)) => {
                    options.verbose = value.parse().map_err(|_| GenerateError::InvalidParameter {
                        parameter: part.to_owned(),
                        reason: "expected `true` or `false`".to_owned(),
                    })?
                }
                (_, None) if is_known(key) => {
                    return Err(GenerateError::InvalidParameter {
                        parameter: part.to_owned(),
                        reason: "missing value".to_owned(),
                    })
                }
                _ => {
                    return Err(GenerateError::InvalidParameter {
                        parameter: part.to_owned(),
                        reason: "unknown option".to_owned(),
                    })
                }
            }
        }

        Ok(options)
    }
}

fn is_known(key: &str) -> bool {
    matches!(
        key,
        "package" | "dto_package" | "service_package" | "controller_package" | "verbose"
    )
}

fn package_value(part: &str, value: &str) -> Result<String> {
    let valid = !value.is_empty()
        && value.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        });

    if valid {
        Ok(value.to_owned())
    } else {
        Err(GenerateError::InvalidParameter {
            parameter: part.to_owned(),
            reason: "not a Java package name".to_owned(),
        })
    }
}
