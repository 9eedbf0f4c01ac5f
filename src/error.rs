use thiserror::Error;

/// Fatal problems found while turning a schema into generated sources.
///
/// Every variant describes an input that cannot produce valid Java, so the
/// whole run stops at the first one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("HttpPath {path} should not end with \"/\"")]
    TrailingSlash { path: String },

    #[error("{file}: path param `{param}` not found in `{message}`")]
    PathParamNotFound {
        file: String,
        param: String,
        message: String,
    },

    #[error("field `{field}` not found in message `{message}`")]
    BodyFieldNotFound { field: String, message: String },

    #[error("field `{field}` of `{message}` must be message type")]
    BodyFieldNotMessage { field: String, message: String },

    #[error("response body field `{field}` not found in message `{message}`")]
    ResponseBodyFieldNotFound { field: String, message: String },

    #[error("couldn't resolve type `{type_name}` referenced by `{referrer}`")]
    UnresolvedType { type_name: String, referrer: String },

    #[error("invalid plugin parameter `{parameter}`: {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("{method}: custom HTTP method `{kind}` is not a Spring RequestMethod")]
    UnsupportedHttpMethod { kind: String, method: String },

    #[error("`{first}` and `{second}` of `{service}` both become Java method `{name}`")]
    DuplicateMethod {
        service: String,
        first: String,
        second: String,
        name: String,
    },

    #[error("`{first}` and `{second}` would both be generated as `{path}`")]
    DuplicateOutput {
        path: String,
        first: String,
        second: String,
    },
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

