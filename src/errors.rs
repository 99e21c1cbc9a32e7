use std::fmt;

#[derive(Debug, Clone)]
pub enum ShortlinkError {
    Decode(String),
    InvalidUrl(String),
    NotFound(String),
    Storage(String),
    Serialization(String),
    CodeExhausted(String),
    Validation(String),
}

impl ShortlinkError {
    /// Stable error code, used by the HTTP layer and logs
    pub fn code(&self) -> &'static str {
        match self {
            ShortlinkError::Decode(_) => "E001",
            ShortlinkError::InvalidUrl(_) => "E002",
            ShortlinkError::NotFound(_) => "E003",
            ShortlinkError::Storage(_) => "E004",
            ShortlinkError::Serialization(_) => "E005",
            ShortlinkError::CodeExhausted(_) => "E006",
            ShortlinkError::Validation(_) => "E007",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ShortlinkError::Decode(_) => "Decode Error",
            ShortlinkError::InvalidUrl(_) => "Invalid URL",
            ShortlinkError::NotFound(_) => "Resource Not Found",
            ShortlinkError::Storage(_) => "Storage Operation Error",
            ShortlinkError::Serialization(_) => "Serialization Error",
            ShortlinkError::CodeExhausted(_) => "Code Space Exhausted",
            ShortlinkError::Validation(_) => "Validation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ShortlinkError::Decode(msg) => msg,
            ShortlinkError::InvalidUrl(msg) => msg,
            ShortlinkError::NotFound(msg) => msg,
            ShortlinkError::Storage(msg) => msg,
            ShortlinkError::Serialization(msg) => msg,
            ShortlinkError::CodeExhausted(msg) => msg,
            ShortlinkError::Validation(msg) => msg,
        }
    }
}

impl fmt::Display for ShortlinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for ShortlinkError {}

// 便捷的构造函数
impl ShortlinkError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::Decode(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::InvalidUrl(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::NotFound(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::Storage(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::Serialization(msg.into())
    }

    pub fn code_exhausted<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::CodeExhausted(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortlinkError::Validation(msg.into())
    }
}

impl From<std::io::Error> for ShortlinkError {
    fn from(err: std::io::Error) -> Self {
        ShortlinkError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ShortlinkError {
    fn from(err: serde_json::Error) -> Self {
        ShortlinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortlinkError>;
