use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No image file uploaded.")]
    NoImageUploaded,

    #[error("Only .png, .jpg and .jpeg formats are allowed!")]
    UnsupportedFileType,

    #[error("File type mismatch: declared {content_type} but extension is .{extension}")]
    MismatchedFileType {
        content_type: String,
        extension: String,
    },

    #[error("File too large. Maximum size is {}.", format_size(.limit))]
    FileTooLarge { limit: usize },

    #[error("Unexpected field: {name}")]
    UnexpectedField { name: String },

    #[error("Invalid multipart request.")]
    Multipart(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn multipart(msg: impl Into<String>) -> Self {
        Self::Multipart(msg.into())
    }

    /// Whether this error was caused by the client's upload rather than by the server
    /// or the remote model. Only these messages are safe to return to the caller.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NoImageUploaded
                | Self::UnsupportedFileType
                | Self::MismatchedFileType { .. }
                | Self::FileTooLarge { .. }
                | Self::UnexpectedField { .. }
                | Self::Multipart(_)
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn format_size(bytes: &usize) -> String {
    const MIB: usize = 1024 * 1024;
    const KIB: usize = 1024;
    let bytes = *bytes;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MiB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{} KiB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}
