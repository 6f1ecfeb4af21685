use thiserror::Error;

#[derive(Error, Debug)]
pub enum StylelabError {
    // Data directory errors
    #[error("DATA_DIR_WRITE_ERROR: {0}")]
    DataDirWriteError(String),

    #[error("DATA_DIR_SERIALIZE_ERROR: {0}")]
    DataDirSerializeError(String),

    // Template errors
    #[error("TEMPLATE_PARSE_ERROR: {0}")]
    TemplateParseError(String),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<crate::template::TemplateError> for StylelabError {
    fn from(err: crate::template::TemplateError) -> Self {
        StylelabError::TemplateParseError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StylelabError>;
