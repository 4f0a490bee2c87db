use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NlpError {
    #[error("top_n must be at least 1")]
    ZeroTopN,
    #[error("input text is empty")]
    EmptyInput,
    #[error("empty vocabulary: text contains only stop words")]
    EmptyVocabulary,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummarizeError {
    #[error("word budget must be at least 1")]
    ZeroBudget,
    #[error(transparent)]
    Nlp(#[from] NlpError),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("http error: {0}")]
    Http(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("input text is empty")]
    EmptyInput,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("username already exists: {0}")]
    UsernameTaken(String),
    #[error("username not found: {0}")]
    UnknownUser(String),
    #[error("invalid password")]
    InvalidPassword,
    #[error("invalid or expired session")]
    InvalidSession,
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("failed to parse {format}: {message}")]
    Parse { format: &'static str, message: String },
    #[error("the file appears to be empty or couldn't be processed")]
    Empty,
}
