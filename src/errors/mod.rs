use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsboardError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Feed errors
    #[error("Invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),

    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error("Sources file invalid: {0}")]
    SourcesParse(String),

    #[error("OPML parsing failed: {0}")]
    OpmlParse(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Recoverable failures of a single translation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("rejected credentials (HTTP {0})")]
    Auth(u16),

    #[error("quota exhausted")]
    Quota,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("empty response")]
    EmptyResponse,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("translation budget exhausted")]
    BudgetExhausted,
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        TranslationError::Request(err.to_string())
    }
}

pub type NewsboardResult<T> = Result<T, NewsboardError>;
