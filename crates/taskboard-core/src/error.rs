//! Error taxonomy
//!
//! [`ApiError`] is produced only by the gateway, which is the single place
//! that classifies transport and HTTP failures. [`BoardError`] is what the
//! caches and the controller return.

/// Generic text shown when no response was received
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
/// Fallback when an error response carries no usable body
pub const REQUEST_FAILED_MESSAGE: &str = "API request failed";

/// Gateway-level failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// Credential missing or rejected; the session has been cleared and the
    /// request is abandoned.
    #[error("unauthorized")]
    Unauthorized,

    /// The server answered with a non-2xx status other than 401.
    #[error("request failed ({status}): {message}")]
    Client { status: u16, message: String },

    /// No response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the transient notification shown to the user
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Session expired. Please log in again.".to_string(),
            ApiError::Client { message, .. } => message.clone(),
            ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            ApiError::Decode(_) => REQUEST_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Errors surfaced by caches and the board controller
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// A failure reported under the name of the user action that caused it
    #[error("{action}: {source}")]
    Action {
        action: &'static str,
        #[source]
        source: Box<BoardError>,
    },
}

impl BoardError {
    pub fn user_message(&self) -> String {
        match self {
            BoardError::Api(err) => err.user_message(),
            BoardError::Action { action, source } => format!("{action}: {}", source.user_message()),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        match self {
            BoardError::Api(err) => err.is_unauthorized(),
            BoardError::Action { source, .. } => source.is_unauthorized(),
            _ => false,
        }
    }

    /// Attribute this error to a user action
    pub fn during(self, action: &'static str) -> Self {
        BoardError::Action {
            action,
            source: Box::new(self),
        }
    }
}

pub type BoardResult<T> = Result<T, BoardError>;
