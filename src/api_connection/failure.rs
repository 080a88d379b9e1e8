use std::fmt;

pub const QUOTA_EXCEEDED_MESSAGE: &str =
    "AI service quota exceeded. Please check your API key or try again later.";
pub const INVALID_CREDENTIAL_MESSAGE: &str = "Invalid API key. Please check your configuration.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate recipe. Please try again.";

/// User-facing category of a failed generation call.
///
/// The backend only sends free text, so classification is a substring match
/// on its `detail`. Should the backend grow error codes, only `from_detail`
/// needs to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationFailure {
    QuotaExceeded,
    InvalidCredential,
    /// Backend explained the failure, but not in a way we recognise.
    Other(String),
    /// No usable detail (transport failure, empty or undecodable body).
    Unknown,
}

impl GenerationFailure {
    pub fn from_detail(detail: &str) -> Self {
        let lowered = detail.to_lowercase();
        if lowered.contains("quota") || lowered.contains("rate limit") {
            GenerationFailure::QuotaExceeded
        } else if lowered.contains("api key") {
            GenerationFailure::InvalidCredential
        } else if detail.trim().is_empty() {
            GenerationFailure::Unknown
        } else {
            GenerationFailure::Other(detail.to_string())
        }
    }

    pub fn user_message(&self) -> &str {
        match self {
            GenerationFailure::QuotaExceeded => QUOTA_EXCEEDED_MESSAGE,
            GenerationFailure::InvalidCredential => INVALID_CREDENTIAL_MESSAGE,
            GenerationFailure::Other(detail) => detail.as_str(),
            GenerationFailure::Unknown => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}
