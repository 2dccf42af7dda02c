use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No shop links found on the index page")]
    EmptyCatalog,

    #[error("Unrecognized validity format: {text:?}")]
    UnrecognizedFormat { text: String },

    #[error("Invalid calendar date in {text:?}")]
    InvalidCalendarDate { text: String },

    #[error("Invalid leaflet record: {reason}")]
    InvalidRecord { reason: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parsing,
    Config,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScrapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScrapeError::Fetch(_) => ErrorCategory::Network,
            ScrapeError::EmptyCatalog
            | ScrapeError::UnrecognizedFormat { .. }
            | ScrapeError::InvalidCalendarDate { .. }
            | ScrapeError::InvalidRecord { .. } => ErrorCategory::Parsing,
            ScrapeError::InvalidConfigValue { .. } => ErrorCategory::Config,
            ScrapeError::Io(_) | ScrapeError::Serialization(_) => ErrorCategory::Io,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Skipped at the per-leaflet boundary; a run that only saw
            // these still counts as completed.
            ScrapeError::UnrecognizedFormat { .. }
            | ScrapeError::InvalidCalendarDate { .. }
            | ScrapeError::InvalidRecord { .. } => ErrorSeverity::Low,
            ScrapeError::Fetch(_) => ErrorSeverity::Medium,
            ScrapeError::EmptyCatalog | ScrapeError::InvalidConfigValue { .. } => {
                ErrorSeverity::High
            }
            ScrapeError::Io(_) | ScrapeError::Serialization(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScrapeError::Fetch(_) => {
                "Check network connectivity and retry later; the site may be rate limiting"
                    .to_string()
            }
            ScrapeError::EmptyCatalog => {
                "The index page layout likely changed; verify the shop-list selectors".to_string()
            }
            ScrapeError::UnrecognizedFormat { .. } | ScrapeError::InvalidCalendarDate { .. } => {
                "The validity text format drifted; extend the date-range patterns".to_string()
            }
            ScrapeError::InvalidRecord { .. } => {
                "Inspect the leaflet markup for missing or malformed fields".to_string()
            }
            ScrapeError::InvalidConfigValue { field, .. } => {
                format!("Correct the --{} option and run again", field.replace('_', "-"))
            }
            ScrapeError::Io(_) => "Check that the output path is writable".to_string(),
            ScrapeError::Serialization(_) => {
                "This is a bug in the record model; please report it".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScrapeError::Fetch(e) => format!("Could not reach the site: {}", e),
            ScrapeError::EmptyCatalog => {
                "No shops were found on the index page".to_string()
            }
            ScrapeError::UnrecognizedFormat { text } => {
                format!("Could not understand the validity text {:?}", text)
            }
            ScrapeError::InvalidCalendarDate { text } => {
                format!("The validity text {:?} contains an impossible date", text)
            }
            ScrapeError::InvalidRecord { reason } => format!("Malformed leaflet: {}", reason),
            ScrapeError::InvalidConfigValue { field, reason, .. } => {
                format!("Configuration problem with {}: {}", field, reason)
            }
            ScrapeError::Io(e) => format!("File system problem: {}", e),
            ScrapeError::Serialization(e) => format!("Could not serialize output: {}", e),
        }
    }
}
