use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("no active event in snapshot")]
    NoActiveEvent,

    #[error("event {0} does not exist")]
    EventNotFound(u32),

    #[error("category '{identifier}' does not exist in event {event_id}")]
    CategoryNotFound { identifier: String, event_id: u32 },

    #[error("contestant #{0} does not exist")]
    ContestantNotFound(u32),

    #[error("judge #{0} does not exist")]
    JudgeNotFound(u32),

    #[error("snapshot file not found: {0}")]
    SnapshotNotFound(String),

    #[error("snapshot parse error: {0}")]
    SnapshotParse(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("judge #{0} is locked; scores are frozen")]
    JudgeLocked(u32),

    #[error("invalid score: {0}")]
    InvalidScore(String),

    #[error("invalid log filter '{value}': {source}")]
    LogFilter {
        value: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TallyError {
    /// A lookup that resolved to nothing, as opposed to a broken store or request.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoActiveEvent
                | Self::EventNotFound(_)
                | Self::CategoryNotFound { .. }
                | Self::ContestantNotFound(_)
                | Self::JudgeNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
