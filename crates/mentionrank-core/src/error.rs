use std::fmt;

/// Which score map a normalization failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Hub,
    Authority,
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hub => f.write_str("hub"),
            Self::Authority => f.write_str("authority"),
        }
    }
}

/// Errors raised by the ranking stages.
///
/// None of these are retried. The pipeline is a deterministic batch over a
/// fixed input, so every variant aborts the run and is surfaced as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    /// The mention graph has no nodes, so there is no component to select.
    #[error("mention graph is empty: no component to score")]
    EmptyGraph,

    /// A score map summed to zero at normalization time.
    #[error("degenerate component: {map} scores sum to zero after iteration {iteration}")]
    DegenerateComponent {
        /// The map whose total was zero.
        map: ScoreKind,
        /// 1-based iteration at which normalization failed.
        iteration: usize,
    },

    /// A negative top-K count was requested.
    #[error("invalid report size: {requested} (must be >= 0)")]
    InvalidCount { requested: i64 },

    /// The iteration budget was zero.
    #[error("iteration count must be at least 1")]
    InvalidIterationCount,
}

impl RankError {
    /// Machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyGraph => ErrorCode::EmptyGraph,
            Self::DegenerateComponent { .. } => ErrorCode::DegenerateComponent,
            Self::InvalidCount { .. } => ErrorCode::InvalidCount,
            Self::InvalidIterationCount => ErrorCode::InvalidIterationCount,
        }
    }
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyGraph,
    DegenerateComponent,
    InvalidCount,
    InvalidIterationCount,
    ConfigParseError,
    ConfigNotFound,
    InputDecodeError,
    InputReadError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyGraph => "E2001",
            Self::DegenerateComponent => "E2002",
            Self::InvalidCount => "E1001",
            Self::InvalidIterationCount => "E1002",
            Self::ConfigParseError => "E1003",
            Self::ConfigNotFound => "E1004",
            Self::InputDecodeError => "E3001",
            Self::InputReadError => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyGraph => "Mention graph is empty",
            Self::DegenerateComponent => "Component has no hub/authority structure",
            Self::InvalidCount => "Invalid top-K count",
            Self::InvalidIterationCount => "Invalid iteration count",
            Self::ConfigParseError => "Config file parse error",
            Self::ConfigNotFound => "Config file not found",
            Self::InputDecodeError => "Input record could not be decoded",
            Self::InputReadError => "Input could not be read",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyGraph => Some("Provide at least one mention record."),
            Self::DegenerateComponent => {
                Some("The largest component has no mention edges; check the input data.")
            }
            Self::InvalidCount => Some("Pass a non-negative value to --top-k."),
            Self::InvalidIterationCount => Some("Pass a positive value to --iterations."),
            Self::ConfigParseError => Some("Fix syntax in the config file and retry."),
            Self::ConfigNotFound => Some("Check the --config path, or omit it to use defaults."),
            Self::InputDecodeError => {
                Some("Each line must be a JSON object with user.screen_name.")
            }
            Self::InputReadError => Some("Check that the input path exists and is readable."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
