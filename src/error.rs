//! Error types for a squirrel run.
//!
//! Every failure is fatal for the whole run: there is no partial-success mode
//! and nothing is retried. Errors are split into two classes by exit status:
//! configuration problems (`1`) and internal or protocol faults (`2`).

use thiserror::Error;

/// Result type alias for squirrel operations.
pub type Result<T> = std::result::Result<T, SquirrelError>;

/// Exit status for a configuration error (wrong launch, bad parameters).
pub const EXIT_CONFIG: u8 = 1;

/// Exit status for an internal consistency or protocol fault.
pub const EXIT_FAULT: u8 = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SquirrelError {
    /// The run was launched with a different number of workers than expected.
    ///
    /// The message text is matched verbatim by external harnesses.
    #[error("Ошибка: программу нужно запускать с {expected} процессами, а не с {actual}")]
    WorkerCountMismatch { expected: usize, actual: usize },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fewer nuts than squirrels: some worker would end up with an empty segment.
    #[error("cannot give every one of {workers} squirrels a nut: only {total} nuts")]
    InsufficientNuts { total: usize, workers: usize },

    /// Segment lengths of a partition plan do not add up to the dataset size.
    #[error("partition plan covers {actual} nuts, dataset has {expected}")]
    PartitionSumMismatch { expected: usize, actual: usize },

    /// A worker observed a frame sequence that breaks the transfer protocol.
    #[error("protocol violation at squirrel {worker}: {reason}")]
    ProtocolViolation { worker: usize, reason: String },

    /// The ring barrier closed before these workers published a statistic.
    #[error("ring exchange incomplete, missing squirrels {missing:?}")]
    MissingPeers { missing: Vec<usize> },

    /// A worker's upstream went away because another participant aborted.
    #[error("squirrel {worker} lost its peers")]
    PeerLost { worker: usize },

    /// Frame encoding or decoding failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// A worker task ended without producing a result.
    #[error("squirrel {worker} did not finish")]
    WorkerPanicked { worker: usize },
}

impl SquirrelError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SquirrelError::WorkerCountMismatch { .. }
            | SquirrelError::InvalidConfig(_)
            | SquirrelError::InsufficientNuts { .. } => EXIT_CONFIG,
            _ => EXIT_FAULT,
        }
    }

    /// True for failures that are only a consequence of another participant aborting.
    pub fn is_secondary(&self) -> bool {
        matches!(self, SquirrelError::PeerLost { .. })
    }
}

impl From<bincode::Error> for SquirrelError {
    fn from(e: bincode::Error) -> Self {
        SquirrelError::Codec(e.to_string())
    }
}
