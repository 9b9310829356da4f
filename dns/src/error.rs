use crate::header::Rcode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("invalid domain name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("message truncated")]
    TruncatedMessage,

    #[error("unexpected id {0}")]
    UnexpectedId(u16),

    #[error("message is a query, not a response")]
    NotAResponse,

    #[error("unknown opcode {0}")]
    UnknownOpcode(u8),

    #[error("unknown rcode {0}")]
    UnknownResponseCode(u8),

    #[error("unknown record type {0}")]
    UnknownRecordType(u16),

    #[error("expected one question, got {0}")]
    UnexpectedQuestionCount(u16),

    #[error("expected at least one answer, got {0}")]
    InsufficientAnswers(u16),

    #[error("reserved label type in length byte {0:#04x}")]
    BadLabel(u8),

    #[error("too many compression pointers in name at offset {0}")]
    CompressionLoop(usize),

    #[error("RCODE = {} ({}): {}", .0.code(), .0, .0.description())]
    ServerReportedError(Rcode),

    #[error("response question does not match the question sent")]
    QuestionMismatch,
}

impl DnsError {
    /// Whether this error ends the current query instead of being skipped
    /// while waiting for another datagram.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DnsError::ServerReportedError(_) | DnsError::QuestionMismatch | DnsError::InvalidName { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DnsError>;
