/// Errors raised by the statistics engine.
///
/// Every engine operation is a single pass over its input, so a failure is
/// always total: nothing is partially computed or returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    /// The operation needs at least one observation.
    #[display("sample must contain at least one observation")]
    EmptyInput,
    /// A parameter or the sample shape is outside the operation's domain.
    #[display("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl StatsError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
