/// What an accepted transaction did to state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new record was written.
    Created,
    /// A relation entry was appended.
    RelationAdded { list: &'static str, id: String },
    /// The target was already related; nothing written.
    AlreadyRelated { list: &'static str, id: String },
    /// Query or no-op verb; state untouched.
    NoOp,
}

impl ApplyOutcome {
    /// Whether the transaction wrote to state.
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created | Self::RelationAdded { .. })
    }
}
