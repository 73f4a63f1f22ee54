//! The hidden-field submission payload.

/// Values written into the hosting form's hidden fields at submit time.
///
/// The field set is fixed by the downstream result pipeline: the
/// assignment id, the probing user agent, the free-text fallback, and
/// the serialized token-span data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitPayload {
    pub assignment_id: String,
    pub user_agent: String,
    pub free_text: String,
    pub token_data: String,
}

impl SubmitPayload {
    /// The `(field name, value)` pairs in form order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("assignmentId", &self.assignment_id),
            ("userAgent", &self.user_agent),
            ("textinput", &self.free_text),
            ("tokens", &self.token_data),
        ]
    }
}
