use serde::{Deserialize, Serialize};

/// Invocation metadata supplied by the hosting runtime for one call.
///
/// This is not part of any envelope. The runtime hands it to the adapter
/// next to the envelope, and translators that propagate it attach it to the
/// [`Request`](crate::Request) as an extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Unique identifier of this call.
    pub request_id: String,
    /// ARN of the function being invoked.
    pub invoked_function_arn: String,
    /// Wall-clock deadline in milliseconds since the Unix epoch, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, invoked_function_arn: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            invoked_function_arn: invoked_function_arn.into(),
            deadline_ms: None,
        }
    }

    pub fn with_deadline_ms(mut self, deadline_ms: u64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.request_id.is_empty() && self.invoked_function_arn.is_empty()
    }
}
