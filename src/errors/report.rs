use serde::Serialize;

/// Flattened `{ code, message }` view of any [`DomainError`](super::DomainError),
/// suitable for handing a failure across a JSON boundary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
}

impl ErrorReport {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!("{{\"code\":\"{}\",\"message\":\"\"}}", self.code)
        })
    }
}
