use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How the backend wants a failure presented.
///
/// Travels as an integer on the wire; values the client does not know are
/// preserved so they still fall through to the generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ErrorShowType {
    Silent,
    Warn,
    Error,
    Notification,
    Redirect,
    Unknown(i64),
}

impl From<i64> for ErrorShowType {
    fn from(value: i64) -> Self {
        match value {
            0 => ErrorShowType::Silent,
            1 => ErrorShowType::Warn,
            2 => ErrorShowType::Error,
            3 => ErrorShowType::Notification,
            9 => ErrorShowType::Redirect,
            other => ErrorShowType::Unknown(other),
        }
    }
}

impl From<ErrorShowType> for i64 {
    fn from(value: ErrorShowType) -> Self {
        match value {
            ErrorShowType::Silent => 0,
            ErrorShowType::Warn => 1,
            ErrorShowType::Error => 2,
            ErrorShowType::Notification => 3,
            ErrorShowType::Redirect => 9,
            ErrorShowType::Unknown(other) => other,
        }
    }
}

/// The uniform response shape every backend endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T = Value> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_show_type: Option<ErrorShowType>,
}

/// A failure the server executed and reported with `success = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct BizError {
    pub code: i64,
    pub message: String,
    pub show_type: Option<ErrorShowType>,
    pub data: Value,
}

impl BizError {
    pub fn is_unauthorized(&self) -> bool {
        self.code == 401
    }
}

impl Envelope<Value> {
    /// Split the envelope into its payload or the business failure it reports.
    ///
    /// `fallback_code` stands in when the server omitted `errorCode`, which it
    /// only does for malformed responses.
    pub fn into_result(self, fallback_code: i64) -> Result<Value, BizError> {
        if self.success {
            return Ok(self.data.unwrap_or(Value::Null));
        }

        Err(BizError {
            code: self.error_code.unwrap_or(fallback_code),
            message: self.error_message.unwrap_or_default(),
            show_type: self.error_show_type,
            data: self.data.unwrap_or(Value::Null),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_passes_data_through() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": true,
            "data": {"list": [], "total": 0}
        }))
        .unwrap();

        let data = envelope.into_result(0).unwrap();
        assert_eq!(data, json!({"list": [], "total": 0}));
    }

    #[test]
    fn failure_envelope_carries_code_message_and_show_type() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": false,
            "data": {},
            "errorCode": 1002,
            "errorMessage": "The username is already in use.",
            "errorShowType": 1
        }))
        .unwrap();

        let err = envelope.into_result(500).unwrap_err();
        assert_eq!(err.code, 1002);
        assert_eq!(err.message, "The username is already in use.");
        assert_eq!(err.show_type, Some(ErrorShowType::Warn));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn missing_error_code_uses_fallback() {
        let envelope: Envelope = serde_json::from_value(json!({"success": false})).unwrap();
        let err = envelope.into_result(401).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.show_type, None);
        assert_eq!(err.data, Value::Null);
    }

    #[test]
    fn unknown_show_type_is_preserved() {
        let envelope: Envelope = serde_json::from_value(json!({
            "success": false,
            "errorCode": 1009,
            "errorMessage": "redis service unavailable",
            "errorShowType": 7
        }))
        .unwrap();
        assert_eq!(envelope.error_show_type, Some(ErrorShowType::Unknown(7)));
        assert_eq!(i64::from(ErrorShowType::Redirect), 9);
    }
}
