use crate::api::{BizError, ErrorShowType};
use crate::error::{GatewayError, TransportKind};

use super::notify::Notice;

const CONTACT_ADMIN: &str = "Please contact the administrator";

/// What the gateway does with a failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Expired access token: run the refresh protocol.
    Refresh,
    /// Show this notice to the user.
    Notify(Notice),
    /// Server asked for silence.
    Silent,
    /// Server asked for a redirect; where to is up to the caller.
    Redirect,
}

/// Classify a business failure, in precedence order: expired token, fixed
/// per-code notices, then the server's requested presentation.
pub fn classify(err: &BizError) -> Disposition {
    match err.code {
        401 => return Disposition::Refresh,
        400 => {
            return Disposition::Notify(Notice::error("Bad request").with_description(err.message.clone()))
        }
        403 => {
            return Disposition::Notify(Notice::error("Insufficient permission").with_description(CONTACT_ADMIN))
        }
        404 => {
            return Disposition::Notify(Notice::error("Resource not found").with_description(CONTACT_ADMIN))
        }
        500 => return Disposition::Notify(Notice::error("Server error").with_description(CONTACT_ADMIN)),
        _ => {}
    }

    match err.show_type {
        Some(ErrorShowType::Silent) => Disposition::Silent,
        Some(ErrorShowType::Warn) => Disposition::Notify(Notice::warning(err.message.clone())),
        Some(ErrorShowType::Error) => Disposition::Notify(Notice::error(err.message.clone())),
        Some(ErrorShowType::Notification) => Disposition::Notify(
            Notice::notification(err.code.to_string()).with_description(err.message.clone()),
        ),
        Some(ErrorShowType::Redirect) => Disposition::Redirect,
        Some(ErrorShowType::Unknown(_)) | None => Disposition::Notify(Notice::error(fallback_message(err))),
    }
}

fn fallback_message(err: &BizError) -> String {
    if err.message.is_empty() {
        "Unknown error".to_string()
    } else {
        err.message.clone()
    }
}

/// The notice for failures that never produced a business envelope.
///
/// Returns `None` for errors the gateway does not announce itself.
pub fn notice_for(err: &GatewayError) -> Option<Notice> {
    match err {
        GatewayError::Transport {
            kind: TransportKind::NoResponse,
            ..
        } => Some(Notice::error("No response from server, please retry")),
        GatewayError::Transport {
            kind: TransportKind::NotSent,
            ..
        } => Some(Notice::error("Request failed, please retry")),
        GatewayError::HttpStatus { status } => Some(Notice::error(format!("Unexpected response status: {}", status))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::notify::NoticeLevel;
    use serde_json::Value;

    fn biz(code: i64, message: &str, show_type: Option<ErrorShowType>) -> BizError {
        BizError {
            code,
            message: message.to_string(),
            show_type,
            data: Value::Null,
        }
    }

    #[test]
    fn unauthorized_always_refreshes() {
        let err = biz(401, "Unauthorized", Some(ErrorShowType::Silent));
        assert_eq!(classify(&err), Disposition::Refresh);
    }

    #[test]
    fn fixed_codes_win_over_show_type() {
        let err = biz(403, "Forbidden", Some(ErrorShowType::Silent));
        match classify(&err) {
            Disposition::Notify(notice) => {
                assert_eq!(notice.title, "Insufficient permission");
                assert_eq!(notice.level, NoticeLevel::Error);
            }
            other => panic!("unexpected disposition {other:?}"),
        }

        let err = biz(400, "page is required", None);
        match classify(&err) {
            Disposition::Notify(notice) => {
                assert_eq!(notice.title, "Bad request");
                assert_eq!(notice.description.as_deref(), Some("page is required"));
            }
            other => panic!("unexpected disposition {other:?}"),
        }
    }

    #[test]
    fn show_type_drives_remaining_codes() {
        assert_eq!(
            classify(&biz(1002, "taken", Some(ErrorShowType::Silent))),
            Disposition::Silent
        );
        assert_eq!(
            classify(&biz(1002, "taken", Some(ErrorShowType::Warn))),
            Disposition::Notify(Notice::warning("taken"))
        );
        assert_eq!(
            classify(&biz(1002, "taken", Some(ErrorShowType::Notification))),
            Disposition::Notify(Notice::notification("1002").with_description("taken"))
        );
        assert_eq!(
            classify(&biz(1002, "taken", Some(ErrorShowType::Redirect))),
            Disposition::Redirect
        );
    }

    #[test]
    fn missing_show_type_falls_back_to_generic_error() {
        assert_eq!(
            classify(&biz(1015, "", None)),
            Disposition::Notify(Notice::error("Unknown error"))
        );
        assert_eq!(
            classify(&biz(1015, "avatar type invalid", Some(ErrorShowType::Unknown(5)))),
            Disposition::Notify(Notice::error("avatar type invalid"))
        );
    }

    #[test]
    fn transport_failures_get_retry_prompts() {
        let err = GatewayError::transport(TransportKind::NoResponse, "timed out");
        assert_eq!(
            notice_for(&err).map(|n| n.title),
            Some("No response from server, please retry".to_string())
        );
        assert!(notice_for(&GatewayError::Decode("eof".into())).is_none());
    }
}
