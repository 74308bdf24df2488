//! 이메일 큐 메시지
//!
//! 프로듀서와 컨슈머가 주고받는 JSON 봉투입니다.
//!
//! ```json
//! {"to":"a@b.com","subject":"Welcome","templateName":"welcome","username":"alice","value":{}}
//! ```
//!
//! 모르는 필드는 무시하며, `retryCount`는 컨슈머가 재처리 횟수를 기록할 때만 붙습니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    #[validate(email(message = "유효한 이메일 주소가 아닙니다"))]
    pub to: String,

    #[validate(length(min = 1, message = "제목은 필수입니다"))]
    pub subject: String,

    #[validate(length(min = 1, message = "템플릿 이름은 필수입니다"))]
    pub template_name: String,

    #[serde(default)]
    pub username: String,

    /// 템플릿 변수. 형태는 템플릿마다 다릅니다.
    #[serde(default)]
    pub value: serde_json::Value,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub retry_count: u32,
}

fn is_zero(count: &u32) -> bool {
    *count == 0
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        template_name: impl Into<String>,
        username: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            template_name: template_name.into(),
            username: username.into(),
            value,
            retry_count: 0,
        }
    }

    /// 재처리용 사본. `retryCount`만 1 증가합니다.
    pub fn next_attempt(&self) -> Self {
        Self {
            retry_count: self.retry_count + 1,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format_is_camel_case() {
        let message = EmailMessage::new("a@b.com", "Welcome", "welcome", "alice", json!({}));
        let json = serde_json::to_value(&message).unwrap();

        assert_eq!(
            json,
            json!({"to":"a@b.com","subject":"Welcome","templateName":"welcome","username":"alice","value":{}})
        );
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let raw = r#"{"to":"a@b.com","subject":"s","templateName":"welcome","username":"u",
                      "value":{"jobName":"x"},"traceId":"abc","retryCount":2}"#;
        let message: EmailMessage = serde_json::from_str(raw).unwrap();

        assert_eq!(message.retry_count, 2);
        assert_eq!(message.value["jobName"], "x");
    }

    #[test]
    fn test_next_attempt_increments_retry_count() {
        let message = EmailMessage::new("a@b.com", "s", "welcome", "u", json!(null));
        let retried = message.next_attempt().next_attempt();

        assert_eq!(retried.retry_count, 2);
        assert_eq!(retried.to, message.to);
    }

    #[test]
    fn test_validation() {
        let valid = EmailMessage::new("a@b.com", "Welcome", "welcome", "alice", json!({}));
        assert!(valid.validate().is_ok());

        let invalid = EmailMessage::new("not-an-email", "", "welcome", "alice", json!({}));
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("to"));
        assert!(fields.contains_key("subject"));
    }
}
