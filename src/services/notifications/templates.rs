//! Handlebars 이메일 템플릿
//!
//! 등록된 템플릿: `welcome`, `resume-submitted`, `resume-approved`,
//! `resume-rejected`, `job-alert`.
//!
//! 템플릿 변수는 메시지의 `value` 객체에 `username`을 더한 것입니다.
//! 렌더링은 메시지만의 순수 함수이므로 같은 메시지가 다시 전달되어도 결과가 같습니다.

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::domain::EmailMessage;
use crate::errors::{AppError, AppResult};

/// 렌더링된 메일 본문
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

const DEFAULT_TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "welcome",
        "<h1>Welcome, {{username}}!</h1><p>Your JobHunter account is ready.</p>",
        "Welcome, {{username}}!\nYour JobHunter account is ready.",
    ),
    (
        "resume-submitted",
        "<p>Hi {{username}},</p><p>Your application for <strong>{{jobName}}</strong> at {{companyName}} was submitted (application #{{resumeId}}).</p>",
        "Hi {{username}},\nYour application for {{jobName}} at {{companyName}} was submitted (application #{{resumeId}}).",
    ),
    (
        "resume-approved",
        "<p>Hi {{username}},</p><p>Congratulations! {{companyName}} approved your application for <strong>{{jobName}}</strong>.</p>",
        "Hi {{username}},\nCongratulations! {{companyName}} approved your application for {{jobName}}.",
    ),
    (
        "resume-rejected",
        "<p>Hi {{username}},</p><p>Thank you for applying to <strong>{{jobName}}</strong> at {{companyName}}. The position has been filled by another candidate.</p>",
        "Hi {{username}},\nThank you for applying to {{jobName}} at {{companyName}}. The position has been filled by another candidate.",
    ),
    (
        "job-alert",
        "<p>Hi {{username}},</p><p>New opening: <strong>{{jobName}}</strong> at {{companyName}}.</p>{{#if jobUrl}}<p><a href=\"{{jobUrl}}\">View posting</a></p>{{/if}}",
        "Hi {{username}},\nNew opening: {{jobName}} at {{companyName}}.{{#if jobUrl}}\n{{jobUrl}}{{/if}}",
    ),
];

/// HTML 본문은 기본 HTML 이스케이프로, 텍스트 본문은 이스케이프 없이 렌더링합니다.
pub struct TemplateRenderer {
    html: Handlebars<'static>,
    text: Handlebars<'static>,
}

impl TemplateRenderer {
    /// 빈 렌더러
    pub fn new() -> Self {
        let mut text = Handlebars::new();
        text.register_escape_fn(handlebars::no_escape);
        Self { html: Handlebars::new(), text }
    }

    /// 기본 템플릿이 모두 등록된 렌더러
    pub fn with_defaults() -> AppResult<Self> {
        let mut renderer = Self::new();
        for (name, html, text) in DEFAULT_TEMPLATES {
            renderer.register(name, html, text)?;
        }
        Ok(renderer)
    }

    /// HTML/텍스트 본문 한 쌍을 등록합니다. 같은 이름이면 덮어씁니다.
    pub fn register(&mut self, name: &str, html: &str, text: &str) -> AppResult<()> {
        self.html
            .register_template_string(name, html)
            .map_err(|e| AppError::TemplateError(format!("{} HTML 템플릿 등록 실패: {}", name, e)))?;
        self.text
            .register_template_string(name, text)
            .map_err(|e| AppError::TemplateError(format!("{} 텍스트 템플릿 등록 실패: {}", name, e)))?;
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.html.has_template(name)
    }

    /// # Errors
    ///
    /// * `AppError::TemplateError` - 등록되지 않은 템플릿이거나 렌더링 실패
    pub fn render(&self, message: &EmailMessage) -> AppResult<RenderedEmail> {
        let name = &message.template_name;
        if !self.has_template(name) {
            return Err(AppError::TemplateError(format!("등록되지 않은 템플릿: {}", name)));
        }

        let data = template_data(message);
        let render = |registry: &Handlebars<'static>| {
            registry
                .render(name, &data)
                .map_err(|e| AppError::TemplateError(format!("{} 렌더링 실패: {}", name, e)))
        };

        Ok(RenderedEmail {
            subject: message.subject.clone(),
            html_body: render(&self.html)?,
            text_body: render(&self.text)?,
        })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// `value`가 객체면 그 필드를, 아니면 `value` 하나를 변수로 씁니다.
fn template_data(message: &EmailMessage) -> Value {
    let mut data = match &message.value {
        Value::Object(fields) => fields.clone(),
        Value::Null => Map::new(),
        other => {
            let mut single = Map::new();
            single.insert("value".to_string(), other.clone());
            single
        }
    };
    data.insert("username".to_string(), Value::String(message.username.clone()));
    Value::Object(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_registered() {
        let renderer = TemplateRenderer::with_defaults().unwrap();

        for name in ["welcome", "resume-submitted", "resume-approved", "resume-rejected", "job-alert"] {
            assert!(renderer.has_template(name), "{} missing", name);
        }
    }

    #[test]
    fn test_render_merges_value_and_username() {
        let renderer = TemplateRenderer::with_defaults().unwrap();
        let message = EmailMessage::new(
            "alice@example.com",
            "Congratulations! Your Application Was Approved",
            "resume-approved",
            "alice",
            json!({"jobName": "Backend Engineer", "companyName": "Acme", "resumeId": 11, "jobId": 7}),
        );

        let rendered = renderer.render(&message).unwrap();

        assert_eq!(rendered.subject, "Congratulations! Your Application Was Approved");
        assert!(rendered.html_body.contains("Hi alice,"));
        assert!(rendered.html_body.contains("<strong>Backend Engineer</strong>"));
        assert!(rendered.text_body.contains("Acme approved"));
    }

    #[test]
    fn test_text_body_is_not_html_escaped() {
        let renderer = TemplateRenderer::with_defaults().unwrap();
        let message = EmailMessage::new(
            "alice@example.com",
            "Application Status Update",
            "resume-rejected",
            "alice",
            json!({"jobName": "R&D <Lead>", "companyName": "Acme & Co"}),
        );

        let rendered = renderer.render(&message).unwrap();

        assert!(rendered.text_body.contains("R&D <Lead> at Acme & Co"));
        assert!(rendered.html_body.contains("Acme &amp; Co"));
        assert!(rendered.html_body.contains("R&amp;D &lt;Lead&gt;"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = TemplateRenderer::with_defaults().unwrap();
        let message = EmailMessage::new("a@b.com", "Welcome", "welcome", "alice", json!({}));

        assert_eq!(renderer.render(&message).unwrap(), renderer.render(&message).unwrap());
    }

    #[test]
    fn test_unknown_template_is_error() {
        let renderer = TemplateRenderer::with_defaults().unwrap();
        let message = EmailMessage::new("a@b.com", "s", "password-reset", "alice", json!({}));

        assert!(matches!(renderer.render(&message), Err(AppError::TemplateError(_))));
    }

    #[test]
    fn test_invalid_template_source_is_rejected() {
        let mut renderer = TemplateRenderer::new();

        assert!(renderer.register("broken", "{{#if}}", "text").is_err());
    }
}
