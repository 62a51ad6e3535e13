// crates/country-card-core/src/notice.rs

//! Admin-only banner listing why the block could not be activated.

use crate::html::{escape, escape_allow_code};
use crate::i18n::{English, Msg, Translator};
use crate::requirements::CheckReport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotice {
    title: String,
    messages: Vec<String>,
}

impl AdminNotice {
    pub fn from_report(report: &CheckReport) -> Self {
        Self::from_report_with(report, &English)
    }

    pub fn from_report_with(report: &CheckReport, tr: &dyn Translator) -> Self {
        Self {
            title: tr.text(Msg::NoticeTitle),
            messages: report.failures().iter().map(|f| f.message.clone()).collect(),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// `<div class="notice notice-error">` with a bold title and one list item
    /// per failure. Messages keep `<code>` tags; everything else is escaped.
    pub fn render(&self) -> String {
        let items: String = self
            .messages
            .iter()
            .map(|m| format!("<li>{}</li>", escape_allow_code(m)))
            .collect();
        format!(
            r#"<div class="notice notice-error"><p><strong>{}</strong></p><ul>{items}</ul></div>"#,
            escape(&self.title)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::FailureCode;

    #[test]
    fn lists_every_failure() {
        let mut report = CheckReport::default();
        report.add(FailureCode::RuntimeVersion, "too old <script>");
        report.add(FailureCode::RequiredFiles, "run <code>make</code>");

        let html = AdminNotice::from_report(&report).render();
        assert!(html.starts_with(r#"<div class="notice notice-error"><p><strong>Country Card plugin could not be initialized.</strong></p><ul>"#));
        assert!(html.contains("<li>too old &lt;script&gt;</li>"));
        assert!(html.contains("<li>run <code>make</code></li>"));
        assert_eq!(html.matches("<li>").count(), 2);
    }
}
