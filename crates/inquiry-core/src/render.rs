/// Message rendering for the email and notify channels
///
/// Templates are fixed. Field values are substituted positionally and never
/// interpreted, so any input renders.
use crate::constants::TIMESTAMP_FORMAT;
use crate::models::{InquiryRecord, SenderIdentity};
use chrono::{DateTime, FixedOffset};

/// Submission time, in the offset it should be displayed in
pub type Timestamp = DateTime<FixedOffset>;

/// Plain-text and HTML bodies of the acknowledgement email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub plain_text: String,
    pub html: String,
}

/// Short body posted to the chat webhook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNotice {
    pub short_text: String,
}

/// Every channel body rendered from one record and one timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub timestamp: String,
    pub email: RenderedEmail,
    pub notice: RenderedNotice,
}

/// Formats a timestamp as `YYYY/MM/DD HH:MM:SS`
pub fn format_timestamp(now: &Timestamp) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone)]
pub struct MessageRenderer {
    sender: SenderIdentity,
    escape_html: bool,
}

impl MessageRenderer {
    pub fn new(sender: SenderIdentity, escape_html: bool) -> Self {
        Self {
            sender,
            escape_html,
        }
    }

    pub fn render(&self, record: &InquiryRecord, now: &Timestamp) -> RenderedMessage {
        RenderedMessage {
            timestamp: format_timestamp(now),
            email: self.render_email(record, now),
            notice: self.render_notice(record, now),
        }
    }

    pub fn render_email(&self, record: &InquiryRecord, now: &Timestamp) -> RenderedEmail {
        let timestamp = format_timestamp(now);
        RenderedEmail {
            plain_text: self.plain_text(record, &timestamp),
            html: self.html(record, &timestamp),
        }
    }

    pub fn render_notice(&self, record: &InquiryRecord, now: &Timestamp) -> RenderedNotice {
        let timestamp = format_timestamp(now);
        RenderedNotice {
            short_text: format!(
                r"Calmatoホームページより以下お問い合わせがありました。
-------□■□ お問い合わせ内容 □■□-------
お名前　　　　: {name}
貴社名　　　　: {company}
メールアドレス: {email}
電話番号　　　: {phone}

件名: {subject}
日時: {timestamp}
内容: {content}
-----------------------------------
",
                name = record.name,
                company = record.company_name,
                email = record.email,
                phone = record.phone_number,
                subject = record.subject,
                timestamp = timestamp,
                content = record.content,
            ),
        }
    }

    fn plain_text(&self, record: &InquiryRecord, timestamp: &str) -> String {
        format!(
            r"※このメールはシステムからの自動返信です

{name} 様
Calmatoへお問い合わせありがとうございます。

以下の内容でお問い合わせを受付致しました。
後日、担当者よりご連絡いたしますので今しばらくお待ちくださいませ。

-------□■□ お問い合わせ内容 □■□-------
お名前　　　　: {name}
貴社名　　　　: {company}
メールアドレス: {email}
電話番号　　　: {phone}

件名: {subject}
日時: {timestamp}
内容: {content}
-----------------------------------

$ {sender_name}
$ Email: {sender_email}
",
            name = record.name,
            company = record.company_name,
            email = record.email,
            phone = record.phone_number,
            subject = record.subject,
            timestamp = timestamp,
            content = record.content,
            sender_name = self.sender.name,
            sender_email = self.sender.email,
        )
    }

    fn html(&self, record: &InquiryRecord, timestamp: &str) -> String {
        let field = |value: &str| -> String {
            if self.escape_html {
                ammonia::clean_text(value)
            } else {
                value.to_string()
            }
        };
        let name = field(&record.name);

        format!(
            "\n\
            <p>※このメールはシステムからの自動返信です<p>\n\
            <p>{name} 様</p>\n\
            <p>\n\
            \tCalmatoへお問い合わせありがとうございます。<br />\n\
            \t以下の内容でお問い合わせを受付致しました。<br />\n\
            \t後日、担当者よりご連絡いたしますので今しばらくお待ちくださいませ。\n\
            </p>\n\
            <h3>-------□■□ お問い合わせ内容 □■□-------</h3>\n\
            <table>\n\
            \t<tbody>\n\
            \t\t<tr>\n\
            \t\t\t<td>お名前</td>\n\
            \t\t\t<td>{name}</td>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<td>貴社名</td>\n\
            \t\t\t<td>{company}</td>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<td>メールアドレス</td>\n\
            \t\t\t<td>{email}</td>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<td>電話番号</td>\n\
            \t\t\t<td>{phone}</td>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<td>件名</td>\n\
            \t\t\t<td>{subject}</td>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<td>日時</td>\n\
            \t\t\t<td>{timestamp}</td>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<td>内容</td>\n\
            \t\t\t<td>{content}</td>\n\
            \t\t</tr>\n\
            \t</tbody>\n\
            </table>\n\
            <h3>-----------------------------------</h3>\n\
            $ {sender_name}<br />\n\
            $ email: {sender_email}<br />\n\
            $ url: {homepage}",
            name = name,
            company = field(&record.company_name),
            email = field(&record.email),
            phone = field(&record.phone_number),
            subject = field(&record.subject),
            timestamp = timestamp,
            content = field(&record.content),
            sender_name = self.sender.name,
            sender_email = self.sender.email,
            homepage = self.sender.homepage,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn renderer() -> MessageRenderer {
        MessageRenderer::new(SenderIdentity::new("info@calmato.jp"), false)
    }

    fn fixed_now() -> Timestamp {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2021, 3, 4, 5, 6, 7)
            .unwrap()
    }

    fn full_record() -> InquiryRecord {
        InquiryRecord {
            name: "田中 太郎".to_string(),
            company_name: "株式会社テスト".to_string(),
            email: "tanaka@example.com".to_string(),
            phone_number: "090-1234-5678".to_string(),
            subject: "サービスについて".to_string(),
            content: "資料を送ってください。\n2行目".to_string(),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(&fixed_now()), "2021/03/04 05:06:07");
    }

    #[test]
    fn test_render_is_deterministic() {
        let record = full_record();
        let first = renderer().render(&record, &fixed_now());
        let second = renderer().render(&record, &fixed_now());
        assert_eq!(first, second);
        assert_eq!(first.timestamp, "2021/03/04 05:06:07");
    }

    #[test]
    fn test_every_field_appears_in_each_body() {
        let record = full_record();
        let rendered = renderer().render(&record, &fixed_now());

        for body in [
            &rendered.email.plain_text,
            &rendered.email.html,
            &rendered.notice.short_text,
        ] {
            for value in [
                &record.name,
                &record.company_name,
                &record.email,
                &record.phone_number,
                &record.subject,
                &record.content,
            ] {
                assert!(body.contains(value.as_str()), "{value} missing from {body}");
            }
            assert!(body.contains("2021/03/04 05:06:07"));
        }
    }

    #[test]
    fn test_plain_text_layout() {
        let text = renderer().render_email(&full_record(), &fixed_now()).plain_text;

        assert!(text.starts_with("※このメールはシステムからの自動返信です\n\n田中 太郎 様\n"));
        assert!(text.contains("お名前　　　　: 田中 太郎\n"));
        assert!(text.contains("貴社名　　　　: 株式会社テスト\n"));
        assert!(text.contains("日時: 2021/03/04 05:06:07\n"));
        assert!(text.ends_with("$ Calmato 担当者\n$ Email: info@calmato.jp\n"));
    }

    #[test]
    fn test_html_layout() {
        let html = renderer().render_email(&full_record(), &fixed_now()).html;

        assert!(html.starts_with("\n<p>※このメールはシステムからの自動返信です<p>\n<p>田中 太郎 様</p>"));
        assert!(html.contains("\t\t\t<td>株式会社テスト</td>\n"));
        assert!(html.contains("\t<tbody>\n\t\t<tr>\n\t\t\t<td>お名前</td>\n"));
        assert!(html.ends_with(
            "$ Calmato 担当者<br />\n$ email: info@calmato.jp<br />\n$ url: https://www.calmato.jp"
        ));
    }

    #[test]
    fn test_notice_has_no_footer() {
        let notice = renderer().render_notice(&full_record(), &fixed_now());

        assert!(notice
            .short_text
            .starts_with("Calmatoホームページより以下お問い合わせがありました。\n"));
        assert!(notice.short_text.ends_with("-----------------------------------\n"));
        assert!(!notice.short_text.contains("Calmato 担当者"));
        assert!(!notice.short_text.contains("https://www.calmato.jp"));
    }

    #[test]
    fn test_empty_fields_render_as_empty() {
        let record = InquiryRecord {
            name: "田中".to_string(),
            email: "tanaka@example.com".to_string(),
            content: "見積もり希望".to_string(),
            ..Default::default()
        };

        let rendered = renderer().render(&record, &fixed_now());
        let text = &rendered.email.plain_text;

        assert!(text.contains("田中 様"));
        assert!(text.contains("見積もり希望"));
        assert!(text.contains("貴社名　　　　: \n"));
        assert!(text.contains("電話番号　　　: \n"));
        assert!(!text.contains("undefined"));
        assert!(rendered.email.html.contains("<td>貴社名</td>\n\t\t\t<td></td>"));
        assert!(rendered.notice.short_text.contains("件名: \n"));
    }

    #[test]
    fn test_template_special_characters_are_literal() {
        let record = InquiryRecord {
            name: "%s %d {name} {}".to_string(),
            content: "100% {{ }} %v".to_string(),
            ..Default::default()
        };

        let rendered = renderer().render(&record, &fixed_now());
        assert!(rendered.email.plain_text.contains("%s %d {name} {} 様"));
        assert!(rendered.email.html.contains("<td>100% {{ }} %v</td>"));
        assert!(rendered.notice.short_text.contains("内容: 100% {{ }} %v\n"));
    }

    #[test]
    fn test_html_is_verbatim_by_default() {
        let record = InquiryRecord {
            content: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };

        let html = renderer().render_email(&record, &fixed_now()).html;
        assert!(html.contains("<td><script>alert(1)</script></td>"));
    }

    #[test]
    fn test_html_escaping_when_enabled() {
        let renderer = MessageRenderer::new(SenderIdentity::new("info@calmato.jp"), true);
        let record = InquiryRecord {
            name: "<b>田中</b>".to_string(),
            content: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };

        let rendered = renderer.render(&record, &fixed_now());
        assert!(!rendered.email.html.contains("<script>"));
        assert!(rendered.email.html.contains("&lt;script&gt;"));
        assert!(!rendered.email.html.contains("<b>"));
        assert!(rendered.email.html.contains("&lt;b&gt;田中"));
        // Plain text and notice keep the raw value
        assert!(rendered.email.plain_text.contains("<script>alert(1)</script>"));
        assert!(rendered.notice.short_text.contains("<b>田中</b>"));
    }

    #[test]
    fn test_escaping_encodes_whitespace() {
        let renderer = MessageRenderer::new(SenderIdentity::new("info@calmato.jp"), true);
        let rendered = renderer.render(&full_record(), &fixed_now());

        assert!(!rendered.email.html.contains("田中 太郎"));
        assert!(rendered.email.html.contains("<td>田中&#32;太郎</td>"));
        assert!(rendered.email.html.contains("資料を送ってください。&#10;2行目"));
        assert!(rendered.email.plain_text.contains("田中 太郎"));
    }
}
