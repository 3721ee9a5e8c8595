// SPDX-FileCopyrightText: 2026 Action Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text extraction from raw RFC 822 messages.
//!
//! Pure parsing over bytes, no I/O. `mail-parser` handles the multipart
//! descent (depth-first, first text part wins), content-transfer decoding
//! (base64, quoted-printable), and lossy charset conversion to UTF-8; this
//! module normalizes the result into the tuple the pipeline persists.

use acthub_core::HubError;
use mail_parser::MessageParser;

/// Normalized fields extracted from one inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedMail {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    /// Plain-text body with newlines preserved and leading reply-quote
    /// markers (`> `) stripped.
    pub body: String,
    /// RFC 5322 Message-ID, the pipeline's deduplication key.
    pub message_id: Option<String>,
    /// RFC 3339 timestamp from the Date header, or ingestion time when
    /// the header is missing or unparseable.
    pub received_at: String,
}

/// Parse a raw message into its normalized form.
///
/// Fails with [`HubError::Extraction`] when the bytes are not parseable
/// as a message or no text body can be recovered.
pub fn extract(raw: &[u8]) -> Result<ExtractedMail, HubError> {
    let parsed = MessageParser::default()
        .parse(raw)
        .ok_or_else(|| HubError::Extraction {
            message: "unparseable message structure".to_string(),
        })?;

    let sender = parsed
        .from()
        .and_then(|addr| addr.first())
        .and_then(|a| a.address())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    let recipient = parsed
        .to()
        .and_then(|addr| addr.first())
        .and_then(|a| a.address())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string());

    // body_text descends multipart structures depth-first and returns the
    // first text part, decoded; an HTML-only message is down-converted.
    let body_raw = parsed.body_text(0).ok_or_else(|| HubError::Extraction {
        message: "no text body found".to_string(),
    })?;
    let body = strip_quote_markers(&body_raw);

    let subject = match parsed.subject() {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => first_line(&body),
    };

    let message_id = parsed.message_id().map(str::to_string);

    let received_at = parsed
        .date()
        .map(|d| d.to_rfc3339())
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

    Ok(ExtractedMail {
        sender,
        recipient,
        subject,
        body,
        message_id,
        received_at,
    })
}

/// Remove leading reply-quote markers (`>`, `>>`, ...) from each line.
///
/// Matches the established cleanup: one or more `>` characters followed by
/// a whitespace character are dropped; a bare `>` line becomes empty.
fn strip_quote_markers(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    for (i, line) in body.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(strip_line_quote(line));
    }
    out
}

fn strip_line_quote(line: &str) -> &str {
    let trimmed = line.trim_start_matches('>');
    if trimmed.len() == line.len() {
        return line; // no quote marker
    }
    // Quote markers are conventionally followed by a single space.
    trimmed.strip_prefix(' ').unwrap_or(trimmed)
}

/// First non-empty line of the body, used as a title when the message has
/// no subject.
fn first_line(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("(no subject)")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_message_extracts_headers_and_body() {
        let raw = b"From: Jane Doe <jane@example.org>\r\n\
                    To: hub@example.org\r\n\
                    Subject: Volunteers needed\r\n\
                    Message-ID: <abc123@example.org>\r\n\
                    Date: Tue, 10 Mar 2026 10:00:00 +0000\r\n\
                    Content-Type: text/plain\r\n\
                    \r\n\
                    We need three volunteers on Saturday.\r\n";

        let mail = extract(raw).unwrap();
        assert_eq!(mail.sender, "jane@example.org");
        assert_eq!(mail.recipient, "hub@example.org");
        assert_eq!(mail.subject, "Volunteers needed");
        assert_eq!(mail.message_id.as_deref(), Some("abc123@example.org"));
        assert!(mail.body.contains("three volunteers"));
        assert!(mail.received_at.starts_with("2026-03-10T"));
    }

    #[test]
    fn multipart_base64_plain_part_is_decoded() {
        // "Hello\nWorld" base64-encoded is SGVsbG8KV29ybGQ=
        let raw = b"From: a@example.org\r\n\
                    To: b@example.org\r\n\
                    Subject: multipart\r\n\
                    MIME-Version: 1.0\r\n\
                    Content-Type: multipart/alternative; boundary=\"xyz\"\r\n\
                    \r\n\
                    --xyz\r\n\
                    Content-Type: text/plain; charset=utf-8\r\n\
                    Content-Transfer-Encoding: base64\r\n\
                    \r\n\
                    SGVsbG8KV29ybGQ=\r\n\
                    --xyz\r\n\
                    Content-Type: text/html\r\n\
                    \r\n\
                    <p>Hello World</p>\r\n\
                    --xyz--\r\n";

        let mail = extract(raw).unwrap();
        assert_eq!(mail.body, "Hello\nWorld");
    }

    #[test]
    fn quoted_printable_body_is_decoded() {
        let raw = b"From: a@example.org\r\n\
                    To: b@example.org\r\n\
                    Subject: qp\r\n\
                    Content-Type: text/plain; charset=utf-8\r\n\
                    Content-Transfer-Encoding: quoted-printable\r\n\
                    \r\n\
                    caf=C3=A9 meeting\r\n";

        let mail = extract(raw).unwrap();
        assert!(mail.body.contains("café meeting"));
    }

    #[test]
    fn reply_quote_markers_are_stripped() {
        assert_eq!(
            strip_quote_markers("answer\n> original line\n>> deeper\nplain"),
            "answer\noriginal line\ndeeper\nplain"
        );
    }

    #[test]
    fn missing_subject_falls_back_to_first_body_line() {
        let raw = b"From: a@example.org\r\n\
                    To: b@example.org\r\n\
                    Content-Type: text/plain\r\n\
                    \r\n\
                    \r\n\
                    Water access question from the fairgrounds meeting.\r\n\
                    Second line.\r\n";

        let mail = extract(raw).unwrap();
        assert_eq!(
            mail.subject,
            "Water access question from the fairgrounds meeting."
        );
    }

    #[test]
    fn garbage_bytes_fail_extraction() {
        // An empty input has neither headers nor a body part.
        let err = extract(b"").unwrap_err();
        assert!(matches!(err, HubError::Extraction { .. }));
    }

    #[test]
    fn newlines_in_body_are_preserved() {
        let raw = b"From: a@example.org\r\n\
                    To: b@example.org\r\n\
                    Subject: lines\r\n\
                    Content-Type: text/plain\r\n\
                    \r\n\
                    line one\r\n\
                    \r\n\
                    line three\r\n";

        let mail = extract(raw).unwrap();
        assert!(mail.body.contains("line one\n\nline three"));
    }
}
