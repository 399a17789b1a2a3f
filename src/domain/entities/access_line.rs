use std::fmt::Write as _;

use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};

/// Request shape handed to handlers. The body is fully buffered before the
/// handler runs.
pub type Request = axum::http::Request<Bytes>;

/// Status reported when a handler writes body bytes without setting one.
pub const DEFAULT_STATUS: StatusCode = StatusCode::OK;

/// Request fields an access entry needs, captured when the request arrives so
/// the entry can be rendered after the request itself is gone.
///
/// The user agent is kept as the raw header bytes; it need not be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLine {
    pub method: Method,
    pub target: String,
    pub user_agent: Vec<u8>,
}

impl AccessLine {
    pub fn new(method: Method, target: impl Into<String>, user_agent: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            target: target.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn from_request(request: &Request) -> Self {
        let user_agent = request
            .headers()
            .get(header::USER_AGENT)
            .map(|v| v.as_bytes().to_vec())
            .unwrap_or_default();

        Self {
            method: request.method().clone(),
            target: request.uri().to_string(),
            user_agent,
        }
    }

    /// Renders `<METHOD> <PATH?QUERY> <STATUS> "<USER-AGENT>"`.
    ///
    /// Method and target are written verbatim, the user agent through [`quote`].
    pub fn format(&self, status: StatusCode) -> String {
        format!(
            "{} {} {} {}",
            self.method,
            self.target,
            status.as_u16(),
            quote(&self.user_agent)
        )
    }
}

/// Double-quotes `raw` with Go `%q` escaping.
///
/// `"` and `\` get a backslash, `\a \b \f \n \r \t \v` their short forms,
/// bytes that are not valid UTF-8 and other ASCII controls become `\xNN`, and
/// remaining non-printable characters `\uXXXX` or `\UXXXXXXXX`.
pub fn quote(raw: &[u8]) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for chunk in raw.utf8_chunks() {
        for c in chunk.valid().chars() {
            push_escaped(&mut out, c);
        }
        for b in chunk.invalid() {
            let _ = write!(out, "\\x{b:02x}");
        }
    }
    out.push('"');
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '"' => out.push_str("\\\""),
        '\\' => out.push_str("\\\\"),
        '\u{07}' => out.push_str("\\a"),
        '\u{08}' => out.push_str("\\b"),
        '\u{0c}' => out.push_str("\\f"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        '\u{0b}' => out.push_str("\\v"),
        ' ' => out.push(' '),
        c if c.is_ascii_control() => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c if c.is_control() || c.is_whitespace() => {
            if (c as u32) < 0x10000 {
                let _ = write!(out, "\\u{:04x}", c as u32);
            } else {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
        c => out.push(c),
    }
}
