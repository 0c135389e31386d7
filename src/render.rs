//! Deterministic text forms for call arguments and results.
//!
//! History logs store these strings, so the output here must never depend on
//! platform or allocator details.

use std::fmt::Write;

/// A value accepted by instrumented operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
}

impl Arg {
    /// Payload as written to the store: UTF-8 text, raw bytes, or the number
    /// in decimal (floats via [`format_float`]).
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Arg::Str(s) => s.as_bytes().to_vec(),
            Arg::Bytes(b) => b.clone(),
            Arg::Int(i) => i.to_string().into_bytes(),
            Arg::Float(f) => format_float(*f).into_bytes(),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Str(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Str(s)
    }
}

impl From<&[u8]> for Arg {
    fn from(b: &[u8]) -> Self {
        Arg::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(b: Vec<u8>) -> Self {
        Arg::Bytes(b)
    }
}

impl From<i64> for Arg {
    fn from(i: i64) -> Self {
        Arg::Int(i)
    }
}

impl From<i32> for Arg {
    fn from(i: i32) -> Self {
        Arg::Int(i64::from(i))
    }
}

impl From<f64> for Arg {
    fn from(f: f64) -> Self {
        Arg::Float(f)
    }
}

/// Text form recorded in history logs.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Arg {
    /// Literal form: quoted strings, `b"..."` bytes, finite floats always keep
    /// a decimal point or exponent so `3` and `3.0` stay distinct.
    fn render(&self) -> String {
        match self {
            Arg::Str(s) => format!("{:?}", s),
            Arg::Bytes(b) => render_bytes(b),
            Arg::Int(i) => i.to_string(),
            Arg::Float(f) => format_float(*f),
        }
    }
}

impl Render for str {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for String {
    fn render(&self) -> String {
        self.clone()
    }
}

impl Render for i64 {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for usize {
    fn render(&self) -> String {
        self.to_string()
    }
}

impl Render for f64 {
    fn render(&self) -> String {
        format_float(*self)
    }
}

impl Render for Vec<u8> {
    fn render(&self) -> String {
        render_bytes(self)
    }
}

impl Render for () {
    fn render(&self) -> String {
        "()".to_string()
    }
}

impl<T: Render> Render for Option<T> {
    fn render(&self) -> String {
        match self {
            Some(v) => format!("Some({})", v.render()),
            None => "None".to_string(),
        }
    }
}

/// Shortest round-trip decimal in the form Redis clients write floats:
/// `3.0`, `2.5`, `1e+20`, `1.5e-05`, `nan`, `inf`, `-inf`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let text = format!("{:?}", f);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// Renders an argument tuple as `(a, b, ...)`.
pub fn render_args(args: &[Arg]) -> String {
    let parts: Vec<String> = args.iter().map(Render::render).collect();
    format!("({})", parts.join(", "))
}

fn render_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b\"");
    for &b in bytes {
        for c in std::ascii::escape_default(b) {
            out.push(char::from(c));
        }
    }
    out.push('"');
    out
}

/// Truncated preview for log lines.
pub(crate) fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    let _ = write!(out, "... ({} chars)", text.chars().count());
    out
}
