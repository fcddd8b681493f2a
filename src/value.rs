use std::fmt;

/// Anything `Cache::store` accepts. The variant is not persisted; only the bytes are.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bytes(Vec<u8>),
}

impl StoreValue {
    /// The exact bytes written to the store.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StoreValue::Str(s) => s.as_bytes().to_vec(),
            StoreValue::Int(i) => i.to_string().into_bytes(),
            // `{:?}` keeps the fractional part on whole numbers: 1.0 stays "1.0", not "1"
            StoreValue::Float(f) => format!("{f:?}").into_bytes(),
            StoreValue::Bytes(b) => b.clone(),
        }
    }
}

impl From<&str> for StoreValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for StoreValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for StoreValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for StoreValue {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<f64> for StoreValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<u8>> for StoreValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl From<&[u8]> for StoreValue {
    fn from(b: &[u8]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for StoreValue {
    fn from(b: &[u8; N]) -> Self {
        Self::Bytes(b.to_vec())
    }
}

/// Named conversions for values read back from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decode {
    Raw,
    Utf8,
    Integer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decoded {
    Raw(Vec<u8>),
    Utf8(String),
    Integer(i64),
}

impl Decode {
    pub fn apply(self, raw: Vec<u8>) -> anyhow::Result<Decoded> {
        Ok(match self {
            Decode::Raw => Decoded::Raw(raw),
            Decode::Utf8 => Decoded::Utf8(utf8(raw)?),
            Decode::Integer => Decoded::Integer(integer(raw)?),
        })
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decoded::Raw(b) => write!(f, "{}", String::from_utf8_lossy(b)),
            Decoded::Utf8(s) => f.write_str(s),
            Decoded::Integer(i) => write!(f, "{i}"),
        }
    }
}

pub fn utf8(raw: Vec<u8>) -> anyhow::Result<String> {
    Ok(String::from_utf8(raw)?)
}

/// Parse a base-10 integer, ignoring surrounding ASCII whitespace.
pub fn integer(raw: Vec<u8>) -> anyhow::Result<i64> {
    let text = std::str::from_utf8(&raw)?;
    Ok(text.trim_matches(|c: char| c.is_ascii_whitespace()).parse::<i64>()?)
}
