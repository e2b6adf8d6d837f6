//! Request payloads and their transport encoding.

use std::collections::{BTreeMap, HashMap};

use crate::params::Params;

/// The body content of a request before it is encoded for the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// Sent verbatim.
    Raw(String),
    /// Decoded as UTF-8 text, replacing invalid sequences.
    Bytes(Vec<u8>),
    /// Encoded in key insertion order.
    Form(Params),
    /// Generic key/value form, encoded in key order.
    Values(BTreeMap<String, Vec<String>>),
    #[default]
    Empty,
}

impl Payload {
    /// Encode the payload into the string that becomes the query string or
    /// the request body.
    pub fn encode(&self) -> String {
        match self {
            Payload::Raw(raw) => raw.clone(),
            Payload::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Payload::Form(params) => params.encode(),
            Payload::Values(values) => {
                let mut ser = form_urlencoded::Serializer::new(String::new());
                for (key, values) in values {
                    for value in values {
                        ser.append_pair(key, value);
                    }
                }
                ser.finish()
            }
            Payload::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }
}

impl From<String> for Payload {
    fn from(raw: String) -> Self {
        Payload::Raw(raw)
    }
}

impl From<&str> for Payload {
    fn from(raw: &str) -> Self {
        Payload::Raw(raw.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<Params> for Payload {
    fn from(params: Params) -> Self {
        Payload::Form(params)
    }
}

impl From<&Params> for Payload {
    fn from(params: &Params) -> Self {
        Payload::Form(params.clone())
    }
}

impl From<BTreeMap<String, Vec<String>>> for Payload {
    fn from(values: BTreeMap<String, Vec<String>>) -> Self {
        Payload::Values(values)
    }
}

impl From<HashMap<String, Vec<String>>> for Payload {
    fn from(values: HashMap<String, Vec<String>>) -> Self {
        Payload::Values(values.into_iter().collect())
    }
}

impl From<()> for Payload {
    fn from(_: ()) -> Self {
        Payload::Empty
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(payload: Option<T>) -> Self {
        payload.map(Into::into).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_sent_verbatim() {
        assert_eq!(Payload::from("a b&c").encode(), "a b&c");
    }

    #[test]
    fn bytes_are_decoded_as_text() {
        assert_eq!(Payload::from(b"hello".as_slice()).encode(), "hello");
        assert_eq!(Payload::from(vec![0x68u8, 0xff, 0x69]).encode(), "h\u{fffd}i");
    }

    #[test]
    fn form_uses_params_encoding() {
        let mut params = Params::new();
        params.set("b", "2").set("a", "1");
        assert_eq!(Payload::from(params).encode(), "b=2&a=1");
    }

    #[test]
    fn values_are_sorted_by_key() {
        let mut values = HashMap::new();
        values.insert("b".to_string(), vec!["2".to_string()]);
        values.insert("a".to_string(), vec!["1".to_string(), "x y".to_string()]);
        assert_eq!(Payload::from(values).encode(), "a=1&a=x+y&b=2");
    }

    #[test]
    fn empty_encodes_to_nothing() {
        assert_eq!(Payload::Empty.encode(), "");
        assert_eq!(Payload::from(()).encode(), "");
        assert!(Payload::from(None::<String>).is_empty());
    }
}
