//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use crate::proto;
use crate::proto::Encoding;
use crate::proto::typed_value::Value;

// ===== impl TypedValue =====

impl proto::TypedValue {
    // Encodes a scalar string value according to the requested encoding.
    //
    // JSON-based encodings carry the value as a JSON string literal.
    pub fn with_encoding(
        value: &str,
        encoding: Encoding,
    ) -> Result<Self, serde_json::Error> {
        let value = match encoding {
            Encoding::JsonIetf => {
                Value::JsonIetfVal(serde_json::to_vec(value)?)
            }
            Encoding::Json => Value::JsonVal(serde_json::to_vec(value)?),
            Encoding::Ascii => Value::AsciiVal(value.to_owned()),
            Encoding::Bytes => Value::BytesVal(value.as_bytes().to_vec()),
            Encoding::Proto => Value::StringVal(value.to_owned()),
        };

        Ok(proto::TypedValue { value: Some(value) })
    }

    // Returns the raw payload carried by this value.
    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.value.and_then(|value| match value {
            Value::JsonIetfVal(v)
            | Value::JsonVal(v)
            | Value::BytesVal(v)
            | Value::ProtoBytes(v) => Some(v),
            Value::StringVal(v) | Value::AsciiVal(v) => Some(v.into_bytes()),
            Value::IntVal(v) => Some(v.to_string().into_bytes()),
            Value::UintVal(v) => Some(v.to_string().into_bytes()),
            Value::BoolVal(v) => Some(v.to_string().into_bytes()),
            Value::DoubleVal(v) => Some(v.to_string().into_bytes()),
            Value::LeaflistVal(_) => None,
        })
    }
}

// ===== impl SetResponse =====

// Renders the Set confirmation, one line per acknowledged operation.
impl std::fmt::Display for proto::SetResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = self.prefix.as_ref().filter(|p| !p.elem.is_empty());
        if let Some(prefix) = prefix {
            writeln!(f, "prefix: {}", prefix)?;
        }
        for result in &self.response {
            let op = result.op().as_str_name();
            match &result.path {
                Some(path) => writeln!(f, "response: {} {}", op, path)?,
                None => writeln!(f, "response: {}", op)?,
            }
        }
        write!(f, "timestamp: {}", self.timestamp)
    }
}
