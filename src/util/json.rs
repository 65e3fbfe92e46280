use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indentation used for pretty output.
const PRETTY_INDENT: &[u8] = b"    ";

/// Serializes `value` to JSON, compact or indented by four spaces.
pub fn to_json_string<T: Serialize + ?Sized>(
    value: &T,
    pretty: bool,
) -> Result<String, serde_json::Error> {
    if !pretty {
        return serde_json::to_string(value);
    }

    let mut out = Vec::new();
    let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(PRETTY_INDENT));
    value.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}
