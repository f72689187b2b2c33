use std::io::Write;

use serde::Serialize;

use crate::{error::ErrorContext, ProbeResult};

/// Renders `records` as a JSON array followed by a newline.
pub fn render_json<T: Serialize>(records: &[T], pretty: bool) -> ProbeResult<String> {
    let mut output = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    output.push('\n');
    Ok(output)
}

/// Writes the rendered array to `writer` in one write.
pub fn write_json<T: Serialize, W: Write>(
    writer: &mut W,
    records: &[T],
    pretty: bool,
) -> ProbeResult<()> {
    let output = render_json(records, pretty)?;
    writer
        .write_all(output.as_bytes())
        .with_context(|| "writing repositories".to_string())?;
    writer
        .flush()
        .with_context(|| "flushing output".to_string())
}
