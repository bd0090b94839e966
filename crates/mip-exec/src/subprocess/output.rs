//! Reading and decoding the child's stdout.
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use mip_core::{LabelError, LabelResult};

use crate::OutputEncoding;

/// Read `reader` to EOF and return its lines joined with `\n`.
///
/// Each line is decoded on its own and stripped of trailing `\r`/`\n`.
pub(crate) async fn read_all_lines<R>(reader: R, encoding: OutputEncoding) -> LabelResult<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        lines.push(decode_line(&buf, encoding)?);
    }
    Ok(lines.join("\n"))
}

/// Read exactly one line; empty string when the stream ends first.
pub(crate) async fn read_first_line<R>(reader: R, encoding: OutputEncoding) -> LabelResult<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf).await?;
    decode_line(&buf, encoding)
}

fn decode_line(raw: &[u8], encoding: OutputEncoding) -> LabelResult<String> {
    let text = encoding.decode(raw).ok_or(LabelError::Decode {
        encoding: encoding.name(),
    })?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}
