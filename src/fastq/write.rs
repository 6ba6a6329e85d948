use std::io;

/// Serialize one record into FASTQ wire format, returning the bytes
///
/// ```text
/// @<name>\n<sequence>\n+[<name>]\n<qualities>\n
/// ```
///
/// with the name repeated after the `+` if `two_headers` is set. The buffer
/// is allocated once with the exact output size and filled by direct byte
/// copies.
pub fn fastq_bytes(name: &[u8], sequence: &[u8], qualities: &[u8], two_headers: bool) -> Vec<u8> {
    let second_head_len = if two_headers { name.len() } else { 0 };
    let size = 1 + name.len() + 1 + sequence.len() + 2 + second_head_len + 1 + qualities.len() + 1;
    let mut out = Vec::with_capacity(size);
    out.push(b'@');
    out.extend_from_slice(name);
    out.push(b'\n');
    out.extend_from_slice(sequence);
    out.push(b'\n');
    out.push(b'+');
    if two_headers {
        out.extend_from_slice(name);
    }
    out.push(b'\n');
    out.extend_from_slice(qualities);
    out.push(b'\n');
    debug_assert_eq!(out.len(), size);
    out
}

/// Helper function for writing data (not necessarily stored in a `Record`
/// instance) to the FASTQ format, with a bare `+` separator line.
pub fn write<W: io::Write>(
    mut writer: W,
    name: &[u8],
    sequence: &[u8],
    qualities: &[u8],
) -> io::Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(name)?;
    writer.write_all(b"\n")?;
    writer.write_all(sequence)?;
    writer.write_all(b"\n+\n")?;
    writer.write_all(qualities)?;
    writer.write_all(b"\n")
}

/// Like [`write`](write()), but repeats the name after the `+` separator.
pub fn write_two_headers<W: io::Write>(
    mut writer: W,
    name: &[u8],
    sequence: &[u8],
    qualities: &[u8],
) -> io::Result<()> {
    writer.write_all(b"@")?;
    writer.write_all(name)?;
    writer.write_all(b"\n")?;
    writer.write_all(sequence)?;
    writer.write_all(b"\n+")?;
    writer.write_all(name)?;
    writer.write_all(b"\n")?;
    writer.write_all(qualities)?;
    writer.write_all(b"\n")
}
