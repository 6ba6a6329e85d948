//! Sequence record types and the builder trait used by the parser.
//!
//! Two owned record flavours are provided:
//!
//! * [`SequenceRecord`](SequenceRecord) holds ASCII text fields; qualities
//!   are optional.
//! * [`BytesRecord`](BytesRecord) holds opaque byte strings; qualities are
//!   always present.
//!
//! Both implement the common [`Record`](Record) trait, as does the borrowed
//! [`RefRecord`](crate::fastq::RefRecord) returned by the parser. Custom
//! record types can be produced directly by the parser by implementing
//! [`FromFastq`](FromFastq).

use crate::ascii::is_ascii;
use crate::core::{shorten, DISPLAY_LIMIT, SNIPPET_LIMIT};
use crate::pairing::ids_match;
use memchr::memchr2;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use std::ops::Range;

/// Record accessors common to owned and borrowed records.
///
/// `name()`, `sequence()` and `qualities()` return raw bytes; the textual
/// [`SequenceRecord`](SequenceRecord) additionally has inherent `&str`
/// accessors of the same names.
pub trait Record {
    /// Return the full header line (without `@`) as a byte slice
    fn name(&self) -> &[u8];
    /// Return the sequence as a byte slice
    fn sequence(&self) -> &[u8];
    /// Return the quality line as a byte slice, if present
    fn qualities(&self) -> Option<&[u8]>;

    /// Length of the sequence
    #[inline]
    fn len(&self) -> usize {
        self.sequence().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.sequence().is_empty()
    }

    /// Return the read ID: the name up to the first space or tab, or the
    /// whole name if it contains neither.
    #[inline]
    fn id_bytes(&self) -> &[u8] {
        let name = self.name();
        match memchr2(b' ', b'\t', name) {
            Some(end) => &name[..end],
            None => name,
        }
    }

    /// Check whether this record and `other` belong to the same read pair,
    /// tolerating a differing trailing mate number (see
    /// [`ids_match`](crate::ids_match)).
    #[inline]
    fn is_mate<O: Record>(&self, other: &O) -> bool {
        ids_match(self.name(), other.name())
    }

    /// Return the qualities as a byte slice, or
    /// `RecordError::MissingQualities` if the record has none.
    #[inline]
    fn qualities_as_bytes(&self) -> Result<&[u8], RecordError> {
        self.qualities().ok_or(RecordError::MissingQualities)
    }

    /// Serialize the record into FASTQ wire format with a single exact-size
    /// allocation. With `two_headers`, the name is repeated after the `+`.
    /// Fails with `RecordError::MissingQualities` if the record has no
    /// qualities.
    fn fastq_bytes(&self, two_headers: bool) -> Result<Vec<u8>, RecordError> {
        let qual = self.qualities_as_bytes()?;
        Ok(crate::fastq::fastq_bytes(
            self.name(),
            self.sequence(),
            qual,
            two_headers,
        ))
    }
}

/// Builder trait invoked by the parser to materialize owned records.
///
/// The parser calls `from_fastq` exactly once per record with the three
/// field slices, already stripped of `@`/`+` markers and `\r\n` line
/// endings. Each slice should be copied once into the new record.
///
/// With `ASCII_ONLY` set, the parser validates the whole record as 7-bit
/// ASCII in a single sweep before calling `from_fastq`, and rejects
/// non-ASCII input with a parse error. Implementations may then construct
/// text fields without scanning the bytes again.
pub trait FromFastq: Sized {
    /// Whether the parser must validate the record bytes as ASCII before
    /// building.
    const ASCII_ONLY: bool;

    /// Build a record from raw field slices.
    ///
    /// # Safety
    ///
    /// If `ASCII_ONLY` is `true`, the caller must guarantee that every byte
    /// of `name`, `sequence` and `qualities` is in `[0, 127]`.
    unsafe fn from_fastq(name: &[u8], sequence: &[u8], qualities: &[u8]) -> Self;
}

/// An owned sequence record holding ASCII text.
///
/// Invariants upheld by all constructors and setters:
///
/// * every field is 7-bit ASCII,
/// * the name contains no `\n` or `\r`,
/// * qualities, if present, have the same length as the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    name: String,
    sequence: String,
    qualities: Option<String>,
}

impl SequenceRecord {
    /// Create a record, validating all invariants.
    pub fn new(
        name: String,
        sequence: String,
        qualities: Option<String>,
    ) -> Result<Self, RecordError> {
        check_name(&name)?;
        check_ascii("sequence", &sequence)?;
        if let Some(qual) = qualities.as_ref() {
            check_ascii("qualities", qual)?;
            check_lengths(&name, sequence.len(), qual.len())?;
        }
        Ok(SequenceRecord {
            name,
            sequence,
            qualities,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    #[inline]
    pub fn qualities(&self) -> Option<&str> {
        self.qualities.as_deref()
    }

    /// Replace the name, re-validating it.
    pub fn set_name(&mut self, name: String) -> Result<(), RecordError> {
        check_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replace the sequence. The new sequence must be ASCII and, if
    /// qualities are present, of the same length.
    pub fn set_sequence(&mut self, sequence: String) -> Result<(), RecordError> {
        check_ascii("sequence", &sequence)?;
        if let Some(qual) = self.qualities.as_ref() {
            check_lengths(&self.name, sequence.len(), qual.len())?;
        }
        self.sequence = sequence;
        Ok(())
    }

    /// Replace (or remove) the qualities. New qualities must be ASCII and
    /// of the same length as the sequence.
    pub fn set_qualities(&mut self, qualities: Option<String>) -> Result<(), RecordError> {
        if let Some(qual) = qualities.as_ref() {
            check_ascii("qualities", qual)?;
            check_lengths(&self.name, self.sequence.len(), qual.len())?;
        }
        self.qualities = qualities;
        Ok(())
    }

    /// Return a new record over `sequence[range]` (and `qualities[range]`,
    /// if present). The name is carried over unchanged.
    ///
    /// Panics if the range is out of bounds, like standard slicing.
    pub fn slice(&self, range: Range<usize>) -> SequenceRecord {
        SequenceRecord {
            name: self.name.clone(),
            sequence: self.sequence[range.clone()].to_owned(),
            qualities: self.qualities.as_ref().map(|q| q[range.clone()].to_owned()),
        }
    }

    /// Return the reverse complement of this record: the sequence is
    /// complemented (IUPAC ambiguity codes included, unknown characters
    /// passed through) and reversed, the qualities are reversed, the name
    /// is kept.
    pub fn reverse_complement(&self) -> SequenceRecord {
        let mut sequence = Vec::with_capacity(self.sequence.len());
        sequence.extend(
            self.sequence
                .bytes()
                .rev()
                .map(|b| COMPLEMENT[b as usize]),
        );
        let qualities = self
            .qualities
            .as_ref()
            .map(|q| q.chars().rev().collect::<String>());
        SequenceRecord {
            name: self.name.clone(),
            // the table maps ASCII to ASCII and the input is ASCII
            sequence: unsafe { String::from_utf8_unchecked(sequence) },
            qualities,
        }
    }
}

impl Record for SequenceRecord {
    #[inline]
    fn name(&self) -> &[u8] {
        self.name.as_bytes()
    }

    #[inline]
    fn sequence(&self) -> &[u8] {
        self.sequence.as_bytes()
    }

    #[inline]
    fn qualities(&self) -> Option<&[u8]> {
        self.qualities.as_ref().map(|q| q.as_bytes())
    }
}

impl FromFastq for SequenceRecord {
    const ASCII_ONLY: bool = true;

    #[inline]
    unsafe fn from_fastq(name: &[u8], sequence: &[u8], qualities: &[u8]) -> Self {
        SequenceRecord {
            name: String::from_utf8_unchecked(name.to_vec()),
            sequence: String::from_utf8_unchecked(sequence.to_vec()),
            qualities: Some(String::from_utf8_unchecked(qualities.to_vec())),
        }
    }
}

impl fmt::Display for SequenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SequenceRecord(name=\"{}\", sequence=\"{}\"",
            shorten(self.name.as_bytes(), DISPLAY_LIMIT),
            shorten(self.sequence.as_bytes(), DISPLAY_LIMIT),
        )?;
        if let Some(qual) = self.qualities.as_ref() {
            write!(f, ", qualities=\"{}\"", shorten(qual.as_bytes(), DISPLAY_LIMIT))?;
        }
        write!(f, ")")
    }
}

/// An owned record holding opaque byte strings. Unlike
/// [`SequenceRecord`](SequenceRecord), fields are not required to be ASCII,
/// and qualities are mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BytesRecord {
    name: Vec<u8>,
    sequence: Vec<u8>,
    qualities: Vec<u8>,
}

impl BytesRecord {
    /// Create a record; sequence and qualities must have the same length.
    pub fn new(
        name: Vec<u8>,
        sequence: Vec<u8>,
        qualities: Vec<u8>,
    ) -> Result<Self, RecordError> {
        check_lengths(
            &String::from_utf8_lossy(&name),
            sequence.len(),
            qualities.len(),
        )?;
        Ok(BytesRecord {
            name,
            sequence,
            qualities,
        })
    }

    /// Return a new record over `sequence[range]` and `qualities[range]`,
    /// carrying the name over unchanged.
    ///
    /// Panics if the range is out of bounds, like standard slicing.
    pub fn slice(&self, range: Range<usize>) -> BytesRecord {
        BytesRecord {
            name: self.name.clone(),
            sequence: self.sequence[range.clone()].to_owned(),
            qualities: self.qualities[range].to_owned(),
        }
    }
}

impl Record for BytesRecord {
    #[inline]
    fn name(&self) -> &[u8] {
        &self.name
    }

    #[inline]
    fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    #[inline]
    fn qualities(&self) -> Option<&[u8]> {
        Some(&self.qualities)
    }
}

impl FromFastq for BytesRecord {
    const ASCII_ONLY: bool = false;

    #[inline]
    unsafe fn from_fastq(name: &[u8], sequence: &[u8], qualities: &[u8]) -> Self {
        BytesRecord {
            name: name.to_vec(),
            sequence: sequence.to_vec(),
            qualities: qualities.to_vec(),
        }
    }
}

/// Errors reported by record constructors, setters and accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A text field contains bytes outside `[0, 127]`
    NonAscii { field: &'static str },
    /// The name contains a line terminator
    InvalidName { name: String },
    /// Sequence and qualities differ in length
    LengthMismatch {
        name: String,
        seq: usize,
        qual: usize,
    },
    /// `qualities_as_bytes` or `fastq_bytes` called on a record without
    /// qualities
    MissingQualities,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecordError::NonAscii { field } => {
                write!(f, "record {} must contain only ASCII characters", field)
            }
            RecordError::InvalidName { name } => {
                write!(f, "record name '{}' may not contain line breaks", name)
            }
            RecordError::LengthMismatch { name, seq, qual } => write!(
                f,
                "sequence and qualities of record '{}' differ in length ({} != {})",
                name, seq, qual
            ),
            RecordError::MissingQualities => write!(f, "record has no qualities"),
        }
    }
}

impl StdError for RecordError {}

#[inline]
fn check_name(name: &str) -> Result<(), RecordError> {
    if !is_ascii(name.as_bytes()) {
        return Err(RecordError::NonAscii { field: "name" });
    }
    if memchr2(b'\n', b'\r', name.as_bytes()).is_some() {
        return Err(RecordError::InvalidName {
            name: shorten(name.as_bytes(), SNIPPET_LIMIT),
        });
    }
    Ok(())
}

#[inline]
fn check_ascii(field: &'static str, text: &str) -> Result<(), RecordError> {
    if !is_ascii(text.as_bytes()) {
        return Err(RecordError::NonAscii { field });
    }
    Ok(())
}

#[inline]
fn check_lengths(name: &str, seq: usize, qual: usize) -> Result<(), RecordError> {
    if seq != qual {
        return Err(RecordError::LengthMismatch {
            name: shorten(name.as_bytes(), SNIPPET_LIMIT),
            seq,
            qual,
        });
    }
    Ok(())
}

/// DNA/RNA complement lookup covering the IUPAC ambiguity codes in both
/// cases. Characters without a complement are passed through.
const COMPLEMENT: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    table[b'A' as usize] = b'T';
    table[b'T' as usize] = b'A';
    table[b'U' as usize] = b'A';
    table[b'G' as usize] = b'C';
    table[b'C' as usize] = b'G';
    table[b'R' as usize] = b'Y';
    table[b'Y' as usize] = b'R';
    table[b'K' as usize] = b'M';
    table[b'M' as usize] = b'K';
    table[b'B' as usize] = b'V';
    table[b'V' as usize] = b'B';
    table[b'D' as usize] = b'H';
    table[b'H' as usize] = b'D';
    table[b'a' as usize] = b't';
    table[b't' as usize] = b'a';
    table[b'u' as usize] = b'a';
    table[b'g' as usize] = b'c';
    table[b'c' as usize] = b'g';
    table[b'r' as usize] = b'y';
    table[b'y' as usize] = b'r';
    table[b'k' as usize] = b'm';
    table[b'm' as usize] = b'k';
    table[b'b' as usize] = b'v';
    table[b'v' as usize] = b'b';
    table[b'd' as usize] = b'h';
    table[b'h' as usize] = b'd';
    table
};
