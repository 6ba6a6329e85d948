//! FASTQ reading and writing
//!
//! # Accepted format
//!
//! Records consist of four lines each:
//!
//! ```text
//! @<name>
//! <sequence>
//! +[<name>]
//! <qualities>
//! ```
//!
//! * Lines may end with `\n` or `\r\n`; a `\r` next to the `\n` is stripped
//!   from the field content. A missing newline at the very end of the input
//!   is accepted.
//! * The header after the `+` may be repeated; if it is non-empty, it must
//!   equal the record header byte for byte. A bare `+` is always valid.
//! * Sequence and qualities must be of equal length. Multi-line sequences
//!   or qualities are not supported.
//!
//! # Example
//!
//! ```rust
//! use fq_io::fastq::Reader;
//! use fq_io::Record;
//!
//! let input = b"@id1 some description
//! SEQUENCE
//! +
//! IIIIIIII
//! @id2
//! SEQUENCE
//! +
//! IIIIIIII
//! ";
//!
//! let mut reader = Reader::new(&input[..]);
//! let mut output = vec![];
//! while let Some(result) = reader.next() {
//!     let record = result.unwrap();
//!     println!("ID: {}", String::from_utf8_lossy(record.id_bytes()));
//!     record.write_unchanged(&mut output).unwrap();
//! }
//! assert_eq!(&input[..], output.as_slice());
//! ```
//!
//! As the record returned by [`Reader::next()`](Reader::next) borrows its
//! data from the underlying buffer, it is not possible to use a `for` loop
//! for iterating. Use the `while let ...` construct instead, or one of the
//! owned-record iterators ([`Reader::records()`](Reader::records),
//! [`Reader::into_records()`](Reader::into_records)).
//!
//! # Error priority
//!
//! Validity checks are done in the following order:
//!
//! * Does the record start with `@`? If not:
//!   [`InvalidStart`](ErrorKind::InvalidStart).
//! * Does the separator line start with `+`? If not:
//!   [`InvalidSep`](ErrorKind::InvalidSep).
//! * Is a non-empty second header equal to the record header? If not:
//!   [`SecondHeaderMismatch`](ErrorKind::SecondHeaderMismatch).
//! * Do sequence and qualities have the same length? If not:
//!   [`UnequalLengths`](ErrorKind::UnequalLengths).
//!
//! A record truncated by the end of the input is reported as
//! [`UnexpectedEnd`](ErrorKind::UnexpectedEnd).

mod error;
mod reader;
mod write;

pub use self::error::*;
pub use self::reader::*;
pub use self::write::*;
