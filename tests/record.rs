use fq_io::fastq;
use fq_io::{BytesRecord, Record, RecordError, SequenceRecord};
use matches::assert_matches;

fn record(name: &str, seq: &str, qual: Option<&str>) -> SequenceRecord {
    SequenceRecord::new(name.into(), seq.into(), qual.map(|q| q.into())).unwrap()
}

#[test]
fn construction() {
    let rec = record("read1 extra", "ACGT", Some("IIII"));
    assert_eq!(rec.name(), "read1 extra");
    assert_eq!(rec.sequence(), "ACGT");
    assert_eq!(rec.qualities(), Some("IIII"));
    assert_eq!(rec.len(), 4);
    assert!(!rec.is_empty());
    assert_eq!(rec.id_bytes(), b"read1");

    let rec = record("read1", "", None);
    assert_eq!(rec.qualities(), None);
    assert!(rec.is_empty());
}

#[test]
fn construction_failures() {
    let res = SequenceRecord::new("réad".into(), "A".into(), None);
    assert_matches!(res, Err(RecordError::NonAscii { field: "name" }));

    let res = SequenceRecord::new("r".into(), "é".into(), None);
    assert_matches!(res, Err(RecordError::NonAscii { field: "sequence" }));

    let res = SequenceRecord::new("r".into(), "A".into(), Some("é".into()));
    assert_matches!(res, Err(RecordError::NonAscii { field: "qualities" }));

    let res = SequenceRecord::new("a\nb".into(), "A".into(), None);
    assert_matches!(res, Err(RecordError::InvalidName { .. }));
    let res = SequenceRecord::new("a\rb".into(), "A".into(), None);
    assert_matches!(res, Err(RecordError::InvalidName { .. }));

    let res = SequenceRecord::new("r".into(), "ACGT".into(), Some("II".into()));
    match res {
        Err(RecordError::LengthMismatch { name, seq, qual }) => {
            assert_eq!(name, "r");
            assert_eq!(seq, 4);
            assert_eq!(qual, 2);
        }
        other => panic!("expected LengthMismatch, got {:?}", other),
    }
}

#[test]
fn setters_revalidate() {
    let mut rec = record("r", "ACGT", Some("IIII"));

    rec.set_name("r2 description".into()).unwrap();
    assert_eq!(rec.name(), "r2 description");
    assert_matches!(
        rec.set_name("a\nb".into()),
        Err(RecordError::InvalidName { .. })
    );

    assert_matches!(
        rec.set_sequence("AC".into()),
        Err(RecordError::LengthMismatch { .. })
    );
    rec.set_sequence("TTTT".into()).unwrap();
    assert_eq!(rec.sequence(), "TTTT");

    assert_matches!(
        rec.set_qualities(Some("I".into())),
        Err(RecordError::LengthMismatch { .. })
    );
    rec.set_qualities(None).unwrap();
    assert_eq!(rec.qualities(), None);
    // without qualities, the sequence may change length freely
    rec.set_sequence("A".into()).unwrap();
}

#[test]
fn slicing() {
    let rec = record("r", "ACGTAC", Some("IIHHGG"));
    let sub = rec.slice(1..4);
    assert_eq!(sub.name(), "r");
    assert_eq!(sub.sequence(), "CGT");
    assert_eq!(sub.qualities(), Some("IHH"));

    let rec = record("r", "ACGTAC", None);
    let sub = rec.slice(0..6);
    assert_eq!(sub, rec);
}

#[test]
#[should_panic]
fn slicing_out_of_bounds() {
    record("r", "ACGT", None).slice(2..5);
}

#[test]
fn equality() {
    let a = record("r", "ACGT", Some("IIII"));
    let b = record("r", "ACGT", Some("IIII"));
    assert_eq!(a, b);
    assert_ne!(a, record("r", "ACGT", None));
    assert_ne!(a, record("r2", "ACGT", Some("IIII")));
}

#[test]
fn qualities_as_bytes() {
    let rec = record("r", "AC", Some("IH"));
    assert_eq!(rec.qualities_as_bytes().unwrap(), b"IH");
    let rec = record("r", "AC", None);
    assert_matches!(
        rec.qualities_as_bytes(),
        Err(RecordError::MissingQualities)
    );
}

#[test]
fn fastq_bytes_wire_format() {
    let rec = record("read1", "ACGT", Some("!!II"));
    let bytes = rec.fastq_bytes(false).unwrap();
    assert_eq!(bytes.as_slice(), &b"@read1\nACGT\n+\n!!II\n"[..]);
    // allocated once with the exact size
    assert_eq!(bytes.capacity(), bytes.len());

    let bytes = rec.fastq_bytes(true).unwrap();
    assert_eq!(bytes.as_slice(), &b"@read1\nACGT\n+read1\n!!II\n"[..]);
    assert_eq!(bytes.capacity(), bytes.len());

    let rec = record("read1", "ACGT", None);
    assert_matches!(rec.fastq_bytes(false), Err(RecordError::MissingQualities));
}

#[test]
fn write_helpers() {
    let mut out = vec![];
    fastq::write(&mut out, b"r", b"AC", b"II").unwrap();
    assert_eq!(out.as_slice(), &b"@r\nAC\n+\nII\n"[..]);

    let mut out = vec![];
    fastq::write_two_headers(&mut out, b"r", b"AC", b"II").unwrap();
    assert_eq!(out.as_slice(), &b"@r\nAC\n+r\nII\n"[..]);
}

#[test]
fn display_elides_long_fields() {
    let rec = record("r", "AC", Some("II"));
    assert_eq!(
        rec.to_string(),
        "SequenceRecord(name=\"r\", sequence=\"AC\", qualities=\"II\")"
    );
    let rec = record("r", "AC", None);
    assert_eq!(rec.to_string(), "SequenceRecord(name=\"r\", sequence=\"AC\")");

    let long_name: String = std::iter::repeat('n').take(150).collect();
    let rec = record(&long_name, "AC", None);
    let dump = rec.to_string();
    assert!(dump.contains('…'));
    // the name is cut down to 100 characters
    let shown: String = dump
        .chars()
        .skip_while(|&c| c != '"')
        .skip(1)
        .take_while(|&c| c != '"')
        .collect();
    assert_eq!(shown.chars().count(), 100);
}

#[test]
fn reverse_complement() {
    let rec = record("r", "AACC", Some("ABCD"));
    let rc = rec.reverse_complement();
    assert_eq!(rc.name(), "r");
    assert_eq!(rc.sequence(), "GGTT");
    assert_eq!(rc.qualities(), Some("DCBA"));

    // complementing twice gives the original back
    assert_eq!(rc.reverse_complement(), rec);

    // IUPAC ambiguity codes, lowercase and unknown characters
    let rec = record("r", "RYKMacgtN-", None);
    assert_eq!(rec.reverse_complement().sequence(), "-NacgtKMRY");
}

#[test]
fn bytes_record() {
    let rec = BytesRecord::new(b"r\xff".to_vec(), b"\xde\xad".to_vec(), b"II".to_vec()).unwrap();
    assert_eq!(rec.name(), b"r\xff");
    assert_eq!(rec.sequence(), b"\xde\xad");
    assert_eq!(rec.qualities(), Some(&b"II"[..]));
    assert_eq!(rec.len(), 2);

    let sub = rec.slice(0..1);
    assert_eq!(sub.sequence(), b"\xde");
    assert_eq!(sub.qualities(), Some(&b"I"[..]));

    assert_matches!(
        BytesRecord::new(b"r".to_vec(), b"ACGT".to_vec(), b"II".to_vec()),
        Err(RecordError::LengthMismatch { .. })
    );

    let bytes = rec.fastq_bytes(false).unwrap();
    assert_eq!(bytes.as_slice(), &b"@r\xff\n\xde\xad\n+\nII\n"[..]);
}

#[test]
fn is_mate() {
    let r1 = record("read/1 first", "A", None);
    let r2 = record("read/2 second", "C", None);
    let other = record("other/1", "G", None);
    assert!(r1.is_mate(&r2));
    assert!(r2.is_mate(&r1));
    assert!(!r1.is_mate(&other));
}
