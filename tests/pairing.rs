use fq_io::{ids_match, paired_fastq_heads, records_are_mates, SequenceRecord};

#[test]
fn ids_match_reflexive() {
    for name in &[
        "",
        "read1",
        "read/1",
        "read with description",
        "read\twith tab",
        "a",
    ] {
        assert!(ids_match(name.as_bytes(), name.as_bytes()), "{:?}", name);
    }
}

#[test]
fn ids_match_mate_numbers() {
    // any combination of trailing mate numbers 1-3 matches
    for d1 in b'1'..=b'3' {
        for d2 in b'1'..=b'3' {
            let name1 = [b'r', b'/', d1];
            let name2 = [b'r', b'/', d2];
            assert!(ids_match(&name1, &name2));
        }
        // but a trailing '4' never does
        assert!(!ids_match(&[b'r', b'/', d1], b"r/4"));
        assert!(!ids_match(b"r/4", &[b'r', b'/', d1]));
    }
}

#[test]
fn ids_match_separators() {
    assert!(ids_match(b"read/1 comment", b"read/2 other"));
    assert!(ids_match(b"read.1", b"read.2"));
    assert!(ids_match(b"read1\tcomment", b"read2\tother"));
    assert!(!ids_match(b"readA 1", b"readB 2"));
}

#[test]
fn ids_match_edge_cases() {
    assert!(ids_match(b"", b""));
    // names consisting solely of whitespace have empty IDs
    assert!(ids_match(b" x", b"\ty"));
    assert!(ids_match(b" x", b""));
    // name1 is shorter than name2's ID
    assert!(!ids_match(b"re", b"read"));
    // name1's ID is longer than name2's
    assert!(!ids_match(b"read12", b"read1"));
    assert!(ids_match(b"read1 x", b"read1"));
    // only the last digit is stripped
    assert!(!ids_match(b"read11", b"read22"));
    assert!(ids_match(b"read21", b"read22"));
    // the digit must be present on both sides
    assert!(!ids_match(b"readx", b"read1"));
    assert!(!ids_match(b"read1", b"readx"));
    // bytes are compared directly, non-ASCII included
    assert!(ids_match("réad".as_bytes(), "réad".as_bytes()));
}

#[test]
fn mates() {
    let r1 = SequenceRecord::new("read/1".into(), "A".into(), None).unwrap();
    let r2 = SequenceRecord::new("read/2".into(), "C".into(), None).unwrap();
    let r3 = SequenceRecord::new("read/3".into(), "G".into(), None).unwrap();
    let other = SequenceRecord::new("other/1".into(), "T".into(), None).unwrap();

    assert!(records_are_mates(&[r1.clone(), r2.clone()]));
    assert!(records_are_mates(&[r1.clone(), r2.clone(), r3.clone()]));
    assert!(!records_are_mates(&[r1.clone(), r2.clone(), other.clone()]));
    assert!(!records_are_mates(&[r1, other]));
}

#[test]
#[should_panic(expected = "at least two")]
fn mates_require_two_records() {
    let r1 = SequenceRecord::new("read/1".into(), "A".into(), None).unwrap();
    records_are_mates(&[r1]);
}

#[test]
fn heads_short_inputs() {
    // fewer than four lines on either side gives (0, 0)
    assert_eq!(paired_fastq_heads(b"", b""), (0, 0));
    assert_eq!(paired_fastq_heads(b"a\nb\nc\n", b"a\nb\nc\nd\n"), (0, 0));
    assert_eq!(paired_fastq_heads(b"a\nb\nc\nd\n", b"a\nb\nc\n"), (0, 0));
    assert_eq!(paired_fastq_heads(b"no newline at all", b"a\nb\nc\nd\n"), (0, 0));
}

#[test]
fn heads_complete_records() {
    let r1 = b"@r1\nAC\n+\nII\n";
    let r2 = b"@r1\nACGT\n+\nIIII\n";
    assert_eq!(paired_fastq_heads(r1, r2), (r1.len(), r2.len()));

    // trailing bytes without enough newlines are not included
    let mut b1 = r1.to_vec();
    b1.extend_from_slice(b"@r2\nAC");
    let mut b2 = r2.to_vec();
    b2.extend_from_slice(b"@r2\nACGT\n+\n");
    assert_eq!(paired_fastq_heads(&b1, &b2), (r1.len(), r2.len()));
}

#[test]
fn heads_stop_at_shorter_side() {
    // two records on one side, one on the other
    let two = b"@a\nA\n+\nI\n@b\nC\n+\nI\n";
    let one = b"@a\nAAAA\n+\nIIII\n";
    assert_eq!(paired_fastq_heads(two, one), (9, one.len()));
    assert_eq!(paired_fastq_heads(one, two), (one.len(), 9));
}

#[test]
fn heads_are_monotone() {
    let b1 = b"@a\nA\n+\nI\n@b\nC\n+\nI\n@c\nG\n+\nI\n";
    let b2 = b"@a\nAA\n+\nII\n@b\nCC\n+\nII\n";
    let (full1, full2) = paired_fastq_heads(b1, b2);
    for cut in 0..=b2.len() {
        let (l1, l2) = paired_fastq_heads(b1, &b2[..cut]);
        assert!(l1 <= full1 && l2 <= full2);
        assert!(l1 <= b1.len() && l2 <= cut);
        // both prefixes contain the same number of newlines, a multiple
        // of four
        let n1 = b1[..l1].iter().filter(|&&b| b == b'\n').count();
        let n2 = b2[..l2].iter().filter(|&&b| b == b'\n').count();
        assert_eq!(n1, n2);
        assert_eq!(n1 % 4, 0);
    }
}
