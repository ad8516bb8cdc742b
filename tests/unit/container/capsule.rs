use std::io::Cursor;

use super::*;
use crate::container::stream::MemStream;

fn sample() -> Capsule {
    Capsule::with_payload(7, (0u8..10).collect())
}

#[test]
fn ten_byte_capsule_serializes_to_eighteen_bytes() {
    let caps = sample();
    let bytes = caps.to_bytes().unwrap();

    assert_eq!(bytes.len(), 18);
    assert_eq!(&bytes[..4], &[7, 0, 0, 0]);
    assert_eq!(&bytes[4..8], &[10, 0, 0, 0]);
    assert_eq!(&bytes[8..], caps.data().unwrap());

    let back = Capsule::from_bytes(&bytes).unwrap();
    assert_eq!(back, caps);
    assert_eq!(back.size(), 10);
    assert_eq!(back.type_tag(), 7);
}

#[test]
fn stream_path_matches_file_path_layout() {
    let caps = sample();

    let mut stream = MemStream::new();
    caps.write_to_stream(&mut stream).unwrap();
    assert_eq!(stream.as_slice(), caps.to_bytes().unwrap().as_slice());

    RwStream::seek(&mut stream, std::io::SeekFrom::Start(0)).unwrap();
    let back = Capsule::read_from_stream(&mut stream).unwrap();
    assert_eq!(back, caps);
}

#[test]
fn consecutive_capsules_share_one_handle() {
    let a = Capsule::of_kind(AssetKind::Png, vec![1, 2, 3]);
    let b = Capsule::of_kind(AssetKind::Wav, vec![9; 5]);

    let mut errors = ErrorAccumulator::new();
    let mut buf = Vec::new();
    a.type_write(&mut buf, &mut errors);
    b.type_write(&mut buf, &mut errors);
    assert!(errors.is_clean());

    let mut cur = Cursor::new(buf);
    let mut got_a = Capsule::new();
    let mut got_b = Capsule::new();
    got_a.type_read(&mut cur, &mut errors);
    got_b.type_read(&mut cur, &mut errors);
    errors.finish().unwrap();

    assert_eq!(got_a, a);
    assert_eq!(got_b, b);
    assert_eq!(got_b.kind(), Some(AssetKind::Wav));
}

#[test]
fn short_payload_leaves_capsule_empty() {
    let mut bytes = sample().to_bytes().unwrap();
    bytes.truncate(12);

    let mut errors = ErrorAccumulator::new();
    let mut caps = Capsule::with_payload(99, vec![1, 2, 3]);
    caps.type_read(&mut Cursor::new(bytes.clone()), &mut errors);

    assert!(caps.is_empty());
    assert_eq!(caps, Capsule::new());
    assert_eq!(errors.count(), 1);
    assert_eq!(errors.failures()[0].op, "capsule payload");

    let mut stream = MemStream::from_vec(bytes);
    let mut caps = Capsule::new();
    caps.type_read_stream(&mut stream, &mut errors);
    assert!(caps.is_empty());
    assert_eq!(errors.count(), 2);
}

#[test]
fn truncated_header_skips_payload_read() {
    let mut errors = ErrorAccumulator::new();
    let mut caps = Capsule::new();
    caps.type_read(&mut Cursor::new(vec![7u8, 0, 0, 0, 10]), &mut errors);

    assert!(caps.is_empty());
    assert_eq!(errors.count(), 1);
    assert_eq!(errors.failures()[0].op, "read_u32");
}

#[test]
fn earlier_failures_do_not_block_a_clean_read() {
    let mut errors = ErrorAccumulator::new();
    errors.record("unrelated", std::io::Error::other("earlier"));

    let mut caps = Capsule::new();
    caps.type_read(&mut Cursor::new(sample().to_bytes().unwrap()), &mut errors);
    assert_eq!(caps, sample());
    assert_eq!(errors.count(), 1);
}

#[test]
fn zero_length_payload_is_populated() {
    let caps = Capsule::with_payload(3, Vec::new());
    let bytes = caps.to_bytes().unwrap();
    assert_eq!(bytes.len(), HEADER_LEN);

    let back = Capsule::from_bytes(&bytes).unwrap();
    assert!(!back.is_empty());
    assert_eq!(back.data(), Some(&[][..]));
}

#[test]
fn empty_capsule_write_is_an_argument_failure() {
    let mut out = Vec::new();
    let err = Capsule::new().write_to(&mut out).unwrap_err();
    assert!(matches!(err, CapsuleError::Argument(_)));
    assert!(out.is_empty());

    let mut stream = MemStream::new();
    assert!(matches!(
        Capsule::new().write_to_stream(&mut stream),
        Err(CapsuleError::Argument(_))
    ));

    let mut errors = ErrorAccumulator::new();
    Capsule::new().type_write(&mut out, &mut errors);
    assert_eq!(errors.count(), 1);
    assert!(out.is_empty());
}

#[test]
fn clear_is_idempotent() {
    let mut caps = sample();
    caps.clear();
    assert!(caps.is_empty());
    assert_eq!(caps.size(), 0);
    caps.clear();
    assert_eq!(caps, Capsule::new());
}

#[test]
fn info_and_virtual_stream() {
    let caps = Capsule::of_kind(AssetKind::Font, vec![4, 5, 6]);
    let info = caps.info();
    assert_eq!(info.kind, Some(AssetKind::Font));
    assert_eq!(info.size, 3);
    assert!(info.populated);

    let mut s = caps.as_stream();
    let mut buf = [0u8; 8];
    assert_eq!(s.read_full(&mut buf), 3);
    assert_eq!(&buf[..3], &[4, 5, 6]);

    caps.destroy();
}

#[test]
fn from_file_tags_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.ogg");
    std::fs::write(&path, b"OggS-data").unwrap();

    let caps = Capsule::from_file(&path).unwrap();
    assert_eq!(caps.kind(), Some(AssetKind::Ogg));
    assert_eq!(caps.data(), Some(&b"OggS-data"[..]));
}

#[test]
fn from_file_missing_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Capsule::from_file(dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, CapsuleError::Io(_)));
}

fn header_only(tag: u32, claimed: u32) -> Vec<u8> {
    let mut bytes = tag.to_le_bytes().to_vec();
    bytes.extend_from_slice(&claimed.to_le_bytes());
    bytes
}

#[test]
fn huge_claimed_size_without_payload_fails_cleanly() {
    let claimed = 64u32 << 20;

    let mut errors = ErrorAccumulator::new();
    let mut caps = Capsule::with_payload(1, vec![1]);
    caps.type_read(&mut Cursor::new(header_only(3, claimed)), &mut errors);
    assert!(caps.is_empty());
    assert_eq!(errors.count(), 1);
    assert_eq!(errors.failures()[0].op, "capsule payload");
    assert!(
        errors.failures()[0]
            .source
            .to_string()
            .starts_with("read 0 of")
    );

    let mut stream = MemStream::from_vec(header_only(3, claimed));
    let mut caps = Capsule::new();
    caps.type_read_stream(&mut stream, &mut errors);
    assert!(caps.is_empty());
    assert_eq!(errors.count(), 2);
    assert_eq!(errors.failures()[1].op, "capsule payload");
}

#[test]
fn stream_payload_spanning_several_chunks_round_trips() {
    let payload = (0..=255u8).cycle().take(STREAM_CHUNK * 2 + 17).collect();
    let caps = Capsule::with_payload(11, payload);
    let mut stream = MemStream::new();
    caps.write_to_stream(&mut stream).unwrap();

    RwStream::seek(&mut stream, std::io::SeekFrom::Start(0)).unwrap();
    assert_eq!(Capsule::read_from_stream(&mut stream).unwrap(), caps);
}

#[test]
fn short_write_to_handle_is_recorded() {
    let caps = sample();
    let mut sink = [0u8; 4];

    let mut errors = ErrorAccumulator::new();
    let mut w: &mut [u8] = &mut sink;
    caps.type_write(&mut w, &mut errors);
    assert!(!errors.is_clean());
    assert_eq!(sink, [7, 0, 0, 0]);

    let mut sink = [0u8; 4];
    let mut w: &mut [u8] = &mut sink;
    assert!(matches!(caps.write_to(&mut w), Err(CapsuleError::Io(_))));
}

#[test]
fn short_write_to_read_only_stream_is_recorded() {
    let caps = sample();
    let backing = [0u8; 32];

    let mut errors = ErrorAccumulator::new();
    let mut stream = ConstMemStream::new(&backing);
    caps.type_write_stream(&mut stream, &mut errors);
    assert_eq!(errors.count(), 3);

    let mut stream = ConstMemStream::new(&backing);
    assert!(matches!(
        caps.write_to_stream(&mut stream),
        Err(CapsuleError::Io(_))
    ));
}
