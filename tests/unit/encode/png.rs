use std::io::Cursor;

use super::*;
use crate::foundation::error::CapsuleError;

fn sample() -> Surface {
    Surface::from_rgba8(2, 1, vec![100, 50, 200, 128, 0, 0, 0, 255]).unwrap()
}

#[test]
fn write_png_then_decode_keeps_straight_alpha() {
    let mut buf = Cursor::new(Vec::new());
    write_png(&sample(), &mut buf).unwrap();
    let bytes = buf.into_inner();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    let back = decode_image(&bytes).unwrap();
    assert_eq!(back, sample());
}

#[test]
fn save_png_writes_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    save_png(&sample(), &path).unwrap();

    let back = decode_image(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!((back.width(), back.height()), (2, 1));
}

#[test]
fn decode_garbage_is_an_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, CapsuleError::Other(_)));
}

#[test]
fn save_png_into_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.png");
    assert!(save_png(&sample(), &path).is_err());
}
