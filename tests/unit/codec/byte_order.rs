use std::io::Cursor;

use super::*;

#[test]
fn little_and_big_endian_layouts() {
    let mut acc = ErrorAccumulator::new();
    let mut buf = Vec::new();
    {
        let mut w = SoftWriter::new(&mut buf, &mut acc);
        w.write_u32::<LittleEndian>(0x0102_0304);
        w.write_u32::<BigEndian>(0x0102_0304);
        w.write_u16::<LittleEndian>(0xA0B0);
        w.write_u8(0xFF);
    }
    assert!(acc.is_clean());
    assert_eq!(
        buf,
        [0x04, 0x03, 0x02, 0x01, 0x01, 0x02, 0x03, 0x04, 0xB0, 0xA0, 0xFF]
    );
}

#[test]
fn mixed_width_values_read_back() {
    let mut acc = ErrorAccumulator::new();
    let mut buf = Vec::new();
    {
        let mut w = SoftWriter::new(&mut buf, &mut acc);
        w.write_i8(-3);
        w.write_i16::<BigEndian>(-1234);
        w.write_i32::<LittleEndian>(-70_000);
        w.write_u64::<BigEndian>(u64::MAX - 1);
        w.write_i64::<LittleEndian>(i64::MIN);
        w.write_f32::<LittleEndian>(1.5);
        w.write_f64::<BigEndian>(-0.25);
    }

    let mut cur = Cursor::new(buf);
    let mut r = SoftReader::new(&mut cur, &mut acc);
    assert_eq!(r.read_i8(), -3);
    assert_eq!(r.read_i16::<BigEndian>(), -1234);
    assert_eq!(r.read_i32::<LittleEndian>(), -70_000);
    assert_eq!(r.read_u64::<BigEndian>(), u64::MAX - 1);
    assert_eq!(r.read_i64::<LittleEndian>(), i64::MIN);
    assert_eq!(r.read_f32::<LittleEndian>(), 1.5);
    assert_eq!(r.read_f64::<BigEndian>(), -0.25);
    assert!(acc.is_clean());
}

#[test]
fn short_read_records_and_yields_zero() {
    let mut acc = ErrorAccumulator::new();
    let mut cur = Cursor::new(vec![0xAAu8, 0xBB]);
    let mut r = SoftReader::new(&mut cur, &mut acc);

    assert_eq!(r.read_u32::<LittleEndian>(), 0);
    assert_eq!(r.read_u64::<BigEndian>(), 0);
    assert_eq!(acc.count(), 2);
    assert_eq!(acc.failures()[0].op, "read_u32");
}

#[test]
fn short_write_is_recorded() {
    let mut acc = ErrorAccumulator::new();
    let mut backing = [0u8; 3];
    let mut slice: &mut [u8] = &mut backing;
    let mut w = SoftWriter::new(&mut slice, &mut acc);

    w.write_u16::<LittleEndian>(0x1122);
    w.write_u32::<LittleEndian>(0x3344_5566);
    assert_eq!(acc.count(), 1);
    assert_eq!(acc.failures()[0].op, "write_u32");
}

#[test]
fn read_bytes_reports_short_fill() {
    let mut acc = ErrorAccumulator::new();
    let mut cur = Cursor::new(vec![1u8, 2, 3]);
    let mut r = SoftReader::new(&mut cur, &mut acc);

    let mut two = [0u8; 2];
    assert!(r.read_bytes(&mut two));
    assert_eq!(two, [1, 2]);

    let mut four = [0u8; 4];
    assert!(!r.read_bytes(&mut four));
    assert_eq!(acc.count(), 1);
}
