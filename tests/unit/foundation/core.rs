use super::*;

#[test]
fn edges_and_emptiness() {
    let r = Rect::new(2, 3, 10, 5);
    assert_eq!(r.right(), 12);
    assert_eq!(r.bottom(), 8);
    assert!(!r.is_empty());
    assert!(Rect::new(0, 0, 0, 4).is_empty());
    assert!(Rect::new(0, 0, 4, -1).is_empty());
}

#[test]
fn fits_in_bounds() {
    let bounds = Rect::sized(20, 20);
    assert!(Rect::new(0, 0, 20, 20).fits_in(bounds));
    assert!(!Rect::new(-1, 0, 5, 5).fits_in(bounds));
    assert!(!Rect::new(10, 10, 11, 5).fits_in(bounds));
}

#[test]
fn dim_i32_saturates() {
    assert_eq!(dim_i32(7), 7);
    assert_eq!(dim_i32(u32::MAX), i32::MAX);
}
