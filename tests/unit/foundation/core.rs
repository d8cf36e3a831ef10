use super::*;

#[test]
fn enclosing_takes_max_per_axis() {
    let c = Canvas::enclosing(Canvas::new(40, 10), Canvas::new(20, 30));
    assert_eq!(c, Canvas::new(40, 30));
}

#[test]
fn centered_offset_floors_odd_margins() {
    let outer = Canvas::new(10, 7);
    assert_eq!(outer.centered_offset(Canvas::new(10, 7)).unwrap(), (0, 0));
    assert_eq!(outer.centered_offset(Canvas::new(5, 4)).unwrap(), (2, 1));
}

#[test]
fn centered_offset_rejects_oversized_inner() {
    let outer = Canvas::new(10, 10);
    assert!(outer.centered_offset(Canvas::new(11, 1)).is_err());
    assert!(outer.centered_offset(Canvas::new(1, 11)).is_err());
}

#[test]
fn empty_and_area() {
    assert!(Canvas::new(0, 3).is_empty());
    assert!(Canvas::new(3, 0).is_empty());
    assert!(!Canvas::new(3, 2).is_empty());
    assert_eq!(Canvas::new(3, 2).area(), 6);
    assert_eq!(Canvas::new(3, 2).to_string(), "3x2");
}
