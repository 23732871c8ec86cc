use crate::view::{duplicate_label, redraw_reason};
use pretty_assertions::assert_eq;

#[test]
fn duplicate_label_pluralizes() {
    assert_eq!(duplicate_label(1), " [1 duplicate hidden]");
    assert_eq!(duplicate_label(4), " [4 duplicates hidden]");
}

#[test]
fn small_height_changes_do_not_redraw() {
    assert_eq!(redraw_reason(30, 31, 0, 20), None);
    assert_eq!(redraw_reason(5, 6, 0, 20), None);
}

#[test]
fn large_height_changes_redraw() {
    assert!(redraw_reason(10, 40, 0, 20).is_some());
}

#[test]
fn scroll_bar_visibility_change_redraws() {
    assert_eq!(
        redraw_reason(18, 20, 0, 20),
        Some("scroll bar wasn't previously visible")
    );
    assert_eq!(
        redraw_reason(21, 19, 0, 20),
        Some("scroll bar shouldn't be visible")
    );
}

#[test]
fn scrolling_past_the_end_redraws() {
    assert_eq!(
        redraw_reason(30, 30, 25, 20),
        Some("scrolled off the bottom of the page")
    );
}
