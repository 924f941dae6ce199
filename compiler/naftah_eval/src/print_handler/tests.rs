use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_println_appends_newline() {
    let handler = buffer_handler();
    handler.println("مرحبا");
    assert_eq!(handler.output(), "مرحبا\n");
}

#[test]
fn buffer_print_keeps_line_open() {
    let handler = buffer_handler();
    handler.print("مرحبا");
    handler.print(" ");
    handler.println("بالعالم");
    assert_eq!(handler.output(), "مرحبا بالعالم\n");
}

#[test]
fn take_output_drains_the_buffer() {
    let handler = buffer_handler();
    handler.println("١");
    assert_eq!(handler.take_output(), "١\n");
    assert_eq!(handler.output(), "");
    handler.println("٢");
    assert_eq!(handler.take_output(), "٢\n");
}

#[test]
fn clear_empties_the_buffer() {
    let handler = buffer_handler();
    handler.println("نص");
    handler.clear();
    assert!(handler.output().is_empty());
}

#[test]
fn silent_discards_everything() {
    let handler = silent_handler();
    handler.println("نص");
    handler.print("نص");
    assert_eq!(handler.output(), "");
    assert_eq!(handler.take_output(), "");
}

#[test]
fn stdout_captures_nothing() {
    let handler = stdout_handler();
    handler.clear();
    assert_eq!(handler.output(), "");
}
