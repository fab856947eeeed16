//! Whitebox tests of the TUI shell: key routing, mouse routing, redraw
//! tracking and full-frame rendering for every screen kind.

use crate::config::KeyBindings;
use crate::model::CellValue;
use crate::source::{FsEntry, ReadWriteSeek, TextContent};
use crate::view::{buffer_to_string, ColorConfig, Screen, TuiApp, ViewOptions};
use crate::view_state::{ScrollBarPolicy, StaticChildren, TableStyle, Tree, VecTable};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::io::Cursor;

// ===== Test Helpers =====

fn options(title: &str) -> ViewOptions {
    ViewOptions {
        title: title.to_string(),
        wheel_lines: 3,
        color: ColorConfig::fixed(false),
        key_bindings: KeyBindings::default(),
    }
}

fn app(screen: Screen, title: &str, width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::new_for_test(terminal, screen, options(title))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn rendered(app: &mut TuiApp<TestBackend>) -> String {
    app.render_test().unwrap();
    buffer_to_string(app.terminal().backend().buffer())
}

fn text_screen(lines: usize) -> Screen {
    let text: Vec<String> = (0..lines).map(|i| format!("line {i}")).collect();
    Screen::text(TextContent::from_text(&text.join("\n")), ScrollBarPolicy::Auto)
}

fn text_offset(app: &TuiApp<TestBackend>) -> (usize, usize) {
    let (_, scroller) = app.screen().as_text().unwrap();
    let offset = scroller.offset();
    (offset.x, offset.y)
}

fn tree_screen() -> Screen {
    let mut tree = Tree::new(FsEntry::new("/vport-test/root"));
    let root = tree.root();
    let a = tree.add_child(root, FsEntry::new("/vport-test/root/a")).unwrap();
    tree.add_child(a, FsEntry::new("/vport-test/root/a/a1")).unwrap();
    tree.add_child(a, FsEntry::new("/vport-test/root/a/a2")).unwrap();
    tree.add_child(root, FsEntry::new("/vport-test/root/b")).unwrap();
    Screen::tree(tree, Box::new(StaticChildren))
}

fn table_screen() -> Screen {
    let mut table = VecTable::new(["name", "age", "city"]);
    table.push_row(vec!["ada".into(), CellValue::from(36i64), "London".into()]);
    table.push_row(vec!["grace".into(), CellValue::from(85i64), CellValue::Null]);
    table.push_row(vec!["linus".into(), CellValue::from(54i64), "Helsinki".into()]);
    Screen::table(table, TableStyle::default())
}

fn hex_screen(allow_edits: bool) -> Screen {
    let stream: Box<dyn ReadWriteSeek> = Box::new(Cursor::new(b"Hello, world!\n".to_vec()));
    Screen::hex(stream, allow_edits).unwrap()
}

// ===== Quit =====

#[test]
fn q_quits() {
    let mut app = app(text_screen(3), "notes", 20, 5);
    assert!(app.handle_key_test(key(KeyCode::Char('q'))));
}

#[test]
fn ctrl_c_quits_even_in_hex_text_pane() {
    let mut app = app(hex_screen(true), "data", 43, 3);
    app.handle_key_test(key(KeyCode::Tab));
    assert!(app.handle_key_test(ctrl('c')));
}

#[test]
fn unbound_keys_do_nothing() {
    let mut app = app(text_screen(30), "notes", 20, 5);
    assert!(!app.handle_key_test(key(KeyCode::F(5))));
    assert_eq!(text_offset(&app), (0, 0));
}

// ===== Text screen =====

#[test]
fn text_screen_initial_frame() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    insta::assert_snapshot!(rendered(&mut app), @r"
    line 0             █
    line 1             █
    line 2             │
    line 3             │
    notes  line 1/10  co
    ");
}

#[test]
fn text_screen_keys_move_offset() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    app.handle_key_test(key(KeyCode::Char('j')));
    assert_eq!(text_offset(&app), (0, 1));
    app.handle_key_test(key(KeyCode::Char('G')));
    assert_eq!(text_offset(&app), (0, 6));
    app.handle_key_test(key(KeyCode::PageUp));
    assert_eq!(text_offset(&app), (0, 2));
    app.handle_key_test(key(KeyCode::Char('g')));
    assert_eq!(text_offset(&app), (0, 0));
}

#[test]
fn text_screen_status_follows_offset() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    app.handle_key_test(key(KeyCode::Char('G')));
    let frame = rendered(&mut app);
    assert_eq!(frame.lines().next(), Some("line 6             │"));
    assert_eq!(frame.lines().last(), Some("notes  line 7/10  co"));
}

#[test]
fn wheel_scrolls_by_configured_lines() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    app.handle_mouse_test(mouse(MouseEventKind::ScrollDown, 2, 1));
    assert_eq!(text_offset(&app), (0, 3));
}

#[test]
fn wheel_on_status_row_is_ignored() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    app.handle_mouse_test(mouse(MouseEventKind::ScrollDown, 2, 4));
    assert_eq!(text_offset(&app), (0, 0));
}

#[test]
fn thumb_drag_holds_grab_until_release() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    // track 4 over 10 lines: thumb covers rows 0-1
    app.handle_mouse_test(mouse(MouseEventKind::Down(MouseButton::Left), 19, 0));
    assert!(!app.grab().is_free());

    // two cells down: location 2.0 maps to line 5
    app.handle_mouse_test(mouse(MouseEventKind::Drag(MouseButton::Left), 19, 2));
    assert_eq!(text_offset(&app), (0, 5));

    app.handle_mouse_test(mouse(MouseEventKind::Up(MouseButton::Left), 19, 2));
    assert!(app.grab().is_free());

    app.handle_mouse_test(mouse(MouseEventKind::Drag(MouseButton::Left), 19, 0));
    assert_eq!(text_offset(&app), (0, 5), "drags without a grab are ignored");
}

#[test]
fn track_click_pages_toward_pointer() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    app.handle_mouse_test(mouse(MouseEventKind::Down(MouseButton::Left), 19, 3));
    assert_eq!(text_offset(&app), (0, 4));
    assert!(app.grab().is_free());
}

// ===== Redraw tracking =====

#[test]
fn redraw_only_after_visible_change() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    assert!(app.needs_display_test(), "first frame must be drawn");
    assert!(!app.needs_display_test());

    app.handle_key_test(key(KeyCode::Char('k')));
    assert!(!app.needs_display_test(), "scrolling up at the top changes nothing");

    app.handle_key_test(key(KeyCode::Char('j')));
    assert!(app.needs_display_test());
    assert!(!app.needs_display_test());
}

#[test]
fn resize_relays_out_and_redraws() {
    let mut app = app(text_screen(10), "notes", 20, 5);
    app.handle_key_test(key(KeyCode::Char('G')));
    app.needs_display_test();

    app.handle_resize_test(20, 12);
    assert!(app.needs_display_test());
    assert_eq!(text_offset(&app), (0, 0), "all 10 lines fit in 11 rows");
}

// ===== Tree screen =====

#[test]
fn tree_screen_initial_frame() {
    let mut app = app(tree_screen(), "tree", 24, 5);
    insta::assert_snapshot!(rendered(&mut app), @r"
    ▾ root
      ▸ a
        b
    tree  root  0 marked
    ");
}

#[test]
fn tree_screen_expand_and_mark() {
    let mut app = app(tree_screen(), "tree", 24, 6);
    app.handle_key_test(key(KeyCode::Char('j')));
    app.handle_key_test(key(KeyCode::Enter));
    app.handle_key_test(key(KeyCode::Char('m')));
    insta::assert_snapshot!(rendered(&mut app), @r"
    ▾ root
      ▾*a
          a1
          a2
        b
    tree  a  1 marked
    ");
}

#[test]
fn tree_collapse_all_moves_selection_to_visible_ancestor() {
    let mut app = app(tree_screen(), "tree", 24, 6);
    app.handle_key_test(key(KeyCode::Char('+')));
    app.handle_key_test(key(KeyCode::Char('j')));
    app.handle_key_test(key(KeyCode::Char('j')));
    let (tree, view) = app.screen().as_tree().unwrap();
    let a1 = tree.children(tree.children(tree.root())[0])[0];
    assert_eq!(view.selected(), Some(a1));

    app.handle_key_test(key(KeyCode::Char('-')));
    let (tree, view) = app.screen().as_tree().unwrap();
    let a = tree.children(tree.root())[0];
    assert_eq!(view.selected(), Some(a));
}

#[test]
fn tree_click_on_expander_toggles() {
    let mut app = app(tree_screen(), "tree", 24, 6);
    // row 1 is `a` at depth 1: expander at column 2
    app.handle_mouse_test(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
    let (tree, view) = app.screen().as_tree().unwrap();
    let a = tree.children(tree.root())[0];
    assert_eq!(view.selected(), Some(a));
    assert!(tree.is_expanded(a));
}

// ===== Table screen =====

#[test]
fn table_screen_initial_frame() {
    let mut app = app(table_screen(), "people", 30, 6);
    insta::assert_snapshot!(rendered(&mut app), @r"
    name  age city
    ───────────────────
    ada   36  London
    grace 85  -
    linus 54  Helsinki
    people  row 1/3  col 1/3  name
    ");
}

#[test]
fn table_screen_cursor_moves_through_cells() {
    let mut app = app(table_screen(), "people", 30, 6);
    app.handle_key_test(key(KeyCode::Char('l')));
    app.handle_key_test(key(KeyCode::Char('G')));
    let (_, view) = app.screen().as_table().unwrap();
    assert_eq!((view.selected().row, view.selected().column), (2, 1));
    let frame = rendered(&mut app);
    assert_eq!(frame.lines().last(), Some("people  row 3/3  col 2/3  age"));
}

#[test]
fn table_click_selects_cell() {
    let mut app = app(table_screen(), "people", 30, 6);
    // header + underline take rows 0-1; row 3 is grace, column 10 is city
    app.handle_mouse_test(mouse(MouseEventKind::Down(MouseButton::Left), 10, 3));
    let (_, view) = app.screen().as_table().unwrap();
    assert_eq!((view.selected().row, view.selected().column), (1, 2));
}

// ===== Hex screen =====

#[test]
fn hex_screen_initial_frame() {
    let mut app = app(hex_screen(true), "data", 60, 3);
    insta::assert_snapshot!(rendered(&mut app), @r"
    00000000 48 65 6c 6c  6f 2c 20 77  6f 72 6c 64  Hello, world
    0000000c 21 0a                                  !.
    data  0x00000000/0x0000000e  hex  0 pending
    ");
}

#[test]
fn hex_typing_then_apply_reports_on_status_line() {
    let mut app = app(hex_screen(true), "data", 60, 3);
    app.handle_key_test(key(KeyCode::Char('4')));
    app.handle_key_test(key(KeyCode::Char('1')));
    assert_eq!(app.screen().as_hex().unwrap().overlay().len(), 1);

    app.handle_key_test(ctrl('s'));
    assert_eq!(app.message(), Some("applied 1 edits"));
    assert!(app.screen().as_hex().unwrap().overlay().is_empty());

    let frame = rendered(&mut app);
    assert_eq!(
        frame.lines().next(),
        Some("00000000 41 65 6c 6c  6f 2c 20 77  6f 72 6c 64  Aello, world")
    );
}

#[test]
fn hex_discard_drops_pending_edits() {
    let mut app = app(hex_screen(true), "data", 60, 3);
    app.handle_key_test(key(KeyCode::Tab));
    app.handle_key_test(key(KeyCode::Char('J')));
    app.handle_key_test(ctrl('z'));
    assert_eq!(app.message(), Some("discarded 1 edits"));
    let frame = rendered(&mut app);
    assert!(frame.starts_with("00000000 48 65"));
}

#[test]
fn hex_text_pane_types_letters_instead_of_navigating() {
    let mut app = app(hex_screen(true), "data", 60, 3);
    app.handle_key_test(key(KeyCode::Tab));
    assert!(!app.handle_key_test(key(KeyCode::Char('q'))), "q is typed, not quit");
    let hex = app.screen().as_hex().unwrap();
    assert_eq!(hex.position(), 1);
    assert_eq!(hex.overlay().get(0), Some(b'q'));
}

#[test]
fn hex_read_only_ignores_digits_and_keeps_bindings() {
    let mut app = app(hex_screen(false), "data", 60, 3);
    app.handle_key_test(key(KeyCode::Char('4')));
    assert!(app.screen().as_hex().unwrap().overlay().is_empty());
    app.handle_key_test(key(KeyCode::Char('j')));
    assert_eq!(app.screen().as_hex().unwrap().position(), 12, "j still moves down a line");
}

#[test]
fn message_clears_on_next_key() {
    let mut app = app(hex_screen(true), "data", 60, 3);
    app.handle_key_test(key(KeyCode::Char('a')));
    app.handle_key_test(ctrl('z'));
    assert!(app.message().is_some());
    app.handle_key_test(key(KeyCode::Right));
    assert_eq!(app.message(), None);
}

#[test]
fn message_survives_non_navigation_keys() {
    let mut app = app(hex_screen(true), "data", 60, 3);
    app.handle_key_test(key(KeyCode::Char('a')));
    app.handle_key_test(ctrl('z'));
    app.handle_key_test(key(KeyCode::Tab));
    app.handle_key_test(key(KeyCode::F(5)));
    assert_eq!(app.message(), Some("discarded 1 edits"));

    app.handle_key_test(key(KeyCode::Char('x')));
    assert_eq!(app.message(), None, "a typed edit clears the message");
}
