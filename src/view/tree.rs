//! Tree rows drawn with indentation, expander glyphs and marks.
//!
//! Row layout: `{indent}{expander}{mark}{label}` where the indent is
//! `depth * INDENT_WIDTH` cells and the expander sits at
//! [`TreeRow::expander_column`].

use super::styles::ViewStyles;
use crate::view_state::{Tree, TreeRow, INDENT_WIDTH};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use std::fmt::Display;

/// Glyph for an expanded node.
pub const EXPANDED: &str = "▾";
/// Glyph for a collapsed node that can be expanded.
pub const COLLAPSED: &str = "▸";
/// Glyph for a marked node.
pub const MARK: &str = "*";

/// The rows a [`TreeViewState`](crate::view_state::TreeViewState) put on screen.
pub struct TreeView<'a, T> {
    tree: &'a Tree<T>,
    rows: &'a [TreeRow],
    styles: &'a ViewStyles,
}

impl<'a, T: Display> TreeView<'a, T> {
    /// Draw `rows` of `tree`.
    pub fn new(tree: &'a Tree<T>, rows: &'a [TreeRow], styles: &'a ViewStyles) -> Self {
        Self { tree, rows, styles }
    }
}

impl<T: Display> Widget for TreeView<'_, T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (i, row) in self.rows.iter().take(usize::from(area.height)).enumerate() {
            let y = area.y + i as u16;
            let line = row_text(self.tree, row);
            let style = if row.selected {
                self.styles.selected
            } else if row.marked {
                self.styles.marked
            } else {
                Style::default()
            };
            if row.selected {
                buf.set_style(Rect::new(area.x, y, area.width, 1), style);
            }
            buf.set_stringn(area.x, y, &line, usize::from(area.width), style);
        }
    }
}

/// Text of one row.
pub fn row_text<T: Display>(tree: &Tree<T>, row: &TreeRow) -> String {
    let expander = match (row.expandable, row.expanded) {
        (true, true) => EXPANDED,
        (true, false) => COLLAPSED,
        (false, _) => " ",
    };
    let mark = if row.marked { MARK } else { " " };
    let label = tree.data(row.id).map(ToString::to_string).unwrap_or_default();
    format!(
        "{:indent$}{expander}{mark}{label}",
        "",
        indent = row.depth * INDENT_WIDTH
    )
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::buffer_to_string;
    use crate::view::styles::ColorConfig;
    use crate::view_state::{StaticChildren, TreeViewState};

    fn sample() -> Tree<&'static str> {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let a = tree.add_child(root, "a").unwrap();
        tree.add_child(a, "a1").unwrap();
        tree.add_child(a, "a2").unwrap();
        tree.add_child(root, "b").unwrap();
        tree
    }

    fn render(tree: &Tree<&'static str>, view: &TreeViewState, height: u16) -> String {
        let styles = ViewStyles::with_color_config(ColorConfig::fixed(false));
        let rows = view.visible_rows(tree, &StaticChildren);
        let area = Rect::new(0, 0, 20, height);
        let mut buf = Buffer::empty(area);
        TreeView::new(tree, &rows, &styles).render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn collapsed_children_show_closed_glyph() {
        let tree = sample();
        let mut view = TreeViewState::new(&tree);
        view.set_height(&tree, 5);
        insta::assert_snapshot!(render(&tree, &view, 5), @r"
        ▾ root
          ▸ a
            b
        ");
    }

    #[test]
    fn expanded_and_marked_nodes() {
        let mut tree = sample();
        let a = tree.children(tree.root())[0];
        tree.expand(a);
        tree.toggle_mark(tree.children(a)[1]);
        let mut view = TreeViewState::new(&tree);
        view.set_height(&tree, 5);
        insta::assert_snapshot!(render(&tree, &view, 5), @r"
        ▾ root
          ▾ a
              a1
             *a2
            b
        ");
    }

    #[test]
    fn rows_past_area_are_not_drawn() {
        let mut tree = sample();
        tree.expand_all();
        let mut view = TreeViewState::new(&tree);
        view.set_height(&tree, 5);
        let text = render(&tree, &view, 2);
        assert_eq!(text.lines().count(), 2);
    }
}
