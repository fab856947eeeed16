//! TUI rendering and terminal management (impure shell)

pub mod hex;
pub mod scrollbar;
pub mod status;
pub mod styles;
pub mod table;
pub mod text_view;
pub mod tree;

pub use hex::HexView;
pub use scrollbar::ScrollBars;
pub use status::StatusLine;
pub use styles::{ColorConfig, ViewStyles};
pub use table::TableView;
pub use text_view::TextView;
pub use tree::TreeView;

use crate::config::keybindings::KeyBindings;
use crate::model::{ComponentId, CoreError, KeyAction};
use crate::source::{FsEntry, ReadWriteSeek, SourceError, TextContent};
use crate::state::{
    handle_hex_action, handle_hex_char, handle_hex_mouse, handle_scroll_action,
    handle_scroll_mouse, handle_table_action, handle_table_mouse, handle_tree_action,
    handle_tree_mouse, PointerGrab,
};
use crate::view_state::{
    HexEvent, HexViewState, ScrollBarPolicy, Side, TableSource, TableStyle, TableViewState, Tree,
    TreeBuilder, TreeViewState, VecTable, ViewportScroller,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Viewport component error
    #[error("View error: {0}")]
    Core(#[from] CoreError),

    /// Content source error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// The single component on screen; it owns every mouse event in the content area.
const CONTENT: ComponentId = ComponentId::new(1);

// ===== Screens =====

/// Scrollable text.
pub struct TextScreen {
    content: TextContent,
    scroller: ViewportScroller,
}

/// Lazily loaded directory tree.
pub struct TreeScreen {
    tree: Tree<FsEntry>,
    view: TreeViewState,
    builder: Box<dyn TreeBuilder<FsEntry>>,
}

/// Table of JSONL records.
pub struct TableScreen {
    table: VecTable,
    view: TableViewState,
}

/// Hex editor over a seekable stream.
pub struct HexScreen {
    view: HexViewState<Box<dyn ReadWriteSeek>>,
}

/// What the app shows.
pub enum Screen {
    /// Plain text through a scroller.
    Text(TextScreen),
    /// Tree view.
    Tree(TreeScreen),
    /// Table view.
    Table(TableScreen),
    /// Hex view.
    Hex(HexScreen),
}

impl Screen {
    /// Text screen with the given scroll bar policy on both axes.
    pub fn text(content: TextContent, bars: ScrollBarPolicy) -> Self {
        let mut scroller = ViewportScroller::new().with_policy(bars);
        let extent = content.extent();
        scroller.set_content_extent(extent.width, extent.height);
        Screen::Text(TextScreen { content, scroller })
    }

    /// Tree screen. Children load through `builder` on expansion.
    pub fn tree(tree: Tree<FsEntry>, builder: Box<dyn TreeBuilder<FsEntry>>) -> Self {
        let view = TreeViewState::new(&tree);
        Screen::Tree(TreeScreen {
            tree,
            view,
            builder,
        })
    }

    /// Table screen.
    pub fn table(table: VecTable, style: TableStyle) -> Self {
        Screen::Table(TableScreen {
            table,
            view: TableViewState::new(style),
        })
    }

    /// Hex screen over `stream`.
    ///
    /// # Errors
    /// Returns `CoreError::NotSeekable` if the stream can't seek.
    pub fn hex(stream: Box<dyn ReadWriteSeek>, allow_edits: bool) -> Result<Self, CoreError> {
        let mut view = HexViewState::new(stream)?;
        view.set_allow_edits(allow_edits);
        Ok(Screen::Hex(HexScreen { view }))
    }

    /// Push the content area size into the component.
    fn layout(&mut self, area: Rect) {
        match self {
            Screen::Text(s) => s.scroller.set_viewport_size(area.width, area.height),
            Screen::Tree(s) => s.view.set_height(&s.tree, area.height),
            Screen::Table(s) => s.view.set_viewport_size(&s.table, area.width, area.height),
            Screen::Hex(s) => s.view.set_viewport_size(area.width, area.height),
        }
    }

    /// Left half of the status line.
    fn summary(&self, title: &str) -> String {
        match self {
            Screen::Text(s) => {
                let offset = s.scroller.offset();
                format!(
                    "{title}  line {}/{}  col {}",
                    offset.y + 1,
                    s.content.height(),
                    offset.x + 1
                )
            }
            Screen::Tree(s) => {
                let label = s
                    .view
                    .selected()
                    .and_then(|id| s.tree.data(id))
                    .map(ToString::to_string)
                    .unwrap_or_default();
                format!("{title}  {label}  {} marked", s.tree.marked().len())
            }
            Screen::Table(s) => {
                let cell = s.view.selected();
                let rows = s.table.row_count();
                let columns = s.table.column_count();
                if rows == 0 || columns == 0 {
                    return format!("{title}  empty");
                }
                format!(
                    "{title}  row {}/{rows}  col {}/{columns}  {}",
                    cell.row + 1,
                    cell.column + 1,
                    s.table.column_name(cell.column)
                )
            }
            Screen::Hex(s) => {
                let side = match s.view.side() {
                    Side::Hex => "hex",
                    Side::Text => "text",
                };
                format!(
                    "{title}  0x{:08x}/0x{:08x}  {side}  {} pending",
                    s.view.position(),
                    s.view.length(),
                    s.view.overlay().len()
                )
            }
        }
    }
}

// ===== App =====

/// Settings the app is started with.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Shown at the start of the status line.
    pub title: String,
    /// Lines per wheel notch.
    pub wheel_lines: usize,
    /// Color on or off.
    pub color: ColorConfig,
    /// Key to action mapping.
    pub key_bindings: KeyBindings,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    screen: Screen,
    key_bindings: KeyBindings,
    grab: PointerGrab,
    styles: ViewStyles,
    wheel_lines: usize,
    title: String,
    /// Right half of the status line, cleared on the next key press.
    message: Option<String>,
    /// Last laid-out content area (for mouse routing).
    content_area: Rect,
    /// Redraw needed for reasons no component tracks (resize, messages).
    dirty: bool,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(screen: Screen, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self::from_parts(terminal, screen, options))
    }

    /// Main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Blocks on terminal events and
    /// redraws only when something on screen changed.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(width, height),
                _ => continue,
            }
            self.drain_events();
            if self.take_needs_display() {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn from_parts(terminal: Terminal<B>, mut screen: Screen, options: ViewOptions) -> Self {
        let content_area = match terminal.size() {
            Ok(size) => content_rect(size.width, size.height),
            Err(_) => Rect::default(),
        };
        screen.layout(content_area);
        Self {
            terminal,
            screen,
            key_bindings: options.key_bindings,
            grab: PointerGrab::new(),
            styles: ViewStyles::with_color_config(options.color),
            wheel_lines: options.wheel_lines,
            title: options.title,
            message: None,
            content_area,
            dirty: true,
        }
    }

    /// Handle a single keyboard event
    ///
    /// # Behavior
    /// - Ctrl+C always quits, even if not in bindings
    /// - In a hex view, typed characters edit first (hex digits in the hex
    ///   pane, printable ASCII in the text pane); anything not consumed
    ///   falls through to the key bindings
    /// - Component errors go to the status line and the log
    /// - The status message stays until a navigation action or a typed edit
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if let KeyCode::Char(ch) = key.code {
            let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
            if let (Screen::Hex(s), true) = (&mut self.screen, plain) {
                match handle_hex_char(&mut s.view, ch) {
                    Ok(true) => {
                        self.clear_message();
                        return false;
                    }
                    Ok(false) => {}
                    Err(e) => {
                        self.report(e);
                        return false;
                    }
                }
            }
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        if action == KeyAction::Quit {
            return true;
        }
        if action.is_navigation() {
            self.clear_message();
        }

        let result = match &mut self.screen {
            Screen::Text(s) => Ok(handle_scroll_action(&mut s.scroller, action)),
            Screen::Tree(s) => Ok(handle_tree_action(
                &mut s.view,
                &mut s.tree,
                s.builder.as_ref(),
                action,
            )),
            Screen::Table(s) => Ok(handle_table_action(&mut s.view, &s.table, action)),
            Screen::Hex(s) => handle_hex_action(&mut s.view, action),
        };
        match result {
            Ok(changed) => debug!(?action, changed, "Key action handled"),
            Err(e) => self.report(e),
        }
        false
    }

    /// Route a mouse event to the component under the content area.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let area = self.content_area;
        let wheel = self.wheel_lines;
        let changed = match &mut self.screen {
            Screen::Text(s) => {
                handle_scroll_mouse(&mut s.scroller, &mut self.grab, CONTENT, area, mouse, wheel)
            }
            Screen::Tree(s) => handle_tree_mouse(
                &mut s.view,
                &mut s.tree,
                s.builder.as_ref(),
                area,
                mouse,
                wheel,
            ),
            Screen::Table(s) => handle_table_mouse(&mut s.view, &s.table, area, mouse, wheel),
            Screen::Hex(s) => handle_hex_mouse(&mut s.view, area, mouse, wheel),
        };
        if changed {
            debug!(kind = ?mouse.kind, "Mouse event handled");
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        self.content_area = content_rect(width, height);
        self.screen.layout(self.content_area);
        self.dirty = true;
    }

    /// Drop the status message once the user moves on.
    fn clear_message(&mut self) {
        if self.message.take().is_some() {
            self.dirty = true;
        }
    }

    fn report(&mut self, error: CoreError) {
        warn!(error = %error, "Operation failed");
        self.message = Some(error.to_string());
        self.dirty = true;
    }

    /// Log component events; surface apply/discard results on the status line.
    fn drain_events(&mut self) {
        match &mut self.screen {
            Screen::Text(s) => {
                for event in s.scroller.take_events() {
                    debug!(?event, "Scroller event");
                }
            }
            Screen::Tree(s) => {
                for event in s.view.take_events() {
                    debug!(?event, "Tree event");
                }
            }
            Screen::Table(s) => {
                for event in s.view.take_events() {
                    debug!(?event, "Table event");
                }
            }
            Screen::Hex(s) => {
                for event in s.view.take_events() {
                    match event {
                        HexEvent::EditsApplied(count) => {
                            info!(count, "Edits applied");
                            self.message = Some(format!("applied {count} edits"));
                            self.dirty = true;
                        }
                        HexEvent::EditsDiscarded(count) => {
                            info!(count, "Edits discarded");
                            self.message = Some(format!("discarded {count} edits"));
                            self.dirty = true;
                        }
                        other => debug!(event = ?other, "Hex event"),
                    }
                }
            }
        }
    }

    /// Whether a redraw is due. Clears every flag it reads.
    fn take_needs_display(&mut self) -> bool {
        let component = match &mut self.screen {
            Screen::Text(s) => s.scroller.take_needs_display(),
            Screen::Tree(s) => s.view.take_needs_display(),
            Screen::Table(s) => s.view.take_needs_display(),
            Screen::Hex(s) => s.view.take_needs_display(),
        };
        std::mem::take(&mut self.dirty) || component
    }

    /// Render the current frame
    ///
    /// The hex window is read before drawing so stream errors surface here
    /// rather than inside the frame closure.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let content = content_rect(size.width, size.height);
        if content != self.content_area {
            self.content_area = content;
            self.screen.layout(content);
        }
        let status_area = Rect::new(0, size.height.saturating_sub(1), size.width, size.height.min(1));
        let hex_rows = match &mut self.screen {
            Screen::Hex(s) => s.view.read_window()?,
            _ => Vec::new(),
        };
        let summary = self.screen.summary(&self.title);

        let Self {
            terminal,
            screen,
            styles,
            message,
            ..
        } = self;
        terminal.draw(|frame| {
            match screen {
                Screen::Text(s) => {
                    frame.render_widget(TextView::new(s.content.lines(), &s.scroller, styles), content);
                }
                Screen::Tree(s) => {
                    let rows = s.view.visible_rows(&s.tree, s.builder.as_ref());
                    frame.render_widget(TreeView::new(&s.tree, &rows, styles), content);
                }
                Screen::Table(s) => {
                    frame.render_widget(TableView::new(&s.table, &s.view, styles), content);
                }
                Screen::Hex(s) => {
                    let view = HexView::new(&hex_rows, s.view.bytes_per_line(), s.view.side(), styles);
                    frame.render_widget(view, content);
                    if let Some((x, y)) = s.view.cursor_cell() {
                        if x < content.width && y < content.height {
                            frame.set_cursor_position((content.x + x, content.y + y));
                        }
                    }
                }
            }
            let status = StatusLine::new(&summary, message.as_deref(), styles.status);
            frame.render_widget(status, status_area);
        })?;

        Ok(())
    }
}

/// Screen area above the status line.
fn content_rect(width: u16, height: u16) -> Rect {
    Rect::new(0, 0, width, height.saturating_sub(1))
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(terminal: Terminal<B>, screen: Screen, options: ViewOptions) -> Self {
        Self::from_parts(terminal, screen, options)
    }

    /// Handle a key, then drain events like the event loop does.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        let quit = self.handle_key(key);
        self.drain_events();
        quit
    }

    /// Handle a mouse event, then drain events like the event loop does.
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse);
        self.drain_events();
    }

    /// Resize the (test) terminal area.
    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height);
    }

    /// Render one frame.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Whether the event loop would redraw now.
    pub(crate) fn needs_display_test(&mut self) -> bool {
        self.take_needs_display()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub(crate) fn screen(&self) -> &Screen {
        &self.screen
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub(crate) fn grab(&self) -> &PointerGrab {
        &self.grab
    }
}

#[cfg(test)]
impl Screen {
    pub(crate) fn as_text(&self) -> Option<(&TextContent, &ViewportScroller)> {
        match self {
            Screen::Text(s) => Some((&s.content, &s.scroller)),
            _ => None,
        }
    }

    pub(crate) fn as_tree(&self) -> Option<(&Tree<FsEntry>, &TreeViewState)> {
        match self {
            Screen::Tree(s) => Some((&s.tree, &s.view)),
            _ => None,
        }
    }

    pub(crate) fn as_table(&self) -> Option<(&VecTable, &TableViewState)> {
        match self {
            Screen::Table(s) => Some((&s.table, &s.view)),
            _ => None,
        }
    }

    pub(crate) fn as_hex(&self) -> Option<&HexViewState<Box<dyn ReadWriteSeek>>> {
        match self {
            Screen::Hex(s) => Some(&s.view),
            _ => None,
        }
    }
}

/// Initialize and run the TUI application on a screen
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(screen: Screen, options: ViewOptions) -> Result<(), TuiError> {
    let mut app = TuiApp::new(screen, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Flatten a buffer into trimmed lines, skipping blank rows.
#[cfg(test)]
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}
