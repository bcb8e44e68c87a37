use super::{SelectorEvent, SelectorSurface};
use crate::terminal_restore::TerminalRestoreGuard;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};

const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

/// Full-screen crossterm surface.
pub struct TerminalSurface {
    guard: TerminalRestoreGuard,
    frame: FrameBuffer<CrosstermBackend<Stdout>>,
}

impl TerminalSurface {
    /// Take over the terminal. On failure it is handed back before the error
    /// is returned.
    pub fn open(color: bool) -> io::Result<Self> {
        let mut stdout = io::stdout();
        let guard = TerminalRestoreGuard::acquire(&mut stdout)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            guard,
            frame: FrameBuffer::new(terminal, color),
        })
    }
}

impl SelectorSurface for TerminalSurface {
    fn poll_event(&mut self) -> io::Result<SelectorEvent> {
        match event::read()? {
            Event::Key(key) => Ok(map_key_event(key)),
            _ => Ok(SelectorEvent::Ignore),
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        self.frame.clear();
        Ok(())
    }

    fn draw_option(&mut self, index: usize, text: &str, is_selected: bool) -> io::Result<()> {
        self.frame.set_row(index, text, is_selected);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.frame.present()
    }

    fn close(&mut self) {
        self.guard.release();
    }
}

/// Rows buffered between `clear` and `present`, drawn as one ratatui frame.
///
/// The view scrolls so the selected row stays on screen when there are more
/// options than terminal rows.
struct FrameBuffer<B: Backend> {
    terminal: Terminal<B>,
    rows: Vec<Line<'static>>,
    selected: Option<usize>,
    offset: usize,
    color: bool,
}

impl<B: Backend> FrameBuffer<B> {
    fn new(terminal: Terminal<B>, color: bool) -> Self {
        Self {
            terminal,
            rows: Vec::new(),
            selected: None,
            offset: 0,
            color,
        }
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.selected = None;
    }

    fn set_row(&mut self, index: usize, text: &str, is_selected: bool) {
        if index >= self.rows.len() {
            self.rows.resize(index + 1, Line::default());
        }
        self.rows[index] = styled_row(text, is_selected, self.color);
        if is_selected {
            self.selected = Some(index);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let rows = std::mem::take(&mut self.rows);
        let selected = self.selected;
        let mut offset = self.offset;
        self.terminal.draw(|frame| {
            let area = frame.size();
            offset = scroll_offset(offset, selected, usize::from(area.height));
            let scroll = u16::try_from(offset).unwrap_or(u16::MAX);
            frame.render_widget(Paragraph::new(rows).scroll((scroll, 0)), area);
        })?;
        self.offset = offset;
        Ok(())
    }
}

fn styled_row(text: &str, is_selected: bool, color: bool) -> Line<'static> {
    if !is_selected {
        return Line::from(format!("{UNSELECTED_MARKER}{text}"));
    }
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if color {
        style = style.fg(Color::Green);
    }
    Line::from(Span::styled(format!("{SELECTED_MARKER}{text}"), style))
}

/// First visible row, moved only as far as needed to show `selected`.
fn scroll_offset(offset: usize, selected: Option<usize>, height: usize) -> usize {
    let Some(selected) = selected else {
        return 0;
    };
    if height == 0 {
        return offset;
    }
    if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    }
}

/// Key bindings for the picker. Only key presses count; repeats and releases
/// are ignored so a single keystroke never moves twice.
pub fn map_key_event(key: KeyEvent) -> SelectorEvent {
    if key.kind != KeyEventKind::Press {
        return SelectorEvent::Ignore;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => SelectorEvent::Cancel,
            _ => SelectorEvent::Ignore,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => SelectorEvent::MoveUp,
        KeyCode::Down | KeyCode::Char('j') => SelectorEvent::MoveDown,
        KeyCode::Enter => SelectorEvent::Confirm,
        KeyCode::Esc | KeyCode::Char('q') => SelectorEvent::Cancel,
        _ => SelectorEvent::Ignore,
    }
}
