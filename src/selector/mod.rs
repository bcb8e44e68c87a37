//! Interactive domain picker.
//!
//! The loop is a small state machine over [`SelectionState`] driven by
//! [`SelectorEvent`]s pulled from a [`SelectorSurface`]. The surface owns the
//! terminal; the loop only decides what to draw and when to stop.

mod terminal;

use crate::log_debug;
use std::io;

pub use terminal::{map_key_event, TerminalSurface};

/// Logical input consumed by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    MoveUp,
    MoveDown,
    Confirm,
    Cancel,
    /// Input with no meaning for the picker (unbound keys, resize).
    Ignore,
}

/// Input and render capability the picker runs against.
pub trait SelectorSurface {
    /// Block until the next input event.
    fn poll_event(&mut self) -> io::Result<SelectorEvent>;
    fn clear(&mut self) -> io::Result<()>;
    fn draw_option(&mut self, index: usize, text: &str, is_selected: bool) -> io::Result<()>;
    /// Present everything drawn since the last `clear` as one frame.
    fn flush(&mut self) -> io::Result<()>;
    /// Release the surface. Called exactly once on every exit path of the loop.
    fn close(&mut self);
}

impl<T: SelectorSurface + ?Sized> SelectorSurface for &mut T {
    fn poll_event(&mut self) -> io::Result<SelectorEvent> {
        (**self).poll_event()
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }

    fn draw_option(&mut self, index: usize, text: &str, is_selected: bool) -> io::Result<()> {
        (**self).draw_option(index, text, is_selected)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    User,
    InputError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Confirmed { index: usize, option: String },
    Cancelled(CancelReason),
}

/// Cursor over a fixed number of options. `None` when there is nothing to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    cursor: Option<usize>,
    len: usize,
}

impl SelectionState {
    pub fn new(len: usize) -> Self {
        Self {
            cursor: (len > 0).then_some(0),
            len,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn move_up(&mut self) {
        if let Some(cursor) = self.cursor.as_mut() {
            *cursor = cursor.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        let last = self.len.saturating_sub(1);
        if let Some(cursor) = self.cursor.as_mut() {
            *cursor = (*cursor + 1).min(last);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Confirm(usize),
    Cancel,
}

fn apply_event(state: &mut SelectionState, event: SelectorEvent) -> Step {
    match event {
        SelectorEvent::MoveUp => {
            state.move_up();
            Step::Continue
        }
        SelectorEvent::MoveDown => {
            state.move_down();
            Step::Continue
        }
        SelectorEvent::Confirm => match state.cursor() {
            Some(index) => Step::Confirm(index),
            None => Step::Continue,
        },
        SelectorEvent::Cancel => Step::Cancel,
        SelectorEvent::Ignore => Step::Continue,
    }
}

/// Full redraw: clear, one row per option, single flush.
pub fn render<S: SelectorSurface + ?Sized>(
    surface: &mut S,
    options: &[String],
    state: &SelectionState,
) -> io::Result<()> {
    surface.clear()?;
    for (index, option) in options.iter().enumerate() {
        surface.draw_option(index, option, state.cursor() == Some(index))?;
    }
    surface.flush()
}

/// Run the picker until the user confirms or cancels.
///
/// Input errors end the loop as a cancellation. Render errors are returned.
/// The surface is closed before this returns either way.
pub fn run_selection<S: SelectorSurface + ?Sized>(
    surface: &mut S,
    options: &[String],
) -> io::Result<SelectionOutcome> {
    let result = selection_loop(surface, options);
    surface.close();
    result
}

fn selection_loop<S: SelectorSurface + ?Sized>(
    surface: &mut S,
    options: &[String],
) -> io::Result<SelectionOutcome> {
    let mut state = SelectionState::new(options.len());
    render(surface, options, &state)?;

    loop {
        let event = match surface.poll_event() {
            Ok(event) => event,
            Err(err) => {
                log_debug(&format!("selector input error: {err}"));
                return Ok(SelectionOutcome::Cancelled(CancelReason::InputError(
                    err.to_string(),
                )));
            }
        };

        match apply_event(&mut state, event) {
            Step::Continue => render(surface, options, &state)?,
            Step::Confirm(index) => {
                return Ok(SelectionOutcome::Confirmed {
                    index,
                    option: options[index].clone(),
                });
            }
            Step::Cancel => return Ok(SelectionOutcome::Cancelled(CancelReason::User)),
        }
    }
}
