//! Component trait - Interface for UI components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation: `handle_key_event` converts keys to Actions, `update` applies
//! Actions, `draw` renders.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
pub trait Component {
    /// Initialize the component
    ///
    /// Called once when the component is created. Use this to set up
    /// initial state that depends on runtime information.
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Handle a key event, returning an optional Action
    ///
    /// Converts key events into semantic Actions; state changes belong in
    /// `update`, not here.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Update component state based on an Action
    ///
    /// May return a follow-up Action to process next.
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component to the frame
    ///
    /// Pure rendering into the given `area`; no state changes.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
