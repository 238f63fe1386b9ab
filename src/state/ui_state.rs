//! UI state for the widget.
//!
//! Keyboard focus and the preset cursor. Nothing here affects what amount is
//! charged; it only decides where the next key press lands.

// ============================================================================
// Focus
// ============================================================================

/// Which control receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The preset amount row.
    #[default]
    Presets,
    /// The custom amount text input.
    CustomInput,
    /// The pay button.
    PayButton,
}

impl Focus {
    /// Cycles to the next focus target.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Presets => Self::CustomInput,
            Self::CustomInput => Self::PayButton,
            Self::PayButton => Self::Presets,
        }
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Presets => Self::PayButton,
            Self::CustomInput => Self::Presets,
            Self::PayButton => Self::CustomInput,
        }
    }
}

// ============================================================================
// UiState
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    /// Index of the highlighted preset.
    pub preset_cursor: usize,
}

impl UiState {
    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Moves the preset cursor left, wrapping around.
    pub fn cursor_left(&mut self, preset_count: usize) {
        if preset_count == 0 {
            return;
        }
        self.preset_cursor = self
            .preset_cursor
            .checked_sub(1)
            .unwrap_or(preset_count - 1)
            .min(preset_count - 1);
    }

    /// Moves the preset cursor right, wrapping around.
    pub fn cursor_right(&mut self, preset_count: usize) {
        if preset_count == 0 {
            return;
        }
        self.preset_cursor = (self.preset_cursor + 1) % preset_count;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle() {
        let mut ui = UiState::default();
        ui.cycle_focus();
        assert_eq!(ui.focus, Focus::CustomInput);
        ui.cycle_focus();
        assert_eq!(ui.focus, Focus::PayButton);
        ui.cycle_focus();
        assert_eq!(ui.focus, Focus::Presets);
        ui.cycle_focus_back();
        assert_eq!(ui.focus, Focus::PayButton);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut ui = UiState::default();
        ui.cursor_left(3);
        assert_eq!(ui.preset_cursor, 2);
        ui.cursor_right(3);
        assert_eq!(ui.preset_cursor, 0);
        ui.cursor_right(0);
        assert_eq!(ui.preset_cursor, 0);
    }
}
