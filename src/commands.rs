//! Command pattern for key event handling.
//!
//! Key presses are translated into [`WidgetCommand`]s according to the
//! current [`InputContext`], so keybindings can be tested without a widget.
//!
//! # Example
//!
//! ```ignore
//! let context = widget.input_context();
//! let command = KeyMapper::map_key(key_event, &context);
//!
//! match command {
//!     WidgetCommand::Quit => app.exit = true,
//!     command => widget.apply(command)?,
//! }
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ============================================================================
// Input Context
// ============================================================================

/// Which keybindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// The widget is closed.
    Hidden,
    /// The preset row has focus.
    Presets,
    /// The custom amount input has focus.
    CustomInput,
    /// The pay button has focus.
    PayButton,
    /// A checkout overlay is waiting for the customer.
    Checkout,
}

impl InputContext {
    /// Returns `true` if this context accepts text input.
    #[must_use]
    pub const fn accepts_text_input(&self) -> bool {
        matches!(self, Self::CustomInput)
    }
}

// ============================================================================
// Widget Commands
// ============================================================================

/// Everything a key press can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetCommand {
    // === Application Control ===
    /// Exit the host application.
    Quit,
    /// Open the widget.
    Show,
    /// Close the widget and clear the selection.
    CloseAndReset,
    /// Re-fetch the balance.
    RefreshBalance,

    // === Navigation ===
    /// Move focus to the next control.
    CycleFocus,
    /// Move focus to the previous control.
    CycleFocusBack,
    /// Highlight the previous preset.
    PresetLeft,
    /// Highlight the next preset.
    PresetRight,
    /// Select the highlighted preset.
    SelectPreset,

    // === Amount Input ===
    /// Type a character in the custom amount input.
    TypeChar(char),
    /// Delete the last character of the custom amount input.
    Backspace,
    /// Start the payment.
    Submit,

    // === Checkout Overlay ===
    /// Complete the pending checkout.
    CheckoutPay,
    /// Fail the pending checkout.
    CheckoutDecline,
    /// Close the pending checkout without paying.
    CheckoutDismiss,

    /// Nothing to do.
    Noop,
}

impl WidgetCommand {
    /// Returns `true` if the command is handled by the checkout overlay.
    #[must_use]
    pub const fn is_checkout(&self) -> bool {
        matches!(
            self,
            Self::CheckoutPay | Self::CheckoutDecline | Self::CheckoutDismiss
        )
    }
}

// ============================================================================
// Key Mapper
// ============================================================================

/// Maps key events to widget commands based on the current input context.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMapper;

impl KeyMapper {
    /// Maps a key event to a command. Pure; no side effects.
    #[must_use]
    pub fn map_key(key: KeyEvent, context: &InputContext) -> WidgetCommand {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return WidgetCommand::Quit;
        }
        match context {
            InputContext::Hidden => Self::map_hidden_keys(key),
            InputContext::Presets => Self::map_preset_keys(key),
            InputContext::CustomInput => Self::map_input_keys(key),
            InputContext::PayButton => Self::map_button_keys(key),
            InputContext::Checkout => Self::map_checkout_keys(key),
        }
    }

    fn map_hidden_keys(key: KeyEvent) -> WidgetCommand {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter => WidgetCommand::Show,
            KeyCode::Char('q') | KeyCode::Esc => WidgetCommand::Quit,
            _ => WidgetCommand::Noop,
        }
    }

    /// Keys shared by every control inside the open widget.
    fn map_common_keys(key: KeyEvent) -> WidgetCommand {
        match key.code {
            KeyCode::Esc => WidgetCommand::CloseAndReset,
            KeyCode::Tab => WidgetCommand::CycleFocus,
            KeyCode::BackTab => WidgetCommand::CycleFocusBack,
            KeyCode::Char('q') => WidgetCommand::Quit,
            KeyCode::Char('r') => WidgetCommand::RefreshBalance,
            _ => WidgetCommand::Noop,
        }
    }

    fn map_preset_keys(key: KeyEvent) -> WidgetCommand {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => WidgetCommand::PresetLeft,
            KeyCode::Right | KeyCode::Char('l') => WidgetCommand::PresetRight,
            KeyCode::Enter | KeyCode::Char(' ') => WidgetCommand::SelectPreset,
            KeyCode::Char(c) if is_amount_char(c) => WidgetCommand::TypeChar(c),
            _ => Self::map_common_keys(key),
        }
    }

    fn map_input_keys(key: KeyEvent) -> WidgetCommand {
        match key.code {
            KeyCode::Enter => WidgetCommand::Submit,
            KeyCode::Backspace => WidgetCommand::Backspace,
            KeyCode::Char(c) if is_amount_char(c) => WidgetCommand::TypeChar(c),
            _ => Self::map_common_keys(key),
        }
    }

    fn map_button_keys(key: KeyEvent) -> WidgetCommand {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => WidgetCommand::Submit,
            _ => Self::map_common_keys(key),
        }
    }

    fn map_checkout_keys(key: KeyEvent) -> WidgetCommand {
        match key.code {
            KeyCode::Enter => WidgetCommand::CheckoutPay,
            KeyCode::Char('f') => WidgetCommand::CheckoutDecline,
            KeyCode::Esc => WidgetCommand::CheckoutDismiss,
            _ => WidgetCommand::Noop,
        }
    }
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[rstest]
    #[case::hidden(InputContext::Hidden)]
    #[case::presets(InputContext::Presets)]
    #[case::input(InputContext::CustomInput)]
    #[case::button(InputContext::PayButton)]
    #[case::checkout(InputContext::Checkout)]
    fn test_ctrl_c_quits_everywhere(#[case] context: InputContext) {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyMapper::map_key(key, &context), WidgetCommand::Quit);
    }

    #[rstest]
    #[case::open(InputContext::Hidden, KeyCode::Char('o'), WidgetCommand::Show)]
    #[case::quit_hidden(InputContext::Hidden, KeyCode::Char('q'), WidgetCommand::Quit)]
    #[case::cursor_left(InputContext::Presets, KeyCode::Left, WidgetCommand::PresetLeft)]
    #[case::cursor_right(InputContext::Presets, KeyCode::Char('l'), WidgetCommand::PresetRight)]
    #[case::select(InputContext::Presets, KeyCode::Enter, WidgetCommand::SelectPreset)]
    #[case::select_space(InputContext::Presets, KeyCode::Char(' '), WidgetCommand::SelectPreset)]
    #[case::digit_on_presets(InputContext::Presets, KeyCode::Char('7'), WidgetCommand::TypeChar('7'))]
    #[case::digit(InputContext::CustomInput, KeyCode::Char('5'), WidgetCommand::TypeChar('5'))]
    #[case::dot(InputContext::CustomInput, KeyCode::Char('.'), WidgetCommand::TypeChar('.'))]
    #[case::letter_ignored(InputContext::CustomInput, KeyCode::Char('x'), WidgetCommand::Noop)]
    #[case::backspace(InputContext::CustomInput, KeyCode::Backspace, WidgetCommand::Backspace)]
    #[case::submit_input(InputContext::CustomInput, KeyCode::Enter, WidgetCommand::Submit)]
    #[case::submit_button(InputContext::PayButton, KeyCode::Enter, WidgetCommand::Submit)]
    #[case::tab(InputContext::PayButton, KeyCode::Tab, WidgetCommand::CycleFocus)]
    #[case::back_tab(InputContext::Presets, KeyCode::BackTab, WidgetCommand::CycleFocusBack)]
    #[case::esc(InputContext::CustomInput, KeyCode::Esc, WidgetCommand::CloseAndReset)]
    #[case::refresh(InputContext::PayButton, KeyCode::Char('r'), WidgetCommand::RefreshBalance)]
    #[case::pay(InputContext::Checkout, KeyCode::Enter, WidgetCommand::CheckoutPay)]
    #[case::decline(InputContext::Checkout, KeyCode::Char('f'), WidgetCommand::CheckoutDecline)]
    #[case::dismiss(InputContext::Checkout, KeyCode::Esc, WidgetCommand::CheckoutDismiss)]
    #[case::checkout_blocks_quit(InputContext::Checkout, KeyCode::Char('q'), WidgetCommand::Noop)]
    fn test_map_key(
        #[case] context: InputContext,
        #[case] code: KeyCode,
        #[case] expected: WidgetCommand,
    ) {
        assert_eq!(KeyMapper::map_key(key_event(code), &context), expected);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let cmd = KeyMapper::map_key(key_event(KeyCode::F(1)), &InputContext::PayButton);
        assert_eq!(cmd, WidgetCommand::Noop);
    }

    #[test]
    fn test_checkout_commands() {
        assert!(WidgetCommand::CheckoutPay.is_checkout());
        assert!(!WidgetCommand::Submit.is_checkout());
    }

    #[test]
    fn test_text_input_context() {
        assert!(InputContext::CustomInput.accepts_text_input());
        assert!(!InputContext::Presets.accepts_text_input());
    }
}
