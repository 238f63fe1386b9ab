//! Terminal host for the widget.
//!
//! Owns one [`Widget`] and the [`TerminalCheckout`] it pays through, maps key
//! presses to commands, and drives message processing and the auto-close
//! timer from the event loop.

use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::Frame;

use crate::client::TerminalCheckout;
use crate::commands::{InputContext, KeyMapper, WidgetCommand};
use crate::constants::TICK_RATE;
use crate::state::Widget;
use crate::tui::Tui;
use crate::ui;

pub struct App {
    widget: Widget,
    checkout: TerminalCheckout,
    exit: bool,
}

impl App {
    /// `checkout` must be the same gateway (or a clone of it) the widget was
    /// built with.
    #[must_use]
    pub fn new(widget: Widget, checkout: TerminalCheckout) -> Self {
        Self {
            widget,
            checkout,
            exit: false,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    #[must_use]
    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// The pending checkout overlay takes every key while it is open.
    #[must_use]
    pub fn input_context(&self) -> InputContext {
        if self.checkout.is_open() {
            InputContext::Checkout
        } else {
            self.widget.input_context()
        }
    }

    // ========================================================================
    // Event Loop
    // ========================================================================

    /// Runs until the user quits.
    ///
    /// # Errors
    /// Returns an error if the terminal operations fail.
    pub fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut last_tick = Instant::now();
        terminal.draw(|frame| self.draw(frame))?;

        while !self.exit {
            self.update(Instant::now());

            let timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key)
                        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                    {
                        self.handle_key_event(key);
                        terminal.draw(|frame| self.draw(frame))?;
                    }
                    Event::Resize(_, _) => {
                        terminal.draw(|frame| self.draw(frame))?;
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                terminal.draw(|frame| self.draw(frame))?;
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    pub fn draw(&self, frame: &mut Frame) {
        let snapshot = self.widget.snapshot();
        let pending = self.checkout.pending_request();
        ui::render(&snapshot, pending.as_ref(), frame);
    }

    /// Applies background results and fires the auto-close timer.
    pub fn update(&mut self, now: Instant) {
        self.widget.process_messages();
        if let Err(e) = self.widget.tick(now) {
            tracing::warn!("Widget tick failed: {e}");
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let command = KeyMapper::map_key(key, &self.input_context());
        self.dispatch(command);
    }

    pub fn dispatch(&mut self, command: WidgetCommand) {
        match command {
            WidgetCommand::Quit => self.exit = true,
            WidgetCommand::CheckoutPay => {
                self.checkout.pay();
            }
            WidgetCommand::CheckoutDecline => {
                self.checkout.decline();
            }
            WidgetCommand::CheckoutDismiss => {
                self.checkout.dismiss();
            }
            command => {
                // Validation errors are already shown inline
                if let Err(e) = self.widget.apply(command) {
                    tracing::debug!("{command:?} rejected: {e}");
                }
            }
        }
    }

    /// Tears the widget down. The app is unusable afterwards.
    pub fn shutdown(&mut self) {
        self.exit = true;
        self.widget.destroy();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LibraryGate;
    use crate::state::{PaymentAttempt, WidgetDeps};
    use crate::test_utils::{CallbackRecorder, ConfigMother, MockBalanceProvider, Recorded};
    use crossterm::event::{KeyCode, KeyModifiers};
    use rust_decimal::Decimal;
    use std::sync::Arc;

    fn app(recorder: &CallbackRecorder) -> App {
        let checkout = TerminalCheckout::new();
        let deps = WidgetDeps::new(
            Arc::new(MockBalanceProvider::returning(Ok(Decimal::from(250)))),
            Arc::new(checkout.clone()),
        )
        .with_library(Arc::new(LibraryGate::new()));
        let widget = Widget::new(ConfigMother::with_balance_url(), recorder.callbacks(), deps);
        App::new(widget, checkout)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    async fn settle(app: &mut App) {
        for _ in 0..10 {
            tokio::task::yield_now().await;
            app.update(Instant::now());
        }
    }

    #[tokio::test]
    async fn test_keyboard_recharge_through_terminal_checkout() {
        let recorder = CallbackRecorder::new();
        let mut app = app(&recorder);

        press(&mut app, KeyCode::Char('o'));
        settle(&mut app).await;
        assert!(app.widget().is_visible());

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.widget().amount().resolved_amount(), Some(Decimal::from(500)));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert_eq!(app.input_context(), InputContext::Checkout);
        let request = app.checkout.pending_request().unwrap();
        assert_eq!(request.amount_minor_units, 50_000);

        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        assert!(matches!(
            app.widget().attempt(),
            PaymentAttempt::Succeeded { .. }
        ));
        assert_eq!(recorder.count(|e| matches!(e, Recorded::Success(_))), 1);
        assert!(app.widget().auto_close_deadline().is_some());
    }

    #[tokio::test]
    async fn test_decline_in_checkout_reports_failure() {
        let recorder = CallbackRecorder::new();
        let mut app = app(&recorder);

        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Char('f'));
        settle(&mut app).await;

        assert!(!app.checkout.is_open());
        assert!(matches!(app.widget().attempt(), PaymentAttempt::Failed { .. }));
        assert_eq!(recorder.count(|e| matches!(e, Recorded::Failure(_))), 1);
    }

    #[tokio::test]
    async fn test_escape_in_checkout_dismisses_but_keeps_widget_open() {
        let recorder = CallbackRecorder::new();
        let mut app = app(&recorder);

        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        settle(&mut app).await;

        press(&mut app, KeyCode::Esc);
        settle(&mut app).await;

        assert!(!app.checkout.is_open());
        assert!(app.widget().is_visible());
        assert!(app.widget().attempt().is_idle());
        assert_eq!(recorder.count(|e| matches!(e, Recorded::Close)), 1);
    }

    #[tokio::test]
    async fn test_quit_and_shutdown() {
        let recorder = CallbackRecorder::new();
        let mut app = app(&recorder);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_exit());

        app.shutdown();
        assert!(app.widget().is_destroyed());
    }
}
