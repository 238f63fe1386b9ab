//! Message processing for the widget.
//!
//! Applies results that background tasks sent over the message channel.

use std::time::Instant;

use super::{SessionOutcome, Widget, WidgetMessage};
use crate::constants::AUTO_CLOSE_DELAY;

impl Widget {
    /// Applies every pending message. Returns how many were applied.
    ///
    /// Does nothing once the widget is destroyed.
    pub fn process_messages(&mut self) -> usize {
        if self.destroyed {
            return 0;
        }
        let mut applied = 0;
        while let Ok(message) = self.message_rx.try_recv() {
            self.handle_message(message);
            applied += 1;
        }
        applied
    }

    fn handle_message(&mut self, message: WidgetMessage) {
        match message {
            WidgetMessage::BalanceFetched(result) => {
                self.balance.complete(result, &self.callbacks);
            }
            WidgetMessage::Gateway { attempt, event } => {
                match self.payment.handle_event(attempt, event, &self.callbacks) {
                    SessionOutcome::Succeeded => {
                        self.balance.fetch(&self.message_tx);
                        self.auto_close_at = Some(Instant::now() + AUTO_CLOSE_DELAY);
                    }
                    SessionOutcome::InitFailed(err) => {
                        self.amount.show_error(err.to_string());
                    }
                    SessionOutcome::Failed | SessionOutcome::Dismissed | SessionOutcome::Ignored => {}
                }
            }
        }
    }
}
