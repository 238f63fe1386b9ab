//! Embeddable wallet recharge widget.
//!
//! A [`state::Widget`] lets a customer pick or type an amount, shows their
//! wallet balance, and hands the payment to a [`client::PaymentGateway`].
//! Outcomes reach the host through [`state::WidgetCallbacks`]. The `ui`
//! module renders the widget with ratatui; `app` hosts it in a terminal.

pub mod app;
pub mod client;
pub mod commands;
pub mod constants;
pub mod domain;
pub mod state;
pub mod theme;
pub mod tui;
pub mod ui;

#[cfg(test)]
mod test_utils;
