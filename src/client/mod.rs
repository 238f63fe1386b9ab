//! External collaborators of the widget.
//!
//! - [`balance`] - Balance retrieval (`BalanceProvider`, HTTP implementation)
//! - [`gateway`] - Checkout provider abstraction and the library load gate
//! - [`terminal_checkout`] - Checkout overlay rendered by the terminal UI

pub mod balance;
pub mod gateway;
pub mod terminal_checkout;

pub use balance::{BalanceProvider, HttpBalanceProvider};
pub use gateway::{CheckoutRequest, GatewayEvent, GatewayEvents, LibraryGate, PaymentGateway};
pub use terminal_checkout::TerminalCheckout;
