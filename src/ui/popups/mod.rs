//! Modal overlays drawn above the widget.

pub mod checkout;
