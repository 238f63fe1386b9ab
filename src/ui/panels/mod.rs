//! Section panels drawn inside the widget modal.
//!
//! - **Balance**: current wallet balance, skeleton while loading
//! - **Amounts**: preset row, custom amount input and its inline error
//! - **Payment**: pay button and the post-payment status banner

pub mod amounts;
pub mod balance;
pub mod payment;
