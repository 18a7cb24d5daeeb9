// burgerbox_storefront/src/models/mod.rs

//! Data exchanged with the storefront API and kept in client state.

pub mod checkout;
pub mod order;
pub mod payment;
pub mod user;

pub use checkout::{CheckoutStatus, ContactDetails, OrderSummary};
pub use order::{Order, OrderStatus};
pub use payment::{PaymentConfirmation, PaymentOrder, PaymentOrderRequest, WidgetPrefill, WidgetRequest};
pub use user::{LoginRequest, RegisterRequest, UserRecord, UserSession};
