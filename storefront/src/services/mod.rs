// burgerbox_storefront/src/services/mod.rs

//! Collaborators outside the client: the REST API and the checkout widget.

pub mod api;
pub mod payment_widget;

pub use api::{ApiClient, AuthApi, CatalogApi, OrderApi, PaymentApi, StorefrontApi, UserAdminApi};
pub use payment_widget::{CheckoutWidget, PromptWidget, WidgetOutcome};
