// burgerbox/src/lib.rs

//! BurgerBox core: the client-side domain of the storefront.
//!
//!  - [`cart`]: the cart state machine (quantity merging, clamping, removal at
//!    zero) with write-through persistence.
//!  - [`catalog`]: products, variant price tables and the admin product form.
//!  - [`store`]: the client-local key-value store the cart and session live in.
//!  - [`notice`]: user-visible notices.
//!  - [`flow`]: an async step-workflow engine for multi-call operations such as
//!    checkout.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod flow;
pub mod notice;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, CartEvent, CartLine, LineKey, MAX_LINE_QUANTITY};
pub use crate::catalog::{Category, PriceTable, Product, ProductDraft, ProductPayload, KNOWN_VARIANTS};
pub use crate::error::{CartError, CartResult, DraftError, FlowError, FlowResult, StoreError};
pub use crate::flow::{Flow, FlowOutcome, FlowState, StepControl, StepSpec};
pub use crate::notice::{Notice, Severity};
pub use crate::store::{FileStore, KeyValueStore, MemoryStore, CART_KEY, SESSION_KEY};
