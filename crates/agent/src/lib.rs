//! Merchant tools for a conversational shopping front-end.
//!
//! The front-end (voice or chat, not part of this workspace) drives
//! three tools: search the catalog, place an order, and recall the
//! last order. The split of responsibilities:
//!
//! 1. **Service** (`service`) - loads state from the stores on every
//!    call and returns plain result values.
//! 2. **Tools** (`tools`) - parse the loose JSON arguments an LLM
//!    produces and render the plain-text replies it speaks back.
//!
//! Resolution failures (unknown product, ambiguous name, malformed
//! item) are caller-facing reply text, never errors; only storage
//! failures propagate.

pub mod service;
pub mod tools;

pub use service::{MerchantService, OrderOutcome};
pub use tools::{
    parse_order_items, GetLastOrderTool, PlaceOrderTool, SearchProductsTool, Tool, ToolRegistry,
};
