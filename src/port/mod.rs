//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where interchangeable collaborators plug in: the
//! sentence-embedding model used by the matcher and the fee schedule used by
//! the allocator.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────┐                                          ┌───────────┐
//! │ Embedder │                                          │ FeeModel  │
//! │ Adapter  │                                          │  Adapter  │
//! └──────────┘                                          └───────────┘
//! ```

pub mod outbound;

pub use outbound::embedder::Embedder;
pub use outbound::fee::FeeModel;
