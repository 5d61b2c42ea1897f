//! Client core for the expenses service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and keeps the client-side
//! view of the expense collection in sync with the server.
//!
//! # Design
//! - `ExpenseClient` is stateless; it holds only `base_url`, which comes from
//!   `Config` rather than being baked into each deployment.
//! - `ViewModel` owns the snapshot and the edit workflow and is also free of
//!   I/O: every remote action is a `begin_*` / `finish_*` pair.
//! - `Synchronizer` glues the two to a host-provided `Transport`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod summary;
pub mod sync;
pub mod types;
pub mod view_model;

pub use client::ExpenseClient;
pub use config::{Config, ConfigError, ReconcileStrategy};
pub use error::{ApiError, SyncError};
pub use form::{FormDraft, FormError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use summary::FilteredView;
pub use sync::Synchronizer;
pub use types::{Category, ExpenseDraft, ExpenseId, ExpenseRecord};
pub use view_model::{Connectivity, Exchange, Followup, Mode, MutationKind, SubmitTarget, ViewModel};
