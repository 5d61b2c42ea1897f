//! Error types for the expenses client and the view model built on it.
//!
//! # Design
//! `ApiError` describes what went wrong with one request. `NotFound` gets a
//! dedicated variant because callers distinguish "the record does not exist"
//! from "the server returned an unexpected status." All other non-2xx
//! responses land in `HttpError` with the raw status code and body.
//!
//! `SyncError` is what the view model reports upward, classified by how the
//! front-end must surface it: a persistent connectivity banner for failed
//! reloads, a one-shot notice for failed mutations.

use thiserror::Error;

use crate::form::FormError;
use crate::http::TransportError;
use crate::types::ExpenseId;
use crate::view_model::MutationKind;

/// Errors returned by `ExpenseClient` parse methods and by transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404: the requested expense does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// No response was received at all.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors reported by `ViewModel` and `Synchronizer`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The collection could not be fetched. Shown as a persistent banner.
    #[error("backend connection failed: {0}")]
    Connectivity(#[source] ApiError),

    /// A create, update, or delete was rejected or never arrived. Shown once;
    /// local state is left as it was.
    #[error("could not {action} expense: {source}")]
    Mutation {
        action: MutationKind,
        #[source]
        source: ApiError,
    },

    /// The form could not be turned into a draft; nothing was sent.
    #[error(transparent)]
    Validation(#[from] FormError),

    /// An edit was requested for an id that is not in the current snapshot.
    #[error("no expense with id {0} in the current list")]
    UnknownRecord(ExpenseId),

    /// A create or update is already in flight.
    #[error("a save is already in progress")]
    Busy,

    /// A submit response arrived while no submit was in flight.
    #[error("no save is in progress")]
    NotSubmitting,
}
