//! Client-side state for the expense screen and the edit workflow.
//!
//! # Design
//! `ViewModel` owns the snapshot (the last successfully fetched collection)
//! together with the transient UI state: search text, form draft, edit mode,
//! connectivity banner, and a one-shot notice. It never performs I/O. Every
//! remote action is split in two, mirroring `ExpenseClient`:
//!
//! - `begin_*` validates, updates the mode, and returns the `HttpRequest`.
//! - `finish_*` takes whatever the host's transport produced and settles the
//!   state, returning a `Followup` that tells the host whether a reload is due.
//!
//! The snapshot is only ever swapped for a new `Vec`; records are never
//! patched in place. A reload that resolves later than another simply wins.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::client::ExpenseClient;
use crate::config::{Config, ReconcileStrategy};
use crate::error::{ApiError, SyncError};
use crate::form::FormDraft;
use crate::http::{HttpRequest, HttpResponse, TransportError};
use crate::summary::{self, FilteredView};
use crate::types::{Category, ExpenseId, ExpenseRecord};

/// What a transport produced for one request.
pub type Exchange = Result<HttpResponse, TransportError>;

/// The edit workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No edit in progress; the form is for a new expense.
    Idle,
    /// The form holds a copy of this record's fields.
    Editing(ExpenseId),
    /// A create or update is in flight.
    Submitting(SubmitTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(ExpenseId),
}

impl SubmitTarget {
    /// The mode to fall back to if the request fails.
    fn prior(self) -> Mode {
        match self {
            SubmitTarget::Create => Mode::Idle,
            SubmitTarget::Update(id) => Mode::Editing(id),
        }
    }
}

/// Whether the last reload reached the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Connectivity {
    #[default]
    Online,
    /// Shown as a persistent banner until a reload succeeds.
    Offline(String),
}

impl Connectivity {
    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Online)
    }
}

/// What the host should do after a mutation settled successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    /// Fetch the whole collection again.
    Reload,
    /// The snapshot already reflects the change.
    Done,
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    client: ExpenseClient,
    reconcile: ReconcileStrategy,
    snapshot: Vec<ExpenseRecord>,
    search: String,
    form: FormDraft,
    mode: Mode,
    connectivity: Connectivity,
    notice: Option<String>,
}

impl ViewModel {
    pub fn new(client: ExpenseClient, reconcile: ReconcileStrategy) -> Self {
        Self {
            client,
            reconcile,
            snapshot: Vec::new(),
            search: String::new(),
            form: FormDraft::blank(),
            mode: Mode::Idle,
            connectivity: Connectivity::Online,
            notice: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ExpenseClient::new(&config.base_url), config.reconcile)
    }

    pub fn client(&self) -> &ExpenseClient {
        &self.client
    }

    pub fn snapshot(&self) -> &[ExpenseRecord] {
        &self.snapshot
    }

    pub fn record(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.snapshot.iter().find(|r| r.id == id)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.mode, Mode::Submitting(_))
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    pub fn form(&self) -> &FormDraft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormDraft {
        &mut self.form
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// Take the pending one-shot notice, if any. A second call returns `None`.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // -----------------------------------------------------------------------
    // Derived values
    // -----------------------------------------------------------------------

    pub fn total(&self) -> Decimal {
        summary::total(&self.snapshot)
    }

    pub fn category_totals(&self) -> Vec<(Category, Decimal)> {
        summary::category_totals(&self.snapshot)
    }

    pub fn filtered(&self) -> FilteredView<'_> {
        summary::filtered_view(&self.snapshot, &self.search)
    }

    // -----------------------------------------------------------------------
    // Reload
    // -----------------------------------------------------------------------

    pub fn begin_reload(&self) -> HttpRequest {
        self.client.build_list_expenses()
    }

    /// Replace the snapshot on success; on failure keep it and raise the
    /// connectivity banner.
    pub fn finish_reload(&mut self, exchange: Exchange) -> Result<(), SyncError> {
        let parsed = exchange
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_list_expenses(response));
        match parsed {
            Ok(records) => {
                debug!(count = records.len(), "snapshot replaced");
                self.snapshot = records;
                self.connectivity = Connectivity::Online;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "reload failed");
                self.connectivity = Connectivity::Offline(err.to_string());
                Err(SyncError::Connectivity(err))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Edit workflow
    // -----------------------------------------------------------------------

    /// Copy the record's fields into the form and enter `Editing(id)`.
    pub fn begin_edit(&mut self, id: ExpenseId) -> Result<(), SyncError> {
        if self.is_submitting() {
            return Err(SyncError::Busy);
        }
        let record = self.record(id).ok_or(SyncError::UnknownRecord(id))?;
        self.form = FormDraft::from_record(record);
        self.mode = Mode::Editing(id);
        debug!(%id, "editing");
        Ok(())
    }

    /// Discard the draft and return to `Idle`. A no-op when already idle.
    pub fn cancel_edit(&mut self) -> Result<(), SyncError> {
        match self.mode {
            Mode::Submitting(_) => Err(SyncError::Busy),
            Mode::Editing(_) => {
                self.reset_form();
                Ok(())
            }
            Mode::Idle => Ok(()),
        }
    }

    /// Validate the form and build a create (from `Idle`) or update (from
    /// `Editing`) request, entering `Submitting`.
    pub fn begin_submit(&mut self) -> Result<HttpRequest, SyncError> {
        let target = match self.mode {
            Mode::Idle => SubmitTarget::Create,
            Mode::Editing(id) => SubmitTarget::Update(id),
            Mode::Submitting(_) => return Err(SyncError::Busy),
        };
        let draft = self.form.to_draft().inspect_err(|err| {
            self.notice = Some(err.to_string());
        })?;
        let request = match target {
            SubmitTarget::Create => self.client.build_create_expense(&draft),
            SubmitTarget::Update(id) => self.client.build_update_expense(id, &draft),
        };
        let request = request.map_err(|err| self.mutation_failed(MutationKind::from(target), err))?;
        self.mode = Mode::Submitting(target);
        debug!(?target, "submitting");
        Ok(request)
    }

    /// Settle an in-flight create or update. Success clears the form and
    /// returns to `Idle`; failure restores the prior mode with the draft
    /// untouched.
    ///
    /// Under `Refetch` only the status matters, so a 2xx acknowledgement
    /// without a record body still counts as saved.
    pub fn finish_submit(&mut self, exchange: Exchange) -> Result<Followup, SyncError> {
        let Mode::Submitting(target) = self.mode else {
            return Err(SyncError::NotSubmitting);
        };
        let saved = exchange
            .map_err(ApiError::from)
            .and_then(|response| self.settle_saved(target, response));
        match saved {
            Ok(record) => {
                info!(id = ?record.as_ref().map(|r| r.id), ?target, "expense saved");
                self.reset_form();
                Ok(match record {
                    Some(record) => {
                        self.apply_saved(record);
                        Followup::Done
                    }
                    None => Followup::Reload,
                })
            }
            Err(err) => {
                self.mode = target.prior();
                Err(self.mutation_failed(MutationKind::from(target), err))
            }
        }
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Build the delete request. Confirmation is the host's job.
    pub fn begin_delete(&self, id: ExpenseId) -> HttpRequest {
        self.client.build_delete_expense(id)
    }

    pub fn finish_delete(&mut self, id: ExpenseId, exchange: Exchange) -> Result<Followup, SyncError> {
        let parsed = exchange
            .map_err(ApiError::from)
            .and_then(|response| self.client.parse_delete_expense(response));
        if let Err(err) = parsed {
            return Err(self.mutation_failed(MutationKind::Delete, err));
        }
        info!(%id, "expense deleted");
        if self.mode == Mode::Editing(id) {
            self.reset_form();
        }
        match self.reconcile {
            ReconcileStrategy::Refetch => Ok(Followup::Reload),
            ReconcileStrategy::ApplyReturned => {
                self.snapshot = self.snapshot.iter().filter(|r| r.id != id).cloned().collect();
                Ok(Followup::Done)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn reset_form(&mut self) {
        self.form = FormDraft::blank();
        self.mode = Mode::Idle;
    }

    /// The returned record when it will be applied locally, `None` when a
    /// reload follows instead.
    fn settle_saved(&self, target: SubmitTarget, response: HttpResponse) -> Result<Option<ExpenseRecord>, ApiError> {
        match (self.reconcile, target) {
            (ReconcileStrategy::Refetch, SubmitTarget::Create) => {
                self.client.check_create_expense(&response).map(|()| None)
            }
            (ReconcileStrategy::Refetch, SubmitTarget::Update(_)) => {
                self.client.check_update_expense(&response).map(|()| None)
            }
            (ReconcileStrategy::ApplyReturned, SubmitTarget::Create) => {
                self.client.parse_create_expense(response).map(Some)
            }
            (ReconcileStrategy::ApplyReturned, SubmitTarget::Update(_)) => {
                self.client.parse_update_expense(response).map(Some)
            }
        }
    }

    fn apply_saved(&mut self, record: ExpenseRecord) {
        let mut next = Vec::with_capacity(self.snapshot.len() + 1);
        let mut replaced = false;
        for existing in &self.snapshot {
            if existing.id == record.id {
                next.push(record.clone());
                replaced = true;
            } else {
                next.push(existing.clone());
            }
        }
        if !replaced {
            // Server lists newest first.
            next.insert(0, record);
        }
        self.snapshot = next;
    }

    fn mutation_failed(&mut self, kind: MutationKind, err: ApiError) -> SyncError {
        warn!(error = %err, action = %kind, "mutation failed");
        let error = SyncError::Mutation { action: kind, source: err };
        self.notice = Some(error.to_string());
        error
    }
}

/// Which mutation failed, for the user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl From<SubmitTarget> for MutationKind {
    fn from(target: SubmitTarget) -> Self {
        match target {
            SubmitTarget::Create => MutationKind::Create,
            SubmitTarget::Update(_) => MutationKind::Update,
        }
    }
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MutationKind::Create => "save",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        })
    }
}
