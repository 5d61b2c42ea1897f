//! Drives a `ViewModel` through a `Transport`, one user action at a time.
//!
//! Each method runs the `begin_*` / execute / `finish_*` sequence and then
//! follows up with a reload when the view model asks for one. Nothing is
//! retried: a failure is returned once and the state is left where
//! `ViewModel` put it.

use tracing::debug;

use crate::error::SyncError;
use crate::http::Transport;
use crate::types::ExpenseId;
use crate::view_model::{Followup, ViewModel};

pub struct Synchronizer<T> {
    view: ViewModel,
    transport: T,
}

impl<T: Transport> Synchronizer<T> {
    pub fn new(view: ViewModel, transport: T) -> Self {
        Self { view, transport }
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewModel {
        &mut self.view
    }

    pub fn into_parts(self) -> (ViewModel, T) {
        (self.view, self.transport)
    }

    /// Fetch the full collection and swap it in.
    pub fn reload(&mut self) -> Result<(), SyncError> {
        let request = self.view.begin_reload();
        debug!(path = %request.path, "reloading");
        let exchange = self.transport.execute(request);
        self.view.finish_reload(exchange)
    }

    /// Save the form as a new expense or as an update of the one being
    /// edited.
    pub fn submit(&mut self) -> Result<(), SyncError> {
        let request = self.view.begin_submit()?;
        let exchange = self.transport.execute(request);
        let followup = self.view.finish_submit(exchange)?;
        self.follow(followup)
    }

    /// Delete an expense. Callers confirm with the user first.
    pub fn delete(&mut self, id: ExpenseId) -> Result<(), SyncError> {
        let request = self.view.begin_delete(id);
        let exchange = self.transport.execute(request);
        let followup = self.view.finish_delete(id, exchange)?;
        self.follow(followup)
    }

    pub fn begin_edit(&mut self, id: ExpenseId) -> Result<(), SyncError> {
        self.view.begin_edit(id)
    }

    pub fn cancel_edit(&mut self) -> Result<(), SyncError> {
        self.view.cancel_edit()
    }

    fn follow(&mut self, followup: Followup) -> Result<(), SyncError> {
        match followup {
            Followup::Reload => self.reload(),
            Followup::Done => Ok(()),
        }
    }
}
