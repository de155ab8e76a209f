// ── Confirmation-gated trip actions ──
//
// Starting and deleting a trip ask the user first. The store action only
// runs on acceptance, and the caller always gets a plain `bool` back.

use std::future::Future;
use std::sync::Arc;

use fleetdesk_api::types::OrderTrip;
use tracing::debug;

use crate::i18n::{MessageKey, Translate};
use crate::status::TagSeverity;
use crate::store::TripsStore;

/// What the confirmation dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub header: String,
    pub message: String,
    pub accept_label: String,
    pub reject_label: String,
    pub accept_severity: TagSeverity,
}

/// Asks the user to accept or reject a prompt.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &ConfirmPrompt) -> impl Future<Output = bool> + Send;
}

/// Trip start / delete behind a confirmation step.
pub struct TripWorkflow<C> {
    trips: TripsStore,
    confirm: C,
    i18n: Arc<dyn Translate>,
}

impl<C: Confirm> TripWorkflow<C> {
    pub fn new(trips: TripsStore, confirm: C, i18n: Arc<dyn Translate>) -> Self {
        Self {
            trips,
            confirm,
            i18n,
        }
    }

    fn prompt(
        &self,
        header: MessageKey,
        message: MessageKey,
        accept: MessageKey,
        severity: TagSeverity,
    ) -> ConfirmPrompt {
        ConfirmPrompt {
            header: self.i18n.translate(header).into_owned(),
            message: self.i18n.translate(message).into_owned(),
            accept_label: self.i18n.translate(accept).into_owned(),
            reject_label: self.i18n.translate(MessageKey::Cancel).into_owned(),
            accept_severity: severity,
        }
    }

    /// `true` only when the user accepted and the trip started.
    pub async fn confirm_start_trip(&self, trip_id: &str) -> bool {
        let prompt = self.prompt(
            MessageKey::StartTrip,
            MessageKey::ConfirmStartTrip,
            MessageKey::StartTrip,
            TagSeverity::Success,
        );
        if !self.confirm.confirm(&prompt).await {
            debug!(trip_id, "start rejected");
            return false;
        }
        self.trips.start_trip(trip_id).await.is_ok()
    }

    /// `true` only when the user accepted and the trip was deleted.
    pub async fn confirm_delete_trip(&self, trip_id: &str) -> bool {
        let prompt = self.prompt(
            MessageKey::DeleteTrip,
            MessageKey::ConfirmDeleteTrip,
            MessageKey::Delete,
            TagSeverity::Danger,
        );
        if !self.confirm.confirm(&prompt).await {
            debug!(trip_id, "delete rejected");
            return false;
        }
        self.trips.delete_trip(trip_id).await.unwrap_or(false)
    }

    /// Open `trip` for editing.
    pub fn edit_trip(&self, trip: OrderTrip) {
        self.trips.set_edited(trip);
    }
}
