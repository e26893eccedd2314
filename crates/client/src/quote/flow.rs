//! The quote submission state machine.
//!
//! Submission is a strict progression: `Idle -> Submitting ->
//! AwaitingArtifact -> Presented`, then either `Sent` (dispatch confirmed,
//! cart cleared) or back to `Presented` on a dispatch failure so the user can
//! retry or download the document. Every failure path returns to `Idle`
//! through `Failed`. A boolean latch guarantees at most one submission is in
//! flight; repeat triggers while latched are ignored, not queued.

use std::sync::Arc;

use toolquote_core::Email;

use super::client::{QuoteClient, QuoteDocument};
use super::form::QuoteForm;
use super::QuoteRequest;
use crate::cart::CartStore;
use crate::notify::{Notify, Toast};

/// Where the submission currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// No submission in progress.
    Idle,
    /// Request accepted, about to hit the backend.
    Submitting,
    /// Backend contacted, waiting for the generated document.
    AwaitingArtifact,
    /// Document in hand, waiting for the user's send/dismiss decision.
    Presented,
    /// Dispatch confirmed by the backend.
    Sent,
    /// Generation or validation failed; transient, resolves to `Idle`.
    Failed,
}

impl FlowState {
    /// Stable name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::AwaitingArtifact => "awaiting_artifact",
            Self::Presented => "presented",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

/// Result of a submit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Trigger ignored: a submission is already in flight or the form gate
    /// is closed.
    Ignored,
    /// Pre-flight validation rejected the cart; nothing was sent.
    Rejected,
    /// Generation failed; the flow returned to idle.
    Failed,
    /// The document is ready and presented to the user.
    Presented,
}

/// Result of a send confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// No presented document to send.
    Ignored,
    /// Dispatch failed; the document stays presented for retry or download.
    Failed,
    /// Dispatch confirmed; the cart was cleared.
    Sent,
}

/// Drives one quote from form to dispatched document.
pub struct SubmissionFlow {
    client: QuoteClient,
    notifier: Arc<dyn Notify>,
    recipients: Vec<Email>,
    state: FlowState,
    in_flight: bool,
    artifact: Option<QuoteDocument>,
    pending: Option<QuoteRequest>,
}

impl SubmissionFlow {
    /// Create an idle flow.
    #[must_use]
    pub fn new(client: QuoteClient, notifier: Arc<dyn Notify>, recipients: Vec<Email>) -> Self {
        Self {
            client,
            notifier,
            recipients,
            state: FlowState::Idle,
            in_flight: false,
            artifact: None,
            pending: None,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FlowState {
        self.state
    }

    /// The presented document, when in [`FlowState::Presented`].
    #[must_use]
    pub const fn document(&self) -> Option<&QuoteDocument> {
        self.artifact.as_ref()
    }

    /// Trigger a submission.
    ///
    /// Ignored unless the flow is idle and the form's submit gate is open.
    /// The cart is re-checked against its stock ceilings before anything
    /// leaves the machine; a violation rejects the whole submission.
    pub async fn submit(&mut self, cart: &CartStore, form: &QuoteForm) -> SubmitOutcome {
        if self.in_flight || self.state != FlowState::Idle {
            tracing::debug!(state = self.state.as_str(), "submit ignored: not idle");
            return SubmitOutcome::Ignored;
        }
        if !form.submit_enabled() {
            tracing::debug!("submit ignored: form gate closed");
            return SubmitOutcome::Ignored;
        }

        self.in_flight = true;
        self.transition(FlowState::Submitting);

        if cart.is_empty() {
            self.notifier.toast(Toast::new("Your cart is empty"));
            return self.fail(SubmitOutcome::Rejected);
        }
        if let Some(entry) = cart
            .entries()
            .iter()
            .find(|e| e.quantity > e.stock_ceiling)
        {
            self.notifier.toast(Toast::new(format!(
                "Not enough units of \"{}\" available",
                entry.product.name
            )));
            return self.fail(SubmitOutcome::Rejected);
        }

        let request = form.build_request(cart.entries(), &self.recipients);
        self.transition(FlowState::AwaitingArtifact);

        match self.client.generate(&request).await {
            Ok(document) => {
                self.artifact = Some(document);
                self.pending = Some(request);
                self.transition(FlowState::Presented);
                self.in_flight = false;
                SubmitOutcome::Presented
            }
            Err(e) => {
                tracing::warn!("quote generation failed: {e}");
                self.notifier
                    .toast(Toast::new("Could not generate the quote, try again later"));
                self.fail(SubmitOutcome::Failed)
            }
        }
    }

    /// Confirm dispatch of the presented document.
    ///
    /// On success the cart is cleared and the flow returns to idle. On
    /// failure the document stays presented so the user can retry or save it
    /// locally.
    pub async fn confirm_send(&mut self, cart: &mut CartStore) -> SendOutcome {
        if self.state != FlowState::Presented || self.in_flight {
            tracing::debug!(state = self.state.as_str(), "send ignored: nothing presented");
            return SendOutcome::Ignored;
        }
        let Some(request) = self.pending.clone() else {
            return SendOutcome::Ignored;
        };

        self.in_flight = true;
        match self.client.send(&request).await {
            Ok(()) => {
                if let Err(e) = cart.clear() {
                    tracing::warn!("could not clear cart after send: {e}");
                }
                self.artifact = None;
                self.pending = None;
                self.in_flight = false;
                self.transition(FlowState::Sent);
                self.notifier.toast(Toast::new("Quote sent"));
                self.transition(FlowState::Idle);
                SendOutcome::Sent
            }
            Err(e) => {
                tracing::warn!("quote dispatch failed: {e}");
                self.in_flight = false;
                self.notifier.toast(Toast::new(
                    "Could not send the quote, you can still download it",
                ));
                SendOutcome::Failed
            }
        }
    }

    /// Dismiss the current submission without sending.
    ///
    /// Works from any non-idle state: drops the artifact, releases the
    /// latch, and returns to idle. The cart is untouched.
    pub fn dismiss(&mut self) {
        if self.state == FlowState::Idle {
            return;
        }
        self.artifact = None;
        self.pending = None;
        self.in_flight = false;
        self.transition(FlowState::Idle);
    }

    /// Fail the in-flight submission: latch cleared, state back to idle.
    fn fail(&mut self, outcome: SubmitOutcome) -> SubmitOutcome {
        self.transition(FlowState::Failed);
        self.in_flight = false;
        self.transition(FlowState::Idle);
        outcome
    }

    fn transition(&mut self, next: FlowState) {
        tracing::debug!(
            from = self.state.as_str(),
            to = next.as_str(),
            "submission state change"
        );
        self.state = next;
    }
}
