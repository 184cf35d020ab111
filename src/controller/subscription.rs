use crate::{
    error::Error,
    model::{SubscribeState, Subscription},
    provider::ChannelApi,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    Subscribe,
    Unsubscribe,
}

/// Owns the subscribing flag for one `{channel, subscriber}` pair.
///
/// The flag starts `Unknown`, resolves once from the initial status
/// check, and afterwards flips only when a toggle call is acknowledged.
/// Toggles are two-phase (`begin_toggle` / `complete_toggle`) so the
/// in-flight guard and every transition are testable without a
/// transport; `toggle` wires the two phases to a `ChannelApi`.
#[derive(Debug, Default)]
pub struct SubscriptionController {
    state: SubscribeState,
    descriptor: Option<Subscription>,
    in_flight: bool,
}

impl SubscriptionController {
    pub fn new() -> SubscriptionController {
        SubscriptionController::default()
    }

    pub fn state(&self) -> SubscribeState {
        self.state
    }

    pub fn descriptor(&self) -> Option<&Subscription> {
        self.descriptor.as_ref()
    }

    /// Binds the descriptor produced by the push registration. Called
    /// once; the descriptor never changes for the session's lifetime.
    pub fn attach(&mut self, descriptor: Subscription) {
        self.descriptor = Some(descriptor);
    }

    /// Resolves `Unknown` from the initial status response. Later calls
    /// are ignored, the flag then only moves on acknowledged toggles.
    pub fn apply_status(&mut self, found: &[Subscription]) {
        if self.state.is_known() {
            return;
        }
        self.state = if found.is_empty() {
            SubscribeState::Unsubscribed
        } else {
            SubscribeState::Subscribed
        };
    }

    /// Starts a toggle. Returns the action to issue and the descriptor
    /// to send, or `None` when the click is unbound: no descriptor yet,
    /// status still unknown, or a toggle already in flight.
    pub fn begin_toggle(&mut self) -> Option<(ToggleAction, Subscription)> {
        if self.in_flight {
            return None;
        }
        let action = match self.state {
            SubscribeState::Subscribed => ToggleAction::Unsubscribe,
            SubscribeState::Unsubscribed => ToggleAction::Subscribe,
            SubscribeState::Unknown => return None,
        };
        let descriptor = self.descriptor.clone()?;
        self.in_flight = true;
        Some((action, descriptor))
    }

    /// Finishes a toggle. The flag flips only on success; a failed call
    /// leaves the last acknowledged state in place.
    pub fn complete_toggle(&mut self, action: ToggleAction, ok: bool) {
        self.in_flight = false;
        if !ok {
            return;
        }
        self.state = match action {
            ToggleAction::Subscribe => SubscribeState::Subscribed,
            ToggleAction::Unsubscribe => SubscribeState::Unsubscribed,
        };
    }

    pub async fn toggle<A: ChannelApi>(
        &mut self,
        api: &A,
    ) -> Result<SubscribeState, Error> {
        let Some((action, descriptor)) = self.begin_toggle() else {
            return Ok(self.state);
        };

        let result = match action {
            ToggleAction::Subscribe => {
                api.subscribe(&descriptor).await.map(|_| ())
            },
            ToggleAction::Unsubscribe => api.unsubscribe(&descriptor).await,
        };

        match result {
            Ok(()) => {
                self.complete_toggle(action, true);
                Ok(self.state)
            },
            Err(e) => {
                self.complete_toggle(action, false);
                Err(e)
            },
        }
    }
}
