//! Slot bindings: the consumption side of slot resolution.
//!
//! A rendering surface creates one binding per slot it shows and activates
//! it when it mounts. The binding starts out empty, asks its [`SlotSource`]
//! once, and then holds whatever came back until the surface unmounts.
//!
//! Any lookup failure, panics included, leaves the binding empty. Surfaces running without a
//! storage backend must still render, so errors never reach them.
//!
//! ```text
//! idle -> resolving -> populated
//!                   -> empty_on_failure
//! ```
//!
//! There is no retry and no cancellation: dropping a binding while its
//! lookup is in flight lets the lookup finish and discards the result.

use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use pacer_core::{PacerError, SlotName};
use pacer_logging::{PluginEvent, PluginEventLogger};

use crate::slots::{ResolvedComponent, panic_message};
use crate::source::SlotSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingState {
    Idle,
    Resolving,
    Populated,
    EmptyOnFailure,
}

impl BindingState {
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Populated | Self::EmptyOnFailure)
    }
}

/// What a subscriber sees: the state plus the components held.
#[derive(Debug, Clone)]
pub struct BindingSnapshot {
    pub state: BindingState,
    pub components: Arc<[ResolvedComponent]>,
}

impl BindingSnapshot {
    fn idle() -> Self {
        Self {
            state: BindingState::Idle,
            components: Arc::from(Vec::new()),
        }
    }
}

pub struct SlotBinding {
    slot: SlotName,
    source: Arc<dyn SlotSource>,
    tx: watch::Sender<BindingSnapshot>,
}

/// Create an idle binding for `slot`. Nothing is resolved until activation.
pub fn use_plugin_components(
    slot: impl Into<SlotName>,
    source: Arc<dyn SlotSource>,
) -> SlotBinding {
    SlotBinding::new(slot, source)
}

impl SlotBinding {
    pub fn new(slot: impl Into<SlotName>, source: Arc<dyn SlotSource>) -> Self {
        let (tx, _rx) = watch::channel(BindingSnapshot::idle());
        Self {
            slot: slot.into(),
            source,
            tx,
        }
    }

    pub fn slot(&self) -> &SlotName {
        &self.slot
    }

    pub fn state(&self) -> BindingState {
        self.tx.borrow().state
    }

    /// Components currently held; empty until populated.
    pub fn components(&self) -> Arc<[ResolvedComponent]> {
        Arc::clone(&self.tx.borrow().components)
    }

    /// Watch the binding. The receiver sees every state transition.
    pub fn subscribe(&self) -> watch::Receiver<BindingSnapshot> {
        self.tx.subscribe()
    }

    /// Resolve the slot in place. Only the first activation does any work.
    pub async fn activate(&self) {
        let claimed = self.tx.send_if_modified(|snapshot| {
            if snapshot.state != BindingState::Idle {
                return false;
            }
            snapshot.state = BindingState::Resolving;
            true
        });
        if !claimed {
            debug!(slot = %self.slot, state = ?self.state(), "Binding already activated");
            return;
        }

        let lookup = AssertUnwindSafe(self.source.plugin_views_for_slot(&self.slot))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(PacerError::Other(anyhow::anyhow!(
                    "slot lookup panicked: {}",
                    panic_message(&*panic)
                )))
            });
        let settled = settle(&self.slot, lookup);
        self.tx.send_replace(settled);
    }

    /// Activate on a background task, the way a surface does on mount.
    pub fn mount(self: &Arc<Self>) -> JoinHandle<()> {
        let binding = Arc::clone(self);
        tokio::spawn(async move { binding.activate().await })
    }

    /// Wait until the binding has settled and return what it holds.
    pub async fn settled(&self) -> BindingSnapshot {
        let mut rx = self.tx.subscribe();
        match rx.wait_for(|snapshot| snapshot.state.is_settled()).await {
            Ok(snapshot) => snapshot.clone(),
            // The sender lives in `self`, so the channel cannot close here.
            Err(_) => self.tx.borrow().clone(),
        }
    }

    /// Release the held components.
    pub fn unmount(self) {
        debug!(slot = %self.slot, held = self.tx.borrow().components.len(), "Binding unmounted");
    }
}

/// Map a lookup result onto the terminal snapshot.
fn settle(slot: &SlotName, lookup: Result<Vec<ResolvedComponent>, PacerError>) -> BindingSnapshot {
    match lookup {
        Ok(components) => {
            info!(slot = %slot, count = components.len(), "Slot populated");
            BindingSnapshot {
                state: BindingState::Populated,
                components: Arc::from(components),
            }
        }
        Err(e) => {
            if e.is_store_unavailable() {
                PluginEventLogger::log_event(PluginEvent::StoreUnavailable {
                    slot: slot.to_string(),
                    error_msg: e.to_string(),
                });
            }
            debug!(slot = %slot, error = %e, "Slot lookup failed; rendering nothing");
            BindingSnapshot {
                state: BindingState::EmptyOnFailure,
                components: Arc::from(Vec::new()),
            }
        }
    }
}
