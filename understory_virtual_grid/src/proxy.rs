// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placeholder cells whose real view is constructed asynchronously.
//!
//! A [`ProxyCell`] is handed to the controller immediately and can be bound,
//! updated, unbound and pooled like any other view. Its real view arrives
//! later through a single-shot [`PendingAttach`] ticket (or the future
//! returned by [`ProxyCell::await_cell`]). Nothing cancels the construction;
//! instead, when it completes, the ticket checks whether the result still
//! applies:
//!
//! - the proxy must still exist and must not have been invalidated by its host,
//! - no newer attach request may have been started on it, and
//! - it must still be bound to an item.
//!
//! If all of these hold, the real view is attached and receives the *latest*
//! item index and payload the proxy was updated with, which need not be the
//! ones that were current when construction started. Otherwise the result is
//! dropped.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt::{self, Debug};
use core::future::Future;

use crate::Cell;

/// Why a completed construction was not attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaleReason {
    /// The proxy was dropped.
    Dropped,
    /// The host invalidated the proxy.
    Invalidated,
    /// A newer attach request replaced this one.
    Superseded,
    /// The proxy was unbound from its item.
    Unbound,
    /// Construction produced no view.
    Failed,
}

/// Result of completing a [`PendingAttach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachOutcome {
    /// The real view was attached and shown the item at `index`.
    Attached {
        /// Item the proxy was bound to at completion.
        index: usize,
    },
    /// The result was stale and has been dropped.
    Discarded(StaleReason),
}

struct ProxyState<C, P> {
    index: Option<usize>,
    payload: Option<P>,
    real: Option<C>,
    generation: u64,
    live: bool,
}

/// A view that stands in for a real view until it has been constructed.
pub struct ProxyCell<C, P> {
    state: Rc<RefCell<ProxyState<C, P>>>,
}

impl<C, P> Default for ProxyCell<C, P> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(ProxyState {
                index: None,
                payload: None,
                real: None,
                generation: 0,
                live: true,
            })),
        }
    }
}

impl<C, P> Debug for ProxyCell<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ProxyCell");
        if let Ok(state) = self.state.try_borrow() {
            s.field("index", &state.index)
                .field("attached", &state.real.is_some())
                .field("live", &state.live);
        }
        s.finish_non_exhaustive()
    }
}

impl<C, P> ProxyCell<C, P> {
    /// Creates an unbound proxy with no real view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Item index the proxy is bound to.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.state.borrow().index
    }

    /// Returns `true` once a real view has been attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.borrow().real.is_some()
    }

    /// Runs `f` on the real view, if attached.
    pub fn with_real<R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
        self.state.borrow_mut().real.as_mut().map(f)
    }

    /// Starts an attach request.
    ///
    /// Starting a new request supersedes any earlier one still in flight.
    #[must_use]
    pub fn begin_attach(&self) -> PendingAttach<C, P> {
        let mut state = self.state.borrow_mut();
        state.generation = state.generation.wrapping_add(1);
        PendingAttach {
            state: Rc::downgrade(&self.state),
            generation: state.generation,
        }
    }

    /// Awaits `cell` and attaches the result if it is still current.
    ///
    /// The returned future does not keep the proxy alive.
    pub fn await_cell<F>(&self, cell: F) -> impl Future<Output = AttachOutcome> + use<C, P, F>
    where
        C: Cell<P>,
        P: Clone,
        F: Future<Output = Option<C>>,
    {
        let pending = self.begin_attach();
        async move { pending.complete(cell.await) }
    }

    /// Marks the proxy as destroyed by its host.
    ///
    /// The real view, if any, is dropped and pending requests will discard
    /// their results.
    pub fn invalidate(&self) {
        let mut state = self.state.borrow_mut();
        state.live = false;
        state.real = None;
    }
}

impl<C: Cell<P>, P: Clone> Cell<P> for ProxyCell<C, P> {
    fn update_content(&mut self, index: usize, payload: Option<P>) {
        let mut state = self.state.borrow_mut();
        if !state.live {
            return;
        }
        state.index = Some(index);
        state.payload = payload.clone();
        if let Some(real) = state.real.as_mut() {
            real.update_content(index, payload);
        }
    }

    fn unbind(&mut self) {
        let mut state = self.state.borrow_mut();
        state.index = None;
        state.payload = None;
        if let Some(real) = state.real.as_mut() {
            real.unbind();
        }
    }
}

/// A single-shot ticket for attaching a real view to a [`ProxyCell`].
///
/// Holds only a weak reference to the proxy.
pub struct PendingAttach<C, P> {
    state: Weak<RefCell<ProxyState<C, P>>>,
    generation: u64,
}

impl<C, P> Debug for PendingAttach<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAttach")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<C: Cell<P>, P: Clone> PendingAttach<C, P> {
    /// Attaches `cell` if the request is still current.
    pub fn complete(self, cell: Option<C>) -> AttachOutcome {
        let Some(state) = self.state.upgrade() else {
            return discard(StaleReason::Dropped);
        };
        let mut state = state.borrow_mut();
        if !state.live {
            return discard(StaleReason::Invalidated);
        }
        if state.generation != self.generation {
            return discard(StaleReason::Superseded);
        }
        let Some(mut cell) = cell else {
            return discard(StaleReason::Failed);
        };
        let Some(index) = state.index else {
            return discard(StaleReason::Unbound);
        };
        cell.update_content(index, state.payload.clone());
        state.real = Some(cell);
        AttachOutcome::Attached { index }
    }
}

fn discard(reason: StaleReason) -> AttachOutcome {
    #[cfg(feature = "tracing")]
    tracing::debug!(?reason, "discarding stale proxy attachment");
    AttachOutcome::Discarded(reason)
}
