// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll lifecycle events and listener registration.

use alloc::boxed::Box;
use core::fmt::{self, Debug};

use bitflags::bitflags;
use kurbo::Vec2;
use smallvec::SmallVec;

/// A scroll lifecycle event forwarded from the scroll surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollEvent {
    /// The user or an animation started moving the content.
    Began,
    /// The scroll offset changed.
    Scrolling,
    /// Movement, including inertia and bounce, has settled.
    Ended,
}

bitflags! {
    /// A set of [`ScrollEvent`] kinds a listener wants to receive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ScrollEvents: u8 {
        /// [`ScrollEvent::Began`].
        const BEGAN = 1 << 0;
        /// [`ScrollEvent::Scrolling`].
        const SCROLLING = 1 << 1;
        /// [`ScrollEvent::Ended`].
        const ENDED = 1 << 2;
    }
}

impl From<ScrollEvent> for ScrollEvents {
    fn from(event: ScrollEvent) -> Self {
        match event {
            ScrollEvent::Began => Self::BEGAN,
            ScrollEvent::Scrolling => Self::SCROLLING,
            ScrollEvent::Ended => Self::ENDED,
        }
    }
}

/// Handle returned when registering a listener; used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Callback = Box<dyn FnMut(ScrollEvent, Vec2)>;

/// Listeners keyed by the events they subscribed to.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u32,
    entries: SmallVec<[(ListenerId, ScrollEvents, Callback); 2]>,
}

impl Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(id, mask, _)| (id, mask)))
            .finish()
    }
}

impl Listeners {
    pub(crate) fn add(&mut self, events: ScrollEvents, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, events, callback));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: ScrollEvent, offset: Vec2) {
        let kind = ScrollEvents::from(event);
        for (_, mask, callback) in &mut self.entries {
            if mask.contains(kind) {
                callback(event, offset);
            }
        }
    }
}
