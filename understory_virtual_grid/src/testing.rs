// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording data source, view, and host shared by the unit tests.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Size, Vec2};

use crate::{Axis, Cell, DataSource, ScrollSurface, ViewHost};

#[derive(Debug)]
pub(crate) struct TestView {
    id: u32,
    shown: Vec<(usize, Option<String>)>,
    unbound: usize,
}

impl TestView {
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn shown(&self) -> &[(usize, Option<String>)] {
        &self.shown
    }

    pub(crate) fn unbound(&self) -> usize {
        self.unbound
    }
}

impl Cell<String> for TestView {
    fn update_content(&mut self, index: usize, payload: Option<String>) {
        self.shown.push((index, payload));
    }

    fn unbind(&mut self) {
        self.unbound += 1;
    }
}

pub(crate) struct TestSource {
    sizes: Vec<Size>,
    types: fn(usize) -> &'static str,
    created: u32,
}

impl TestSource {
    pub(crate) fn new(sizes: Vec<Size>) -> Self {
        Self {
            sizes,
            types: |_| "cell",
            created: 0,
        }
    }

    pub(crate) fn uniform(count: usize, size: Size) -> Self {
        Self::new(alloc::vec![size; count])
    }

    pub(crate) fn with_types(mut self, types: fn(usize) -> &'static str) -> Self {
        self.types = types;
        self
    }

    pub(crate) fn set_sizes(&mut self, sizes: Vec<Size>) {
        self.sizes = sizes;
    }

    pub(crate) fn sizes(&self) -> impl Iterator<Item = Size> + '_ {
        self.sizes.iter().copied()
    }

    pub(crate) fn created(&self) -> u32 {
        self.created
    }
}

impl DataSource for TestSource {
    type Payload = String;
    type View = TestView;

    fn item_count(&self) -> usize {
        self.sizes.len()
    }

    fn cell_type(&self, index: usize) -> &str {
        (self.types)(index)
    }

    fn size(&self, index: usize) -> Size {
        self.sizes[index]
    }

    fn create_view(&mut self, _index: usize, _cell_type: &str) -> TestView {
        self.created += 1;
        TestView {
            id: self.created,
            shown: Vec::new(),
            unbound: 0,
        }
    }

    fn payload(&self, index: usize) -> Option<String> {
        Some(format!("item {index}"))
    }
}

/// A scroll surface that jumps straight to every requested offset.
#[derive(Debug, Default)]
pub(crate) struct TestHost {
    viewport: Size,
    offset: Vec2,
    content_size: Option<Size>,
    attached: Vec<u32>,
    positions: HashMap<u32, Point>,
    animations: Vec<(Vec2, f64, bool)>,
    stops: usize,
    configured: Option<(Axis, bool)>,
}

impl TestHost {
    pub(crate) fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub(crate) fn attached(&self) -> &[u32] {
        &self.attached
    }

    pub(crate) fn position_of(&self, id: u32) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub(crate) fn content_size(&self) -> Option<Size> {
        self.content_size
    }

    pub(crate) fn animations(&self) -> &[(Vec2, f64, bool)] {
        &self.animations
    }

    pub(crate) fn stops(&self) -> usize {
        self.stops
    }

    pub(crate) fn configured(&self) -> Option<(Axis, bool)> {
        self.configured
    }
}

impl ViewHost<TestView> for TestHost {
    fn attach(&mut self, view: &mut TestView) {
        assert!(
            !self.attached.contains(&view.id),
            "view {} attached twice",
            view.id
        );
        self.attached.push(view.id);
    }

    fn detach(&mut self, view: &mut TestView) {
        self.attached.retain(|id| *id != view.id);
        self.positions.remove(&view.id);
    }

    fn set_position(&mut self, view: &mut TestView, position: Point) {
        self.positions.insert(view.id, position);
    }
}

impl ScrollSurface for TestHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_offset(&self) -> Vec2 {
        self.offset
    }

    fn set_scroll_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    fn scroll_to(&mut self, offset: Vec2, duration: f64, attenuated: bool) {
        self.animations.push((offset, duration, attenuated));
        self.offset = offset;
    }

    fn stop_scrolling(&mut self) {
        self.stops += 1;
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = Some(size);
    }

    fn configure(&mut self, axis: Axis, elastic: bool) {
        self.configured = Some((axis, elastic));
    }
}
