// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A menu with a submenu: nested dismissable layers and the pointer grace area.
//!
//! This example shows how to combine:
//! - `trellis_layer::LayerStack` with two `DismissableLayer`s, the submenu
//!   registered under its parent menu,
//! - `trellis_layer::PointerGraceTracker` to keep the submenu open while the
//!   pointer crosses a sibling item on its way there.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example nested_menu`

use kurbo::{Point, Rect};
use trellis_event_state::{KeyCode, KeyboardEvent, PointerType};
use trellis_layer::{
    DismissableLayer, DismissableLayerOptions, LayerHost, LayerPointerDown, LayerStack,
    PointerEvents, PointerGraceTracker, Side,
};

/// Flat page: every node's parent, `None` for the document root.
struct Page {
    parent: Vec<Option<usize>>,
    body_pointer_events: Option<PointerEvents>,
}

const ROOT: usize = 0;

impl Page {
    fn add(&mut self, parent: usize) -> usize {
        self.parent.push(Some(parent));
        self.parent.len() - 1
    }
}

impl LayerHost<usize> for Page {
    fn contains(&self, container: &usize, node: &usize) -> bool {
        std::iter::successors(Some(*node), |n| self.parent[*n]).any(|n| n == *container)
    }

    fn is_in_top_layer(&self, _: &usize) -> bool {
        false
    }

    fn is_connected(&self, node: &usize) -> bool {
        self.contains(&ROOT, node)
    }

    fn set_pointer_events(&mut self, node: &usize, value: PointerEvents) {
        println!("  node {node}: pointer-events {value:?}");
    }

    fn body_pointer_events(&self) -> Option<PointerEvents> {
        self.body_pointer_events
    }

    fn set_body_pointer_events(&mut self, value: Option<PointerEvents>) {
        self.body_pointer_events = value;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut page = Page {
        parent: vec![None],
        body_pointer_events: None,
    };
    let outside = page.add(ROOT);
    let menu = page.add(ROOT);
    let submenu = page.add(ROOT);
    let email_item = page.add(submenu);

    let mut stack = LayerStack::new();
    let mut menu_layer = DismissableLayer::new(menu, DismissableLayerOptions::default());
    let mut submenu_layer = DismissableLayer::new(
        submenu,
        DismissableLayerOptions {
            bypass_top_most_layer_check: true,
            ..DismissableLayerOptions::default()
        },
    )
    .with_parent(menu);

    println!("open menu, then submenu");
    menu_layer.mount(&mut stack, &mut page);
    menu_layer.arm();
    submenu_layer.mount(&mut stack, &mut page);
    submenu_layer.arm();

    let mut menu_open = true;
    let mut submenu_open = true;

    // Pressing inside the submenu does not close the parent menu.
    let press = LayerPointerDown::new(email_item, PointerType::Mouse);
    let closed = menu_layer.on_pointer_down(&stack, &page, &mut || menu_open = false, &press);
    println!("press in submenu closes menu: {closed}");

    // Leaving the "Share" trigger toward the submenu on the right.
    let mut grace = PointerGraceTracker::new();
    let submenu_rect = Rect::new(200.0, 40.0, 320.0, 160.0);
    grace.on_pointer_move(Point::new(190.0, 50.0), PointerType::Mouse);
    grace.on_trigger_leave(Side::Right, Point::new(195.0, 50.0), submenu_rect, 0);

    for (t, point) in [(40, Point::new(197.0, 58.0)), (80, Point::new(199.0, 66.0))] {
        grace.on_pointer_move(point, PointerType::Mouse);
        let graced = grace.is_pointer_moving_to_submenu(point, t);
        println!("t={t}ms pointer at {point:?}: item leave suppressed = {graced}");
    }
    let idle = Point::new(199.0, 66.0);
    println!(
        "t=400ms after idling: item leave suppressed = {}",
        grace.is_pointer_moving_to_submenu(idle, 400)
    );

    // Escape closes only the top-most layer.
    let escape = KeyboardEvent::new(KeyCode::Escape);
    menu_layer.on_key_down(&stack, &mut || menu_open = false, &escape);
    submenu_layer.on_key_down(&stack, &mut || submenu_open = false, &escape);
    println!("after Escape: menu open = {menu_open}, submenu open = {submenu_open}");
    submenu_layer.unmount(&mut stack, &mut page);

    // A press outside now closes the menu.
    let press = LayerPointerDown::new(outside, PointerType::Mouse);
    menu_layer.on_pointer_down(&stack, &page, &mut || menu_open = false, &press);
    println!("after outside press: menu open = {menu_open}");
    menu_layer.unmount(&mut stack, &mut page);
}
