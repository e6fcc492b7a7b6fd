// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A modal dialog: focus trapping, aria-hiding, Escape, and an exit animation.
//!
//! This example shows how to combine:
//! - `trellis_focus_scope::FocusScope` to move, trap, and restore focus,
//! - `trellis_layer::DismissableLayer` and `HideOutside` for modality,
//! - `trellis_presence::Presence` to keep the dialog mounted while it fades out.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example dialog`

use trellis_event_state::{KeyCode, KeyboardEvent};
use trellis_focus_scope::{FocusHost, FocusScope, FocusScopeOptions, FocusScopeStack};
use trellis_layer::{
    DismissableLayer, DismissableLayerOptions, HideOutside, HideOutsideTree, LayerHost,
    LayerStack, PointerEvents,
};
use trellis_presence::{ComputedAnimation, Presence};

#[derive(Default)]
struct Node {
    name: &'static str,
    parent: Option<usize>,
    tabbable: bool,
    aria_hidden: bool,
}

/// A tiny document; node 0 is the body.
struct Document {
    nodes: Vec<Node>,
    children: Vec<Vec<usize>>,
    active: Option<usize>,
    body_pointer_events: Option<PointerEvents>,
}

const BODY: usize = 0;

impl Document {
    fn new() -> Self {
        Self {
            nodes: vec![Node {
                name: "body",
                ..Node::default()
            }],
            children: vec![Vec::new()],
            active: None,
            body_pointer_events: None,
        }
    }

    fn add(&mut self, parent: usize, name: &'static str, tabbable: bool) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            name,
            parent: Some(parent),
            tabbable,
            aria_hidden: false,
        });
        self.children.push(Vec::new());
        self.children[parent].push(id);
        id
    }

    fn active_name(&self) -> &'static str {
        self.active.map_or("-", |n| self.nodes[n].name)
    }

    fn tabbables_into(&self, node: usize, out: &mut Vec<usize>) {
        for &child in &self.children[node] {
            if self.nodes[child].tabbable {
                out.push(child);
            }
            self.tabbables_into(child, out);
        }
    }
}

impl FocusHost<usize> for Document {
    fn active_element(&self) -> Option<usize> {
        self.active
    }

    fn contains(&self, container: &usize, node: &usize) -> bool {
        std::iter::successors(Some(*node), |n| self.nodes[*n].parent).any(|n| n == *container)
    }

    fn tabbables(&self, container: &usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.tabbables_into(*container, &mut out);
        out
    }

    fn is_focusable(&self, node: &usize) -> bool {
        self.nodes[*node].tabbable
    }

    fn is_in_top_layer(&self, _: &usize) -> bool {
        false
    }

    fn focus(&mut self, node: &usize) {
        self.active = Some(*node);
    }

    fn body(&self) -> usize {
        BODY
    }

    fn create_sentinel(&mut self) -> usize {
        self.nodes.push(Node {
            name: "sentinel",
            tabbable: true,
            ..Node::default()
        });
        self.children.push(Vec::new());
        self.nodes.len() - 1
    }

    fn remove(&mut self, node: &usize) {
        if let Some(parent) = self.nodes[*node].parent.take() {
            self.children[parent].retain(|c| c != node);
        }
    }

    fn prepend(&mut self, container: &usize, child: &usize) {
        self.nodes[*child].parent = Some(*container);
        self.children[*container].insert(0, *child);
    }

    fn append(&mut self, container: &usize, child: &usize) {
        self.nodes[*child].parent = Some(*container);
        self.children[*container].push(*child);
    }

    fn first_child(&self, container: &usize) -> Option<usize> {
        self.children[*container].first().copied()
    }

    fn last_child(&self, container: &usize) -> Option<usize> {
        self.children[*container].last().copied()
    }
}

impl LayerHost<usize> for Document {
    fn contains(&self, container: &usize, node: &usize) -> bool {
        FocusHost::contains(self, container, node)
    }

    fn is_in_top_layer(&self, _: &usize) -> bool {
        false
    }

    fn is_connected(&self, node: &usize) -> bool {
        FocusHost::contains(self, &BODY, node)
    }

    fn set_pointer_events(&mut self, _: &usize, _: PointerEvents) {}

    fn body_pointer_events(&self) -> Option<PointerEvents> {
        self.body_pointer_events
    }

    fn set_body_pointer_events(&mut self, value: Option<PointerEvents>) {
        self.body_pointer_events = value;
    }
}

impl HideOutsideTree<usize> for Document {
    fn children(&self, node: &usize) -> Vec<usize> {
        self.children[*node].clone()
    }

    fn contains(&self, container: &usize, node: &usize) -> bool {
        FocusHost::contains(self, container, node)
    }

    fn is_top_layer(&self, _: &usize) -> bool {
        false
    }

    fn is_aria_hidden(&self, node: &usize) -> bool {
        self.nodes[*node].aria_hidden
    }

    fn set_aria_hidden(&mut self, node: &usize, hidden: bool) {
        self.nodes[*node].aria_hidden = hidden;
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new();
    let app = doc.add(BODY, "app", false);
    let open_button = doc.add(app, "open button", true);
    let dialog = doc.add(BODY, "dialog", false);
    doc.add(dialog, "name field", true);
    let save_button = doc.add(dialog, "save button", true);
    doc.active = Some(open_button);

    let mut scopes = FocusScopeStack::new();
    let mut layers = LayerStack::new();
    let mut hidden = HideOutside::new();

    let mut scope = FocusScope::new(&mut scopes, dialog, FocusScopeOptions { trap_focus: true });
    let mut layer = DismissableLayer::new(
        dialog,
        DismissableLayerOptions {
            disable_outside_pointer_events: true,
            ..DismissableLayerOptions::default()
        },
    );
    let fade_in = ComputedAnimation::new("fade-in");
    let mut presence = Presence::new(true, Some(dialog), &fade_in);

    layer.mount(&mut layers, &mut doc);
    scope.mount(&mut scopes, &mut doc);
    let aria = hidden.hide_outside(&mut doc, &[dialog], &BODY);
    // Next macrotask.
    layer.arm();
    scope.flush_mount_auto_focus(&mut doc);
    println!("opened: focus on {}, app aria-hidden = {}", doc.active_name(), doc.nodes[app].aria_hidden);

    // Tab past the save button lands on the end sentinel and loops.
    let end = *doc.children[dialog].last().unwrap_or(&dialog);
    doc.active = Some(end);
    scope.on_focus_in(&scopes, &mut doc, &end, Some(&save_button));
    println!("tab from save button: focus on {}", doc.active_name());

    // Escape dismisses; the dialog fades out before unmounting.
    let mut open = true;
    layer.on_key_down(&layers, &mut || open = false, &KeyboardEvent::new(KeyCode::Escape));
    let fade_out = ComputedAnimation::new("fade-out");
    presence.set_present(open, &fade_out);
    println!("escape: open = {open}, still rendered = {}", presence.is_present());

    presence.on_animation_end(&dialog, "fade-out", &fade_out);
    if !presence.is_present() {
        scope.unmount(&mut scopes, &mut doc);
        layer.unmount(&mut layers, &mut doc);
        hidden.restore(&mut doc, aria);
    }
    println!(
        "faded out: focus back on {}, app aria-hidden = {}",
        doc.active_name(),
        doc.nodes[app].aria_hidden
    );
}
