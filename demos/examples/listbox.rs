// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A multi-select listbox driven by keyboard and pointer input.
//!
//! This example shows how to combine:
//! - `trellis_selection::ListState` for the collection and its selection,
//! - `trellis_selectable::SelectableList` for list-level key handling,
//! - `trellis_selectable::SelectableItem` for per-option presses.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example listbox`

use std::error::Error;
use std::sync::Arc;

use trellis_collection::{BuildOptions, Collection, Key};
use trellis_event_state::{KeyCode, KeyboardEvent, Modifiers, PointerType};
use trellis_selectable::{
    ItemPointerEvent, SelectableCollectionOptions, SelectableItem, SelectableItemOptions,
    SelectableList,
};
use trellis_selection::{ListState, SelectionManager, SelectionMode, SelectionOptions};

const FRUITS: [&str; 6] = ["Apple", "Apricot", "Banana", "Blueberry", "Cherry", "Date"];

fn describe<C: Collection>(step: &str, manager: &SelectionManager<'_, C>) {
    let mut selected: Vec<&str> = manager.selected_keys().iter().map(Key::as_str).collect();
    selected.sort_unstable();
    println!(
        "{step:<28} focused={:<10} selected={selected:?}",
        manager.focused_key().map_or("-", Key::as_str),
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut state = ListState::new(
        Arc::from(FRUITS.as_slice()),
        BuildOptions::default(),
        SelectionOptions {
            selection_mode: SelectionMode::Multiple,
            ..SelectionOptions::default()
        },
    );
    let mut list = SelectableList::new(SelectableCollectionOptions {
        should_focus_wrap: true,
        ..SelectableCollectionOptions::default()
    });

    let mut manager = state.selection_manager()?;
    list.on_focus_in(&mut manager, true, false);
    describe("focus enters the list", &manager);

    let steps = [
        (KeyboardEvent::new(KeyCode::ArrowDown), "ArrowDown"),
        (
            KeyboardEvent::new(KeyCode::ArrowDown).with_modifiers(Modifiers::SHIFT),
            "Shift+ArrowDown",
        ),
        (KeyboardEvent::new(KeyCode::Character('c')), "type 'c'"),
        (KeyboardEvent::new(KeyCode::ArrowDown), "ArrowDown"),
        (KeyboardEvent::new(KeyCode::ArrowDown), "ArrowDown (wraps)"),
        (
            KeyboardEvent::new(KeyCode::Character('a')).with_modifiers(Modifiers::CTRL),
            "Ctrl+A",
        ),
        (KeyboardEvent::new(KeyCode::Escape), "Escape"),
    ];
    for (now, (event, step)) in (100..).step_by(100).zip(&steps) {
        let outcome = list.on_key_down(&mut manager, None, event, now);
        describe(step, &manager);
        if !outcome.prevent_default {
            println!("  (unhandled, left to the browser)");
        }
    }

    // A touch tap toggles a single option without touching the others.
    let banana = SelectableItem::new(SelectableItemOptions::new("Banana"));
    let tap = ItemPointerEvent::new(PointerType::Touch);
    banana.on_pointer_down(&mut manager, list.presses_mut(), &tap);
    banana.on_pointer_up(&mut manager, list.presses_mut(), &tap);
    describe("tap Banana", &manager);

    let date = SelectableItem::new(SelectableItemOptions::new("Date"));
    date.on_pointer_down(&mut manager, list.presses_mut(), &tap);
    date.on_pointer_up(&mut manager, list.presses_mut(), &tap);
    describe("tap Date", &manager);

    Ok(())
}
