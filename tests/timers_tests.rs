// Host-side tests for the single pending-timeout slot behind notices.
// The main crate is wasm-only, so the module is included directly.

#![allow(dead_code)]
mod timers {
    include!("../src/timers.rs");
}

use timers::TimerSlot;

#[test]
fn first_schedule_has_nothing_to_cancel() {
    let slot = TimerSlot::new();
    assert_eq!(slot.replace(7), None);
}

#[test]
fn second_notice_cancels_the_first_timer() {
    let slot = TimerSlot::default();
    slot.replace(1);
    // a later notice must stop the earlier hide timer
    assert_eq!(slot.replace(2), Some(1));
    assert_eq!(slot.replace(3), Some(2));
}

#[test]
fn fired_timer_leaves_the_slot_empty() {
    let slot = TimerSlot::new();
    slot.replace(4);
    assert_eq!(slot.take(), Some(4));
    assert_eq!(slot.take(), None);
    assert_eq!(slot.replace(5), None);
}
