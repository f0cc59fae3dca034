//! Microtask scheduling for the store's deferred callbacks.

use crate::core::store::TaskQueue;

/// Runs deferred tasks on the JS microtask queue.
///
/// `wasm_bindgen_futures::spawn_local` schedules onto the microtask queue,
/// so a deferred task runs once the current call stack unwinds and before
/// the next macrotask (timers, network callbacks).
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrotaskQueue;

impl TaskQueue for MicrotaskQueue {
    fn defer(&self, task: Box<dyn FnOnce()>) {
        wasm_bindgen_futures::spawn_local(async move { task() });
    }
}
