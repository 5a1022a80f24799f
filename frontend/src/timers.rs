//! Browser timers behind the controller's keyed tasks.
//!
//! All timers share one callback. Each `setTimeout`/`setInterval` call gets
//! a slot number as its argument, and the slot maps back to the task key.
//! A fire for a slot that has been cancelled finds nothing and is dropped.

use std::collections::HashMap;
use std::rc::Weak;

use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use insta_feed_core::Task;

use crate::shell::Shell;

struct Slot {
    task: Task,
    handle: i32,
    repeating: bool,
}

pub struct BrowserTimers {
    window: Window,
    fire: Closure<dyn FnMut(JsValue)>,
    slots: HashMap<u32, Slot>,
    by_task: HashMap<Task, u32>,
    next_slot: u32,
}

impl BrowserTimers {
    pub fn new(window: Window, shell: Weak<Shell>) -> Self {
        let fire = Closure::<dyn FnMut(JsValue)>::new(move |slot: JsValue| {
            let slot = match slot.as_f64() {
                Some(slot) => slot as u32,
                None => return,
            };
            if let Some(shell) = shell.upgrade() {
                shell.timer_fired(slot);
            }
        });

        BrowserTimers {
            window,
            fire,
            slots: HashMap::new(),
            by_task: HashMap::new(),
            next_slot: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.slots.len()
    }

    pub fn schedule(&mut self, task: Task, ms: u32, repeating: bool) {
        self.cancel(task);

        let slot = self.next_slot;
        self.next_slot = self.next_slot.wrapping_add(1);

        let argument = JsValue::from_f64(slot as f64);
        let callback = self.fire.as_ref().unchecked_ref();
        let timeout = ms.min(i32::MAX as u32) as i32;

        let handle = if repeating {
            self.window.set_interval_with_callback_and_timeout_and_arguments_1(
                callback, timeout, &argument,
            )
        } else {
            self.window.set_timeout_with_callback_and_timeout_and_arguments_1(
                callback, timeout, &argument,
            )
        };

        match handle {
            Ok(handle) => {
                self.slots.insert(
                    slot,
                    Slot {
                        task,
                        handle,
                        repeating,
                    },
                );
                self.by_task.insert(task, slot);
            }
            Err(err) => warn!("could not schedule {:?}: {:?}", task, err),
        }
    }

    pub fn cancel(&mut self, task: Task) {
        if let Some(slot) = self.by_task.remove(&task) {
            if let Some(slot) = self.slots.remove(&slot) {
                self.clear(&slot);
            }
        }
    }

    /// Resolves a fired slot to its task. One-shot slots are released here.
    pub fn take_fired(&mut self, slot: u32) -> Option<Task> {
        let (task, repeating) = match self.slots.get(&slot) {
            Some(found) => (found.task, found.repeating),
            None => return None,
        };

        if !repeating {
            self.slots.remove(&slot);
            self.by_task.remove(&task);
        }
        Some(task)
    }

    fn clear(&self, slot: &Slot) {
        if slot.repeating {
            self.window.clear_interval_with_handle(slot.handle);
        } else {
            self.window.clear_timeout_with_handle(slot.handle);
        }
    }
}

impl Drop for BrowserTimers {
    fn drop(&mut self) {
        // the shared callback dies with us, so nothing may fire afterwards
        for slot in self.slots.values() {
            self.clear(slot);
        }
    }
}
