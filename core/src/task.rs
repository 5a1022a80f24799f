//! Keyed timer tasks.
//!
//! Every pending timer belongs to exactly one [`Task`] key and at most one
//! timer runs per key. The registry only records which keys are live; the
//! actual timers are owned by whoever applies the `Schedule`/`Cancel`
//! effects (browser timers in the frontend, a virtual clock in tests).

use std::collections::BTreeSet;

use log::debug;

use crate::effect::Effect;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeartId(pub u64);

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    ThemeTransition,
    RemoveHeart(HeartId),
    UploadFinish,
    StoryProgress,
    SearchDebounce,
    ToastExit(ToastId),
    ToastRemove(ToastId),
    FeedLoad,
}

#[derive(Default, Debug)]
pub struct TaskRegistry {
    active: BTreeSet<Task>,
}

impl TaskRegistry {
    pub fn is_active(&self, task: Task) -> bool {
        self.active.contains(&task)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Schedules a one-shot task, cancelling a pending one with the same key.
    pub fn start(&mut self, task: Task, delay_ms: u32, out: &mut Vec<Effect>) {
        self.stop(task, out);
        self.active.insert(task);
        out.push(Effect::Schedule { task, delay_ms });
    }

    /// Schedules a repeating task, cancelling a pending one with the same key.
    pub fn start_repeating(&mut self, task: Task, every_ms: u32, out: &mut Vec<Effect>) {
        self.stop(task, out);
        self.active.insert(task);
        out.push(Effect::ScheduleRepeating { task, every_ms });
    }

    pub fn stop(&mut self, task: Task, out: &mut Vec<Effect>) {
        if self.active.remove(&task) {
            out.push(Effect::Cancel(task));
        }
    }

    /// Marks a one-shot task as done. Returns false for fires of keys that
    /// were cancelled or never started, which callers must ignore.
    pub fn finish(&mut self, task: Task) -> bool {
        let live = self.active.remove(&task);
        if !live {
            debug!("ignoring stale fire of {:?}", task);
        }
        live
    }

    pub fn stop_all(&mut self, out: &mut Vec<Effect>) {
        for task in std::mem::take(&mut self.active) {
            out.push(Effect::Cancel(task));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_cancels_first() {
        let mut tasks = TaskRegistry::default();
        let mut out = Vec::new();

        tasks.start(Task::SearchDebounce, 300, &mut out);
        tasks.start(Task::SearchDebounce, 300, &mut out);

        assert_eq!(
            out,
            vec![
                Effect::Schedule { task: Task::SearchDebounce, delay_ms: 300 },
                Effect::Cancel(Task::SearchDebounce),
                Effect::Schedule { task: Task::SearchDebounce, delay_ms: 300 },
            ]
        );
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn stale_fire_is_rejected() {
        let mut tasks = TaskRegistry::default();
        let mut out = Vec::new();

        tasks.start(Task::UploadFinish, 10, &mut out);
        assert!(tasks.finish(Task::UploadFinish));
        assert!(!tasks.finish(Task::UploadFinish));

        tasks.stop(Task::FeedLoad, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn stop_all_cancels_everything() {
        let mut tasks = TaskRegistry::default();
        let mut out = Vec::new();

        tasks.start_repeating(Task::StoryProgress, 50, &mut out);
        tasks.start(Task::ToastExit(ToastId(1)), 3000, &mut out);
        out.clear();

        tasks.stop_all(&mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(tasks.len(), 0);
    }
}
