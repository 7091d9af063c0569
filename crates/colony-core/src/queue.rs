//! The FIFO spawn command backlog.
//!
//! The queue is the ordered, persisted backlog of pending production
//! requests. It supports exactly three mutations: enqueue at the end,
//! dequeue from the front, and requeue at the front after a failed
//! dispatch. It is never reordered otherwise, so a command popped and
//! requeued leaves the queue byte-for-byte identical.

use std::collections::VecDeque;

use colony_types::SpawnCommand;
use serde::{Deserialize, Serialize};

/// Ordered backlog of pending [`SpawnCommand`] values.
///
/// Absent persisted state deserializes to an empty queue; a missing queue
/// is "first run", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpawnQueue(VecDeque<SpawnCommand>);

impl SpawnQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self(VecDeque::new())
    }

    /// Append a command at the end of the backlog.
    pub fn enqueue(&mut self, command: SpawnCommand) {
        self.0.push_back(command);
    }

    /// Remove and return the front command, if any.
    pub fn pop_front(&mut self) -> Option<SpawnCommand> {
        self.0.pop_front()
    }

    /// Restore a popped command to the front, undoing the pop.
    ///
    /// Used only by the spawn dispatcher when the host rejects a request;
    /// relative ordering of untouched commands is preserved.
    pub fn requeue_front(&mut self, command: SpawnCommand) {
        self.0.push_front(command);
    }

    /// Number of pending commands.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the backlog is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate pending commands front to back.
    pub fn iter(&self) -> impl Iterator<Item = &SpawnCommand> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a SpawnQueue {
    type Item = &'a SpawnCommand;
    type IntoIter = std::collections::vec_deque::Iter<'a, SpawnCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use colony_types::Role;

    use super::*;

    fn filled(n: usize) -> SpawnQueue {
        let mut queue = SpawnQueue::new();
        for _ in 0..n {
            queue.enqueue(SpawnCommand::for_role(Role::BasicWorker));
        }
        queue
    }

    #[test]
    fn fifo_order() {
        let mut queue = SpawnQueue::new();
        let first = SpawnCommand::for_role(Role::BasicWorker);
        let second = SpawnCommand::for_role(Role::BasicWorker);
        queue.enqueue(first.clone());
        queue.enqueue(second.clone());

        assert_eq!(queue.pop_front(), Some(first));
        assert_eq!(queue.pop_front(), Some(second));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn requeue_after_failed_pop_is_a_no_op() {
        let mut queue = filled(5);
        let before = queue.clone();

        let popped = queue.pop_front().unwrap();
        queue.requeue_front(popped);

        assert_eq!(queue, before);
    }

    #[test]
    fn requeue_preserves_order_of_untouched_commands() {
        let mut queue = filled(3);
        let tail: Vec<_> = queue.iter().skip(1).cloned().collect();

        let popped = queue.pop_front().unwrap();
        queue.requeue_front(popped.clone());

        let mut iter = queue.iter();
        assert_eq!(iter.next(), Some(&popped));
        assert_eq!(iter.cloned().collect::<Vec<_>>(), tail);
    }

    #[test]
    fn empty_queue_roundtrips_through_json() {
        let queue = SpawnQueue::new();
        let json = serde_json::to_string(&queue).unwrap();
        assert_eq!(json, "[]");
        let restored: SpawnQueue = serde_json::from_str(&json).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn filled_queue_roundtrips_through_json() {
        let queue = filled(4);
        let json = serde_json::to_string(&queue).unwrap();
        let restored: SpawnQueue = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, queue);
    }
}
