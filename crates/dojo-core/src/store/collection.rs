// ── Reactive course collection ──
//
// Concurrent storage with O(1) lookups by course id and push-based
// change notification via `watch` channels. Unlike a plain map the
// snapshot keeps backend order, which is the "relevance" order the
// catalog falls back to.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{Course, CourseId};

pub(crate) struct CourseCollection {
    /// Primary storage: id -> course.
    by_id: DashMap<CourseId, Arc<Course>>,

    /// Ordered snapshot, rebuilt on mutation for cheap reads.
    snapshot: watch::Sender<Arc<Vec<Arc<Course>>>>,
}

impl CourseCollection {
    pub(crate) fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_id: DashMap::new(),
            snapshot,
        }
    }

    /// Replace the contents with `courses`, in the given order.
    ///
    /// Upserts every incoming course first and prunes the leftovers
    /// afterwards, so readers never observe a transient empty state.
    /// A repeated id keeps its first position and last value.
    pub(crate) fn replace_all(&self, courses: Vec<Course>) {
        let mut order: Vec<CourseId> = Vec::with_capacity(courses.len());
        let mut incoming: HashSet<CourseId> = HashSet::with_capacity(courses.len());

        for course in courses {
            let id = course.id;
            if incoming.insert(id) {
                order.push(id);
            }
            self.by_id.insert(id, Arc::new(course));
        }
        self.by_id.retain(|id, _| incoming.contains(id));

        let values: Vec<Arc<Course>> = order
            .iter()
            .filter_map(|id| self.by_id.get(id).map(|r| Arc::clone(r.value())))
            .collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Apply `f` to one course in place. Returns `false` when the id is
    /// not in the collection.
    pub(crate) fn update<F>(&self, id: CourseId, f: F) -> bool
    where
        F: FnOnce(&mut Course),
    {
        let Some(mut entry) = self.by_id.get_mut(&id) else {
            return false;
        };
        let mut course = Course::clone(entry.value());
        f(&mut course);
        let updated = Arc::new(course);
        *entry.value_mut() = Arc::clone(&updated);
        drop(entry);

        self.snapshot.send_modify(|snap| {
            let next: Vec<Arc<Course>> = snap
                .iter()
                .map(|c| {
                    if c.id == id {
                        Arc::clone(&updated)
                    } else {
                        Arc::clone(c)
                    }
                })
                .collect();
            *snap = Arc::new(next);
        });
        true
    }

    pub(crate) fn get(&self, id: CourseId) -> Option<Arc<Course>> {
        self.by_id.get(&id).map(|r| Arc::clone(r.value()))
    }

    pub(crate) fn contains(&self, id: CourseId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<Course>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }
}
