// ── Shared test fixtures ──

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::Notify;

use crate::error::CoreError;
use crate::model::{Course, CourseId};
use crate::provider::CourseRequester;

/// Records every request and answers with a fixed outcome, optionally
/// holding the answer back until [`release`](Self::release) is called.
pub(crate) struct StubRequester {
    accept: bool,
    gate: Option<Arc<Notify>>,
    calls: Mutex<Vec<CourseId>>,
}

impl StubRequester {
    pub(crate) fn accepting() -> Arc<Self> {
        Arc::new(Self::with(true, None))
    }

    pub(crate) fn rejecting() -> Arc<Self> {
        Arc::new(Self::with(false, None))
    }

    pub(crate) fn gated(accept: bool) -> Arc<Self> {
        Arc::new(Self::with(accept, Some(Arc::new(Notify::new()))))
    }

    fn with(accept: bool, gate: Option<Arc<Notify>>) -> Self {
        Self {
            accept,
            gate,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn release(&self) {
        if let Some(ref gate) = self.gate {
            gate.notify_one();
        }
    }

    pub(crate) fn calls(&self) -> Vec<CourseId> {
        self.calls.lock().unwrap().clone()
    }
}

impl CourseRequester for StubRequester {
    fn request(&self, id: CourseId) -> BoxFuture<'static, Result<(), CoreError>> {
        self.calls.lock().unwrap().push(id);
        let accept = self.accept;
        let gate = self.gate.clone();
        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if accept {
                Ok(())
            } else {
                Err(CoreError::Api {
                    message: "rejected".into(),
                    status: Some(500),
                })
            }
        }
        .boxed()
    }
}

pub(crate) fn catalog_course(id: u64, title: &str) -> Course {
    Course::new(id, title)
}

pub(crate) fn ids(courses: &[Arc<Course>]) -> Vec<u64> {
    courses.iter().map(|c| c.id.get()).collect()
}
