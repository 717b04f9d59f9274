/// Requests that the pending batch be flushed on a later turn.
///
/// The bus calls `schedule_flush` at most once per batch. The host is then
/// responsible for calling `EventBus::flush` after the current synchronous
/// unit of work has finished.
pub trait Scheduler {
    fn schedule_flush(&mut self);

    /// Called by every flush, whoever triggered it. A request made for the
    /// drained batch is settled by it.
    fn flushed(&mut self) {}
}

/// Cooperative scheduler for hosts driving their own turn loop.
///
/// It only remembers that a flush is owed; `EventBus::end_turn` consumes
/// that request at the end of each turn.
#[derive(Debug, Default, Clone)]
pub struct TurnScheduler {
    owed: bool,
    requests: usize,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a flush has been requested and not yet taken.
    pub fn is_owed(&self) -> bool {
        self.owed
    }

    /// Number of flushes requested since creation.
    pub fn requests(&self) -> usize {
        self.requests
    }

    pub(crate) fn take(&mut self) -> bool {
        std::mem::replace(&mut self.owed, false)
    }
}

impl Scheduler for TurnScheduler {
    fn schedule_flush(&mut self) {
        self.owed = true;
        self.requests += 1;
    }

    fn flushed(&mut self) {
        self.owed = false;
    }
}

/// Forwards flush requests to a host hook, e.g. a zero-delay timer or a
/// task queue. The hook must arrange for `EventBus::flush` to run later,
/// never synchronously.
pub struct CallbackScheduler<F: FnMut()> {
    hook: F,
}

impl<F: FnMut()> CallbackScheduler<F> {
    pub fn new(hook: F) -> Self {
        Self { hook }
    }
}

impl<F: FnMut()> Scheduler for CallbackScheduler<F> {
    fn schedule_flush(&mut self) {
        (self.hook)();
    }
}

impl<F: FnMut()> std::fmt::Debug for CallbackScheduler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CallbackScheduler")
    }
}
