use super::{BusConfig, EventBus};
use crate::control::EventContext;
use crate::queue::{FireQueue, Scheduler, TurnScheduler};

pub struct EventBusBuilder<S: Scheduler = TurnScheduler> {
    config: BusConfig,
    scheduler: S,
}

impl EventBusBuilder<TurnScheduler> {
    pub fn new() -> Self {
        Self {
            config: BusConfig::default(),
            scheduler: TurnScheduler::new(),
        }
    }
}

impl Default for EventBusBuilder<TurnScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scheduler> EventBusBuilder<S> {
    pub fn with_config(mut self, config: BusConfig) -> Self {
        self.config = config;
        self
    }

    pub fn record_undo(mut self, record_undo: bool) -> Self {
        self.config.record_undo = record_undo;
        self
    }

    pub fn batch_warn_threshold(mut self, threshold: usize) -> Self {
        self.config.batch_warn_threshold = threshold;
        self
    }

    /// Replaces the scheduler that is asked to flush each new batch.
    pub fn scheduler<T: Scheduler>(self, scheduler: T) -> EventBusBuilder<T> {
        EventBusBuilder {
            config: self.config,
            scheduler,
        }
    }

    pub fn build(self) -> EventBus<S> {
        EventBus {
            context: EventContext::new(self.config.record_undo),
            queue: FireQueue::default(),
            scheduler: self.scheduler,
            batch_warn_threshold: self.config.batch_warn_threshold,
        }
    }
}
