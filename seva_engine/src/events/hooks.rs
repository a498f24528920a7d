use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{DonationRecordedEvent, EventHandler, EventProducer, Handler};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub donation_recorded_producer: Vec<EventProducer<DonationRecordedEvent>>,
}

pub struct EventHandlers {
    pub on_donation_recorded: Option<EventHandler<DonationRecordedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_donation_recorded = hooks.on_donation_recorded.map(|f| EventHandler::new(buffer_size, f));
        Self { on_donation_recorded }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_donation_recorded {
            result.donation_recorded_producer.push(handler.subscribe());
        }
        result
    }

    /// Spawns a handler loop for every registered hook.
    pub fn start_handlers(self) {
        if let Some(handler) = self.on_donation_recorded {
            tokio::spawn(handler.start_handler());
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_donation_recorded: Option<Handler<DonationRecordedEvent>>,
}

impl EventHooks {
    pub fn on_donation_recorded<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(DonationRecordedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_donation_recorded = Some(Arc::new(f));
        self
    }
}
