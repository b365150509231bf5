use std::{future::Future, pin::Pin, sync::Arc};

use crate::events::{EventHandler, EventProducer, Handler, UserRegisteredEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub user_registered_producer: Vec<EventProducer<UserRegisteredEvent>>,
}

pub struct EventHandlers {
    pub on_user_registered: Option<EventHandler<UserRegisteredEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_user_registered = hooks.on_user_registered.map(|f| EventHandler::new(buffer_size, f));
        Self { on_user_registered }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_user_registered {
            result.user_registered_producer.push(handler.subscribe());
        }
        result
    }

    /// Spawns a task per configured handler.
    pub fn start_handlers(self) {
        if let Some(handler) = self.on_user_registered {
            tokio::spawn(handler.start_handler());
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_user_registered: Option<Handler<UserRegisteredEvent>>,
}

impl EventHooks {
    pub fn on_user_registered<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(UserRegisteredEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_user_registered = Some(Arc::new(f));
        self
    }
}
