use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ConfigSet;
use crate::gateway::Gateway;
use crate::topic::TopicRouter;

use super::{ControllerHandle, PulseController, PulseSettings};

impl PulseController {
    pub fn new(
        config: ConfigSet,
        router: Arc<TopicRouter>,
        gateway: Arc<dyn Gateway>,
        settings: PulseSettings,
    ) -> (Self, ControllerHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Timers only hold a weak sender so dropping every handle ends the loop
        let controller = Self {
            config,
            covers: HashMap::new(),
            timers: HashMap::new(),
            undelivered: HashSet::new(),
            router,
            gateway,
            settings,
            events: sender.downgrade(),
            receiver,
        };

        (controller, ControllerHandle::new(sender))
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
