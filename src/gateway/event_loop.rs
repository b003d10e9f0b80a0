use rumqttc::{Event, EventLoop, Outgoing, Packet};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::Result;
use crate::pulse::ControllerHandle;
use crate::topic::TopicRouter;
use crate::{log_error, log_info, log_warn};

use super::{on_message, Gateway};

/// Pause between polls after a connection error; rumqttc reconnects on the next poll
const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// Drive the MQTT connection until we disconnect or the controller goes away.
pub async fn run_event_loop(
    mut eventloop: EventLoop,
    gateway: Arc<dyn Gateway>,
    router: Arc<TopicRouter>,
    controller: ControllerHandle,
) -> Result<()> {
    let subscriptions = router.subscriptions();
    let mut connected_before = false;

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                on_connack(&gateway, &controller, &subscriptions, &mut connected_before)?;
            }

            Ok(Event::Incoming(Packet::Publish(publish))) => {
                on_message(&router, &controller, &publish.topic, &publish.payload)?;
            }

            Ok(Event::Incoming(Packet::Disconnect)) => {
                log_warn!("Broker closed the connection");
            }

            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                log_info!("Disconnected from broker");
                return Ok(());
            }

            Ok(_) => {}

            Err(e) => {
                log_error!("MQTT connection error: {}", e);
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

/// Handle a (re)connect.
///
/// After a reconnect every cover is forced idle; the release is queued before any
/// command arriving on the new session. Subscribing goes through the request queue
/// the event loop drains, so it runs on its own task.
pub fn on_connack(
    gateway: &Arc<dyn Gateway>,
    controller: &ControllerHandle,
    subscriptions: &[String],
    connected_before: &mut bool,
) -> Result<JoinHandle<()>> {
    log_info!("🔌 MQTT connected");

    if *connected_before {
        log_warn!("Reconnected to broker, forcing all covers idle");
        controller.release_all()?;
    }
    *connected_before = true;

    let gateway = gateway.clone();
    let topics = subscriptions.to_vec();
    Ok(tokio::spawn(async move {
        match gateway.subscribe(&topics).await {
            Ok(()) => log_info!("Subscribed to {} topics", topics.len()),
            Err(e) => log_error!("Failed to subscribe: {}", e),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigSet;
    use crate::gateway::{BusReceiver, MessageBus};
    use crate::pulse::{PulseController, PulseSettings};
    use crate::topic::BaseTopics;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Message bus that also counts subscribe requests
    struct CountingBus {
        bus: MessageBus,
        subscribe_calls: AtomicUsize,
    }

    #[async_trait]
    impl Gateway for CountingBus {
        async fn subscribe(&self, topics: &[String]) -> Result<()> {
            self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
            self.bus.subscribe(topics).await
        }

        async fn publish(&self, topic: &str, payload: &str, retain: bool) -> Result<()> {
            self.bus.publish(topic, payload, retain).await
        }
    }

    struct Harness {
        bus: Arc<CountingBus>,
        gateway: Arc<dyn Gateway>,
        router: Arc<TopicRouter>,
        controller: ControllerHandle,
        published: BusReceiver,
    }

    fn harness() -> Harness {
        let config = ConfigSet::from_yaml(
            "office:\n  open: \"3_11\"\n  close: \"3_12\"\nkitchen:\n  open: \"3_13\"\n  close: \"3_14\"\n",
        )
        .unwrap();
        let router = Arc::new(TopicRouter::new(&config, BaseTopics::default()).unwrap());
        let (bus, published) = MessageBus::new();
        let bus = Arc::new(CountingBus {
            bus,
            subscribe_calls: AtomicUsize::new(0),
        });
        let gateway: Arc<dyn Gateway> = bus.clone();
        let (controller, handle) =
            PulseController::new(config, router.clone(), gateway.clone(), PulseSettings::default());
        controller.spawn();

        Harness {
            bus,
            gateway,
            router,
            controller: handle,
            published,
        }
    }

    async fn drain(harness: &mut Harness) -> Vec<(String, String)> {
        harness.controller.snapshot("office").await.unwrap();

        let mut messages = Vec::new();
        while let Ok(msg) = harness.published.try_recv() {
            messages.push((msg.topic, msg.payload));
        }
        messages
    }

    fn relay(id: &str, payload: &str) -> (String, String) {
        (format!("shady/relay/{}/set", id), payload.to_string())
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_connack_subscribes_without_releasing() {
        let mut h = harness();
        let subscriptions = h.router.subscriptions();
        let mut connected_before = false;

        on_message(&h.router, &h.controller, "homeassistant/cover/office/set", b"OPEN").unwrap();
        on_connack(&h.gateway, &h.controller, &subscriptions, &mut connected_before)
            .unwrap()
            .await
            .unwrap();

        assert!(connected_before);
        assert_eq!(h.bus.bus.subscriptions().await, subscriptions);
        assert_eq!(h.bus.subscribe_calls.load(Ordering::SeqCst), 1);
        assert_eq!(drain(&mut h).await, vec![relay("3_11", "1")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_releases_before_new_commands() {
        let mut h = harness();
        let subscriptions = h.router.subscriptions();
        let mut connected_before = false;

        on_connack(&h.gateway, &h.controller, &subscriptions, &mut connected_before)
            .unwrap()
            .await
            .unwrap();
        on_message(&h.router, &h.controller, "homeassistant/cover/office/set", b"OPEN").unwrap();
        assert_eq!(drain(&mut h).await, vec![relay("3_11", "1")]);

        on_connack(&h.gateway, &h.controller, &subscriptions, &mut connected_before)
            .unwrap()
            .await
            .unwrap();
        on_message(&h.router, &h.controller, "homeassistant/cover/kitchen/set", b"CLOSE").unwrap();

        assert_eq!(
            drain(&mut h).await,
            vec![relay("3_11", "0"), relay("3_14", "1")]
        );
        assert_eq!(h.bus.bus.subscriptions().await, subscriptions);
        assert_eq!(h.bus.subscribe_calls.load(Ordering::SeqCst), 2);

        let office = h.controller.snapshot("office").await.unwrap().unwrap();
        assert!(!office.open.active && !office.close.active);
    }
}
