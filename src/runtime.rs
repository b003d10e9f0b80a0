use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rumqttc::EventLoop;
use tokio::task::JoinHandle;

use crate::config::ConfigSet;
use crate::error::{BridgeError, Result};
use crate::gateway::{run_event_loop, Gateway, MqttGateway, MqttSettings};
use crate::pulse::{ControllerHandle, PulseController, PulseSettings};
use crate::topic::{BaseTopics, TopicRouter};
use crate::{log_error, log_info, log_warn};

/// How long the event loop gets to flush the final releases and disconnect
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub config_path: PathBuf,
    pub mqtt: MqttSettings,
    pub bases: BaseTopics,
    pub on_time: Duration,
    pub publish_state: bool,
}

/// Wires config, router, controller and the MQTT connection together
pub struct Runtime {
    broker: String,
    gateway: Arc<MqttGateway>,
    eventloop: EventLoop,
    router: Arc<TopicRouter>,
    controller: ControllerHandle,
    controller_task: JoinHandle<()>,
}

impl Runtime {
    pub async fn new(config: RuntimeConfig) -> Result<Self> {
        let covers = ConfigSet::load(&config.config_path)?;
        let router = Arc::new(TopicRouter::new(&covers, config.bases.clone())?);

        log_info!(
            "🪟 Loaded {} covers, relays under {}",
            covers.len(),
            router.bases().relays
        );

        let (gateway, eventloop) = MqttGateway::new(&config.mqtt);
        let gateway = Arc::new(gateway);

        let settings = PulseSettings {
            on_time: config.on_time,
            publish_state: config.publish_state,
        };
        let (controller, handle) =
            PulseController::new(covers, router.clone(), gateway.clone(), settings);
        let controller_task = controller.spawn();

        Ok(Self {
            broker: format!("{}:{}", config.mqtt.host, config.mqtt.port),
            gateway,
            eventloop,
            router,
            controller: handle,
            controller_task,
        })
    }

    pub fn router(&self) -> &TopicRouter {
        &self.router
    }

    /// Run until Ctrl-C / SIGTERM or a fatal event loop error
    pub async fn run(self) -> Result<()> {
        let Self {
            broker,
            gateway,
            eventloop,
            router,
            controller,
            mut controller_task,
        } = self;

        log_info!("🚀 Connecting to MQTT broker {}", broker);

        let dyn_gateway: Arc<dyn Gateway> = gateway.clone();
        let mut event_loop = tokio::spawn(run_event_loop(
            eventloop,
            dyn_gateway,
            router,
            controller.clone(),
        ));
        let mut loop_finished = false;

        let result = tokio::select! {
            _ = shutdown_signal() => {
                log_info!("Shutdown requested");
                Ok(())
            }
            joined = &mut event_loop => {
                loop_finished = true;
                match joined {
                    Ok(result) => result,
                    Err(e) => Err(BridgeError::RuntimeError(format!("event loop task failed: {}", e))),
                }
            }
        };

        if let Err(e) = &result {
            log_error!("Event loop stopped: {}", e);
        }

        // Best effort: no relay may stay asserted after we exit.
        // Publishes block while the request queue is full and the broker is gone.
        match tokio::time::timeout(SHUTDOWN_GRACE, controller.release_all_and_wait()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log_warn!("Could not release relays on shutdown: {}", e),
            Err(_) => log_warn!("Releasing relays timed out after {:?}", SHUTDOWN_GRACE),
        }

        if !loop_finished {
            match tokio::time::timeout(SHUTDOWN_GRACE, gateway.disconnect()).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => log_warn!("MQTT disconnect failed: {}", e),
                Err(_) => log_warn!("MQTT disconnect timed out"),
            }
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut event_loop).await.is_err() {
                log_warn!("Event loop did not finish in {:?}, aborting", SHUTDOWN_GRACE);
                event_loop.abort();
            }
        }

        let _ = controller.shutdown();
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut controller_task).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => log_error!("Pulse controller task failed: {}", e),
            Err(_) => controller_task.abort(),
        }

        log_info!("👋 Bridge stopped");
        result
    }
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            log_warn!("Cannot listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
