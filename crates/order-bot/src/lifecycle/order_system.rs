use crate::commands::CommandHandler;
use crate::config::{BotConfig, StorageBackend, StorageSettings};
use crate::service::{Clock, OrderService, SystemClock};
use order_store::{PartitionActor, RedisStore, StoreError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Fatal problems while bringing the system up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("order store unreachable at startup: {0}")]
    StorageUnreachable(#[from] StoreError),
}

/// The running bot: the command handler plus any background store task.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::start(&config).await?;
///
/// let reply = system.handler.handle(&event).await;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Entry point for inbound events. Cheap to clone into per-event tasks.
    pub handler: CommandHandler,

    /// Background tasks owned by the system (the store actor, when in memory).
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Builds the configured store and wires the service and handler on top.
    ///
    /// With the Redis backend this connects and pings the server first; an
    /// unreachable server is a [`StartupError`].
    pub async fn start(config: &BotConfig) -> Result<Self, StartupError> {
        info!(backend = config.storage.backend.as_str(), "Starting order system");

        match config.storage.backend {
            StorageBackend::Memory => Ok(Self::in_memory(Arc::new(SystemClock), &config.storage)),
            StorageBackend::Redis => {
                let store =
                    RedisStore::connect(&config.storage.redis, config.storage.request_timeout)
                        .await?;
                let service = OrderService::new(Arc::new(store), Arc::new(SystemClock));
                Ok(Self {
                    handler: CommandHandler::new(service),
                    handles: Vec::new(),
                })
            }
        }
    }

    /// Runs on an in-process [`PartitionActor`] with the given clock.
    ///
    /// Must be called from within a tokio runtime.
    pub fn in_memory(clock: Arc<dyn Clock>, settings: &StorageSettings) -> Self {
        let (actor, store) = PartitionActor::new(settings.actor_buffer, settings.request_timeout);
        let actor_handle = tokio::spawn(actor.run());

        let service = OrderService::new(Arc::new(store), clock);
        Self {
            handler: CommandHandler::new(service),
            handles: vec![actor_handle],
        }
    }

    /// Drops the handler, closing the store channel, then waits for the
    /// background tasks to finish.
    ///
    /// Handler clones still held elsewhere keep the store actor alive, so
    /// await any per-event tasks first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down order system...");

        drop(self.handler);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Order system shutdown complete.");
        Ok(())
    }
}
