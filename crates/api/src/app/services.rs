use std::sync::{Arc, Mutex, PoisonError};

use zeroerp_infra::{BlobStore, ErpStore, FileBlobStore, InMemoryBlobStore};
use zeroerp_payments::{PaymentGateway, StripeGateway};

use crate::config::{Config, Environment};

pub type SharedBlobStore = Arc<dyn BlobStore>;
pub type SharedErpStore = ErpStore<SharedBlobStore>;

/// Everything the handlers share.
pub struct AppServices {
    erp: Mutex<SharedErpStore>,
    pub gateway: Option<Arc<dyn PaymentGateway>>,
    pub webhook_secret: Option<String>,
    pub frontend_url: String,
    pub environment: Environment,
}

impl AppServices {
    pub fn new(erp: SharedErpStore) -> Self {
        Self {
            erp: Mutex::new(erp),
            gateway: None,
            webhook_secret: None,
            frontend_url: Config::default().frontend_url,
            environment: Environment::Development,
        }
    }

    pub fn with_gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn with_webhook_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook_secret = Some(secret.into());
        self
    }

    pub fn with_frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = url.into();
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Wire the file store and gateway from configuration.
    ///
    /// An unusable data directory falls back to memory; a gateway that fails
    /// to build is left unconfigured. Neither stops startup.
    pub fn from_config(config: &Config) -> Self {
        let blob: SharedBlobStore = match FileBlobStore::open(&config.data_dir) {
            Ok(store) => {
                tracing::info!(dir = %config.data_dir.display(), "using file storage");
                Arc::new(store) as SharedBlobStore
            }
            Err(e) => {
                tracing::warn!(
                    dir = %config.data_dir.display(),
                    error = %e,
                    "data directory unusable, falling back to in-memory storage"
                );
                Arc::new(InMemoryBlobStore::new()) as SharedBlobStore
            }
        };
        let erp = ErpStore::open(blob, &config.storage_namespace);

        let gateway: Option<Arc<dyn PaymentGateway>> =
            config.stripe_secret_key.as_ref().and_then(|key| {
                match StripeGateway::with_base_url(key.clone(), config.stripe_api_base.clone()) {
                    Ok(gateway) => Some(Arc::new(gateway) as Arc<dyn PaymentGateway>),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to build payment gateway client");
                        None
                    }
                }
            });

        Self {
            erp: Mutex::new(erp),
            gateway,
            webhook_secret: config.stripe_webhook_secret.clone(),
            frontend_url: config.frontend_url.clone(),
            environment: config.environment,
        }
    }

    /// Run `f` with exclusive access to the stores.
    ///
    /// Never call from across an `.await`; the lock is synchronous.
    pub fn with_erp<R>(&self, f: impl FnOnce(&mut SharedErpStore) -> R) -> R {
        let mut guard = self.erp.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
