//! Factory for configured HAL clients.
//!
//! A [`HalClientFactory`] owns a base [`ClientConfig`], two optional hooks and
//! the process-wide root cache used by [`CachingBehavior::Once`].
//!
//! # Hooks
//!
//! | Hook | Signature | Applied |
//! |------|-----------|---------|
//! | configure | `Fn(&mut ClientConfig, &C)` | Before the client is built |
//! | decorate | `Fn(HalClient, &C) -> HalClient` | Once, after the client is built |
//!
//! `C` is a caller supplied context value handed to both hooks, e.g. a tenant
//! name or credentials. Factories without a context use `()`.
//!
//! # Examples
//!
//! ```
//! use hal_client::{ClientConfig, HalClientFactory};
//! use http::header::{HeaderValue, AUTHORIZATION};
//!
//! let factory = HalClientFactory::<String>::new(ClientConfig::default())
//!     .with_configure(|config, token| {
//!         if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
//!             config.default_headers.insert(AUTHORIZATION, value);
//!         }
//!     });
//!
//! let client = factory.create_client(&"secret".to_string()).unwrap();
//! assert!(client.config().default_headers.contains_key(AUTHORIZATION));
//! ```

use crate::client::cache::RootCache;
use crate::client::config::ClientConfig;
use crate::client::fetch::HalClient;
use crate::error::{HalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

type ConfigureHook<C> = Arc<dyn Fn(&mut ClientConfig, &C) + Send + Sync>;
type DecorateHook<C> = Arc<dyn Fn(HalClient, &C) -> HalClient + Send + Sync>;

/// When the root resource at the base URL is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachingBehavior {
    /// No caching; [`HalClient::root`] fetches on every call
    #[default]
    Never,
    /// One fetch per created client
    PerClient,
    /// One fetch per factory, shared by every client it creates
    Once,
}

/// Creates [`HalClient`]s from a shared configuration.
pub struct HalClientFactory<C = ()> {
    config: ClientConfig,
    configure: Option<ConfigureHook<C>>,
    decorate: Option<DecorateHook<C>>,
    root_cache: RootCache,
}

impl<C> HalClientFactory<C> {
    /// Create a factory around a base configuration
    pub fn new(config: ClientConfig) -> Self {
        HalClientFactory {
            config,
            configure: None,
            decorate: None,
            root_cache: RootCache::new(),
        }
    }

    /// Set the hook that adjusts the configuration of each new client
    #[must_use]
    pub fn with_configure<F>(mut self, configure: F) -> Self
    where
        F: Fn(&mut ClientConfig, &C) + Send + Sync + 'static,
    {
        self.configure = Some(Arc::new(configure));
        self
    }

    /// Set the hook that transforms each built client
    #[must_use]
    pub fn with_decorate<F>(mut self, decorate: F) -> Self
    where
        F: Fn(HalClient, &C) -> HalClient + Send + Sync + 'static,
    {
        self.decorate = Some(Arc::new(decorate));
        self
    }

    /// The base configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The cache backing [`CachingBehavior::Once`]
    pub fn root_cache(&self) -> &RootCache {
        &self.root_cache
    }

    /// Create a client with a transport built from the configuration
    pub fn create_client(&self, context: &C) -> Result<HalClient> {
        let config = self.client_config(context);
        let client = HalClient::with_config(config)?;
        Ok(self.decorate(client, context))
    }

    /// Create a client over a caller supplied transport
    pub fn create_client_with(&self, http: reqwest::Client, context: &C) -> Result<HalClient> {
        let config = self.client_config(context);
        let client = HalClient::with_http_client(http, config)?;
        Ok(self.decorate(client, context))
    }

    /// Create a client and attach the root resource per `caching`
    ///
    /// # Errors
    ///
    /// [`HalError::Config`] if caching is requested without a base URL, or
    /// any error from fetching the root.
    pub async fn create_client_cached(
        &self,
        context: &C,
        caching: CachingBehavior,
    ) -> Result<HalClient> {
        let client = self.create_client(context)?;
        self.attach_root(client, caching).await
    }

    /// Like [`create_client_cached`](Self::create_client_cached), over a
    /// caller supplied transport
    pub async fn create_client_cached_with(
        &self,
        http: reqwest::Client,
        context: &C,
        caching: CachingBehavior,
    ) -> Result<HalClient> {
        let client = self.create_client_with(http, context)?;
        self.attach_root(client, caching).await
    }

    fn client_config(&self, context: &C) -> ClientConfig {
        let mut config = self.config.clone();
        if let Some(configure) = &self.configure {
            configure(&mut config, context);
        }
        config
    }

    fn decorate(&self, client: HalClient, context: &C) -> HalClient {
        match &self.decorate {
            Some(decorate) => decorate(client, context),
            None => client,
        }
    }

    async fn attach_root(&self, client: HalClient, caching: CachingBehavior) -> Result<HalClient> {
        if caching == CachingBehavior::Never {
            return Ok(client);
        }
        if client.config().base_url.is_none() {
            return Err(HalError::Config(format!(
                "caching behavior {:?} requires a base URL",
                caching
            )));
        }

        let root = match caching {
            CachingBehavior::Once => {
                self.root_cache
                    .get_or_fetch(|| async { client.get_root().await })
                    .await?
            }
            _ => {
                tracing::debug!("fetching root resource for new client");
                Arc::new(client.get_root().await?)
            }
        };
        Ok(client.with_cached_root(root))
    }
}

impl<C> Clone for HalClientFactory<C> {
    fn clone(&self) -> Self {
        HalClientFactory {
            config: self.config.clone(),
            configure: self.configure.clone(),
            decorate: self.decorate.clone(),
            root_cache: self.root_cache.clone(),
        }
    }
}

impl<C> fmt::Debug for HalClientFactory<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalClientFactory")
            .field("config", &self.config)
            .field("configure", &self.configure.is_some())
            .field("decorate", &self.decorate.is_some())
            .field("root_cache", &self.root_cache)
            .finish()
    }
}

impl<C> Default for HalClientFactory<C> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}
