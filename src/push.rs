use tokio::sync::mpsc;
use url::Url;

use crate::{
    configuration::Config,
    error::Error,
    types::{PushSubscription, SubscribeOptions, WorkerMessage},
};

pub type WorkerSender = mpsc::UnboundedSender<WorkerMessage>;
pub type WorkerReceiver = mpsc::UnboundedReceiver<WorkerMessage>;

/// The push-event-to-client bridge. Whatever stands in for the service
/// worker pushes into the sender half; the session refreshes on every
/// message from the receiver half.
pub fn worker_bridge() -> (WorkerSender, WorkerReceiver) {
    mpsc::unbounded_channel()
}

/// Seam to the environment's push capability: worker registration and
/// subscription. The push-event handler itself lives behind the bridge
/// and is not this crate's concern.
#[allow(async_fn_in_trait)]
pub trait PushPlatform {
    fn supported(&self) -> bool;

    async fn register(&self, worker_script: &str) -> Result<(), Error>;

    async fn subscribe(
        &self,
        options: SubscribeOptions,
    ) -> Result<PushSubscription, Error>;
}

/// Platform backed by a push endpoint taken from the configuration. The
/// operator obtains the endpoint from an environment that can actually
/// receive pushes; when none is configured, push messaging is reported
/// as unsupported.
#[derive(Debug)]
pub struct EndpointPlatform {
    endpoint: Option<String>,
}

impl EndpointPlatform {
    pub fn new(config: &Config) -> EndpointPlatform {
        EndpointPlatform {
            endpoint: config.push_endpoint.clone(),
        }
    }

    fn endpoint(&self) -> Result<&str, Error> {
        self.endpoint.as_deref().ok_or(Error::PushUnsupported)
    }
}

impl PushPlatform for EndpointPlatform {
    fn supported(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn register(&self, worker_script: &str) -> Result<(), Error> {
        let endpoint = self.endpoint()?;
        Url::parse(endpoint)?;
        tracing::info!("Registered worker script {}", worker_script);
        Ok(())
    }

    async fn subscribe(
        &self,
        options: SubscribeOptions,
    ) -> Result<PushSubscription, Error> {
        if !options.user_visible_only {
            return Err(Error::InvalidOption {
                option: String::from("user_visible_only"),
            });
        }
        let endpoint = self.endpoint()?;
        Ok(PushSubscription {
            endpoint: endpoint.to_owned(),
            expiration_time: None,
            keys: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(endpoint: Option<&str>) -> EndpointPlatform {
        EndpointPlatform {
            endpoint: endpoint.map(str::to_owned),
        }
    }

    #[test]
    fn test_supported_tracks_configured_endpoint() {
        assert!(!platform(None).supported());
        assert!(platform(Some("https://push.example.com/a/b")).supported());
    }

    #[tokio::test]
    async fn test_subscribe_requires_user_visible_only() {
        let p = platform(Some("https://push.example.com/send/XYZ"));
        let result = p.subscribe(SubscribeOptions::default()).await;
        assert!(matches!(
            result,
            Err(Error::InvalidOption { option }) if option == "user_visible_only"
        ));
    }

    #[tokio::test]
    async fn test_subscribe_returns_endpoint() {
        let p = platform(Some("https://push.example.com/send/XYZ"));
        let sub = p
            .subscribe(SubscribeOptions {
                user_visible_only: true,
            })
            .await
            .unwrap();
        assert_eq!(sub.endpoint, "https://push.example.com/send/XYZ");
        assert!(sub.keys.is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_endpoint() {
        let p = platform(Some("not a url"));
        assert!(p.register("sw.js").await.is_err());
    }

    #[tokio::test]
    async fn test_unsupported_platform_errors() {
        let p = platform(None);
        assert!(matches!(
            p.register("sw.js").await,
            Err(Error::PushUnsupported)
        ));
    }
}
