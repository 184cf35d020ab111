use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};

use crate::{
    configuration::Config,
    error::{self, Error},
    helpers,
    model::{Message, Subscription},
    provider::ChannelApi,
};

const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let http = match Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                return Err(error::Error::Reqwest(e));
            },
        };

        Ok(HTTP { config, http })
    }

    fn channel_url(&self, channel: &str) -> String {
        format!("{}/channels/{}", self.config.host, channel)
    }

    /// Sends a request, retrying connect failures and 5xx answers with a
    /// growing pause. Anything else surfaces immediately.
    async fn execute(&self, request: RequestBuilder) -> Result<Response, Error> {
        let mut attempt: u32 = 0;
        let mut delay = RETRY_BASE_DELAY;

        loop {
            let prepared = match request.try_clone() {
                Some(r) => r,
                None => {
                    return Err(Error::TaskError(String::from(
                        "request body is not retryable",
                    )));
                },
            };

            let retry = match prepared.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if !status.is_server_error()
                        || attempt >= self.config.retry_attempts
                    {
                        return Err(Error::ServerError(status.to_string()));
                    }
                    status.to_string()
                },
                Err(e) => {
                    if attempt >= self.config.retry_attempts {
                        return Err(Error::Reqwest(e));
                    }
                    e.to_string()
                },
            };

            attempt += 1;
            tracing::warn!(
                "Request failed ({}), retry {} in {:?}",
                retry,
                attempt,
                delay
            );
            tokio::time::sleep(delay).await;
            delay = delay * 3 / 2;
        }
    }
}

impl ChannelApi for HTTP {
    async fn read_messages(
        &self,
        channel: &str,
        from: DateTime<Utc>,
    ) -> Result<Vec<Message>, Error> {
        let request = self
            .http
            .get(self.channel_url(channel))
            .query(&[("from", helpers::format_from(from))]);
        let response = self.execute(request).await?;
        let data = response.json::<Vec<Message>>().await?;
        Ok(data)
    }

    async fn subscribing(
        &self,
        subscription: &Subscription,
    ) -> Result<Vec<Subscription>, Error> {
        let url = format!("{}/subscribing", self.channel_url(&subscription.channel));
        let request = self.http.post(url).json(subscription);
        let response = self.execute(request).await?;
        let data = response.json::<Vec<Subscription>>().await?;
        Ok(data)
    }

    async fn subscribe(
        &self,
        subscription: &Subscription,
    ) -> Result<Subscription, Error> {
        let url = format!("{}/subscribe", self.channel_url(&subscription.channel));
        let request = self.http.post(url).json(subscription);
        let response = self.execute(request).await?;
        let data = response.json::<Subscription>().await?;
        Ok(data)
    }

    async fn unsubscribe(
        &self,
        subscription: &Subscription,
    ) -> Result<(), Error> {
        let url = format!("{}/unsubscribe", self.channel_url(&subscription.channel));
        let request = self.http.post(url).json(subscription);
        self.execute(request).await?;
        Ok(())
    }

    async fn publish(
        &self,
        channel: &str,
        payload: &[u8],
    ) -> Result<(), Error> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        let request = self
            .http
            .post(self.channel_url(channel))
            .body(payload.to_vec());
        self.execute(request).await?;
        Ok(())
    }
}
