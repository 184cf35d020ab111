use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::{
    configuration::Config,
    controller::{
        messages::MessageController, subscription::SubscriptionController,
    },
    error::Error,
    helpers,
    model::Subscription,
    provider::ChannelApi,
    push::{PushPlatform, WorkerReceiver},
    render,
    types::{SubscribeOptions, WorkerMessage},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle,
    Refresh,
    Publish(String),
    Quit,
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "t" | "toggle" => return Some(Command::Toggle),
        "r" | "refresh" => return Some(Command::Refresh),
        "q" | "quit" => return Some(Command::Quit),
        _ => {},
    }
    for prefix in ["p ", "publish "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            let text = rest.trim();
            if !text.is_empty() {
                return Some(Command::Publish(text.to_owned()));
            }
        }
    }
    None
}

/// One client session: the startup sequence, the controllers it feeds,
/// and the event loop over user commands and worker messages.
pub struct Session<'a, A> {
    pub config: Config,
    pub subscription: SubscriptionController,
    pub messages: MessageController,
    pub subscriber: Option<String>,
    api: &'a A,
}

impl<'a, A: ChannelApi> Session<'a, A> {
    pub fn new(config: Config, api: &'a A) -> Session<'a, A> {
        let messages = MessageController::new(config.lookback_minutes);
        Session {
            config,
            subscription: SubscriptionController::new(),
            messages,
            subscriber: None,
            api,
        }
    }

    /// Startup: one unconditional message refresh, then the push flow.
    /// A missing capability halts only the push flow; a failed push
    /// registration is logged and the session continues without it.
    pub async fn start<P: PushPlatform>(
        &mut self,
        platform: &P,
    ) -> Result<(), Error> {
        if let Err(e) = self.refresh().await {
            error!("Initial message refresh failed: {}", e);
        }

        if !platform.supported() {
            eprintln!(
                "Push messaging is not supported in this environment, \
                 the subscription toggle won't work."
            );
            warn!("Push messaging unsupported, toggle stays unbound");
            return Ok(());
        }

        if let Err(e) = self.init_push(platform).await {
            error!("Push registration failed: {}", e);
        }

        Ok(())
    }

    async fn init_push<P: PushPlatform>(
        &mut self,
        platform: &P,
    ) -> Result<(), Error> {
        platform.register(&self.config.worker_script).await?;
        let sub = platform
            .subscribe(SubscribeOptions {
                user_visible_only: true,
            })
            .await?;

        let iid = helpers::iid_from_endpoint(&sub.endpoint);
        info!("Subscriber identifier: {}", iid);

        let descriptor = Subscription {
            channel: self.config.channel.clone(),
            iid: iid.clone(),
        };
        let found = self.api.subscribing(&descriptor).await?;

        self.subscriber = Some(iid);
        self.subscription.attach(descriptor);
        self.subscription.apply_status(&found);
        self.draw();
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), Error> {
        let count = self
            .messages
            .refresh(self.api, &self.config.channel, Utc::now())
            .await?;
        info!("Loaded {} messages", count);
        self.draw();
        Ok(())
    }

    pub async fn on_worker_message(&mut self, message: WorkerMessage) {
        info!(
            "Worker message received (channel {:?}), refreshing",
            message.channel
        );
        if let Err(e) = self.refresh().await {
            error!("Message refresh failed: {}", e);
        }
    }

    pub async fn dispatch(&mut self, command: Command) {
        let result = match command {
            Command::Toggle => self.toggle().await,
            Command::Refresh => self.refresh().await,
            Command::Publish(text) => self.publish(text).await,
            // Quit is handled by the event loop.
            Command::Quit => Ok(()),
        };
        if let Err(e) = result {
            error!("{}", e);
        }
    }

    async fn toggle(&mut self) -> Result<(), Error> {
        if self.subscription.descriptor().is_none() {
            warn!("Toggle ignored, push flow never initialized");
            return Ok(());
        }
        let state = self.subscription.toggle(self.api).await?;
        info!("Subscribing: {}", state);
        self.draw();
        Ok(())
    }

    async fn publish(&mut self, text: String) -> Result<(), Error> {
        self.api
            .publish(&self.config.channel, text.as_bytes())
            .await?;
        self.refresh().await
    }

    fn draw(&self) {
        let document = render::render(
            self.messages.entries(),
            self.subscription.state(),
            self.subscriber.as_deref(),
        );
        println!("{}", document);
    }

    /// Event loop: stdin commands and worker-bridge messages, whichever
    /// arrives first. Ends on quit or when both inputs close.
    pub async fn run(
        &mut self,
        mut worker_rx: WorkerReceiver,
    ) -> Result<(), Error> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                message = worker_rx.recv() => {
                    match message {
                        Some(message) => self.on_worker_message(message).await,
                        None => break,
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match parse_command(&line) {
                        Some(Command::Quit) => break,
                        Some(command) => self.dispatch(command).await,
                        None => println!(
                            "commands: t(oggle), r(efresh), p(ublish) <text>, q(uit)"
                        ),
                    }
                }
            }
        }

        Ok(())
    }
}
