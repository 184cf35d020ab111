use tracing::{error, Level};

use channel_client::{
    configuration::{get_configuration, set_configuration, Config},
    error::Error,
    handler::{bridge, session::Session},
    provider::HTTP,
    push::{self, EndpointPlatform},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match init() {
        Ok(config) => config,
        Err(e) => return Err(Error::ConfigurationError(e.to_string())),
    };

    let api = HTTP::new(config.clone())?;
    let platform = EndpointPlatform::new(&config);
    let (worker_tx, worker_rx) = push::worker_bridge();

    let bridge_addr = config.bridge_addr.clone();
    tokio::spawn(async move {
        if let Err(e) = bridge::bridge_task(bridge_addr, worker_tx).await {
            error!("Worker bridge stopped: {}", e);
        }
    });

    let mut session = Session::new(config, &api);
    session.start(&platform).await?;
    session.run(worker_rx).await
}

fn init() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}
