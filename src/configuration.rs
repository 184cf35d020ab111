use std::{env, fs};

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub channel: String,
    pub lookback_minutes: i64,
    pub timeout: u64,
    pub retry_attempts: u32,
    pub worker_script: String,
    pub push_endpoint: Option<String>,
    pub bridge_addr: String,
    pub user_agent: String,
}

pub fn get_configuration() -> Result<Config, Error> {
    let host = env::var("HOST")?.trim_end_matches('/').to_owned();
    let channel = env::var("CHANNEL").unwrap_or_else(|_| String::from("test"));
    let lookback_minutes: i64 = env::var("LOOKBACK_MINUTES")
        .unwrap_or_else(|_| String::from("10"))
        .parse()?;
    let timeout: u64 = env::var("TIMEOUT")
        .unwrap_or_else(|_| String::from("15"))
        .parse()?;
    let retry_attempts: u32 = env::var("RETRY_ATTEMPTS")
        .unwrap_or_else(|_| String::from("2"))
        .parse()?;
    let worker_script =
        env::var("WORKER_SCRIPT").unwrap_or_else(|_| String::from("sw.js"));
    let push_endpoint =
        env::var("PUSH_ENDPOINT").ok().filter(|v| !v.is_empty());
    let bridge_addr = env::var("BRIDGE_ADDR")
        .unwrap_or_else(|_| String::from("127.0.0.1:9091"));
    let user_agent = env::var("USER_AGENT")
        .unwrap_or_else(|_| String::from("channel-client"));

    let config = Config {
        host,
        channel,
        lookback_minutes,
        timeout,
        retry_attempts,
        worker_script,
        push_endpoint,
        bridge_addr,
        user_agent,
    };

    Ok(config)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);

    // The env file is optional for the client, the environment may already
    // carry everything.
    let config_string = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(_) => return Ok(()),
    };

    parse_config_string(config_string)
}

fn parse_config_string(config: String) -> Result<(), Error> {
    let params: Vec<Option<(&str, &str)>> = config
        .split('\n')
        .map(|s| {
            if s.trim_start().starts_with('#') {
                return None;
            }
            let element = s.find('=');
            if let Some(e) = element {
                return Some(s.split_at(e));
            }
            None
        })
        .map(|value| {
            if let Some((k, v)) = value {
                return Some((k, &v[1..]));
            }
            None
        })
        .collect();

    for (key, value) in params.into_iter().flatten() {
        env::set_var(key, value);
    }

    Ok(())
}
