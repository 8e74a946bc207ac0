mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Agent, Client, Config, Context, Flush, Service, Storage};

use std::{fs, net::SocketAddr, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.parse::<SocketAddr>().is_err() {
		return Err(Error::Validation {
			message: "service.http_bind must be a valid socket address.".to_string(),
		});
	}

	for (label, value) in [
		("agent.reply_delay_ms", cfg.agent.reply_delay_ms),
		("agent.idle_delay_ms", cfg.agent.idle_delay_ms),
		("client.reconnect_backoff_ms", cfg.client.reconnect_backoff_ms),
		("client.status_poll_ms", cfg.client.status_poll_ms),
		("client.queue_poll_ms", cfg.client.queue_poll_ms),
		("client.pipeline_poll_ms", cfg.client.pipeline_poll_ms),
	] {
		if value == 0 {
			return Err(Error::Validation { message: format!("{label} must be greater than zero.") });
		}
	}

	if cfg.context.tokens_per_task == 0 {
		return Err(Error::Validation {
			message: "context.tokens_per_task must be greater than zero.".to_string(),
		});
	}
	if cfg.context.max_tokens < cfg.context.tokens_per_task {
		return Err(Error::Validation {
			message: "context.max_tokens must be at least context.tokens_per_task.".to_string(),
		});
	}
	if cfg.flush.project.is_empty() {
		return Err(Error::Validation { message: "flush.project must be non-empty.".to_string() });
	}
	if !(cfg.client.server_url.starts_with("http://")
		|| cfg.client.server_url.starts_with("https://"))
	{
		return Err(Error::Validation {
			message: "client.server_url must start with http:// or https://.".to_string(),
		});
	}
	if cfg.client.terminal_tail == 0 {
		return Err(Error::Validation {
			message: "client.terminal_tail must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.flush.project = cfg.flush.project.trim().to_string();

	while cfg.client.server_url.ends_with('/') {
		cfg.client.server_url.pop();
	}
}
