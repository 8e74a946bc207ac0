use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Magenta.on_default() | Effects::BOLD)
		.usage(AnsiColor::Magenta.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

/// Filter for the fmt subscriber every binary installs at startup.
///
/// Invalid directives fall back to `info` rather than aborting.
pub fn env_filter(directive: &str) -> tracing_subscriber::EnvFilter {
	tracing_subscriber::EnvFilter::try_new(directive)
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}
