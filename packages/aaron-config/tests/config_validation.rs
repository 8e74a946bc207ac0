use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use aaron_config::Config;

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn sample_with(table: &str, key: &str, value: Value) -> String {
	let mut root: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.");
	let section = root
		.as_table_mut()
		.and_then(|root| root.get_mut(table))
		.and_then(Value::as_table_mut)
		.expect("Sample config must include the requested table.");

	section.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render sample config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("aaron_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse sample config.")
}

#[test]
fn sample_config_loads_and_normalizes() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML.to_string());
	let result = aaron_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Sample config must load.");

	assert_eq!(cfg.flush.project, "default");
	assert_eq!(cfg.client.server_url, "http://127.0.0.1:5000");
	assert_eq!(cfg.client.ws_url(), "ws://127.0.0.1:5000/ws");
	assert_eq!(cfg.agent.reply_delay_ms, 2_000);
}

#[test]
fn only_service_table_is_required() {
	let path = write_temp_config("[service]\nhttp_bind = \"127.0.0.1:0\"\n".to_string());
	let result = aaron_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Minimal config must load.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.agent.idle_delay_ms, 5_000);
	assert_eq!(cfg.context.max_tokens, 15_000);
	assert_eq!(cfg.client.reconnect_backoff_ms, 3_000);
	assert_eq!(cfg.client.terminal_tail, 8);
	assert!(cfg.storage.seed_sample_data);
}

#[test]
fn missing_file_reports_path() {
	let mut path = env::temp_dir();

	path.push("aaron_config_test_does_not_exist.toml");

	let err = aaron_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, aaron_config::Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn malformed_toml_is_a_parse_error() {
	let path = write_temp_config("[service\nhttp_bind = 1".to_string());
	let result = aaron_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected parse error.");

	assert!(matches!(err, aaron_config::Error::ParseConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn reply_delay_must_be_positive() {
	let path = write_temp_config(sample_with("agent", "reply_delay_ms", Value::Integer(0)));
	let result = aaron_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected reply delay validation error.");

	assert!(
		err.to_string().contains("agent.reply_delay_ms must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn server_url_must_be_http() {
	let path = write_temp_config(sample_with(
		"client",
		"server_url",
		Value::String("ftp://example.com".to_string()),
	));
	let result = aaron_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected server_url validation error.");

	assert!(
		err.to_string().contains("client.server_url must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn http_bind_must_be_a_socket_address() {
	let mut cfg = base_config();

	cfg.service.http_bind = "localhost".to_string();

	let err = aaron_config::validate(&cfg).expect_err("Expected http_bind validation error.");

	assert!(
		err.to_string().contains("service.http_bind must be a valid socket address."),
		"Unexpected error: {err}"
	);
}

#[test]
fn max_tokens_must_cover_one_task() {
	let mut cfg = base_config();

	cfg.context.max_tokens = 100;
	cfg.context.tokens_per_task = 200;

	let err = aaron_config::validate(&cfg).expect_err("Expected max_tokens validation error.");

	assert!(
		err.to_string().contains("context.max_tokens must be at least context.tokens_per_task."),
		"Unexpected error: {err}"
	);
}

#[test]
fn blank_flush_project_is_rejected_after_trim() {
	let path =
		write_temp_config(sample_with("flush", "project", Value::String("   ".to_string())));
	let result = aaron_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected flush.project validation error.");

	assert!(err.to_string().contains("flush.project must be non-empty."), "Unexpected error: {err}");
}

#[test]
fn https_server_url_maps_to_wss() {
	let mut cfg = base_config();

	cfg.client.server_url = "https://aaron.example".to_string();

	assert_eq!(cfg.client.ws_url(), "wss://aaron.example/ws");
}
