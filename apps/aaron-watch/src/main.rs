use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = aaron_watch::Args::parse();
	aaron_watch::run(args).await
}
