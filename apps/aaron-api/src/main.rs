use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = aaron_api::Args::parse();
	aaron_api::run(args).await
}
