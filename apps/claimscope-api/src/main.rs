use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = claimscope_api::Args::parse();

	claimscope_api::run(args).await
}
