//! sflow gateway server entry point.

use tracing_subscriber::EnvFilter;

use sflow_gateway::{load_config, GatewayBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let settings = load_config()?;
	GatewayBuilder::new()
		.with_settings(settings)
		.start_server()
		.await?;
	Ok(())
}
