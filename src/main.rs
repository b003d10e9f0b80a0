use clap::Parser;

use shady_bridge::cli::Args;
use shady_bridge::homeassistant;
use shady_bridge::util::log::init_logging;
use shady_bridge::Runtime;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_level, args.log_dir.as_deref())?;

    let print_ha_config = args.print_ha_config;
    let config = args.into_runtime_config();

    if print_ha_config {
        print!("{}", homeassistant::render(&config)?);
        return Ok(());
    }

    let runtime = Runtime::new(config).await?;
    runtime.run().await?;
    Ok(())
}
