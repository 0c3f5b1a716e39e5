use argus::cli::Cli;
use argus::config::MonitorConfig;
use argus::core::network::{HttpMonitor, MonitorDriver};
use argus::reporter::{LogReporter, Reporter};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        let path = MonitorConfig::init(cli.config.as_deref())?;
        println!("✓ Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = cli.apply(MonitorConfig::load(cli.config.as_deref())?);

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    let reporter: Arc<dyn Reporter> = if config.log_to_file {
        Arc::new(LogReporter::file(&config.log_dir)?)
    } else {
        Arc::new(LogReporter::console(config.log_timestamp))
    };

    let monitor = HttpMonitor::new()?;
    let mut driver = MonitorDriver::new(&config, monitor, reporter);

    if let Err(err) = driver.run().await {
        eprintln!("argus: {}", err);
        std::process::exit(1);
    }

    Ok(())
}
