use anyhow::Result;
use appmonitor::config::AppConfig;
use appmonitor::snapshot::SystemSnapshot;
use appmonitor::version::{NAME, VERSION};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let app_config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&app_config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so the report on stdout stays clean.
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} {} collecting snapshot", NAME, VERSION);
    let snapshot = SystemSnapshot::new();
    let report = snapshot.full_report();

    if app_config.report.writes_to_stdout() {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(report.as_bytes())?;
        stdout.flush()?;
    } else {
        std::fs::write(&app_config.report.output, report)
            .map_err(|e| anyhow::anyhow!("write {}: {}", app_config.report.output, e))?;
        tracing::info!("Report written to {}", app_config.report.output);
    }

    Ok(())
}
