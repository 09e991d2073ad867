use anyhow::Result;
use log::{info, warn};

mod runner;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (mut config, load_error) = runner::load_config(&args)?;

    // Logging comes up before env overrides so their warnings are visible.
    // RUST_LOG still wins over the configured filter
    let filter = runner::log_filter(&config, |name| std::env::var(name).ok());
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .try_init();

    if let Some(err) = load_error {
        warn!("{}; using defaults", err);
    }
    config.merge_with_env();
    runner::apply_cli_overrides(&mut config, &args);

    info!(
        "cadence: element '{}', {}ms per frame",
        config.playback.element_id, config.playback.frame_interval_ms
    );

    let report = runner::run(&config)?;

    info!(
        "{} frames, {}",
        report.frames,
        if report.completed { "completed" } else { "stopped early" }
    );
    if let Some(style) = &report.final_style {
        info!("final style: {}", style.to_css_declarations());
    }
    if !report.written.is_empty() {
        info!(
            "wrote {} frames to {}",
            report.written.len(),
            config.effects.output_dir.display()
        );
    }
    Ok(())
}
