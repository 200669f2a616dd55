use clap::Parser;
use cmp_build_logs::utils::logger;
use cmp_build_logs::{CliConfig, CmpError, CompareEngine, CompareSettings, LogLoader, RecordDiffer};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting cmp-build-logs");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        report_failure(&e);
        std::process::exit(e.exit_code());
    }
}

fn run(config: &CliConfig) -> Result<(), CmpError> {
    let settings = CompareSettings::from_cli(config)?;
    tracing::debug!(
        "Identity field: {}, excluded fields: {:?}",
        settings.identity_field,
        settings.excluded_fields
    );

    let engine = CompareEngine::new(
        LogLoader::from_config(&settings),
        RecordDiffer::from_config(&settings),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    engine.run(&config.left_log, &config.right_log, &mut out)?;

    Ok(())
}

fn report_failure(e: &CmpError) {
    tracing::info!(
        "Comparison aborted: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::info!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 預設只輸出一行診斷訊息
    eprintln!("❌ {}", e.user_friendly_message());
}
