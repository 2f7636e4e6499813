use anyhow::Context;
use clap::Parser;
use school_hub::utils::{logger, validation::Validate};
use school_hub::{
    CliConfig, OutputFormat, ScenarioConfig, ScenarioReport, ScenarioRunner, UnifiedApplication,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting school-hub CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let (app, requests) = match &config.scenario {
        Some(path) => {
            tracing::info!("📁 Loading scenario from: {}", path);
            let scenario = ScenarioConfig::from_file(path)
                .with_context(|| format!("failed to load scenario '{}'", path))?;
            if let Err(e) = scenario.validate() {
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
            tracing::info!("✅ Scenario '{}' loaded", scenario.application.name);
            (scenario.build_application(), scenario.requests)
        }
        None => {
            let app = UnifiedApplication::with_default_adapters();
            (app, config.single_request().into_iter().collect())
        }
    };

    let report = ScenarioRunner::new(&app).run(&requests);
    print_report(&report, config.output)?;

    // 任一請求失敗時以非零狀態結束
    if !report.all_succeeded() {
        std::process::exit(2);
    }

    Ok(())
}

fn print_report(report: &ScenarioReport, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for outcome in &report.outcomes {
                println!("{}", outcome.result);
            }
            if report.outcomes.len() > 1 {
                println!(
                    "{} succeeded, {} failed",
                    report.succeeded, report.failed
                );
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report).context("failed to encode report")?;
            println!("{}", json);
        }
    }
    Ok(())
}
