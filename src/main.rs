use anyhow::Context;
use clap::Parser;
use gmail_audit::utils::error::{AuditError, ErrorSeverity};
use gmail_audit::utils::{logger, validation::Validate};
use gmail_audit::{
    AggregatePipeline, AuditConfig, CatalogPipeline, CliConfig, Command, EtlEngine, GmailClient,
    LocalStorage, YamlCategoryStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting gmail-audit ({:?})", cli.command);

    let config = cli.resolve().with_context(|| {
        format!(
            "failed to load configuration from {}",
            cli.config.as_deref().unwrap_or("defaults")
        )
    })?;

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let result = match cli.command {
        Command::Aggregate => run_aggregate(&config).await,
        Command::Catalog => run_catalog(&config).await,
        Command::Run => match run_aggregate(&config).await {
            Ok(_) => run_catalog(&config).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(output_path) => {
            println!("✅ Completed, output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

async fn run_aggregate(config: &AuditConfig) -> gmail_audit::Result<String> {
    let client = GmailClient::from_config(&config.gmail)?;
    let storage = LocalStorage::new(config.output.directory.clone());
    let pipeline = AggregatePipeline::new(client, storage, config.clone());
    EtlEngine::new("aggregate", pipeline).run().await
}

async fn run_catalog(config: &AuditConfig) -> gmail_audit::Result<String> {
    let storage = LocalStorage::new(config.output.directory.clone());
    let categories = YamlCategoryStore::new(storage.clone(), config.output.categories_yaml.clone());
    let pipeline = CatalogPipeline::new(storage, categories, config.clone());
    EtlEngine::new("catalog", pipeline).run().await
}

fn exit_with(e: &AuditError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}
