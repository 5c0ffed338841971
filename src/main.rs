use clap::Parser;
use complidesign::config::design_file::DesignFile;
use complidesign::utils::{logger, validation::Validate};
use complidesign::{CliConfig, DesignEngine, GeminiClient, InputCollector, LocalStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting complidesign CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入設計輸入：指定檔案或內建預設剖面
    let inputs = match &config.design {
        Some(path) => {
            tracing::info!("📁 Loading design from: {}", path);
            match DesignFile::from_file(path).and_then(|f| f.to_inputs()) {
                Ok(inputs) => inputs,
                Err(e) => {
                    tracing::error!("❌ Failed to load design file '{}': {}", path, e);
                    eprintln!("❌ {}", e.user_friendly_message());
                    eprintln!("💡 建議: {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::info!("📋 No design file given, using the default liner profile");
            InputCollector::new().snapshot()?
        }
    };

    tracing::info!(
        "🏗️ Design: {} m² footprint, {} layers",
        inputs.area_m2,
        inputs.layers.len()
    );

    // 缺少憑證時在發出任何請求前就終止
    let service = match GeminiClient::from_env(&config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let mut engine =
        DesignEngine::new_with_monitoring(service, storage, config.bundle, monitor_enabled);

    match engine.run(&inputs).await {
        Ok(written) => {
            tracing::info!("✅ Design generation completed successfully!");
            println!("✅ Design generation completed successfully!");
            for filename in written {
                println!("📁 {}/{}", config.output_path, filename);
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息；使用者只看到單一通用訊息
            tracing::error!(
                "❌ Design generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                complidesign::utils::error::ErrorSeverity::Low => 0,
                complidesign::utils::error::ErrorSeverity::Medium => 2,
                complidesign::utils::error::ErrorSeverity::High => 1,
                complidesign::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
