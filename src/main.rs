use anyhow::Context;
use clap::Parser;
use relatives_bridge::config::{CliConfig, Command, LogFormat};
use relatives_bridge::core::bridge;
use relatives_bridge::utils::error::BridgeError;
use relatives_bridge::utils::{logger, validation::Validate};
use relatives_bridge::{RelativesModule, ScreenEngine, Shell, ShellConfig, UserModule};
use std::io::Write;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting relatives-bridge");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let (output, error) = match run(&cli).await {
        Ok(result) => result,
        Err(e) => (None, Some(e)),
    };

    if let Some(output) = output {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", output).context("writing output to stdout")?;
    }

    if let Some(e) = error {
        tracing::error!(
            "❌ Failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

/// Returns what to print and, separately, the failure to exit with.
async fn run(cli: &CliConfig) -> Result<(Option<String>, Option<BridgeError>), BridgeError> {
    let config = cli.load_toml()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated");

    let module = Arc::new(RelativesModule::with_async_delay(config.async_delay()));

    match cli.command() {
        Command::Show => {
            let shell = Shell::new(module, &config);
            let mut engine = ScreenEngine::new(shell);
            let outcome = engine.run().await?;
            Ok((Some(outcome.screen), outcome.error))
        }
        Command::Query { user, use_async } => {
            let user = bridge::user_from_json(&user)?;
            let users = if use_async {
                let pending = module.get_users_async(user);
                match config.settle_timeout() {
                    Some(timeout) => tokio::time::timeout(timeout, pending).await.map_err(|_| {
                        BridgeError::Timeout {
                            millis: timeout.as_millis() as u64,
                        }
                    })??,
                    None => pending.await?,
                }
            } else {
                module.get_users(&user)?
            };
            tracing::info!("Module returned {} users", users.len());
            Ok((Some(bridge::users_to_json(&users)?), None))
        }
    }
}
