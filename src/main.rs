use clap::Parser;
use pitchside::cli::{Cli, Commands};
use pitchside::config::{AppConfig, LoggingConfig};
use pitchside::error::{PitchsideError, Result};
use pitchside::fetch::{Fetcher, FixtureFetcher, HttpFetcher};
use pitchside::pipeline::Pipeline;
use pitchside::providers::{Provider, ProviderKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(&cli.config)?;
    if let Some(policy) = cli.shot_errors {
        config.normalize.shot_error_policy = policy;
    }
    init_logging(&config.logging);

    if let Err(errors) = config.validate() {
        for e in &errors {
            error!("config: {}", e);
        }
        return Err(PitchsideError::Validation(errors.join("; ")));
    }

    match cli.command {
        Commands::Parse {
            provider,
            id,
            fixture_dir,
            pretty,
        } => match fixture_dir {
            Some(dir) => run_parse(pipeline(FixtureFetcher::new(dir), &config), provider, &id, pretty).await,
            None => {
                let fetcher = HttpFetcher::new(&config.http)?;
                run_parse(pipeline(fetcher, &config), provider, &id, pretty).await
            }
        },
        Commands::Batch {
            provider,
            ids,
            fixture_dir,
        } => match fixture_dir {
            Some(dir) => run_batch(pipeline(FixtureFetcher::new(dir), &config), provider, &ids).await,
            None => {
                let fetcher = HttpFetcher::new(&config.http)?;
                run_batch(pipeline(fetcher, &config), provider, &ids).await
            }
        },
        Commands::Url { provider, id } => {
            let request = provider
                .provider(
                    &id,
                    config.providers.base_url(provider),
                    config.normalize.options(),
                )
                .request()?;
            println!("{} {}", request.method(), request.url);
            Ok(())
        }
    }
}

fn pipeline<F: Fetcher + 'static>(fetcher: F, config: &AppConfig) -> Pipeline<F> {
    Pipeline::new(fetcher, config.providers.clone(), config.normalize.options())
        .with_max_concurrency(config.http.max_concurrency)
}

async fn run_parse<F: Fetcher + 'static>(
    pipeline: Pipeline<F>,
    provider: ProviderKind,
    id: &str,
    pretty: bool,
) -> Result<()> {
    let game = pipeline.run(provider, id).await?;
    let out = if pretty {
        serde_json::to_string_pretty(&game)?
    } else {
        serde_json::to_string(&game)?
    };
    println!("{out}");
    Ok(())
}

async fn run_batch<F: Fetcher + 'static>(
    pipeline: Pipeline<F>,
    provider: ProviderKind,
    ids: &[String],
) -> Result<()> {
    let results = pipeline.run_many(provider, ids).await;

    let mut failed = 0usize;
    for (match_id, outcome) in results {
        match outcome {
            Ok(game) => println!("{}", serde_json::to_string(&game)?),
            Err(e) => {
                failed += 1;
                error!(match_id = %match_id, "{}", e);
            }
        }
    }

    info!(total = ids.len(), failed, "batch finished");
    if failed > 0 {
        return Err(PitchsideError::Validation(format!(
            "{failed} of {} matches failed",
            ids.len()
        )));
    }
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::Layer;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},pitchside=debug", config.level))
    });

    // Logs go to stderr; stdout carries the JSON games.
    let console_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    };

    let file_layer = config.dir.as_deref().and_then(|dir| {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Warning: Could not create log directory {} ({}), file logging disabled", dir, e);
            return None;
        }
        let file_appender = tracing_appender::rolling::daily(dir, "pitchside.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Keep the guard alive for the rest of the process
        Box::leak(Box::new(guard));
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
