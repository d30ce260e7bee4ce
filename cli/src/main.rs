use std::io;
use std::process::ExitCode;
use std::thread;

use catalog_cli::{commands, render, Cli, Commands, UreqTransport};
use catalog_core::{ApiError, CatalogService, ClientConfig, CACHE_VALIDITY};
use clap::Parser;
use console::style;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug; RUST_LOG wins when set.
    let default_filter = match cli.verbose {
        0 => "catalog_cli=warn,catalog_core=warn",
        1 => "catalog_cli=info,catalog_core=info",
        _ => "catalog_cli=debug,catalog_core=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let config = cli.client_config();
    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            let refused = e
                .chain()
                .filter_map(|cause| cause.downcast_ref::<ApiError>())
                .any(ApiError::is_connection_refused);
            if refused {
                eprintln!(
                    "{} {}",
                    style("Hint:").yellow(),
                    render::connection_hint(&config.catalog_url, &config.favorites_url)
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &ClientConfig) -> anyhow::Result<()> {
    let cache_file = cli.resource_cache();
    let mut service =
        CatalogService::new(UreqTransport::new(), config).with_cache(cache_file.load());

    let text = match cli.command {
        Commands::List(args) if args.watch => {
            return commands::watch(&mut service, &args, &mut io::stdout(), |cache| {
                cache_file.save(cache);
                info!("next refresh in {}s", CACHE_VALIDITY.as_secs());
                thread::sleep(CACHE_VALIDITY);
                true
            });
        }
        Commands::List(args) => {
            let text = commands::list(&mut service, &args)?;
            cache_file.save(service.cache());
            text
        }
        Commands::Show(args) => commands::show(&service, &args)?,
        Commands::Toggle(args) => commands::toggle(&service, &args)?,
        Commands::Favorites => commands::favorites(&service)?,
    };
    print!("{text}");
    Ok(())
}
