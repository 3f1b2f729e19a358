use clap::Parser;
use sitevault::cli::{Cli, Commands};
use sitevault::config::Settings;
use sitevault::vault::RecordPatch;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_tracing();

    let result = match cli.command {
        Commands::Init { yes } => sitevault::cli::commands::init::execute(&cli, yes),
        Commands::Add {
            ref name,
            ref url,
            ref username,
            ref secret,
            generate,
            ref policy,
        } => {
            let policy = policy.policy();
            sitevault::cli::commands::add::execute(
                &cli,
                name,
                url,
                username,
                secret.as_deref(),
                generate.then_some(&policy),
            )
        }
        Commands::Generate { ref policy } => {
            sitevault::cli::commands::generate::execute(&policy.policy())
        }
        Commands::Get { ref name } => sitevault::cli::commands::get::execute(&cli, name),
        Commands::List => sitevault::cli::commands::list::execute(&cli),
        Commands::Update {
            ref name,
            ref url,
            ref username,
            ref secret,
        } => {
            let patch = RecordPatch {
                url: url.clone(),
                username: username.clone(),
                secret: secret.clone(),
            };
            sitevault::cli::commands::update::execute(&cli, name, patch)
        }
        Commands::Delete { ref name, force } => {
            sitevault::cli::commands::delete::execute(&cli, name, force)
        }
        Commands::Import { ref file } => sitevault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Host => sitevault::cli::commands::host::execute(&cli),
        Commands::Completions { shell } => sitevault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        sitevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for command output and host frames.
///
/// `RUST_LOG` wins; otherwise the config file's `log_filter` is used.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let fallback = Settings::load(&Settings::config_dir())
            .map(|s| s.log_filter)
            .unwrap_or_else(|_| Settings::default().log_filter);
        EnvFilter::new(fallback)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
