use clap::Parser;
use renfiles_archive::{Action, Archivist, Context};
use renfiles_config::Config;
use renfiles_storage::BackendHandle;
use renfiles_storage::backend::{LocalBackend, ReadOnlyBackend};
use renfiles_tag::TagCommand;
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use time::UtcOffset;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Sorts downloaded documents, podcasts and backups into a dated, tagged
/// archive. Everything is configured in `renfiles.toml`; the flags only
/// override it.
#[derive(Parser, Debug)]
#[command(name = "renfiles", version, about)]
struct Cli {
    /// Configuration file [default: ./renfiles.toml, then the user config directory]
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Print what would be done without moving or tagging anything
    #[arg(long)]
    dry_run: bool,
    /// Log directory creation, tag commands and skipped files
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    // Read while the process is still single-threaded; `time` refuses afterwards.
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let config = match Config::discover(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            init_tracing(cli.debug);
            tracing::debug!(error = ?err, "Could not load configuration");
            return failed(&*err);
        },
    };
    let debug = cli.debug || config.debug_mode;
    init_tracing(debug);
    tracing::debug!(?config, "Configuration");

    let ctx = context(&config, &cli, offset);
    let dry_run = ctx.dry_run;
    let local: BackendHandle = Arc::new(LocalBackend::default());
    let backend: BackendHandle = if dry_run {
        Arc::new(ReadOnlyBackend::new(local))
    } else {
        local
    };
    let tagger = config.tag_command.clone().map_or_else(TagCommand::discover, TagCommand::new);
    tracing::debug!(program = %tagger.program().display(), "Tag utility");

    let archivist = Archivist::new(backend, Arc::new(tagger), ctx);
    let result = archivist.run(|action| match action {
        Action::Unrecognized(_) | Action::AlreadyCorrect(_) if !debug => {},
        action => println!("{action}"),
    });
    match result {
        Ok(_) => {
            println!("****** completed successfully **********");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::debug!(error = ?err, "Batch aborted");
            failed(&*err)
        },
    }
}

fn context(config: &Config, cli: &Cli, offset: UtcOffset) -> Context {
    let mut ctx = Context::new(config.layout());
    ctx.documents = config.src_dir_name.clone();
    ctx.podcasts = config.podcast_src_dir_name.clone();
    ctx.bento.clone_from(&config.bento_src_dir_name);
    ctx.shakehands.clone_from(&config.shakehands_src_dir_name);
    ctx.dry_run = cli.dry_run || config.dry_run();
    ctx.debug = cli.debug || config.debug_mode;
    ctx.offset = offset;
    ctx
}

fn failed(err: &dyn Display) -> ExitCode {
    println!("***** failed with {err} **********");
    ExitCode::FAILURE
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` for the renfiles crates in
/// debug mode.
fn init_tracing(debug: bool) {
    let fallback = if debug {
        "info,renfiles=debug,renfiles_archive=debug,renfiles_classify=debug,renfiles_config=debug,renfiles_storage=debug,renfiles_tag=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
        let cli = Cli::parse_from(["renfiles", "--dry-run", "-c", "/etc/renfiles.yaml"]);
        assert!(cli.dry_run);
        assert!(!cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/renfiles.yaml")));
    }

    #[test]
    fn test_flags_override_configuration() {
        let config = Config {
            src_dir_name: PathBuf::from("/downloads"),
            dest_dir_name: PathBuf::from("/archive"),
            ..Config::default()
        };
        let cli = Cli::parse_from(["renfiles", "--debug"]);
        let ctx = context(&config, &cli, UtcOffset::UTC);
        assert!(ctx.debug);
        assert!(!ctx.dry_run);
        assert_eq!(ctx.documents, PathBuf::from("/downloads"));
        assert_eq!(ctx.shakehands, None);
        assert_eq!(ctx.layout.archive(), std::path::Path::new("/archive"));
    }
}
