use std::io;
use std::process;

use clap::{Command, CommandFactory, Parser};
use clap_complete::{generate, Generator};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use doppler::cli::output;
use doppler::cli::{execute_command, Cli, CliResult, Commands};
use doppler::config::Settings;
use doppler::infrastructure::di::ServiceContainer;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    match &cli.command {
        None => {
            Cli::command().print_help().ok();
            return;
        }
        Some(Commands::Completion { shell }) => {
            eprintln!("Generating completion file for {shell:?}...");
            print_completions(*shell, &mut Cli::command());
            return;
        }
        Some(Commands::Configs(_)) => {}
    }

    if let Err(e) = run(&cli) {
        output::error(&e);
        output::causes(&e);
        process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(&cli.settings_source())?;
    tracing::debug!(
        "settings: api_host={} verify_tls={} project={:?} config={:?}",
        settings.api_host,
        settings.verify_tls,
        settings.project,
        settings.config
    );
    if !settings.verify_tls {
        output::warning("TLS certificate verification is disabled");
    }

    let container = ServiceContainer::new(settings)?;
    let mut out = io::stdout().lock();
    execute_command(cli, &container, &mut out)
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Create a subscriber with formatted output directed to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}
