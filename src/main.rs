// Entrypoint for the `face` binary.
// - Parses the command line, sets up logging, then hands off to a workflow.
// - Any error, or a failed training, ends the process with exit code 1.

use anyhow::{bail, Context, Result};
use clap::Parser;
use face_cli::api::FaceApiClient;
use face_cli::cli::{Cli, Command, GroupAction, PersonGroupArgs};
use face_cli::config::Config;
use face_cli::key_store::KeyStore;
use face_cli::stream::StreamOpener;
use face_cli::workflows::{detect, listing, person_group};
use face_cli::{ui, TrainingStatus};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::print_fatal(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Build the service client from the stored key. Only commands that talk
/// to the service call this.
fn connect(config: &Config) -> Result<FaceApiClient> {
    let key = KeyStore::new(&config.key_file).read();
    FaceApiClient::new(&config.endpoint, &key).context("Failed to build HTTP client")
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Key { value } => {
            let value = ui::arg_or_prompt(value, "Service key", "key")?;
            let store = KeyStore::new(&config.key_file);
            store
                .write(&value)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
        }
        Command::Detect { source } => {
            let source = ui::arg_or_prompt(source, "Image URL or file", "image")?;
            let client = connect(&config)?;
            let opener = StreamOpener::new()?;
            detect::detect(&client, &opener, &source, &mut out)
                .with_context(|| format!("Detection failed for {source}"))?;
        }
        Command::Persongroup(args) => run_person_group(&config, args, &mut out)?,
    }
    Ok(())
}

fn run_person_group(
    config: &Config,
    args: PersonGroupArgs,
    out: &mut impl std::io::Write,
) -> Result<()> {
    let options = args.options();
    if args.name.as_deref() == Some("-list") {
        let client = connect(config)?;
        listing::list_groups(&client, out).context("Listing person groups failed")?;
        return Ok(());
    }

    let name = ui::arg_or_prompt(args.name, "Person group name", "person group name")?;
    let target = ui::arg_or_prompt(args.target, "Photo directory", "photo directory")?;
    let client = connect(config)?;

    match GroupAction::parse(&target) {
        GroupAction::List => listing::list_group(&client, &name, false, out)?,
        GroupAction::ListJson => listing::list_group(&client, &name, true, out)?,
        GroupAction::Create => person_group::create_group(&client, &name, out)
            .with_context(|| format!("Creating person group {name} failed"))?,
        GroupAction::Delete => person_group::delete_group(&client, &name, out)?,
        GroupAction::Train(path) => {
            let opener = StreamOpener::new()?;
            let summary = person_group::enroll_and_train(
                &client,
                &opener,
                &name,
                Path::new(&path),
                options,
                config.pacing,
                out,
            )
            .with_context(|| format!("Training person group {name} failed"))?;
            if summary.status == TrainingStatus::Failed {
                bail!("training of person group {name} ended with status Failed");
            }
        }
    }
    Ok(())
}
