//! The binary's only module: argument parsing, context setup, dispatch and
//! terminal output. Everything here goes through [`smartstudy::api::StudyApi`].

mod print;
mod setup;

use clap::Parser;
use directories::ProjectDirs;
use print::{
    print_documents, print_full_documents, print_messages, print_status, print_user,
};
use setup::{Cli, Commands};
use smartstudy::api::StudyApi;
use smartstudy::auth::password::Passwords;
use smartstudy::commands::CmdResult;
use smartstudy::config::StudyConfig;
use smartstudy::error::{Result, StudyError};
use smartstudy::seed::{seed_demo_data, SeedOutcome};
use smartstudy::store::fs::FileStore;
use smartstudy::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SMARTSTUDY_LOG";

struct AppContext {
    api: StudyApi<FsBackend>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Status => handle_status(&ctx),
        Commands::Export { output } => handle_result(ctx.api.export(output.as_deref())?),
        Commands::Import { path } => handle_result(ctx.api.import(&path)?),
        Commands::Clear { yes } => {
            require_confirmation(yes, "clear")?;
            handle_result(ctx.api.clear()?)
        }
        Commands::ResetDemo { yes } => {
            require_confirmation(yes, "reset-demo")?;
            handle_result(ctx.api.reset_demo()?)
        }
        Commands::Seed => handle_result(ctx.api.seed()?),
        Commands::List {
            collection,
            filters,
        } => handle_list(&ctx, &collection, &filters),
        Commands::Get { collection, id } => {
            handle_full(ctx.api.get_document(&collection, &id)?)
        }
        Commands::Add { collection, json } => {
            handle_result(ctx.api.add_document(&collection, &json)?)
        }
        Commands::Update {
            collection,
            id,
            json,
        } => handle_full(ctx.api.update_document(&collection, &id, &json)?),
        Commands::Delete { collection, id } => {
            handle_result(ctx.api.delete_document(&collection, &id)?)
        }
        Commands::Register {
            email,
            password,
            profile,
        } => handle_result(ctx.api.register(&email, &password, profile.as_deref())?),
        Commands::Login { email, password } => handle_result(ctx.api.login(&email, &password)?),
        Commands::Logout => handle_result(ctx.api.logout()?),
        Commands::Whoami => handle_whoami(&ctx),
        Commands::Passwd { id, current, new } => {
            handle_result(ctx.api.change_password(&id, &current, &new)?)
        }
    }
}

/// Logs go to stderr so that stdout stays clean for command output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("smartstudy={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("com", "smartstudy", "smartstudy")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StudyError::Config("Could not determine a data directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    debug!(data_dir = %data_dir.display(), "Opening store");

    let config = StudyConfig::load(&data_dir)?;
    let mut store = FileStore::open(data_dir, &config);
    debug!(fresh = store.freshly_created(), "Store opened");

    // The seeder skips itself while courses has documents.
    if config.seed_demo_data {
        match seed_demo_data(&mut store) {
            Ok(SeedOutcome::Seeded { courses }) => debug!(courses, "Seeded empty courses"),
            Ok(SeedOutcome::Skipped { .. }) => {}
            Err(e) => warn!(error = %e, "Failed to seed demo data"),
        }
    }

    let passwords = Passwords::new(&config.password_hashing)?;
    Ok(AppContext {
        api: StudyApi::new(store, passwords),
    })
}

fn require_confirmation(yes: bool, command: &str) -> Result<()> {
    if yes {
        Ok(())
    } else {
        Err(StudyError::Api(format!(
            "'{}' deletes every document; re-run with --yes to confirm",
            command
        )))
    }
}

fn handle_result(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_full(result: CmdResult) -> Result<()> {
    print_full_documents(&result.documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.status()?;
    print_messages(&result.messages);
    if let Some(status) = &result.status {
        print_status(status);
    }
    Ok(())
}

fn handle_list(ctx: &AppContext, collection: &str, filters: &[String]) -> Result<()> {
    let result = ctx.api.list_documents(collection, filters)?;
    print_documents(&result.documents);
    print_messages(&result.messages);
    Ok(())
}

fn handle_whoami(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.whoami()?;
    for record in &result.documents {
        print_user(record);
    }
    print_messages(&result.messages);
    Ok(())
}
