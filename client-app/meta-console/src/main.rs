// ============================================================================
// Meta Console - Main Entry Point
// File: client-app/meta-console/src/main.rs
// ============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use meta_core::repositories::{HelpRepository, MenuRepository, UserRepository};
use meta_core::services::{evaluate, resume, ActionHandler, MenuContext, MenuService};
use meta_core::{ActionValidate, DomainError, MenuItem, ResumeToken};
use meta_infrastructure::{
    create_pool, run_migrations, JsonFixtureRepository, JsonMessageBundle, PgHelpRepository,
    PgMenuRepository, PgUserRepository, RecordCounter, RoleBasedPermissionResolver,
    ScriptEvaluator, ScriptTagResolver, StaticRecordCounter,
};
use meta_script::Bindings;
use meta_shared::{telemetry::init_telemetry, AppConfig};

#[derive(Parser, Debug)]
#[command(name = "meta-console", version, about = "Menu resolution and action validation")]
struct Cli {
    /// Locale overriding the user's language and the configured default
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the menu items visible to a user
    Menus {
        /// User code
        #[arg(long)]
        user: String,
    },

    /// Evaluate a validator chain
    Validate {
        /// JSON file holding the chain definition
        #[arg(long)]
        chain: PathBuf,

        /// Token returned by a previous pass, e.g. `action-validate-order[3]`
        #[arg(long)]
        resume: Option<String>,

        /// Record values as inline JSON, or `@path` to a JSON file
        #[arg(long)]
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // 2. Initialize telemetry
    init_telemetry(&config.telemetry)?;
    info!("Starting {} ({})", config.app.name, config.app.env);

    match cli.command {
        Command::Menus { user } => run_menus(&config, &user, cli.locale.as_deref()).await,
        Command::Validate {
            chain,
            resume,
            context,
        } => {
            let locale = cli.locale.as_deref().unwrap_or(&config.menu.locale);
            run_validate(&config, &chain, resume.as_deref(), context.as_deref(), locale).await
        }
    }
}

async fn run_menus(config: &AppConfig, code: &str, locale: Option<&str>) -> Result<()> {
    let items = match config.database.url.as_deref() {
        Some(url) => {
            let pool = create_pool(&config.database, url)
                .await
                .context("Failed to connect to database")?;
            run_migrations(&pool).await?;
            info!("Using PostgreSQL repositories");

            let users = PgUserRepository::new(pool.clone());
            resolve_menus(
                config,
                Arc::new(PgMenuRepository::new(pool.clone())),
                Arc::new(PgHelpRepository::new(pool)),
                &users,
                Arc::new(StaticRecordCounter::default()),
                code,
                locale,
            )
            .await?
        }
        None => {
            let repo = Arc::new(JsonFixtureRepository::load(&config.menu.fixture_path).await?);
            info!("Using fixture {}", config.menu.fixture_path);

            let counter = Arc::new(repo.counter());
            resolve_menus(config, repo.clone(), repo.clone(), repo.as_ref(), counter, code, locale)
                .await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&items)?);
    Ok(())
}

async fn resolve_menus<M, H, U>(
    config: &AppConfig,
    menus: Arc<M>,
    helps: Arc<H>,
    users: &U,
    counter: Arc<dyn RecordCounter>,
    code: &str,
    locale: Option<&str>,
) -> Result<Vec<MenuItem>>
where
    M: MenuRepository,
    H: HelpRepository,
    U: UserRepository,
{
    let user = users
        .find_by_code(code)
        .await?
        .ok_or_else(|| DomainError::UserNotFound(code.to_string()))?;

    let locale = locale
        .or(user.language.as_deref())
        .unwrap_or(&config.menu.locale);
    let context = MenuContext::new(locale);

    let mut bindings = Bindings::new();
    bindings.insert("__user__".into(), user.to_binding());
    let tags = ScriptTagResolver::new(counter).with_bindings(bindings);

    let service = MenuService::new(
        menus,
        helps,
        Arc::new(RoleBasedPermissionResolver::from_settings(&config.menu)),
        Arc::new(ScriptEvaluator::new()),
        Arc::new(tags),
    );

    Ok(service.get_menus(Some(&user), &context).await?)
}

async fn run_validate(
    config: &AppConfig,
    chain_path: &Path,
    token: Option<&str>,
    context: Option<&str>,
    locale: &str,
) -> Result<()> {
    let raw = tokio::fs::read_to_string(chain_path)
        .await
        .with_context(|| format!("Failed to read chain {}", chain_path.display()))?;
    let chain: ActionValidate = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid chain definition {}", chain_path.display()))?;
    chain.check()?;

    let messages = match config.menu.messages_path.as_deref() {
        Some(path) => JsonMessageBundle::load(path, locale).await?,
        None => JsonMessageBundle::default(),
    };
    let script = ScriptEvaluator::new();
    let handler = ActionHandler::new(load_context(context).await?, &messages, &script);

    let outcome = match token {
        Some(token) => {
            let token: ResumeToken = token.parse()?;
            resume(&chain, &token, &handler)?
        }
        None => evaluate(&chain, 0, &handler)?,
    };

    match &outcome {
        Some(outcome) => info!("Action {} ended in {:?}", chain.name, outcome.state),
        None => info!("Action {} passed", chain.name),
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn load_context(context: Option<&str>) -> Result<Bindings> {
    let raw = match context {
        None => return Ok(Bindings::new()),
        Some(arg) => match arg.strip_prefix('@') {
            Some(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read context {}", path))?,
            None => arg.to_string(),
        },
    };

    match serde_json::from_str(&raw).context("Invalid context JSON")? {
        Value::Object(map) => Ok(map),
        other => bail!("Context must be a JSON object, got {}", other),
    }
}
