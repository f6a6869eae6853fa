mod home;
mod output;

pub use home::HOME_ENV;
pub use home::resolve_home;
pub use output::OutputFormat;

use adjacent_navigation::DirectoryType;
use adjacent_navigation::Focus;
use adjacent_navigation::InvocationArgs;
use adjacent_navigation::Language;
use adjacent_navigation::NavContext;
use adjacent_navigation::NavigatorConfig;
use adjacent_navigation::Request;
use adjacent_navigation::StateStore;
use adjacent_navigation::SystemClock;
use adjacent_navigation::config::CONFIG_FILENAME;
use adjacent_navigation::context::DEFAULT_SESSION;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ADJACENT_LOG";

/// Exit code for navigation errors (root reached, unsupported type, nothing
/// to move to, failed listing).
pub const EXIT_NAVIGATION_FAILED: i32 = 1;

#[derive(Debug, Parser)]
#[command(
    name = "adjacent",
    about = "Move focus to the directory or file next to the current one."
)]
pub struct Cli {
    /// Host arguments: direction (0/previous or 1/next), debounce in
    /// milliseconds (1000 or more enables stay mode), and DEBUG.
    #[arg(value_name = "ARG", num_args = 0..=3)]
    pub args: Vec<String>,

    /// Real filesystem path of the focused directory or file.
    #[arg(long = "path", value_name = "PATH")]
    pub path: String,

    /// Path as the host displays it, when that is a namespace view (`#:\...`).
    #[arg(long = "display-path", value_name = "PATH")]
    pub display_path: Option<String>,

    /// Directory type of the focused view.
    #[arg(long = "type", value_name = "N", default_value_t = DirectoryType::DIRECTORY.0)]
    pub directory_type: u32,

    /// Identifies repeated invocations of the same command.
    #[arg(long = "session", default_value = DEFAULT_SESSION)]
    pub session: String,

    /// State and config directory (defaults to $ADJACENT_HOME or ~/.adjacent).
    #[arg(long = "home", value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Language of user-facing messages (defaults to config, then OS locale).
    #[arg(long = "lang", value_enum)]
    pub language: Option<LangArg>,

    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LangArg {
    En,
    Ja,
}

impl From<LangArg> for Language {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Language::En,
            LangArg::Ja => Language::Ja,
        }
    }
}

impl Cli {
    pub fn debug_requested(&self) -> bool {
        self.args.get(2).is_some_and(|arg| arg == "DEBUG")
    }

    fn focus(&self) -> Focus {
        let display = self.display_path.as_deref().unwrap_or(&self.path);
        Focus::from_views(display, Some(&self.path), DirectoryType(self.directory_type))
    }
}

pub fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Runs one invocation and returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let home = resolve_home(cli.home.as_deref())?;
    let config = NavigatorConfig::load(&home.join(CONFIG_FILENAME))
        .context("failed to load adjacent config")?;
    let args = InvocationArgs::from_positional(&cli.args, config.default_direction);
    let language = cli
        .language
        .map(Language::from)
        .unwrap_or_else(|| config.language());
    let lister = config.lister().context("invalid listing configuration")?;

    let store = StateStore::new(&home);
    let snapshot = store.load().context("failed to load navigation state")?;
    let mut context = NavContext::from_snapshot(snapshot);

    let request = Request {
        focus: cli.focus(),
        direction: args.direction,
        debounce_ms: args.debounce_ms,
        debug: args.debug,
        session: cli.session.clone(),
    };
    debug!("invoking with {request:?}");
    let outcome = context.invoke(
        &request,
        lister.as_ref(),
        &SystemClock,
        &language.messages(),
    );
    store
        .save(&context.into_snapshot())
        .context("failed to save navigation state")?;

    output::render(&outcome, cli.output_format)?;
    Ok(if outcome.is_failure() {
        EXIT_NAVIGATION_FAILED
    } else {
        0
    })
}
