pub mod cli;
pub mod config;
pub mod shell;
pub mod translate;
pub mod ui;

use lingo_back::{FileStore, KeyValueStore, TodoStore};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Command},
    config::Config,
    translate::TranslationClient,
    ui::{Dispatch, Intent, Screen, Session},
};

/// Logs go to stderr so they never mix with what is rendered on stdout.
pub fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run(cli: Cli) -> eyre::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    tracing::info!(
        data_dir = %config.data_dir.display(),
        translate_url = %config.translate_url,
        "starting"
    );

    let store = TodoStore::open(FileStore::new(config.data_dir.clone()));
    let translator = TranslationClient::from_config(&config)?;
    let mut session = Session::new(store, translator);

    match cli.command.and_then(Command::into_intent) {
        Some(intent) => {
            print!("{}", execute(&mut session, intent).await);
            Ok(())
        }
        None => shell::run(session).await,
    }
}

/// Handles a single intent, waiting for any translation it starts, and
/// returns the rendered output.
pub async fn execute<S: KeyValueStore>(session: &mut Session<S>, intent: Intent) -> String {
    let Dispatch {
        mut notifications,
        pending,
        mut screen,
        ..
    } = session.dispatch(intent);

    if let Some(pending) = pending {
        notifications.extend(session.complete(pending).await);
        screen = Some(Screen::List);
    }

    let mut out = String::new();

    for notification in &notifications {
        out.push_str(&ui::notification(notification));
        out.push('\n');
    }

    if let Some(screen) = screen {
        out.push_str(&ui::render(session, screen));
    }

    out
}
