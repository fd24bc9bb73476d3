use std::io::Write;

use lingo_back::{KeyValueStore, Notification};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinSet,
};

use crate::{
    translate::TranslationDone,
    ui::{self, Dispatch, Intent, Screen, Session},
};

const PROMPT: &str = "> ";

/// Runs the interactive prompt until `quit` or end of input.
///
/// Everything that touches the store happens on this loop. Translations run
/// as tasks and their results are merged here when they come back, so
/// different todos can be translated at the same time.
pub async fn run<S: KeyValueStore>(mut session: Session<S>) -> eyre::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut translations = JoinSet::new();

    print!("{}", ui::view(&session));
    prompt()?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                match Intent::parse(&line) {
                    Ok(Some(intent)) => {
                        let Dispatch { notifications, pending, screen, quit } = session.dispatch(intent);

                        if let Some(pending) = pending {
                            let client = session.translator().clone();
                            translations.spawn(async move { pending.run(&client).await });
                        }

                        show(&session, &notifications, screen);

                        if quit {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => println!("{err}"),
                }

                prompt()?;
            }
            Some(done) = translations.join_next(), if !translations.is_empty() => {
                println!();
                merge(&mut session, done);
                prompt()?;
            }
        }
    }

    // requests already sent are never abandoned
    while let Some(done) = translations.join_next().await {
        merge(&mut session, done);
    }

    Ok(())
}

fn merge<S: KeyValueStore>(
    session: &mut Session<S>,
    done: Result<TranslationDone, tokio::task::JoinError>,
) {
    match done {
        Ok(done) => {
            let notifications: Vec<_> = session.finish(done).into_iter().collect();
            show(session, &notifications, Some(Screen::List));
        }
        Err(err) => {
            tracing::error!("translation task failed: {:?}", err);
            show(session, &[Notification::TranslationFailed], None);
        }
    }
}

fn show<S: KeyValueStore>(session: &Session<S>, notifications: &[Notification], screen: Option<Screen>) {
    for notification in notifications {
        println!("{}", ui::notification(notification));
    }

    if let Some(screen) = screen {
        print!("{}", ui::render(session, screen));
    }
}

fn prompt() -> eyre::Result<()> {
    print!("{PROMPT}");
    std::io::stdout().flush()?;
    Ok(())
}
