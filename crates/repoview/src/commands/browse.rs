use crate::cli::OutputFormat;
use crate::output::output_page;
use crate::session::{Event, Session, Step};
use anyhow::{Context, Result};
use colored::Colorize;
use repoview_core::{Phase, RepoId, RepositorySource};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;
use tracing::warn;

/// Run the interactive view until the user leaves or stdin closes.
///
/// Leaving while the page is in the failed state is reported as an error.
pub fn handle_browse<S: RepositorySource + 'static>(
    source: Arc<S>,
    repo: RepoId,
    format: OutputFormat,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    let mut session = Session::new(source, repo, tx);
    session.start();
    output_page(session.model(), format, true);
    prompt(format);

    for event in rx {
        let steps = session.handle(event);
        if steps.is_empty() {
            continue;
        }
        for step in steps {
            match step {
                Step::Render => output_page(session.model(), format, true),
                Step::Message(message) => notify(format, &message),
                Step::OpenUrl(url) => {
                    if let Err(e) = open::that(&url) {
                        warn!(url = %url, error = %e, "Failed to open browser");
                        notify(
                            format,
                            &format!("{} {}", "Could not open a browser. URL:".yellow(), url),
                        );
                    }
                }
                Step::Exit => {
                    if let Phase::Failed(err) = session.model().phase() {
                        return Err(err.clone()).with_context(|| {
                            format!("Failed to load repository '{}'", session.model().repo())
                        });
                    }
                    return Ok(());
                }
            }
        }
        prompt(format);
    }

    Ok(())
}

/// Prose goes to stderr in JSON mode so stdout stays a stream of documents
fn notify(format: OutputFormat, message: &str) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => eprintln!("{}", message),
    }
}

fn prompt(format: OutputFormat) {
    if format == OutputFormat::Text {
        print!("{} ", ">".cyan().bold());
        let _ = io::stdout().flush();
    }
}

fn spawn_input_reader(events: Sender<Event>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if events.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = events.send(Event::InputClosed);
    });
}
