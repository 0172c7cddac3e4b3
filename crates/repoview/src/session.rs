//! Interactive session: owns the page model, runs fetches on worker threads
//! and turns their results and user input into steps for the terminal loop

use std::collections::VecDeque;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use repoview_core::{
    load_page, FetchError, Issue, Outcome, PageData, PageModel, Phase, RepoId, RepositorySource,
    Ticket, TicketKind,
};
use tracing::debug;

use crate::prompt::{parse_input, Input, HELP};

/// Everything the session loop reacts to
#[derive(Debug)]
pub enum Event {
    /// A line typed at the prompt
    Input(String),
    /// Stdin reached EOF
    InputClosed,
    Loaded(Ticket, Result<PageData, FetchError>),
    Reloaded(Ticket, Result<Vec<Issue>, FetchError>),
}

/// What the terminal loop should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Render,
    Message(String),
    OpenUrl(String),
    Exit,
}

pub struct Session<S: RepositorySource + 'static> {
    source: Arc<S>,
    model: PageModel,
    events: Sender<Event>,
    /// Lines typed while the initial load was running
    queued: VecDeque<String>,
    /// Sequence number of the request whose answer is still outstanding
    awaiting: Option<u64>,
    leaving: bool,
}

impl<S: RepositorySource + 'static> Session<S> {
    pub fn new(source: Arc<S>, repo: RepoId, events: Sender<Event>) -> Self {
        Self {
            source,
            model: PageModel::new(repo),
            events,
            queued: VecDeque::new(),
            awaiting: None,
            leaving: false,
        }
    }

    pub fn model(&self) -> &PageModel {
        &self.model
    }

    /// Issue the initial load
    pub fn start(&mut self) {
        let ticket = self.model.begin_initial();
        self.spawn(ticket);
    }

    fn spawn(&mut self, ticket: Ticket) {
        debug!(seq = ticket.seq, kind = ?ticket.kind, "Spawning request");
        self.awaiting = Some(ticket.seq);

        let source = Arc::clone(&self.source);
        let repo = self.model.repo().clone();
        let events = self.events.clone();

        thread::spawn(move || {
            let event = match ticket.kind {
                TicketKind::Initial => {
                    Event::Loaded(ticket, load_page(&*source, &repo, &ticket.query))
                }
                TicketKind::Reload => {
                    Event::Reloaded(ticket, source.issues(&repo, &ticket.query))
                }
            };
            // The receiver is gone once the session has exited
            let _ = events.send(event);
        });
    }

    pub fn handle(&mut self, event: Event) -> Vec<Step> {
        match event {
            Event::Input(line) if self.model.is_loading() => {
                self.queued.push_back(line);
                Vec::new()
            }
            Event::Input(line) => self.handle_line(&line),
            // Replay what was typed before EOF first
            Event::InputClosed if self.model.is_loading() => {
                self.queued.push_back("quit".to_string());
                Vec::new()
            }
            Event::InputClosed => self.leave(),
            Event::Loaded(ticket, result) => {
                let outcome = self.model.finish_initial(ticket, result);
                self.settle(ticket, outcome)
            }
            Event::Reloaded(ticket, result) => {
                let outcome = self.model.finish_reload(ticket, result);
                self.settle(ticket, outcome)
            }
        }
    }

    fn settle(&mut self, ticket: Ticket, outcome: Outcome) -> Vec<Step> {
        if outcome == Outcome::Discarded {
            return Vec::new();
        }
        if self.awaiting == Some(ticket.seq) {
            self.awaiting = None;
        }

        let mut steps = vec![Step::Render];

        while !self.model.is_loading() {
            let Some(line) = self.queued.pop_front() else {
                break;
            };
            steps.extend(self.handle_line(&line));
        }

        if self.leaving && self.awaiting.is_none() && !steps.contains(&Step::Exit) {
            steps.push(Step::Exit);
        }
        steps
    }

    /// Leave now, or once the outstanding request has landed
    fn leave(&mut self) -> Vec<Step> {
        self.leaving = true;
        if self.awaiting.is_none() {
            vec![Step::Exit]
        } else {
            Vec::new()
        }
    }

    fn handle_line(&mut self, line: &str) -> Vec<Step> {
        if self.leaving {
            return Vec::new();
        }

        let input = match parse_input(line) {
            Ok(input) => input,
            Err(message) => return vec![Step::Message(message)],
        };

        match input {
            Input::Empty => Vec::new(),
            Input::Help => vec![Step::Message(HELP.to_string())],
            Input::Back => self.leave(),
            Input::View(command) => match self.model.dispatch(command) {
                Some(ticket) => {
                    self.spawn(ticket);
                    vec![Step::Render]
                }
                None => vec![Step::Message(self.refusal())],
            },
            Input::Retry => match self.model.retry() {
                Some(ticket) => {
                    self.spawn(ticket);
                    vec![Step::Render]
                }
                None => vec![Step::Message("Nothing to retry.".to_string())],
            },
            Input::OpenIssue(position) => match self.model.issues().get(position - 1) {
                Some(issue) => vec![Step::OpenUrl(issue.html_url.clone())],
                None => vec![Step::Message(format!(
                    "No issue at position {} on this page.",
                    position
                ))],
            },
            Input::OpenRepository => {
                let url = self
                    .model
                    .repository()
                    .and_then(|r| r.html_url.clone())
                    .unwrap_or_else(|| format!("https://github.com/{}", self.model.repo()));
                vec![Step::OpenUrl(url)]
            }
        }
    }

    /// Why a view command did nothing
    fn refusal(&self) -> String {
        match self.model.phase() {
            Phase::Failed(_) => "The repository did not load. Type 'retry'.".to_string(),
            Phase::Loading => "Still loading.".to_string(),
            Phase::Ready => "Already on the first page.".to_string(),
        }
    }
}
