use crate::cli::OutputFormat;
use colored::Colorize;
use repoview_core::{FetchError, Issue, IssueFilter, IssueState, Label, PageModel, Phase, Repository};
use serde::Serialize;

/// Print the page in the requested format
pub fn output_page(model: &PageModel, format: OutputFormat, interactive: bool) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(&model.snapshot()) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", render_page(model, interactive));
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let code = err
                .downcast_ref::<FetchError>()
                .map(|e| e.kind())
                .unwrap_or("error");
            let json_err = JsonError {
                error: true,
                code: code.to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err).unwrap_or_else(|_| {
                format!(r#"{{"error": true, "message": "{}"}}"#, err)
            })
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for Repository {
    fn display(&self) -> String {
        let mut output = format!(
            "{}  {}\n{}",
            self.owner.login.cyan(),
            self.owner.avatar_url.dimmed(),
            self.name.white().bold()
        );
        if let Some(desc) = &self.description {
            output.push_str(&format!("\n{}", desc));
        }
        if let Some(url) = &self.html_url {
            output.push_str(&format!("\n{}", url.dimmed()));
        }
        output
    }
}

impl Displayable for Issue {
    fn display(&self) -> String {
        let state = match self.state {
            IssueState::Open => self.state.as_str().green(),
            IssueState::Closed => self.state.as_str().red(),
        };

        let mut title_line = format!(
            "{} {}",
            format!("#{}", self.number).cyan().bold(),
            self.title.white().bold()
        );
        for label in &self.labels {
            title_line.push(' ');
            title_line.push_str(&label.display());
        }
        title_line.push_str(&format!(" ({})", state));

        let mut byline = format!("by {}", self.user.login.cyan());
        if self.comments > 0 {
            let noun = if self.comments == 1 { "comment" } else { "comments" };
            byline.push_str(&format!(" · {} {}", self.comments, noun));
        }
        if let Some(created) = &self.created_at {
            byline.push_str(&format!(" · {}", created.format("%Y-%m-%d")));
        }

        let mut output = format!("{}\n    {}\n    {}", title_line, self.html_url.dimmed(), byline);
        if !self.user.avatar_url.is_empty() {
            output.push_str(&format!("  {}", self.user.avatar_url.dimmed()));
        }
        output
    }
}

impl Displayable for Label {
    fn display(&self) -> String {
        let chip = format!("[{}]", self.name);
        match self.rgb() {
            Some((r, g, b)) => chip.truecolor(r, g, b).bold().to_string(),
            None => chip.magenta().to_string(),
        }
    }
}

impl Displayable for FetchError {
    fn display(&self) -> String {
        let headline = match self {
            FetchError::Transport(_) => "Could not reach GitHub",
            FetchError::Status { status: 404, .. } => "Repository not found",
            FetchError::Status { status: 403, .. } => "Access denied or rate limit exceeded",
            FetchError::Status { .. } => "GitHub returned an error",
            FetchError::Malformed(_) => "GitHub sent an unexpected response",
        };
        format!("{}\n  {}", headline.red().bold(), self.to_string().dimmed())
    }
}

/// Render the whole repository view as text.
///
/// `interactive` adds the keyboard hints used by `browse`.
pub fn render_page(model: &PageModel, interactive: bool) -> String {
    let mut out = String::new();

    match model.phase() {
        Phase::Loading => {
            out.push_str(&format!("Loading {}...", model.repo()));
            return out;
        }
        Phase::Failed(err) => {
            out.push_str(&err.display());
            if interactive {
                out.push_str(&format!(
                    "\n\nType {} to try again or {} to leave.",
                    "retry".bold(),
                    "back".bold()
                ));
            }
            return out;
        }
        Phase::Ready => {}
    }

    if interactive {
        out.push_str(&format!("{}\n\n", "← Back to repositories (b)".dimmed()));
    }

    if let Some(repository) = model.repository() {
        out.push_str(&repository.display());
        out.push_str("\n\n");
    }

    out.push_str(&render_filters(model));
    out.push_str("\n\n");

    if let Some(err) = model.reload_error() {
        out.push_str(&err.display());
        if interactive {
            out.push_str(&format!("\n  Type {} to try again.", "retry".bold()));
        }
        out.push_str("\n\n");
    }

    if model.issues().is_empty() {
        out.push_str(&format!("{}\n", "No issues on this page.".dimmed()));
    } else {
        for (index, issue) in model.issues().iter().enumerate() {
            out.push_str(&format!("{:>2}. {}\n", index + 1, issue.display()));
        }
    }

    out.push('\n');
    out.push_str(&render_footer(model, interactive));
    out
}

fn render_filters(model: &PageModel) -> String {
    IssueFilter::ALL
        .iter()
        .map(|filter| {
            if model.view().is_active(*filter) {
                format!("[{}]", filter.label()).reversed().bold().to_string()
            } else {
                format!(" {} ", filter.label())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_footer(model: &PageModel, interactive: bool) -> String {
    let view = model.view();
    let hint = |key: &str| {
        if interactive {
            format!(" ({})", key)
        } else {
            String::new()
        }
    };

    let previous = if view.can_go_previous() {
        format!("« Previous{}", hint("p")).bold().to_string()
    } else {
        "« Previous".dimmed().to_string()
    };
    let next = if view.can_go_next() {
        format!("Next{} »", hint("n")).bold().to_string()
    } else {
        "Next »".dimmed().to_string()
    };

    format!("{}   Page: {}   {}", previous, view.page(), next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use repoview_core::{Owner, PageData, RepoId, ViewCommand, ViewState};

    fn no_color() {
        colored::control::set_override(false);
    }

    fn owner(login: &str) -> Owner {
        Owner {
            login: login.to_string(),
            avatar_url: format!("https://avatars.example.com/{}", login),
        }
    }

    fn issue(number: u64, labels: &[&str]) -> Issue {
        Issue {
            id: 1000 + number,
            number,
            title: format!("Issue number {}", number),
            html_url: format!("https://github.com/facebook/react/issues/{}", number),
            state: IssueState::Open,
            labels: labels
                .iter()
                .enumerate()
                .map(|(i, name)| Label {
                    id: i as u64,
                    name: name.to_string(),
                    color: Some("d73a4a".to_string()),
                })
                .collect(),
            user: owner("reporter"),
            comments: 2,
            created_at: None,
        }
    }

    fn ready(view: ViewState, issues: Vec<Issue>) -> PageModel {
        let repo = RepoId::from_route_segment("facebook%2Freact").unwrap();
        let mut model = PageModel::with_view(repo, view);
        let ticket = model.begin_initial();
        model.finish_initial(
            ticket,
            Ok(PageData {
                repository: Repository {
                    name: "react".to_string(),
                    full_name: "facebook/react".to_string(),
                    description: Some("The library for web and native user interfaces.".to_string()),
                    html_url: None,
                    owner: owner("facebook"),
                },
                issues,
            }),
        );
        model
    }

    #[test]
    fn renders_sections_in_order() {
        no_color();
        let model = ready(ViewState::default(), vec![issue(1, &["bug", "docs"]), issue(2, &[])]);
        let text = render_page(&model, true);

        let back = text.find("Back to repositories").unwrap();
        let owner = text.find("facebook  https://avatars.example.com/facebook").unwrap();
        let name = text.find("\nreact\n").unwrap();
        let description = text.find("The library for web").unwrap();
        let filters = text.find("[Open]").unwrap();
        let first = text.find(" 1. #1 Issue number 1 [bug] [docs] (open)").unwrap();
        let second = text.find(" 2. #2 Issue number 2 (open)").unwrap();
        let footer = text.find("Page: 1").unwrap();

        assert!(back < owner);
        assert!(owner < name);
        assert!(name < description);
        assert!(description < filters);
        assert!(filters < first);
        assert!(first < second);
        assert!(second < footer);
        assert!(text.contains("by reporter · 2 comments"));
        assert!(text.contains("https://github.com/facebook/react/issues/1"));
    }

    #[test]
    fn only_active_filter_is_bracketed() {
        no_color();
        let model = ready(ViewState::new(IssueFilter::Closed, 1), vec![]);
        let text = render_page(&model, false);

        assert!(text.contains("[Closed]"));
        assert!(!text.contains("[All]"));
        assert!(!text.contains("[Open]"));
        assert!(text.contains(" All "));
        assert!(text.contains(" Open "));
    }

    #[test]
    fn previous_disabled_on_first_page_only() {
        no_color();
        let mut model = ready(ViewState::default(), vec![issue(1, &[])]);
        let first = render_page(&model, true);
        assert!(first.contains("« Previous   Page: 1"));
        assert!(!first.contains("Previous (p)"));
        assert!(first.contains("Next (n) »"));

        model.dispatch(ViewCommand::NextPage);
        let second = render_page(&model, true);
        assert!(second.contains("« Previous (p)   Page: 2"));
        assert!(second.contains("Next (n) »"));
    }

    #[test]
    fn non_interactive_has_no_key_hints() {
        no_color();
        let model = ready(ViewState::new(IssueFilter::Open, 3), vec![issue(1, &[])]);
        let text = render_page(&model, false);
        assert!(!text.contains("Back to repositories"));
        assert!(text.contains("« Previous   Page: 3   Next »"));
    }

    #[test]
    fn empty_page_says_so() {
        no_color();
        let model = ready(ViewState::default(), vec![]);
        assert!(render_page(&model, false).contains("No issues on this page."));
    }

    #[test]
    fn loading_placeholder() {
        no_color();
        let repo = RepoId::from_route_segment("facebook%2Freact").unwrap();
        let model = PageModel::new(repo);
        assert_eq!(render_page(&model, true), "Loading facebook/react...");
    }

    #[test]
    fn failed_load_offers_retry() {
        no_color();
        let repo = RepoId::from_route_segment("facebook%2Fnope").unwrap();
        let mut model = PageModel::new(repo);
        let ticket = model.begin_initial();
        model.finish_initial(
            ticket,
            Err(FetchError::Status {
                status: 404,
                message: "Not Found".to_string(),
            }),
        );

        let text = render_page(&model, true);
        assert!(text.contains("Repository not found"));
        assert!(text.contains("API error (404): Not Found"));
        assert!(text.contains("Type retry to try again"));
    }

    #[test]
    fn reload_error_shown_above_previous_issues() {
        no_color();
        let mut model = ready(ViewState::default(), vec![issue(7, &[])]);
        let ticket = model.dispatch(ViewCommand::NextPage).unwrap();
        model.finish_reload(ticket, Err(FetchError::Transport("timed out".to_string())));

        let text = render_page(&model, true);
        let banner = text.find("Could not reach GitHub").unwrap();
        let issue = text.find("#7 Issue number 7").unwrap();
        assert!(banner < issue);
    }

    #[test]
    fn label_without_color_falls_back() {
        no_color();
        let label = Label {
            id: 1,
            name: "question".to_string(),
            color: None,
        };
        assert_eq!(label.display(), "[question]");
    }
}
