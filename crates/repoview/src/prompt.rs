//! Commands typed at the `browse` prompt

use repoview_core::{IssueFilter, ViewCommand};

pub const HELP: &str = "\
Commands:
  all | open | closed   show issues in that state (back to page 1)
  filter <state>        same as above
  next, n               next page
  prev, p               previous page
  retry, r              repeat the request that failed
  view <k>, v <k>       open the k-th issue on this page in the browser
  home                  open the repository in the browser
  help, ?               show this help
  back, b, quit, q      leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    View(ViewCommand),
    Retry,
    /// 1-based position on the current page
    OpenIssue(usize),
    OpenRepository,
    Help,
    Back,
    Empty,
}

pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(Input::Empty);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("Too many arguments in '{}'. Type 'help'.", line.trim()));
    }

    let head = head.to_ascii_lowercase();
    let input = match (head.as_str(), arg) {
        ("all" | "open" | "closed", None) => {
            Input::View(ViewCommand::SelectFilter(head.parse::<IssueFilter>()?))
        }
        ("filter" | "f", Some(state)) => {
            Input::View(ViewCommand::SelectFilter(state.parse::<IssueFilter>()?))
        }
        ("next" | "n", None) => Input::View(ViewCommand::NextPage),
        ("prev" | "previous" | "p", None) => Input::View(ViewCommand::PreviousPage),
        ("retry" | "r", None) => Input::Retry,
        ("view" | "v", Some(k)) => match k.parse::<usize>() {
            Ok(k) if k >= 1 => Input::OpenIssue(k),
            _ => return Err(format!("'{}' is not an issue position (1, 2, ...)", k)),
        },
        ("home", None) => Input::OpenRepository,
        ("help" | "?", None) => Input::Help,
        ("back" | "b" | "quit" | "q" | "exit", None) => Input::Back,
        _ => return Err(format!("Unknown command '{}'. Type 'help'.", line.trim())),
    };
    Ok(input)
}
