//! Model conversions from GitHub types to repoview-core types

use chrono::{DateTime, Utc};
use repoview_core::{Issue, IssueState, Label, Owner, Repository};

use crate::models::*;

/// Login GitHub shows for content whose author account was deleted
const GHOST_LOGIN: &str = "ghost";

impl From<GitHubUser> for Owner {
    fn from(u: GitHubUser) -> Self {
        Self {
            login: u.login,
            avatar_url: u.avatar_url,
        }
    }
}

impl From<GitHubRepo> for Repository {
    fn from(r: GitHubRepo) -> Self {
        Self {
            name: r.name,
            full_name: r.full_name,
            description: r.description.filter(|d| !d.is_empty()),
            html_url: r.html_url,
            owner: r.owner.into(),
        }
    }
}

impl From<GitHubLabel> for Label {
    fn from(l: GitHubLabel) -> Self {
        Self {
            id: l.id,
            name: l.name,
            color: l.color.filter(|c| !c.is_empty()),
        }
    }
}

impl From<GitHubIssue> for Issue {
    fn from(issue: GitHubIssue) -> Self {
        let state = if issue.state.eq_ignore_ascii_case("closed") {
            IssueState::Closed
        } else {
            IssueState::Open
        };

        let user = issue.user.map(Owner::from).unwrap_or_else(|| Owner {
            login: GHOST_LOGIN.to_string(),
            avatar_url: String::new(),
        });

        Self {
            id: issue.id,
            number: issue.number,
            title: issue.title,
            html_url: issue.html_url,
            state,
            labels: issue.labels.into_iter().map(Label::from).collect(),
            user,
            comments: issue.comments,
            created_at: issue.created_at.as_deref().and_then(parse_github_datetime),
        }
    }
}

fn parse_github_datetime(dt: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(dt)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_issue(user: Option<GitHubUser>) -> GitHubIssue {
        GitHubIssue {
            id: 1042,
            number: 42,
            title: "Crash on start".to_string(),
            html_url: "https://github.com/owner/repo/issues/42".to_string(),
            state: "closed".to_string(),
            labels: vec![
                GitHubLabel {
                    id: 1,
                    name: "bug".to_string(),
                    color: Some("d73a4a".to_string()),
                    description: None,
                },
                GitHubLabel {
                    id: 2,
                    name: "help wanted".to_string(),
                    color: Some(String::new()),
                    description: None,
                },
            ],
            user,
            comments: 7,
            created_at: Some("2024-01-15T10:30:00Z".to_string()),
        }
    }

    #[test]
    fn issue_keeps_label_order_and_fields() {
        let issue: Issue = github_issue(Some(GitHubUser {
            login: "reporter".to_string(),
            id: 2,
            avatar_url: "https://avatars.example.com/u/2".to_string(),
        }))
        .into();

        assert_eq!(issue.id, 1042);
        assert_eq!(issue.number, 42);
        assert_eq!(issue.state, IssueState::Closed);
        assert_eq!(issue.comments, 7);
        assert_eq!(issue.user.login, "reporter");
        assert_eq!(issue.user.avatar_url, "https://avatars.example.com/u/2");
        let names: Vec<_> = issue.labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["bug", "help wanted"]);
        assert_eq!(issue.labels[1].color, None);
        assert_eq!(
            issue.created_at.unwrap().to_rfc3339(),
            "2024-01-15T10:30:00+00:00"
        );
    }

    #[test]
    fn deleted_author_becomes_ghost() {
        let issue: Issue = github_issue(None).into();
        assert_eq!(issue.user.login, "ghost");
    }

    #[test]
    fn unparseable_date_is_dropped() {
        let mut raw = github_issue(None);
        raw.created_at = Some("yesterday".to_string());
        let issue: Issue = raw.into();
        assert!(issue.created_at.is_none());
    }

    #[test]
    fn empty_repo_description_is_none() {
        let repo: Repository = GitHubRepo {
            id: 1,
            name: "react".to_string(),
            full_name: "facebook/react".to_string(),
            description: Some(String::new()),
            html_url: None,
            owner: GitHubUser {
                login: "facebook".to_string(),
                id: 69631,
                avatar_url: "https://avatars.example.com/u/69631".to_string(),
            },
        }
        .into();
        assert_eq!(repo.description, None);
        assert_eq!(repo.owner.login, "facebook");
    }
}
