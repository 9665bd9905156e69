use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The account that owns a repository.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner {
    /// The login of the owning account.
    pub login: String,

    /// The URL of the owning account's avatar image.
    pub avatar_url: String,
}

/// Metadata of a GitHub repository, as returned by the search API.
///
/// The pager treats this as an opaque payload: it is accumulated and handed
/// back to the presentation layer, never interpreted.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// The unique identifier of the repository.
    pub id: u64,

    /// The name of the repository.
    pub name: String,

    /// The description of the repository, if any.
    pub description: Option<String>,

    /// The account that owns the repository.
    pub owner: RepositoryOwner,

    /// The number of stars the repository has.
    pub stargazers_count: u32,

    /// The number of open issues the repository has.
    pub open_issues_count: u32,

    /// The timestamp of the last update to the repository.
    pub updated_at: DateTime<Utc>,

    /// The canonical web URL of the repository.
    pub html_url: String,
}

impl Repository {
    /// Creates a dummy `Repository` instance for testing purposes.
    #[cfg(test)]
    pub(crate) fn dummy(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: Some("A dummy repository".to_string()),
            owner: RepositoryOwner {
                login: "org-1".to_string(),
                avatar_url: "https://example.com/avatar.png".to_string(),
            },
            stargazers_count: 100,
            open_issues_count: 5,
            updated_at: "2025-01-01T00:00:00Z".parse().unwrap(),
            html_url: format!("https://github.com/org-1/{name}"),
        }
    }
}

impl Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repository: {}/{}, Stars: {}, Issues: {}, Updated: {}",
            self.owner.login,
            self.name,
            self.stargazers_count,
            self.open_issues_count,
            self.updated_at
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_deserializes_from_search_api_payload() {
        let json = r#"
        {
            "id": 42,
            "name": "repository-1",
            "description": null,
            "owner": {
                "login": "org-1",
                "avatar_url": "https://example.com/avatar.png"
            },
            "stargazers_count": 100,
            "open_issues_count": 5,
            "updated_at": "2025-01-01T00:00:00Z",
            "html_url": "https://github.com/org-1/repository-1"
        }
        "#;

        let repository: Repository = serde_json::from_str(json).unwrap();

        assert_eq!(repository.id, 42);
        assert_eq!(repository.name, "repository-1");
        assert_eq!(repository.description, None);
        assert_eq!(repository.owner.login, "org-1");
        assert_eq!(repository.stargazers_count, 100);
        assert_eq!(repository.open_issues_count, 5);
        assert_eq!(repository.html_url, "https://github.com/org-1/repository-1");
    }

    #[test]
    fn repository_display_shows_owner_and_name() {
        let repository = Repository::dummy(1, "repository-1");

        let displayed = repository.to_string();

        assert!(displayed.contains("org-1/repository-1"));
        assert!(displayed.contains("Stars: 100"));
    }
}
