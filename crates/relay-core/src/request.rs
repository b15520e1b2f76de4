//! Outbound request bodies
//!
//! Each body is serialized as-is into the JSON payload sent to the
//! coordination service. `validate` catches obviously malformed input
//! before anything goes over the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BRANCH;
use crate::{Error, Result};

/// Lock state an agent wants to move its files into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockIntent {
    Reading,
    Writing,
    /// Release the lock; the agent has pushed its work
    Open,
}

impl FromStr for LockIntent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "READING" => Ok(LockIntent::Reading),
            "WRITING" => Ok(LockIntent::Writing),
            "OPEN" => Ok(LockIntent::Open),
            _ => Err(Error::invalid_request(format!(
                "status must be one of READING, WRITING, OPEN (got '{}')",
                s
            ))),
        }
    }
}

impl fmt::Display for LockIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockIntent::Reading => write!(f, "READING"),
            LockIntent::Writing => write!(f, "WRITING"),
            LockIntent::Open => write!(f, "OPEN"),
        }
    }
}

/// Branch used when the caller does not name one
pub fn default_branch() -> String {
    DEFAULT_BRANCH.to_string()
}

/// Body of `POST /api/check_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStatusRequest {
    pub file_paths: Vec<String>,
    pub agent_head: String,
    pub repo_url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl CheckStatusRequest {
    /// Create a request on the default branch
    pub fn new(
        file_paths: Vec<String>,
        agent_head: impl Into<String>,
        repo_url: impl Into<String>,
    ) -> Self {
        Self {
            file_paths,
            agent_head: agent_head.into(),
            repo_url: repo_url.into(),
            branch: default_branch(),
        }
    }

    /// Override the branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_file_paths(&self.file_paths)?;
        require_non_empty("agent_head", &self.agent_head)?;
        require_non_empty("repo_url", &self.repo_url)?;
        require_non_empty("branch", &self.branch)
    }
}

/// Body of `POST /api/post_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostStatusRequest {
    pub file_paths: Vec<String>,
    pub status: LockIntent,
    pub message: String,
    pub agent_head: String,
    /// HEAD after pushing; expected alongside [`LockIntent::Open`]
    pub new_repo_head: Option<String>,
    pub repo_url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl PostStatusRequest {
    /// Create a request on the default branch without a new HEAD
    pub fn new(
        file_paths: Vec<String>,
        status: LockIntent,
        message: impl Into<String>,
        agent_head: impl Into<String>,
        repo_url: impl Into<String>,
    ) -> Self {
        Self {
            file_paths,
            status,
            message: message.into(),
            agent_head: agent_head.into(),
            new_repo_head: None,
            repo_url: repo_url.into(),
            branch: default_branch(),
        }
    }

    /// Override the branch
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Record the HEAD produced by a push
    pub fn with_new_repo_head(mut self, head: impl Into<String>) -> Self {
        self.new_repo_head = Some(head.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_file_paths(&self.file_paths)?;
        require_non_empty("agent_head", &self.agent_head)?;
        require_non_empty("repo_url", &self.repo_url)?;
        require_non_empty("branch", &self.branch)?;

        if let Some(head) = &self.new_repo_head {
            require_non_empty("new_repo_head", head)?;
        } else if self.status == LockIntent::Open {
            // The service owns this rule; forward and let it decide.
            tracing::warn!(
                files = self.file_paths.len(),
                "OPEN status sent without new_repo_head"
            );
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_request(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn validate_file_paths(paths: &[String]) -> Result<()> {
    if paths.is_empty() {
        return Err(Error::invalid_request(
            "file_paths must contain at least one path",
        ));
    }
    for (i, path) in paths.iter().enumerate() {
        if path.trim().is_empty() {
            return Err(Error::invalid_request(format!(
                "file_paths[{}] must not be empty",
                i
            )));
        }
        if path.contains('\0') {
            return Err(Error::invalid_request(format!(
                "file_paths[{}] must not contain null bytes",
                i
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn check_request() -> CheckStatusRequest {
        CheckStatusRequest::new(
            vec!["src/auth.ts".into(), "src/db.ts".into()],
            "abc123",
            "https://github.com/acme/app",
        )
    }

    #[test]
    fn check_request_defaults_to_main() {
        assert_eq!(check_request().branch, "main");
        let parsed: CheckStatusRequest = serde_json::from_value(json!({
            "file_paths": ["a.rs"],
            "agent_head": "h",
            "repo_url": "r"
        }))
        .unwrap();
        assert_eq!(parsed.branch, "main");
    }

    #[test]
    fn check_request_body() {
        let body = serde_json::to_value(check_request().with_branch("dev")).unwrap();
        assert_eq!(
            body,
            json!({
                "file_paths": ["src/auth.ts", "src/db.ts"],
                "agent_head": "abc123",
                "repo_url": "https://github.com/acme/app",
                "branch": "dev"
            })
        );
    }

    #[test]
    fn post_request_body_keeps_null_head() {
        let request = PostStatusRequest::new(
            vec!["src/auth.ts".into()],
            LockIntent::Writing,
            "refactoring login",
            "abc123",
            "https://github.com/acme/app",
        );
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["status"], "WRITING");
        assert_eq!(body["new_repo_head"], serde_json::Value::Null);
        assert!(body.as_object().unwrap().contains_key("new_repo_head"));
        assert_eq!(body["branch"], "main");
    }

    #[rstest]
    #[case("READING", LockIntent::Reading)]
    #[case("writing", LockIntent::Writing)]
    #[case("Open", LockIntent::Open)]
    fn lock_intent_parses(#[case] input: &str, #[case] expected: LockIntent) {
        assert_eq!(input.parse::<LockIntent>().unwrap(), expected);
        assert_eq!(expected.to_string(), input.to_ascii_uppercase());
    }

    #[test]
    fn lock_intent_rejects_unknown() {
        let err = "LOCKED".parse::<LockIntent>().unwrap_err();
        assert!(err.to_string().contains("READING, WRITING, OPEN"));
    }

    #[test]
    fn valid_requests_pass() {
        assert!(check_request().validate().is_ok());
        let post = PostStatusRequest::new(
            vec!["a.rs".into()],
            LockIntent::Open,
            "done",
            "abc",
            "repo",
        )
        .with_new_repo_head("def");
        assert!(post.validate().is_ok());
    }

    #[test]
    fn open_without_new_head_is_forwarded() {
        let post =
            PostStatusRequest::new(vec!["a.rs".into()], LockIntent::Open, "", "abc", "repo");
        assert!(post.validate().is_ok());
    }

    #[rstest]
    #[case::no_paths(vec![], "h", "r", "main", "at least one path")]
    #[case::blank_path(vec!["  ".into()], "h", "r", "main", "file_paths[0]")]
    #[case::nul_path(vec!["a.rs".into(), "b\0".into()], "h", "r", "main", "file_paths[1]")]
    #[case::blank_head(vec!["a.rs".into()], "", "r", "main", "agent_head")]
    #[case::blank_repo(vec!["a.rs".into()], "h", " ", "main", "repo_url")]
    #[case::blank_branch(vec!["a.rs".into()], "h", "r", "", "branch")]
    fn invalid_check_requests(
        #[case] paths: Vec<String>,
        #[case] head: &str,
        #[case] repo: &str,
        #[case] branch: &str,
        #[case] expected: &str,
    ) {
        let err = CheckStatusRequest::new(paths, head, repo)
            .with_branch(branch)
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest { .. }));
        assert!(
            err.to_string().contains(expected),
            "expected '{}' in '{}'",
            expected,
            err
        );
    }

    #[test]
    fn blank_new_head_is_rejected() {
        let err = PostStatusRequest::new(vec!["a.rs".into()], LockIntent::Open, "", "h", "r")
            .with_new_repo_head("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("new_repo_head"));
    }
}
