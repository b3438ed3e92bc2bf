//! Blocking operations on the local working copy
//!
//! Everything here calls into libgit2 synchronously. Callers on the async
//! runtime go through [`GitCollection`](super::GitCollection), which moves the
//! work onto the blocking pool and serializes access.

use super::auth::{authenticated_url, redacted_url};
use crate::config::RepositoryConfig;
use crate::domain::{RepositoryError, StoredConfiguration, Submission};
use git2::{
    build::{CheckoutBuilder, RepoBuilder},
    BranchType, Commit, Direction, ErrorCode, PushOptions, RemoteCallbacks, Repository, Signature,
};
use std::fs;
use std::path::Path;

/// Name of the remote created by cloning
pub const ORIGIN: &str = "origin";

/// Result of storing one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// A new branch was committed and pushed
    Stored(StoredConfiguration),

    /// The submission branch already exists locally or on the remote
    AlreadyExists {
        /// The conflicting branch
        branch: String,
    },
}

/// An opened local clone of the collection
pub struct WorkingCopy {
    repo: Repository,
    config: RepositoryConfig,
}

impl WorkingCopy {
    /// Open the working copy, cloning the remote first if the directory is not a repository
    ///
    /// The directory is created when missing. `token` is embedded into HTTP(S)
    /// clone URLs.
    pub fn open_or_clone(config: &RepositoryConfig, token: &str) -> Result<Self, RepositoryError> {
        let path = config.config_directory.as_path();
        fs::create_dir_all(path).map_err(|e| RepositoryError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let repo = match Repository::open(path) {
            Ok(repo) => {
                tracing::debug!(path = %path.display(), "Opened existing working copy");
                repo
            }
            Err(e) if e.code() == ErrorCode::NotFound => clone(config, token, path)?,
            Err(e) => {
                return Err(RepositoryError::OpenFailed {
                    path: path.display().to_string(),
                    message: e.message().to_string(),
                })
            }
        };

        Ok(Self {
            repo,
            config: config.clone(),
        })
    }

    /// Commit, branch and push one submission
    ///
    /// Returns [`StoreOutcome::AlreadyExists`] without touching the working
    /// tree when the `add/<hash>` branch is already known.
    pub fn store(&self, submission: &Submission) -> Result<StoreOutcome, RepositoryError> {
        let hash = submission.hash();
        let branch = hash.branch_name();

        let remote_heads = self.sync_base()?;
        if self.branch_exists(&branch, &remote_heads) {
            tracing::info!(branch = %branch, "Submission branch already exists");
            return Ok(StoreOutcome::AlreadyExists { branch });
        }

        let base = self.base_commit()?;
        match self.repo.branch(&branch, &base, false) {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::Exists => {
                return Ok(StoreOutcome::AlreadyExists { branch });
            }
            Err(e) => return Err(branch_error(&branch, e)),
        }

        let relative_path = submission.relative_path();
        let published = self
            .switch_to(&branch, &base)
            .and_then(|()| self.write_file(&relative_path, submission.content()))
            .and_then(|()| self.commit(submission, &relative_path, &base))
            .and_then(|commit_id| self.push(&branch).map(|()| commit_id));

        // The branch must not outlive a failed attempt or resubmission would be a conflict
        let commit_id = match published {
            Ok(commit_id) => commit_id,
            Err(e) => {
                self.discard_branch(&branch, &base);
                return Err(e);
            }
        };
        self.track_upstream(&branch);

        tracing::info!(
            branch = %branch,
            path = %relative_path.display(),
            commit = %commit_id,
            "Configuration committed and pushed"
        );

        Ok(StoreOutcome::Stored(StoredConfiguration {
            hash,
            branch,
            relative_path,
            commit_id,
        }))
    }

    /// Fetch the base branch and list the heads the remote advertises
    fn sync_base(&self) -> Result<Vec<String>, RepositoryError> {
        let base = &self.config.base_branch;
        let fetch_error = |e: git2::Error| RepositoryError::FetchFailed {
            branch: base.clone(),
            message: e.message().to_string(),
        };

        let mut remote = self.repo.find_remote(ORIGIN).map_err(fetch_error)?;

        remote.connect(Direction::Fetch).map_err(fetch_error)?;
        let heads = remote
            .list()
            .map_err(fetch_error)?
            .iter()
            .map(|head| head.name().to_string())
            .collect();
        remote.disconnect().map_err(fetch_error)?;

        let refspec = format!("+refs/heads/{base}:refs/remotes/{ORIGIN}/{base}");
        remote
            .fetch(&[refspec.as_str()], None, None)
            .map_err(fetch_error)?;

        Ok(heads)
    }

    fn branch_exists(&self, branch: &str, remote_heads: &[String]) -> bool {
        let remote_ref = format!("refs/heads/{branch}");
        self.repo.find_branch(branch, BranchType::Local).is_ok()
            || remote_heads.iter().any(|head| head == &remote_ref)
    }

    /// Tip of the base branch, preferring the freshly fetched remote-tracking ref
    fn base_commit(&self) -> Result<Commit<'_>, RepositoryError> {
        let base = &self.config.base_branch;
        let candidates = [
            format!("refs/remotes/{ORIGIN}/{base}"),
            format!("refs/heads/{base}"),
        ];

        for name in &candidates {
            if let Ok(reference) = self.repo.find_reference(name) {
                return reference
                    .peel_to_commit()
                    .map_err(|e| branch_error(base, e));
            }
        }

        Err(RepositoryError::BaseBranchNotFound(base.clone()))
    }

    /// Make `branch` the checked-out branch with the tree of `base`
    fn switch_to(&self, branch: &str, base: &Commit<'_>) -> Result<(), RepositoryError> {
        let mut checkout = CheckoutBuilder::new();
        checkout.force();

        self.repo
            .checkout_tree(base.as_object(), Some(&mut checkout))
            .map_err(|e| branch_error(branch, e))?;
        self.repo
            .set_head(&format!("refs/heads/{branch}"))
            .map_err(|e| branch_error(branch, e))
    }

    fn write_file(&self, relative_path: &Path, content: &str) -> Result<(), RepositoryError> {
        let workdir = self
            .repo
            .workdir()
            .ok_or_else(|| RepositoryError::WriteFailed {
                path: relative_path.display().to_string(),
                message: "working copy is bare".to_string(),
            })?;
        let full_path = workdir.join(relative_path);
        let write_error = |e: std::io::Error| RepositoryError::WriteFailed {
            path: full_path.display().to_string(),
            message: e.to_string(),
        };

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&full_path, content).map_err(write_error)
    }

    fn commit(
        &self,
        submission: &Submission,
        relative_path: &Path,
        parent: &Commit<'_>,
    ) -> Result<String, RepositoryError> {
        let commit_error = |e: git2::Error| RepositoryError::CommitFailed(e.message().to_string());

        let mut index = self.repo.index().map_err(commit_error)?;
        index.add_path(relative_path).map_err(commit_error)?;
        index.write().map_err(commit_error)?;
        let tree_id = index.write_tree().map_err(commit_error)?;
        let tree = self.repo.find_tree(tree_id).map_err(commit_error)?;

        let author = Signature::now(
            &identity(submission.author(), &self.config.author_name),
            &identity(submission.email(), &self.config.author_email),
        )
        .map_err(commit_error)?;
        let committer = Signature::now(&self.config.author_name, &self.config.author_email)
            .map_err(commit_error)?;

        let message = format!(
            "add: added configuration with hash {}",
            submission.hash().as_str()
        );

        let oid = self
            .repo
            .commit(Some("HEAD"), &author, &committer, &message, &tree, &[parent])
            .map_err(commit_error)?;

        Ok(oid.to_string())
    }

    /// Drop an unpublished submission branch and restore the base tree
    fn discard_branch(&self, branch: &str, base: &Commit<'_>) {
        let mut checkout = CheckoutBuilder::new();
        checkout.force().remove_untracked(true);

        let result = self
            .repo
            .set_head_detached(base.id())
            .and_then(|()| self.repo.checkout_head(Some(&mut checkout)))
            .and_then(|()| self.repo.find_branch(branch, BranchType::Local))
            .and_then(|mut local| local.delete());

        match result {
            Ok(()) => tracing::debug!(branch = %branch, "Discarded unpublished branch"),
            Err(e) => tracing::warn!(
                branch = %branch,
                error = %e.message(),
                "Failed to discard unpublished branch"
            ),
        }
    }

    /// Push `branch` to origin
    fn push(&self, branch: &str) -> Result<(), RepositoryError> {
        let push_error = |message: String| RepositoryError::PushFailed {
            branch: branch.to_string(),
            message,
        };

        let mut remote = self
            .repo
            .find_remote(ORIGIN)
            .map_err(|e| push_error(e.message().to_string()))?;
        let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");

        let mut rejected: Vec<String> = Vec::new();
        {
            let mut callbacks = RemoteCallbacks::new();
            callbacks.push_update_reference(|refname, status| {
                if let Some(reason) = status {
                    rejected.push(format!("{refname}: {reason}"));
                }
                Ok(())
            });

            let mut options = PushOptions::new();
            options.remote_callbacks(callbacks);

            remote
                .push(&[refspec.as_str()], Some(&mut options))
                .map_err(|e| push_error(e.message().to_string()))?;
        }

        if !rejected.is_empty() {
            return Err(push_error(rejected.join("; ")));
        }
        Ok(())
    }

    /// Record origin as the upstream of a pushed branch
    ///
    /// The branch is already published at this point, so a failure is only logged.
    fn track_upstream(&self, branch: &str) {
        let result = self.repo.config().and_then(|mut git_config| {
            git_config.set_str(&format!("branch.{branch}.remote"), ORIGIN)?;
            git_config.set_str(
                &format!("branch.{branch}.merge"),
                &format!("refs/heads/{branch}"),
            )
        });

        if let Err(e) = result {
            tracing::warn!(
                branch = %branch,
                error = %e.message(),
                "Failed to record upstream tracking"
            );
        }
    }
}

fn clone(
    config: &RepositoryConfig,
    token: &str,
    path: &Path,
) -> Result<Repository, RepositoryError> {
    let url = authenticated_url(&config.url, token);
    tracing::info!(
        url = %redacted_url(&url),
        path = %path.display(),
        "Cloning configuration collection"
    );

    RepoBuilder::new()
        .clone(&url, path)
        .map_err(|e| RepositoryError::CloneFailed {
            url: redacted_url(&url),
            message: e.message().to_string(),
        })
}

fn branch_error(branch: &str, e: git2::Error) -> RepositoryError {
    RepositoryError::BranchFailed {
        branch: branch.to_string(),
        message: e.message().to_string(),
    }
}

/// Submitted identity with characters git signatures reject removed, or `fallback`
fn identity(submitted: Option<&str>, fallback: &str) -> String {
    submitted
        .map(|value| {
            value
                .chars()
                .filter(|c| !matches!(c, '<' | '>' | '\n' | '\r'))
                .collect::<String>()
                .trim()
                .to_string()
        })
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NosCategory;
    use tempfile::TempDir;

    /// Bare remote with one empty commit on `main`
    fn bare_remote(dir: &Path) -> Repository {
        let mut opts = git2::RepositoryInitOptions::new();
        opts.bare(true).initial_head("main");
        let repo = Repository::init_opts(dir, &opts).unwrap();
        {
            let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            let sig = Signature::now("seed", "seed@example.com").unwrap();
            repo.commit(Some("refs/heads/main"), &sig, &sig, "init", &tree, &[])
                .unwrap();
        }
        repo
    }

    fn repo_config(local: &Path, remote: &Path) -> RepositoryConfig {
        RepositoryConfig {
            config_directory: local.to_path_buf(),
            url: remote.display().to_string(),
            base_branch: "main".to_string(),
            author_name: "collector".to_string(),
            author_email: "collector@example.com".to_string(),
        }
    }

    #[test]
    fn test_identity_fallback() {
        assert_eq!(identity(None, "default"), "default");
        assert_eq!(identity(Some("  "), "default"), "default");
        assert_eq!(identity(Some("Jane <x>"), "default"), "Jane x");
    }

    #[test]
    fn test_store_pushes_branch() {
        let temp = TempDir::new().unwrap();
        let remote = bare_remote(&temp.path().join("remote.git"));
        let config = repo_config(&temp.path().join("local"), &temp.path().join("remote.git"));

        let copy = WorkingCopy::open_or_clone(&config, "").unwrap();
        let submission = Submission::new("hostname r1")
            .with_nos(NosCategory::new("cisco_ios").unwrap())
            .with_author(Some("Jane".to_string()))
            .with_email(Some("jane@example.com".to_string()));

        let outcome = copy.store(&submission).unwrap();
        let StoreOutcome::Stored(stored) = outcome else {
            panic!("expected a stored configuration");
        };

        assert_eq!(stored.branch, submission.hash().branch_name());
        let pushed = remote
            .find_reference(&format!("refs/heads/{}", stored.branch))
            .unwrap()
            .peel_to_commit()
            .unwrap();
        assert_eq!(pushed.id().to_string(), stored.commit_id);
        assert_eq!(pushed.author().name(), Some("Jane"));
        assert_eq!(pushed.committer().name(), Some("collector"));
        assert_eq!(
            pushed.message(),
            Some(format!("add: added configuration with hash {}", stored.hash).as_str())
        );
        assert!(pushed.tree().unwrap().get_path(&stored.relative_path).is_ok());
    }

    #[test]
    fn test_second_store_reports_existing_branch() {
        let temp = TempDir::new().unwrap();
        bare_remote(&temp.path().join("remote.git"));
        let config = repo_config(&temp.path().join("local"), &temp.path().join("remote.git"));
        let copy = WorkingCopy::open_or_clone(&config, "").unwrap();

        let submission = Submission::new("same content");
        assert!(matches!(
            copy.store(&submission).unwrap(),
            StoreOutcome::Stored(_)
        ));
        assert_eq!(
            copy.store(&submission).unwrap(),
            StoreOutcome::AlreadyExists {
                branch: submission.hash().branch_name()
            }
        );
    }

    #[test]
    fn test_failed_push_allows_retry() {
        let temp = TempDir::new().unwrap();
        let remote = bare_remote(&temp.path().join("remote.git"));
        let local = temp.path().join("local");
        let config = repo_config(&local, &temp.path().join("remote.git"));
        drop(WorkingCopy::open_or_clone(&config, "").unwrap());

        Repository::open(&local)
            .unwrap()
            .remote_set_pushurl(ORIGIN, Some("nowhere://invalid/remote.git"))
            .unwrap();

        let submission = Submission::new("hostname r1");
        let branch = submission.hash().branch_name();

        let copy = WorkingCopy::open_or_clone(&config, "").unwrap();
        assert!(matches!(
            copy.store(&submission),
            Err(RepositoryError::PushFailed { .. })
        ));
        assert!(copy.repo.find_branch(&branch, BranchType::Local).is_err());
        assert!(copy.repo.statuses(None).unwrap().is_empty());
        assert!(!local.join(submission.relative_path()).exists());
        drop(copy);

        Repository::open(&local)
            .unwrap()
            .remote_set_pushurl(ORIGIN, None)
            .unwrap();

        let copy = WorkingCopy::open_or_clone(&config, "").unwrap();
        assert!(matches!(
            copy.store(&submission).unwrap(),
            StoreOutcome::Stored(_)
        ));
        assert!(remote
            .find_reference(&format!("refs/heads/{branch}"))
            .is_ok());
    }

    #[test]
    fn test_missing_base_branch() {
        let temp = TempDir::new().unwrap();
        bare_remote(&temp.path().join("remote.git"));
        let mut config = repo_config(&temp.path().join("local"), &temp.path().join("remote.git"));
        config.base_branch = "develop".to_string();
        let copy = WorkingCopy::open_or_clone(&config, "").unwrap();

        let result = copy.store(&Submission::new("x"));
        assert!(matches!(
            result,
            Err(RepositoryError::FetchFailed { .. }) | Err(RepositoryError::BaseBranchNotFound(_))
        ));
    }

    #[test]
    fn test_clone_failure() {
        let temp = TempDir::new().unwrap();
        let config = repo_config(
            &temp.path().join("local"),
            &temp.path().join("does-not-exist"),
        );
        assert!(matches!(
            WorkingCopy::open_or_clone(&config, ""),
            Err(RepositoryError::CloneFailed { .. })
        ));
    }
}
