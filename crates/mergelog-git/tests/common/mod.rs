//! Shared repository fixture for integration tests
//!
//! Commit timestamps are explicit and increasing so `git log` order is
//! deterministic.

#![allow(dead_code)]

use std::cell::Cell;

use git2::{Oid, Repository, ResetType, Signature, Time};
use tempfile::TempDir;

pub struct Fixture {
    _temp: TempDir,
    pub repo: Repository,
    pub workdir: std::path::PathBuf,
    clock: Cell<i64>,
}

impl Fixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        let workdir = temp.path().to_path_buf();
        Self {
            _temp: temp,
            repo,
            workdir,
            clock: Cell::new(1_700_000_000),
        }
    }

    fn next_signature(&self) -> Signature<'static> {
        let seconds = self.clock.get() + 100;
        self.clock.set(seconds);
        Signature::new("Test", "test@example.com", &Time::new(seconds, 0)).unwrap()
    }

    pub fn commit(&self, message: &str, file: &str, parents: &[Oid]) -> Oid {
        std::fs::write(self.workdir.join(file), message).unwrap();
        let mut index = self.repo.index().unwrap();
        index.add_path(std::path::Path::new(file)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = self.next_signature();

        let parent_commits: Vec<_> = parents
            .iter()
            .map(|oid| self.repo.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<_> = parent_commits.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }

    /// Merge `branch_tip` into `base` with a GitLab-style merge message
    pub fn merge(&self, description: &str, number: u32, file: &str, base: Oid, branch_tip: Oid) -> Oid {
        let message = format!(
            "Merge branch 'feature' into 'master'\n\n{}\n\nSee merge request !{}\n",
            description, number
        );

        // git2 only advances HEAD when its tip is the first parent.
        let base_object = self.repo.find_object(base, None).unwrap();
        self.repo.reset(&base_object, ResetType::Hard, None).unwrap();

        self.commit(&message, file, &[base, branch_tip])
    }
}

/// One release built from a merged branch: an initial commit tagged v0.9.0,
/// a branch commit, and a merge commit tagged v1.0.0.
pub fn release_fixture() -> (Fixture, Oid) {
    let fixture = Fixture::new();

    let initial = fixture.commit("Initial commit", "a.txt", &[]);
    fixture.tag("v0.9.0", initial);

    let branch_tip = fixture.commit("Add login flow details", "b.txt", &[initial]);
    let merge = fixture.merge("Add login flow", 1, "c.txt", initial, branch_tip);
    fixture.tag("v1.0.0", merge);

    (fixture, merge)
}
