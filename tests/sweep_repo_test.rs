// End-to-end runs against throwaway repositories: a bare origin plus a
// working clone with one branch merged and pushed (feature-a) and one
// branch merged locally but never pushed (feature-b).

use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .args(args)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {args:?} failed in {dir:?}");
}

fn git_ok(dir: &Path, args: &[&str]) -> bool {
    StdCommand::new("git")
        .current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .args(args)
        .output()
        .expect("failed to run git")
        .status
        .success()
}

fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .args(args)
        .output()
        .expect("failed to run git");
    assert!(output.status.success(), "git {args:?} failed in {dir:?}");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn sweep(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("git-sweep").unwrap();
    cmd.current_dir(dir)
        .env("GIT_CONFIG_GLOBAL", "/dev/null")
        .env("GIT_CONFIG_SYSTEM", "/dev/null")
        .env_remove("GIT_SWEEP_MASTER")
        .env_remove("GIT_SWEEP_REMOTE");
    cmd
}

fn setup_repos() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let origin = tmp.path().join("origin.git");
    let work = tmp.path().join("work");

    std::fs::create_dir_all(&origin).unwrap();
    git(&origin, &["init", "--bare"]);

    std::fs::create_dir_all(&work).unwrap();
    git(&work, &["init", "-b", "master"]);
    git(&work, &["config", "user.email", "sweep@example.com"]);
    git(&work, &["config", "user.name", "Sweep Test"]);
    git(&work, &["remote", "add", "origin", origin.to_str().unwrap()]);

    std::fs::write(work.join("README"), "sweep test\n").unwrap();
    git(&work, &["add", "README"]);
    git(&work, &["commit", "-m", "initial"]);
    git(&work, &["push", "-u", "origin", "master"]);

    // feature-a: merged into master, pushed to origin
    git(&work, &["checkout", "-b", "feature-a"]);
    std::fs::write(work.join("a.txt"), "a\n").unwrap();
    git(&work, &["add", "a.txt"]);
    git(&work, &["commit", "-m", "feature a"]);
    git(&work, &["push", "-u", "origin", "feature-a"]);
    git(&work, &["checkout", "master"]);
    git(&work, &["merge", "--no-ff", "-m", "merge feature a", "feature-a"]);
    git(&work, &["push", "origin", "master"]);

    // feature-b: merged into master locally, never pushed
    git(&work, &["checkout", "-b", "feature-b"]);
    std::fs::write(work.join("b.txt"), "b\n").unwrap();
    git(&work, &["add", "b.txt"]);
    git(&work, &["commit", "-m", "feature b"]);
    git(&work, &["checkout", "master"]);
    git(&work, &["merge", "--no-ff", "-m", "merge feature b", "feature-b"]);

    (tmp, work, origin)
}

#[test]
fn test_dry_run_announces_and_deletes_nothing() {
    let (_tmp, work, origin) = setup_repos();

    sweep(&work)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete local branch 'feature-a'"))
        .stdout(predicate::str::contains(
            "Would delete remote branch 'origin/feature-a'",
        ))
        .stdout(predicate::str::contains("Skipping 'feature-b'"))
        .stdout(predicate::str::contains("Done: 0 deleted, 1 skipped"));

    assert!(git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
    assert!(git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/feature-b"]));
    assert!(git_ok(&origin, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
}

#[test]
fn test_real_run_deletes_confirmed_branch_everywhere() {
    let (_tmp, work, origin) = setup_repos();

    sweep(&work)
        .arg("-D")
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleting local branch 'feature-a'"))
        .stdout(predicate::str::contains(
            "Deleting remote branch 'origin/feature-a'",
        ))
        .stdout(predicate::str::contains("Done: 1 deleted, 1 skipped"));

    assert!(!git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
    assert!(!git_ok(&origin, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
    // The ambiguous local-only branch survives a real run
    assert!(git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/feature-b"]));
}

#[test]
fn test_declining_the_prompt_keeps_the_branch() {
    let (_tmp, work, origin) = setup_repos();

    sweep(&work)
        .arg("-D")
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done: 0 deleted, 2 skipped"));

    assert!(git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
    assert!(git_ok(&origin, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
}

#[test]
fn test_invalid_answer_reprompts_until_a_choice_is_made() {
    let (_tmp, work, _origin) = setup_repos();

    sweep(&work)
        .arg("-D")
        .write_stdin("banana\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please answer 1 (Yes) or 2 (No)."))
        .stdout(predicate::str::contains("Done: 1 deleted, 1 skipped"));

    assert!(!git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/feature-a"]));
}

#[test]
fn test_returns_to_the_starting_branch_after_a_dry_run() {
    let (_tmp, work, _origin) = setup_repos();
    git(&work, &["checkout", "feature-b"]);

    sweep(&work).assert().success();

    assert_eq!(git_stdout(&work, &["branch", "--show-current"]), "feature-b");
}

#[test]
fn test_master_option_changes_the_evaluation_branch() {
    let (_tmp, work, _origin) = setup_repos();

    // With feature-b as the designated master, feature-b is the protected
    // branch and 'master' becomes an ordinary candidate. Its local tip is
    // ahead of origin/master, so it lands in the ambiguous-skip bucket.
    sweep(&work)
        .args(["-m", "feature-b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would delete local branch 'feature-a'"))
        .stdout(predicate::str::contains("Skipping 'master'"))
        .stdout(predicate::str::contains("Done: 0 deleted, 1 skipped"));

    assert!(git_ok(&work, &["show-ref", "--verify", "--quiet", "refs/heads/master"]));
}
