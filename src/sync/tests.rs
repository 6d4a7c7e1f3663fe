use super::*;
use crate::test_support::{
    RecordingRunner, create_bare_remote, create_test_repo, git, remote_branches, remote_exists,
    test_runner,
};
use crate::workflow::Progress;
use tempfile::TempDir;

#[test]
fn test_bind_and_seed_order() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new(temp_dir.path());
    let progress = Progress::silent();
    let seq = Sequencer::new(&runner, &progress);
    let binding = RemoteBinding::origin("https://github.com/octo/demo.git");

    let pushed = bind_and_seed(&seq, &binding, "main").unwrap();

    assert_eq!(pushed, vec!["main"]);
    assert_eq!(
        runner.rendered(),
        vec![
            "git remote add origin https://github.com/octo/demo.git",
            "git push --force origin main",
            "git fetch origin",
        ]
    );
}

#[test]
fn test_failed_remote_add_stops_before_push() {
    let temp_dir = TempDir::new().unwrap();
    let binding = RemoteBinding::origin("https://github.com/octo/demo.git");
    let runner = RecordingRunner::new(temp_dir.path()).failing_on(
        GitCommand::remote_add("origin", &binding.url),
        "error: remote origin already exists.",
    );
    let progress = Progress::silent();
    let seq = Sequencer::new(&runner, &progress);

    let err = bind_and_seed(&seq, &binding, "main").unwrap_err();

    assert_eq!(
        err.failed_step(),
        Some(&Step::AddRemote {
            remote: "origin".to_string()
        })
    );
    assert_eq!(runner.calls().len(), 1);
}

#[test]
fn test_propagate_order() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new(temp_dir.path());
    let progress = Progress::silent();
    let seq = Sequencer::new(&runner, &progress);
    let binding = RemoteBinding::origin("https://github.com/octo/demo.git");
    let layout = BranchLayout::standard(&["feature-x", "feature-y"]).unwrap();

    let pushed = propagate(&seq, &binding, &layout).unwrap();

    assert_eq!(pushed, vec!["dev", "feature-x", "feature-y"]);
    assert_eq!(
        runner.rendered(),
        vec![
            "git push origin dev",
            "git checkout feature-x",
            "git merge --no-edit dev",
            "git push origin feature-x",
            "git checkout feature-y",
            "git merge --no-edit dev",
            "git push origin feature-y",
            "git checkout dev",
        ]
    );
}

#[test]
fn test_propagate_stops_at_failed_push() {
    let temp_dir = TempDir::new().unwrap();
    let runner = RecordingRunner::new(temp_dir.path()).failing_on(
        GitCommand::push("origin", "feature-x", false),
        "fatal: unable to access remote: Could not resolve host",
    );
    let progress = Progress::silent();
    let seq = Sequencer::new(&runner, &progress);
    let binding = RemoteBinding::origin("https://github.com/octo/demo.git");
    let layout = BranchLayout::standard(&["feature-x", "feature-y"]).unwrap();

    let err = propagate(&seq, &binding, &layout).unwrap_err();

    assert_eq!(
        err.failed_step(),
        Some(&Step::Push {
            branch: "feature-x".to_string(),
            remote: "origin".to_string(),
            force: false,
        })
    );
    assert!(!runner.rendered().contains(&"git checkout feature-y".to_string()));
}

#[test]
fn test_seed_real_remote() {
    let temp_dir = create_test_repo();
    let bare = create_bare_remote();
    let runner = test_runner(temp_dir.path());
    let progress = Progress::silent();
    let seq = Sequencer::new(&runner, &progress);
    let binding = RemoteBinding::origin(bare.path().to_string_lossy());

    assert!(!remote_exists(&runner, "origin"));
    bind_and_seed(&seq, &binding, "main").unwrap();

    assert!(remote_exists(&runner, "origin"));
    assert_eq!(remote_branches(bare.path()), vec!["main"]);
}

#[test]
fn test_force_push_replaces_remote_history() {
    // A host that auto-created its own first commit on main.
    let foreign = create_test_repo();
    let bare = create_bare_remote();
    let bare_url = bare.path().to_string_lossy().to_string();
    git(foreign.path(), &["remote", "add", "origin", &bare_url]);
    git(foreign.path(), &["push", "origin", "main"]);

    let temp_dir = TempDir::new().unwrap();
    git(temp_dir.path(), &["init"]);
    git(temp_dir.path(), &["checkout", "-b", "main"]);
    let runner = test_runner(temp_dir.path());
    runner
        .run(&GitCommand::commit("Initial empty commit", true))
        .unwrap();
    let progress = Progress::silent();
    let seq = Sequencer::new(&runner, &progress);

    bind_and_seed(&seq, &RemoteBinding::origin(bare_url), "main").unwrap();

    let output = std::process::Command::new("git")
        .current_dir(bare.path())
        .args(["log", "--format=%s", "main"])
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Initial empty commit"
    );
}
