use jeweler::error::Error;
use jeweler::generator::Generator;
use jeweler::project::{ProjectOptions, TestStyle};
use jeweler::renderer::MiniJinjaRenderer;
use jeweler::vcs::Git2Client;
use std::time::Duration;
use tempfile::TempDir;

mod common;

use common::{RecordingHosting, RecordingVcs};

fn options_in(temp_dir: &TempDir, name: &str) -> ProjectOptions {
    ProjectOptions { directory: Some(temp_dir.path().join(name)), ..ProjectOptions::new(name) }
}

#[test_log::test]
fn test_end_to_end_without_remote() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = Git2Client::new();
    let hosting = RecordingHosting::default();
    let cwd_before = std::env::current_dir().unwrap();

    let generator = Generator::new(
        common::identity(),
        options_in(&temp_dir, "sample-lib"),
        &renderer,
        &vcs,
        &hosting,
    )
    .unwrap();
    generator.run().unwrap();

    let root = temp_dir.path().join("sample-lib");
    assert!(root.join("lib").is_dir());
    assert!(root.join("test").is_dir());
    assert!(root.join("lib/sample_lib.rb").is_file());
    assert!(root.join("test/sample_lib_test.rb").is_file());

    let repo = git2::Repository::open(&root).unwrap();
    let mut revwalk = repo.revwalk().unwrap();
    revwalk.push_head().unwrap();
    assert_eq!(revwalk.count(), 1);

    assert!(hosting.calls().is_empty());
    assert_eq!(std::env::current_dir().unwrap(), cwd_before);
}

#[test]
fn test_remote_path_runs_after_commit() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();
    let options = ProjectOptions {
        create_remote: true,
        test_style: TestStyle::Bacon,
        ..options_in(&temp_dir, "widget")
    };

    Generator::new(common::identity(), options, &renderer, &vcs, &hosting)
        .unwrap()
        .with_push_delay(Duration::ZERO)
        .run()
        .unwrap();

    assert_eq!(
        vcs.calls(),
        vec!["init", "add_all", "commit", "add_remote", "push origin"]
    );
    assert_eq!(hosting.calls(), vec!["create ada widget TODO", "enable ada widget"]);
    assert!(temp_dir.path().join("widget/spec/widget_spec.rb").is_file());
}

#[test]
fn test_existing_target_stops_pipeline() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("widget")).unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();
    let options = ProjectOptions { create_remote: true, ..options_in(&temp_dir, "widget") };

    let err = Generator::new(common::identity(), options, &renderer, &vcs, &hosting)
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::TargetExists { .. }));
    assert!(vcs.calls().is_empty());
    assert!(hosting.calls().is_empty());
    assert_eq!(std::fs::read_dir(temp_dir.path().join("widget")).unwrap().count(), 0);
}

#[test]
fn test_commit_failure_skips_remote() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::failing_on("commit");
    let hosting = RecordingHosting::default();
    let options = ProjectOptions { create_remote: true, ..options_in(&temp_dir, "widget") };

    let err = Generator::new(common::identity(), options, &renderer, &vcs, &hosting)
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::CommitFailed(_)));
    assert_eq!(vcs.calls(), vec!["init", "add_all", "commit"]);
    assert!(hosting.calls().is_empty());
    assert!(temp_dir.path().join("widget/README").is_file());
}

#[test]
fn test_invalid_name_is_rejected_before_any_write() {
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();

    let result = Generator::new(
        common::identity(),
        options_in(&temp_dir, "bad name"),
        &renderer,
        &vcs,
        &hosting,
    );

    assert!(matches!(result, Err(Error::InvalidProjectName { .. })));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_generator_spec_defaults() {
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();

    let generator = Generator::new(
        common::identity(),
        ProjectOptions::new("my-cool-gem"),
        &renderer,
        &vcs,
        &hosting,
    )
    .unwrap();
    let spec = generator.spec();

    assert_eq!(spec.target_dir(), std::path::Path::new("my-cool-gem"));
    assert_eq!(spec.summary(), "TODO");
    assert_eq!(spec.test_style(), TestStyle::Shoulda);
    assert!(!spec.create_remote());
    assert_eq!(spec.constant_name(), "MyCoolGem");
    assert_eq!(spec.file_name_prefix(), "my_cool_gem");
    assert_eq!(spec.lib_dir(), std::path::Path::new("my-cool-gem/lib"));
    assert_eq!(spec.test_dir(), std::path::Path::new("my-cool-gem/test"));
    assert_eq!(spec.remote_url(), "git@github.com:ada/my-cool-gem.git");
    assert_eq!(spec.web_url(), "https://github.com/ada/my-cool-gem");
}

#[test]
fn test_local_run_confirms_preparation_only() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();
    let mut out = Vec::new();

    Generator::new(
        common::identity(),
        options_in(&temp_dir, "sample-lib"),
        &renderer,
        &vcs,
        &hosting,
    )
    .unwrap()
    .run_with(&mut out)
    .unwrap();

    let printed = String::from_utf8(out).unwrap();
    let expected = format!(
        "Jeweler has prepared your gem in {}\n",
        temp_dir.path().join("sample-lib").display()
    );
    assert_eq!(printed, expected);
    assert!(printed.contains("sample-lib"));
}

#[test]
fn test_remote_run_confirms_every_stage() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();
    let options = ProjectOptions { create_remote: true, ..options_in(&temp_dir, "widget") };
    let mut out = Vec::new();

    Generator::new(common::identity(), options, &renderer, &vcs, &hosting)
        .unwrap()
        .with_push_delay(Duration::ZERO)
        .run_with(&mut out)
        .unwrap();

    let printed = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Jeweler has prepared your gem in "));
    assert_eq!(lines[1], "Jeweler has pushed your repo to https://github.com/ada/widget");
    assert_eq!(lines[2], "Jeweler has enabled gem building for your repo");
}

#[test]
fn test_push_failure_prints_no_remote_confirmations() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::failing_on("push");
    let hosting = RecordingHosting::default();
    let options = ProjectOptions { create_remote: true, ..options_in(&temp_dir, "widget") };
    let mut out = Vec::new();

    let err = Generator::new(common::identity(), options, &renderer, &vcs, &hosting)
        .unwrap()
        .with_push_delay(Duration::ZERO)
        .run_with(&mut out)
        .unwrap_err();

    assert!(matches!(err, Error::RemoteCallFailed { ref operation, .. } if operation == "push"));
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("Jeweler has prepared your gem in "));
    assert!(!printed.contains("pushed"));
    assert!(!printed.contains("enabled"));
    assert_eq!(hosting.calls(), vec!["create ada widget TODO"]);
}

#[test]
fn test_failed_layout_prints_nothing() {
    let _lock = common::cwd_lock();
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("widget")).unwrap();
    let renderer = MiniJinjaRenderer::new();
    let vcs = RecordingVcs::default();
    let hosting = RecordingHosting::default();
    let mut out = Vec::new();

    let result = Generator::new(
        common::identity(),
        options_in(&temp_dir, "widget"),
        &renderer,
        &vcs,
        &hosting,
    )
    .unwrap()
    .run_with(&mut out);

    assert!(matches!(result, Err(Error::TargetExists { .. })));
    assert!(out.is_empty());
}
