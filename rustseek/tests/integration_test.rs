use anyhow::Result;
use rustseek::{run_search, ResultKind, SearchConfig, SearchError};
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn config_for(root: &Path, targets: &[&str]) -> SearchConfig {
    SearchConfig::new(root, targets.iter().map(|t| t.to_string()).collect())
}

#[test]
fn test_non_recursive_sees_only_top_level() -> Result<()> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("sub").join("b.txt"))?;

    let config = config_for(dir.path(), &["a.txt", "b.txt"]);
    let summary = run_search(&config)?;

    assert!(!summary.overall_success());
    assert_eq!(summary.targets_found, 1);
    assert_eq!(summary.targets_missing, 1);
    assert_eq!(summary.messages.len(), 2);

    let expected = fs::canonicalize(dir.path().join("a.txt"))?;
    let payloads: Vec<&str> = summary.messages.iter().map(|m| m.payload()).collect();
    assert!(payloads.contains(&format!("1: a.txt: {}\n", expected.display()).as_str()));
    assert!(payloads.contains(&"2: b.txt: not found\n"));
    Ok(())
}

#[test]
fn test_recursive_case_insensitive_finds_both() -> Result<()> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("sub").join("b.TXT"))?;

    let mut config = config_for(dir.path(), &["a.txt", "b.txt"]);
    config.recursive = true;
    config.case_sensitive = false;
    let summary = run_search(&config)?;

    assert!(summary.overall_success());
    assert_eq!(summary.targets_found, 2);
    assert_eq!(summary.total_matches, 2);

    // The differently-cased file is reported under the queried name with
    // its on-disk path.
    let expected = fs::canonicalize(dir.path().join("sub").join("b.TXT"))?;
    let line = format!("2: b.txt: {}\n", expected.display());
    assert!(summary.messages.iter().any(|m| m.payload() == line));
    Ok(())
}

#[test]
fn test_match_found_at_depth_counts_for_the_target() -> Result<()> {
    let dir = tempdir()?;
    let deep = dir.path().join("l1").join("l2").join("l3");
    fs::create_dir_all(&deep)?;
    File::create(deep.join("needle.txt"))?;

    let mut config = config_for(dir.path(), &["needle.txt"]);
    config.recursive = true;
    let summary = run_search(&config)?;

    assert!(summary.overall_success());
    assert_eq!(summary.outcomes[0].matches, 1);
    assert!(summary.outcomes[0].found);
    Ok(())
}

#[test]
fn test_every_line_is_intact_under_concurrent_load() -> Result<()> {
    let dir = tempdir()?;
    let targets = ["red.txt", "green.txt", "blue.txt", "gray.txt"];
    for i in 0..25 {
        let sub = dir.path().join(format!("dir_{}", i));
        fs::create_dir(&sub)?;
        for name in &targets {
            File::create(sub.join(name))?;
        }
    }

    let mut config = config_for(dir.path(), &targets);
    config.recursive = true;
    let summary = run_search(&config)?;

    assert!(summary.overall_success());
    assert_eq!(summary.messages.len(), 100);
    assert_eq!(summary.total_matches, 100);

    for message in &summary.messages {
        assert_eq!(message.kind(), ResultKind::Match);
        let payload = message.payload();
        assert!(payload.ends_with('\n'));
        assert_eq!(payload.matches('\n').count(), 1);
    }

    // Each worker owns exactly its own 25 lines.
    for (index, name) in targets.iter().enumerate() {
        let prefix = format!("{}: {}: ", index + 1, name);
        let count = summary
            .messages
            .iter()
            .filter(|m| m.payload().starts_with(&prefix))
            .count();
        assert_eq!(count, 25);
    }
    Ok(())
}

#[test]
fn test_repeated_runs_yield_the_same_line_set() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("a.txt"))?;
    File::create(dir.path().join("sub").join("a.txt"))?;
    File::create(dir.path().join("b.txt"))?;

    let mut config = config_for(dir.path(), &["a.txt", "b.txt", "c.txt"]);
    config.recursive = true;

    let first: HashSet<String> = run_search(&config)?
        .messages
        .iter()
        .map(|m| m.payload().to_string())
        .collect();
    let second: HashSet<String> = run_search(&config)?
        .messages
        .iter()
        .map(|m| m.payload().to_string())
        .collect();

    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    Ok(())
}

#[test]
fn test_duplicate_targets_run_as_independent_workers() -> Result<()> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;

    let config = config_for(dir.path(), &["a.txt", "a.txt"]);
    let summary = run_search(&config)?;

    assert!(summary.overall_success());
    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.total_matches, 2);

    let expected = fs::canonicalize(dir.path().join("a.txt"))?;
    let payloads: Vec<&str> = summary.messages.iter().map(|m| m.payload()).collect();
    assert!(payloads.contains(&format!("1: a.txt: {}\n", expected.display()).as_str()));
    assert!(payloads.contains(&format!("2: a.txt: {}\n", expected.display()).as_str()));
    Ok(())
}

#[test]
fn test_one_workers_lines_keep_their_order() -> Result<()> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("sub").join("a.txt"))?;

    let mut config = config_for(dir.path(), &["a.txt"]);
    config.recursive = true;
    let summary = run_search(&config)?;

    // The walk reaches the root before any subdirectory, and the channel
    // preserves one producer's send order.
    let lines: Vec<&str> = summary
        .messages
        .iter()
        .map(|m| m.payload())
        .filter(|p| p.starts_with("1: "))
        .collect();
    assert_eq!(lines.len(), 2);
    let top = fs::canonicalize(dir.path().join("a.txt"))?;
    let nested = fs::canonicalize(dir.path().join("sub").join("a.txt"))?;
    assert_eq!(lines[0], format!("1: a.txt: {}\n", top.display()));
    assert_eq!(lines[1], format!("1: a.txt: {}\n", nested.display()));
    Ok(())
}

#[test]
fn test_missing_target_reports_not_found_once() -> Result<()> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;

    let config = config_for(dir.path(), &["a.txt", "zzz.txt"]);
    let summary = run_search(&config)?;

    assert!(!summary.overall_success());
    let not_found: Vec<&str> = summary
        .messages
        .iter()
        .filter(|m| m.kind() == ResultKind::NotFound)
        .map(|m| m.payload())
        .collect();
    assert_eq!(not_found, vec!["2: zzz.txt: not found\n"]);
    Ok(())
}

#[test]
fn test_walk_stats_aggregate_across_workers() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("sub1"))?;
    fs::create_dir(dir.path().join("sub2"))?;
    File::create(dir.path().join("a.txt"))?;

    let mut config = config_for(dir.path(), &["a.txt", "b.txt"]);
    config.recursive = true;
    let summary = run_search(&config)?;

    // Two workers each walked the root and both subdirectories.
    assert_eq!(summary.walk_stats().dirs_visited, 6);
    Ok(())
}

#[test]
fn test_file_as_root_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let file_path = dir.path().join("plain.txt");
    File::create(&file_path)?;

    let config = config_for(&file_path, &["a.txt"]);
    assert!(matches!(
        run_search(&config),
        Err(SearchError::NotADirectory(_))
    ));
    Ok(())
}

#[test]
fn test_unstatable_entry_does_not_fail_the_worker() -> Result<()> {
    let dir = tempdir()?;
    // A dangling symlink has a name but no metadata behind it; the walk
    // skips that entry and still finds the sibling match.
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("sub").join("a.txt"))?;
    #[cfg(unix)]
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("broken"))?;

    let mut config = config_for(dir.path(), &["a.txt"]);
    config.recursive = true;
    let summary = run_search(&config)?;

    assert!(summary.overall_success());
    assert_eq!(summary.workers_failed, 0);
    assert_eq!(summary.total_matches, 1);
    #[cfg(unix)]
    assert_eq!(summary.walk_stats().entries_skipped, 1);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_does_not_fail_the_worker() -> Result<()> {
    use std::fs::Permissions;
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;
    fs::create_dir(dir.path().join("open"))?;
    File::create(dir.path().join("open").join("a.txt"))?;
    let locked = dir.path().join("locked");
    fs::create_dir(&locked)?;
    File::create(locked.join("a.txt"))?;

    fs::set_permissions(&locked, Permissions::from_mode(0o000))?;
    // Permission bits do not bind the superuser; nothing to exercise then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let mut config = config_for(dir.path(), &["a.txt"]);
    config.recursive = true;
    let summary = run_search(&config)?;
    fs::set_permissions(&locked, Permissions::from_mode(0o755))?;

    // The locked subtree drops out whole; the walk elsewhere is untouched
    // and the worker still succeeds.
    assert!(summary.overall_success());
    assert_eq!(summary.workers_failed, 0);
    assert_eq!(summary.total_matches, 2);
    assert_eq!(summary.walk_stats().dirs_skipped, 1);
    assert_eq!(summary.walk_stats().dirs_visited, 2);
    Ok(())
}
