//! End-to-end tests for the SyncEngine against a throwaway home directory

use dotbackup_core::{Config, Direction, Error, Overrides, SyncEngine, SyncReport};
use dotbackup_test_utils::home::TestHome;
use dotbackup_test_utils::tree::{file_list, snapshot};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn load(home: &TestHome, yaml: &str) -> Config {
    Config::load(&home.write_config(yaml)).unwrap()
}

fn run(
    home: &TestHome,
    config: &Config,
    overrides: Overrides,
    direction: Direction,
) -> dotbackup_core::Result<SyncReport> {
    let engine = SyncEngine::new(home.home_dir());
    engine.run(&config.effective(&overrides), direction)
}

fn select(apps: &[&str]) -> Overrides {
    Overrides {
        clean: false,
        apps: apps.iter().map(|app| app.to_string()).collect(),
    }
}

fn clean() -> Overrides {
    Overrides {
        clean: true,
        apps: vec![],
    }
}

const SINGLE_APP: &str = "\
backup_dir: ~/backup
apps:
  app_a:
    files: [~/.config/app_a]
";

#[test]
fn test_backup_then_setup_round_trip() {
    let home = TestHome::with_backup_dir();
    home.write("~/.config/app_a/x.txt", "hello");
    let config = load(&home, SINGLE_APP);

    let report = run(&home, &config, Overrides::default(), Direction::Backup).unwrap();
    assert_eq!(report.app_names(), vec!["app_a"]);
    assert_eq!(report.copied_count(), 1);
    assert_eq!(home.read("~/backup/app_a/.config/app_a/x.txt"), "hello");

    home.remove("~/.config/app_a");
    run(&home, &config, Overrides::default(), Direction::Setup).unwrap();
    assert_eq!(home.read("~/.config/app_a/x.txt"), "hello");
}

#[test]
fn test_backup_is_idempotent() {
    let home = TestHome::with_backup_dir();
    home.write("~/.config/app_a/x.txt", "hello");
    home.write("~/.config/app_a/nested/y.txt", "world");
    let config = load(&home, SINGLE_APP);

    run(&home, &config, Overrides::default(), Direction::Backup).unwrap();
    let first = snapshot(&home.backup_dir());
    run(&home, &config, Overrides::default(), Direction::Backup).unwrap();
    let second = snapshot(&home.backup_dir());

    assert_eq!(first, second);
    assert_eq!(
        snapshot(&home.join("~/.config/app_a")),
        snapshot(&home.join("~/backup/app_a/.config/app_a"))
    );
}

#[test]
fn test_missing_source_is_skipped() {
    let home = TestHome::with_backup_dir();
    home.write("~/.present", "here");
    let config = load(
        &home,
        "backup_dir: ~/backup\napps:\n  app:\n    files: [~/.absent, ~/.present]\n",
    );

    let report = run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

    assert_eq!(report.skipped(), vec![home.join("~/.absent").as_path()]);
    assert_eq!(home.read("~/backup/app/.present"), "here");
    home.assert_file_not_exists("~/backup/app/.absent");
}

#[test]
fn test_setup_with_empty_backup_is_skipped_not_failed() {
    let home = TestHome::with_backup_dir();
    let config = load(&home, SINGLE_APP);

    let report = run(&home, &config, Overrides::default(), Direction::Setup).unwrap();

    assert_eq!(report.copied_count(), 0);
    assert_eq!(report.skipped().len(), 1);
}

#[rstest]
#[case::only_a(&["app_a"], &["app_a"])]
#[case::only_b(&["app_b"], &["app_b"])]
#[case::given_order(&["app_b", "app_a"], &["app_b", "app_a"])]
#[case::all(&[], &["app_a", "app_b"])]
fn test_selection(#[case] selected: &[&str], #[case] processed: &[&str]) {
    let home = TestHome::with_backup_dir();
    home.write("~/.a", "a");
    home.write("~/.b", "b");
    let config = load(
        &home,
        "backup_dir: ~/backup\napps:\n  app_a:\n    files: [~/.a]\n  app_b:\n    files: [~/.b]\n",
    );

    let report = run(&home, &config, select(selected), Direction::Backup).unwrap();

    assert_eq!(report.app_names(), processed);
    for app in ["app_a", "app_b"] {
        let written = home.join(&format!("~/backup/{app}")).exists();
        assert_eq!(written, processed.contains(&app), "backup of {app}");
    }
}

#[test]
fn test_unknown_app_fails_before_any_hook() {
    let home = TestHome::with_backup_dir();
    home.write("~/.a", "a");
    let yaml = format!(
        "backup_dir: ~/backup\npre_backup: [\"{}\"]\napps:\n  app_a:\n    files: [~/.a]\n",
        home.hook_echo("pre")
    );
    let config = load(&home, &yaml);

    let err = run(&home, &config, select(&["app_a", "missing"]), Direction::Backup).unwrap_err();

    assert_eq!(err.to_string(), "application not configured: missing");
    assert!(home.hook_log().is_empty());
    home.assert_file_not_exists("~/backup/app_a");
}

#[test]
fn test_file_outside_home_fails_before_any_copy() {
    let home = TestHome::with_backup_dir();
    home.write("~/.a", "a");
    let outside = home.outside().join("etc.conf");
    let yaml = format!(
        "backup_dir: ~/backup\npre_backup: [\"{}\"]\napps:\n  app_a:\n    files: [~/.a]\n  app_z:\n    files: ['{}']\n",
        home.hook_echo("pre"),
        outside.display()
    );
    let config = load(&home, &yaml);

    // app_z is not selected, yet its bad entry still aborts the run
    let err = run(&home, &config, select(&["app_a"]), Direction::Backup).unwrap_err();

    assert!(matches!(err, Error::OutsideHome { ref app, .. } if app == "app_z"));
    assert!(home.hook_log().is_empty());
    home.assert_file_not_exists("~/backup/app_a");
}

#[test]
fn test_backup_dir_not_found() {
    let home = TestHome::new();
    let config = load(&home, SINGLE_APP);

    let err = run(&home, &config, Overrides::default(), Direction::Backup).unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("backup directory not found: {}", home.backup_dir().display())
    );
}

#[test]
fn test_clean_erases_stale_backup_files() {
    let home = TestHome::with_backup_dir();
    home.write("~/.config/app_a/x.txt", "new");
    home.write("~/backup/app_a/.config/app_a/stale.txt", "old");
    let config = load(&home, SINGLE_APP);

    let report = run(&home, &config, clean(), Direction::Backup).unwrap();

    assert_eq!(
        report.erased(),
        vec![home.join("~/backup/app_a/.config/app_a").as_path()]
    );
    home.assert_file_not_exists("~/backup/app_a/.config/app_a/stale.txt");
    assert_eq!(home.read("~/backup/app_a/.config/app_a/x.txt"), "new");
}

#[test]
fn test_without_clean_stale_files_survive() {
    let home = TestHome::with_backup_dir();
    home.write("~/.config/app_a/x.txt", "new");
    home.write("~/.config/app_a/shared.txt", "fresh");
    home.write("~/backup/app_a/.config/app_a/stale.txt", "old");
    home.write("~/backup/app_a/.config/app_a/shared.txt", "outdated");
    let config = load(&home, SINGLE_APP);

    let report = run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

    assert!(report.erased().is_empty());
    assert_eq!(home.read("~/backup/app_a/.config/app_a/stale.txt"), "old");
    assert_eq!(home.read("~/backup/app_a/.config/app_a/shared.txt"), "fresh");
}

#[test]
fn test_clean_from_config_applies_to_setup() {
    let home = TestHome::with_backup_dir();
    home.write("~/backup/app_a/.config/app_a/x.txt", "restored");
    home.write("~/.config/app_a/local-only.txt", "dirty");
    let config = load(&home, &format!("clean: true\n{SINGLE_APP}"));

    run(&home, &config, Overrides::default(), Direction::Setup).unwrap();

    home.assert_file_not_exists("~/.config/app_a/local-only.txt");
    assert_eq!(home.read("~/.config/app_a/x.txt"), "restored");
}

#[test]
fn test_clean_with_missing_source_leaves_nothing() {
    let home = TestHome::with_backup_dir();
    home.write("~/backup/app_a/.config/app_a/x.txt", "old");
    let config = load(&home, SINGLE_APP);

    let report = run(&home, &config, clean(), Direction::Backup).unwrap();

    assert_eq!(report.skipped().len(), 1);
    home.assert_file_not_exists("~/backup/app_a/.config/app_a");
}

#[test]
fn test_global_and_app_ignore_patterns() {
    let home = TestHome::with_backup_dir();
    home.write("~/.config/app/keep.txt", "keep");
    home.write("~/.config/app/cache.log", "global");
    home.write("~/.config/app/session.swp", "app");
    home.write("~/.config/app/sub/cache.log", "global, nested");
    home.write("~/.config/app/sub/real.conf", "keep");
    let config = load(
        &home,
        "backup_dir: ~/backup\nignore: ['*.log']\napps:\n  app:\n    files: [~/.config/app]\n    ignore: ['*.swp']\n",
    );

    run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

    let files = file_list(&home.join("~/backup/app/.config/app"));
    assert_eq!(files, vec!["keep.txt", "sub/real.conf"]);
}

#[test]
fn test_double_star_ignore_pattern_matches_within_name() {
    let home = TestHome::with_backup_dir();
    home.write("~/.config/app/cache-data", "skip");
    home.write("~/.config/app/keep", "keep");
    let config = load(
        &home,
        "backup_dir: ~/backup
ignore: ['cache**']
apps:
  app:
    files: [~/.config/app]
",
    );

    run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

    assert_eq!(file_list(&home.join("~/backup/app/.config/app")), vec!["keep"]);
}

#[test]
fn test_ignore_does_not_apply_to_listed_entry() {
    let home = TestHome::with_backup_dir();
    home.write("~/debug.log", "listed explicitly");
    let config = load(
        &home,
        "backup_dir: ~/backup\nignore: ['*.log']\napps:\n  app:\n    files: [~/debug.log]\n",
    );

    run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

    assert_eq!(home.read("~/backup/app/debug.log"), "listed explicitly");
}

#[cfg(unix)]
mod hooks {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hooked_config(home: &TestHome) -> Config {
        let echo = |message: &str| format!("\"{}\"", home.hook_echo(message));
        let yaml = format!(
            "\
backup_dir: ~/backup
pre_backup: [{}]
post_backup: [{}]
pre_setup: [{}]
post_setup: [{}]
apps:
  app_a:
    pre_backup: [{}]
    post_backup: [{}]
  app_b:
    pre_backup: [{}, {}]
    post_setup: [{}]
",
            echo("pre_backup"),
            echo("post_backup"),
            echo("pre_setup"),
            echo("post_setup"),
            echo("app_a_pre_backup"),
            echo("app_a_post_backup"),
            echo("app_b_pre_backup_1"),
            echo("app_b_pre_backup_2"),
            echo("app_b_post_setup"),
        );
        load(home, &yaml)
    }

    #[test]
    fn test_backup_hook_order() {
        let home = TestHome::with_backup_dir();
        let config = hooked_config(&home);

        let report = run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

        assert_eq!(
            home.hook_log(),
            vec![
                "pre_backup",
                "app_a_pre_backup",
                "app_a_post_backup",
                "app_b_pre_backup_1",
                "app_b_pre_backup_2",
                "post_backup",
            ]
        );
        assert_eq!(report.hooks_run, 2);
        assert_eq!(report.total_hooks_run(), 6);
    }

    #[test]
    fn test_setup_hook_order_with_selection() {
        let home = TestHome::with_backup_dir();
        let config = hooked_config(&home);

        run(&home, &config, select(&["app_b"]), Direction::Setup).unwrap();

        assert_eq!(
            home.hook_log(),
            vec!["pre_setup", "app_b_post_setup", "post_setup"]
        );
    }

    #[test]
    fn test_failing_hook_stops_the_run() {
        let home = TestHome::with_backup_dir();
        home.write("~/.a", "a");
        home.write("~/.b", "b");
        let yaml = format!(
            "\
backup_dir: ~/backup
post_backup: [\"{}\"]
apps:
  app_a:
    files: [~/.a]
    post_backup: [\"exit 7\", \"{}\"]
  app_b:
    files: [~/.b]
",
            home.hook_echo("post_backup"),
            home.hook_echo("after_failure"),
        );
        let config = load(&home, &yaml);

        let err = run(&home, &config, Overrides::default(), Direction::Backup).unwrap_err();

        assert_eq!(err.to_string(), "command failed: exit 7");
        // app_a's copy happened before its post hook failed
        home.assert_file_exists("~/backup/app_a/.a");
        home.assert_file_not_exists("~/backup/app_b");
        assert!(home.hook_log().is_empty());
    }

    #[test]
    fn test_failing_app_pre_hook_skips_everything_after_it() {
        let home = TestHome::with_backup_dir();
        home.write("~/.a", "a");
        home.write("~/.b", "b");
        let yaml = format!(
            "\
backup_dir: ~/backup
pre_backup: [\"{}\"]
post_backup: [\"{}\"]
apps:
  app_a:
    files: [~/.a]
    pre_backup: ['false']
    post_backup: [\"{}\"]
  app_b:
    files: [~/.b]
    pre_backup: [\"{}\"]
    post_backup: [\"{}\"]
",
            home.hook_echo("pre_global"),
            home.hook_echo("post_global"),
            home.hook_echo("app_a_post"),
            home.hook_echo("app_b_pre"),
            home.hook_echo("app_b_post"),
        );
        let config = load(&home, &yaml);

        let err = run(&home, &config, Overrides::default(), Direction::Backup).unwrap_err();

        assert_eq!(err.to_string(), "command failed: false");
        assert_eq!(home.hook_log(), vec!["pre_global"]);
        home.assert_file_not_exists("~/backup/app_a");
        home.assert_file_not_exists("~/backup/app_b");
    }

    #[test]
    fn test_hooks_see_backup_dir() {
        let home = TestHome::with_backup_dir();
        let yaml = format!(
            "backup_dir: ~/backup\npre_backup: ['printf %s \"$BACKUP_DIR\" > \"{}\"']\n",
            home.join("seen").display()
        );
        let config = load(&home, &yaml);

        run(&home, &config, Overrides::default(), Direction::Backup).unwrap();

        assert_eq!(home.read("seen"), home.backup_dir().display().to_string());
    }

    #[test]
    fn test_failing_global_pre_hook_copies_nothing() {
        let home = TestHome::with_backup_dir();
        home.write("~/.config/app_a/x.txt", "hello");
        let config = load(&home, &format!("pre_backup: ['false']\n{SINGLE_APP}"));

        let err = run(&home, &config, Overrides::default(), Direction::Backup).unwrap_err();

        assert!(matches!(err, Error::HookFailed { ref label, .. } if label == "pre-backup"));
        home.assert_file_not_exists("~/backup/app_a");
    }
}
