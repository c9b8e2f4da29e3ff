//! Property tests: backup followed by setup reproduces the home tree

use dotbackup_core::{Config, Overrides, SyncEngine};
use dotbackup_test_utils::home::TestHome;
use dotbackup_test_utils::tree::snapshot;
use proptest::prelude::*;
use std::collections::BTreeMap;

const CONFIG: &str = "\
backup_dir: ~/backup
ignore: ['*.tmp']
apps:
  app:
    files: [~/.config/app]
";

fn tree() -> impl Strategy<Value = BTreeMap<String, String>> {
    // Directories start with `d` and files with `f`, so no path is both.
    prop::collection::btree_map("(d[a-c]/){0,2}f[a-c]{1,3}(\\.tmp)?", "[ -~]{0,24}", 1..8)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_backup_then_setup_restores_tree(files in tree()) {
        let source = TestHome::with_backup_dir();
        for (path, content) in &files {
            source.write(&format!("~/.config/app/{path}"), content);
        }
        let config = Config::load(&source.write_config(CONFIG)).unwrap();
        SyncEngine::new(source.home_dir())
            .backup(&config.effective(&Overrides::default()))
            .unwrap();

        // Delete the original and restore it from the backup.
        let original = snapshot(&source.join("~/.config/app"));
        source.remove("~/.config/app");
        SyncEngine::new(source.home_dir())
            .setup(&config.effective(&Overrides::default()))
            .unwrap();

        let expected: Vec<_> = original
            .into_iter()
            .filter(|(path, _)| !path.ends_with(".tmp"))
            .collect();
        prop_assert_eq!(snapshot(&source.join("~/.config/app")), expected);
    }
}
