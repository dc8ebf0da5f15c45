//! Reload triggered by a change to the source file.

use std::sync::Arc;
use std::time::Duration;

use hotconf::config::{ConfigStore, ConfigWatcher};

mod common;

use common::{wait_until, Fixture};

#[tokio::test]
async fn test_file_change_triggers_reload() {
    let fixture = Fixture::new("conf.yaml", "limits:\n  max: 10\n");
    let store = Arc::new(ConfigStore::open(&fixture.path).unwrap());

    let _watcher = ConfigWatcher::new(store.clone(), &fixture.path)
        .run()
        .unwrap();

    fixture.rewrite("limits:\n  max: 20\n");

    assert!(wait_until(Duration::from_secs(10), || store.get_int("limits.max") == 20).await);
}
