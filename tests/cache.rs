mod common;

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use fitplan_rs::state::AppState;

#[test]
fn dataset_cache_serves_same_snapshot_until_file_changes() {
    let path = common::write_dataset("cache", &common::sample_csv());
    let state = AppState::new(common::test_config(path.clone()));

    let first = state.records().expect("records");
    assert_eq!(first.len(), 3);

    // Unchanged mtime: the cached snapshot is reused, not re-parsed.
    let second = state.records().expect("records");
    assert!(Arc::ptr_eq(&first, &second));

    let extra_row = "4,Karan,35,M,Mumbai,Teacher,Eggetarian,No,74,170,25.6,20.2,Cycling,50,410,125,70,9000,7.0,3.0,4,Intermediate,Endurance,5,2,75";
    std::fs::write(&path, format!("{}\n{extra_row}", common::sample_csv())).expect("rewrite");

    // Push the mtime well past the original in case the filesystem's
    // timestamp resolution is coarse.
    let file = std::fs::OpenOptions::new()
        .write(true)
        .open(&path)
        .expect("open dataset");
    file.set_modified(SystemTime::now() + Duration::from_secs(5))
        .expect("set mtime");

    let reloaded = state.records().expect("records");
    assert_eq!(reloaded.len(), 4);
    assert_eq!(reloaded[3].name, "Karan");
}
