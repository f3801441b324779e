use std::thread;

use election::{bootstrap_structures, STRUCTURAL_PATHS};
use election_modules::MemoryCoordinationStore;

pub fn run() {
    let store = MemoryCoordinationStore::new();

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                let (session, _events) = store.open_session();
                bootstrap_structures(&session).expect("first bootstrap succeeds");
                bootstrap_structures(&session).expect("repeated bootstrap succeeds");
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("bootstrap thread completes");
    }

    for path in STRUCTURAL_PATHS.iter() {
        assert!(store.node_exists(path), "{} exists", path);
        assert!(store.list_children(path).is_empty());
    }
    assert_eq!(
        vec!["barrier1".to_string(), "barrier2".to_string(), "election".to_string()],
        store.list_children("/")
    );
}
