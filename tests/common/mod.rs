use duojeu::db::Db;

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!("duojeu_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover files from previous runs (WAL mode leaves sidecars)
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
    }
    let url = path.to_str().expect("temp path is valid utf-8").to_string();
    Db::new(&url).await.expect("failed to create test database")
}
