//! Integration tests for VaultSession: record CRUD, search, and the
//! mutate-then-persist transaction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use passvault::crypto::Argon2Params;
use passvault::errors::Result;
use passvault::escrow::NoBiometric;
use passvault::storage::{FileBlobStorage, MemoryBlobStorage, SecureBlobStorage};
use passvault::vault::{RecordFields, VaultSession, VaultStore};
use passvault::VaultError;
use tempfile::TempDir;

/// Fast Argon2 params for tests (still above the enforced floor).
fn fast_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

/// Helper: an unlocked session over fresh in-memory storage.
fn memory_session() -> VaultSession {
    let mut store = VaultStore::with_params(
        Box::new(MemoryBlobStorage::new()),
        Box::new(NoBiometric),
        fast_params(),
    );
    let (key, vault) = store.create_vault("test-password").expect("create vault");
    VaultSession::new(store, key, vault)
}

/// A storage wrapper whose writes start failing once the shared flag
/// is raised.  Reads keep working.
struct FlakyStorage {
    inner: MemoryBlobStorage,
    fail_writes: Arc<AtomicBool>,
}

impl SecureBlobStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(VaultError::StorageFailure("disk full".into()));
        }
        self.inner.set(key, value)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(VaultError::StorageFailure("disk full".into()));
        }
        self.inner.delete(key)
    }
}

// ---------------------------------------------------------------------------
// Add
// ---------------------------------------------------------------------------

#[test]
fn add_record_assigns_unique_ids() {
    let mut session = memory_session();

    let mut ids = std::collections::HashSet::new();
    for i in 0..50 {
        let id = session
            .add_record(RecordFields::new(&format!("site{i}.com"), "user", "pw"))
            .expect("add record");
        assert!(ids.insert(id), "record ids must never collide");
    }
    assert_eq!(session.record_count(), 50);
}

#[test]
fn add_record_rejects_empty_fields() {
    let mut session = memory_session();

    for fields in [
        RecordFields::new("", "alice", "pw"),
        RecordFields::new("example.com", "", "pw"),
        RecordFields::new("example.com", "alice", ""),
    ] {
        let result = session.add_record(fields);
        assert!(matches!(result, Err(VaultError::InvalidRecord(_))));
    }
    assert_eq!(session.record_count(), 0);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_record_replaces_fields_and_keeps_id() {
    let mut session = memory_session();
    let id = session
        .add_record(RecordFields::new("example.com", "alice", "old-pw"))
        .expect("add");
    let created = session.records()[0].created_at;

    session
        .update_record(&id, RecordFields::new("example.com", "alice", "new-pw").with_folder("Work"))
        .expect("update");

    let record = &session.records()[0];
    assert_eq!(record.id, id);
    assert_eq!(record.password, "new-pw");
    assert_eq!(record.folder.as_deref(), Some("Work"));
    assert_eq!(record.created_at, created, "created_at is immutable");
    assert!(record.updated_at >= created);
}

#[test]
fn update_unknown_record_fails() {
    let mut session = memory_session();
    let result = session.update_record("no-such-id", RecordFields::new("a", "b", "c"));
    assert!(matches!(result, Err(VaultError::RecordNotFound(_))));
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_record_removes_it_from_search() {
    let mut session = memory_session();
    let id = session
        .add_record(RecordFields::new("example.com", "alice", "pw"))
        .expect("add");

    assert_eq!(session.search("example").len(), 1);

    session.delete_record(&id).expect("delete");
    assert!(session.search("example").is_empty());

    // Deleting again is an error, not a silent success.
    let result = session.delete_record(&id);
    assert!(matches!(result, Err(VaultError::RecordNotFound(_))));
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn search_is_case_insensitive_across_fields() {
    let mut session = memory_session();
    session
        .add_record(RecordFields::new("Example.COM", "alice", "pw"))
        .expect("add 1");
    session
        .add_record(RecordFields::new("other.net", "Bob-Example", "pw"))
        .expect("add 2");
    session
        .add_record(RecordFields::new("third.org", "carol", "pw").with_folder("examples"))
        .expect("add 3");
    session
        .add_record(RecordFields::new("unrelated.io", "dave", "pw"))
        .expect("add 4");

    // Matches site, username, and folder, regardless of case.
    assert_eq!(session.search("EXAMPLE").len(), 3);
    assert_eq!(session.search("bob").len(), 1);
    assert_eq!(session.search("no-match-here").len(), 0);
}

#[test]
fn empty_query_returns_every_record() {
    let mut session = memory_session();
    session
        .add_record(RecordFields::new("a.com", "a", "pw"))
        .expect("add 1");
    session
        .add_record(RecordFields::new("b.com", "b", "pw"))
        .expect("add 2");

    assert_eq!(session.search("").len(), 2);
}

// ---------------------------------------------------------------------------
// Durability
// ---------------------------------------------------------------------------

#[test]
fn every_mutation_is_persisted_before_success() {
    let dir = TempDir::new().expect("temp dir");
    let open_store = || {
        VaultStore::with_params(
            Box::new(FileBlobStorage::open(dir.path()).expect("open storage")),
            Box::new(NoBiometric),
            fast_params(),
        )
    };

    let mut store = open_store();
    let (key, vault) = store.create_vault("test-password").expect("create");
    let mut session = VaultSession::new(store, key, vault);
    let id = session
        .add_record(RecordFields::new("example.com", "alice", "pw-1"))
        .expect("add");
    session
        .update_record(&id, RecordFields::new("example.com", "alice", "pw-2"))
        .expect("update");

    // No explicit save call anywhere: the mutations alone must be durable.
    let (_key, vault) = open_store()
        .unlock_with_password("test-password")
        .expect("unlock");
    assert_eq!(vault.records.len(), 1);
    assert_eq!(vault.records[0].password, "pw-2");
}

#[test]
fn failed_persist_rolls_back_the_in_memory_change() {
    let fail_writes = Arc::new(AtomicBool::new(false));
    let mut store = VaultStore::with_params(
        Box::new(FlakyStorage {
            inner: MemoryBlobStorage::new(),
            fail_writes: Arc::clone(&fail_writes),
        }),
        Box::new(NoBiometric),
        fast_params(),
    );
    let (key, vault) = store.create_vault("test-password").expect("create");
    let mut session = VaultSession::new(store, key, vault);

    let id = session
        .add_record(RecordFields::new("example.com", "alice", "pw"))
        .expect("add while storage healthy");

    // Storage starts failing; the next mutations must report failure
    // and leave the in-memory vault exactly as it was.
    fail_writes.store(true, Ordering::SeqCst);

    let result = session.add_record(RecordFields::new("new.com", "bob", "pw"));
    assert!(matches!(result, Err(VaultError::StorageFailure(_))));
    assert_eq!(session.record_count(), 1);

    let result = session.delete_record(&id);
    assert!(matches!(result, Err(VaultError::StorageFailure(_))));
    assert_eq!(session.record_count(), 1, "delete must roll back too");

    let result = session.update_record(&id, RecordFields::new("example.com", "alice", "other"));
    assert!(matches!(result, Err(VaultError::StorageFailure(_))));
    assert_eq!(session.records()[0].password, "pw", "update must roll back too");

    // Storage recovers; the same mutation now succeeds.
    fail_writes.store(false, Ordering::SeqCst);
    session
        .update_record(&id, RecordFields::new("example.com", "alice", "other"))
        .expect("update after recovery");
    assert_eq!(session.records()[0].password, "other");
}

// ---------------------------------------------------------------------------
// Escrow opt-in and logout
// ---------------------------------------------------------------------------

#[test]
fn logout_clears_escrow_and_returns_the_store() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = VaultStore::with_params(
        Box::new(FileBlobStorage::open(dir.path()).expect("open storage")),
        Box::new(NoBiometric),
        fast_params(),
    );
    let (key, vault) = store.create_vault("test-password").expect("create");
    let mut session = VaultSession::new(store, key, vault);

    session.enable_biometric_escrow().expect("opt in");
    let store = session.logout().expect("logout");

    assert!(!store.escrow_enabled().unwrap());
    // The store is reusable for the next unlock.
    assert!(store.unlock_with_password("test-password").is_ok());
}

#[test]
fn debug_output_never_contains_the_password() {
    let mut session = memory_session();
    session
        .add_record(RecordFields::new("example.com", "alice", "hunter2-secret"))
        .expect("add");

    let rendered = format!("{:?}", session.records()[0]);
    assert!(!rendered.contains("hunter2-secret"));
    assert!(rendered.contains("<redacted>"));
}
