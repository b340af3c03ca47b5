use jot_config::Postgres;
use jot_storage::{Error, NoteId, NoteStore, PgStore};
use jot_testkit::TestDatabase;

async fn test_store() -> Option<(TestDatabase, PgStore)> {
	let Some(base_dsn) = jot_testkit::env_dsn() else {
		eprintln!("Skipping Postgres store tests; set JOT_PG_DSN to run this test.");

		return None;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 2 };
	let store = PgStore::connect(&cfg).await.expect("Failed to connect to Postgres.");

	store.ensure_schema().await.expect("Failed to ensure schema.");

	Some((test_db, store))
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn ensure_schema_is_idempotent() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};

	store.ensure_schema().await.expect("Second ensure_schema must succeed.");

	let count: i64 = sqlx::query_scalar(
		"SELECT count(*) FROM information_schema.tables WHERE table_name = 'notes'",
	)
	.fetch_one(&store.pool)
	.await
	.expect("Failed to query schema tables.");

	assert_eq!(count, 1);

	store.flush().await.expect("Failed to close pool.");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn lists_own_notes_oldest_first() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};
	let first = store.create("alice", "one").await.expect("Failed to create note.");

	store.create("bob", "not yours").await.expect("Failed to create note.");

	let second = store.create("alice", "two").await.expect("Failed to create note.");

	assert!(matches!(first.id, NoteId::Uuid(_)));
	assert_eq!(store.list_by_author("alice").await.expect("Failed to list."), vec![first, second]);

	store.flush().await.expect("Failed to close pool.");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set JOT_PG_DSN to run."]
async fn delete_checks_existence_then_ownership() {
	let Some((test_db, store)) = test_store().await else {
		return;
	};
	let note = store.create("alice", "mine").await.expect("Failed to create note.");
	let missing = NoteId::Uuid(uuid::Uuid::new_v4());
	let err = store.delete(&missing, "alice").await.expect_err("Expected NotFound.");

	assert!(matches!(err, Error::NotFound(_)), "Unexpected error: {err:?}");

	let err = store.delete(&NoteId::Seq(42), "alice").await.expect_err("Expected NotFound.");

	assert!(matches!(err, Error::NotFound(_)), "Unexpected error: {err:?}");

	let err = store.delete(&note.id, "bob").await.expect_err("Expected Forbidden.");

	assert!(matches!(err, Error::Forbidden(_)), "Unexpected error: {err:?}");
	assert_eq!(store.list_by_author("alice").await.expect("Failed to list.").len(), 1);

	store.delete(&note.id, "alice").await.expect("Owner must be able to delete.");

	assert!(store.list_by_author("alice").await.expect("Failed to list.").is_empty());

	store.flush().await.expect("Failed to close pool.");
	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
