use sqlx::{PgPool, postgres::PgPoolOptions};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{BoxFuture, Error, Note, NoteId, NoteStore, Result, schema};

const SCHEMA_LOCK_ID: i64 = 4_207_315;

#[derive(Debug, sqlx::FromRow)]
pub struct NoteRow {
	pub id: Uuid,
	pub author: String,
	pub content: String,
	pub created_at: OffsetDateTime,
}
impl From<NoteRow> for Note {
	fn from(row: NoteRow) -> Self {
		Self { id: NoteId::Uuid(row.id), author: row.author, content: row.content }
	}
}

/// Notes stored in a remote Postgres table. Every call is a round trip; nothing is cached.
pub struct PgStore {
	pub pool: PgPool,
}
impl PgStore {
	pub async fn connect(cfg: &jot_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self) -> Result<()> {
		// Advisory locks are held per connection. Use a single transaction so the lock is scoped to
		// one connection and automatically released when the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in schema::statements() {
			sqlx::query(statement).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}
}
impl NoteStore for PgStore {
	fn backend(&self) -> &'static str {
		"postgres"
	}

	fn list_by_author<'a>(&'a self, author: &'a str) -> BoxFuture<'a, Result<Vec<Note>>> {
		Box::pin(async move {
			let rows: Vec<NoteRow> = sqlx::query_as(
				"\
SELECT id, author, content, created_at
FROM notes
WHERE author = $1
ORDER BY created_at ASC, id ASC",
			)
			.bind(author)
			.fetch_all(&self.pool)
			.await?;

			Ok(rows.into_iter().map(Note::from).collect())
		})
	}

	fn create<'a>(&'a self, author: &'a str, content: &'a str) -> BoxFuture<'a, Result<Note>> {
		Box::pin(async move {
			let row: NoteRow = sqlx::query_as(
				"\
INSERT INTO notes (author, content)
VALUES ($1, $2)
RETURNING id, author, content, created_at",
			)
			.bind(author)
			.bind(content)
			.fetch_one(&self.pool)
			.await?;

			Ok(row.into())
		})
	}

	fn delete<'a>(&'a self, id: &'a NoteId, author: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			// Ids minted by the file backend can never match a row here.
			let Some(note_id) = id.as_uuid() else {
				return Err(Error::NotFound(format!("Note {id} does not exist.")));
			};
			let mut tx = self.pool.begin().await?;
			let owner: Option<String> =
				sqlx::query_scalar("SELECT author FROM notes WHERE id = $1 FOR UPDATE")
					.bind(note_id)
					.fetch_optional(&mut *tx)
					.await?;

			match owner {
				None => return Err(Error::NotFound(format!("Note {id} does not exist."))),
				Some(owner) if owner != author =>
					return Err(Error::Forbidden(format!("Note {id} belongs to another author."))),
				Some(_) => {},
			}

			sqlx::query("DELETE FROM notes WHERE id = $1").bind(note_id).execute(&mut *tx).await?;

			tx.commit().await?;

			Ok(())
		})
	}

	fn flush(&self) -> BoxFuture<'_, Result<()>> {
		Box::pin(async move {
			self.pool.close().await;

			Ok(())
		})
	}
}
