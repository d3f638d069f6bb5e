//! [`SqliteStore`] — the SQLite implementation of [`IdentityStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use veriface_core::{
  identity::{Identity, NewIdentity},
  store::{IdentityStore, StoreError},
};

use crate::{
  Error, Result,
  encode::{RawIdentity, encode_descriptor, encode_dt, encode_uuid},
  schema::SCHEMA,
};

const SELECT_COLUMNS: &str =
  "identity_id, full_name, document_id, role, descriptor, enrolled_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Veriface identity store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch a single identity by an exact-match column.
  ///
  /// `column` is interpolated from a fixed set of call sites, never from
  /// caller input.
  async fn fetch_by(&self, column: &'static str, key: String) -> Result<Option<Identity>> {
    let sql =
      format!("SELECT {SELECT_COLUMNS} FROM identities WHERE {column} = ?1");

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![key], read_raw_identity)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }
}

fn read_raw_identity(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawIdentity> {
  Ok(RawIdentity {
    identity_id: row.get(0)?,
    full_name:   row.get(1)?,
    document_id: row.get(2)?,
    role:        row.get(3)?,
    descriptor:  row.get(4)?,
    enrolled_at: row.get(5)?,
  })
}

/// Whether a database error is the `identities.document_id` UNIQUE
/// constraint firing.
fn is_unique_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── IdentityStore impl ──────────────────────────────────────────────────────

impl IdentityStore for SqliteStore {
  async fn insert(&self, input: NewIdentity) -> Result<Identity, StoreError> {
    let identity = Identity {
      identity_id: Uuid::new_v4(),
      full_name:   input.full_name,
      document_id: input.document_id,
      role:        input.role,
      descriptor:  input.descriptor,
      enrolled_at: Utc::now(),
    };

    let id_str         = encode_uuid(identity.identity_id);
    let full_name      = identity.full_name.clone();
    let document_id    = identity.document_id.clone();
    let role           = identity.role.clone();
    let descriptor_str =
      encode_descriptor(&identity.descriptor).map_err(StoreError::from)?;
    let at_str         = encode_dt(identity.enrolled_at);

    let inserted = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO identities (
             identity_id, full_name, document_id, role, descriptor, enrolled_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str,
            full_name,
            document_id,
            role,
            descriptor_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await;

    match inserted {
      Ok(()) => Ok(identity),
      // The constraint is the authority on uniqueness; a racing insert that
      // slipped past any pre-check lands here.
      Err(ref err) if is_unique_violation(err) => {
        Err(StoreError::DocumentIdTaken {
          document_id: identity.document_id,
        })
      }
      Err(err) => Err(Error::Database(err).into()),
    }
  }

  async fn find_by_document_id(
    &self,
    document_id: &str,
  ) -> Result<Option<Identity>, StoreError> {
    self
      .fetch_by("document_id", document_id.to_owned())
      .await
      .map_err(StoreError::from)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Identity>, StoreError> {
    self
      .fetch_by("identity_id", encode_uuid(id))
      .await
      .map_err(StoreError::from)
  }

  async fn list_all(&self) -> Result<Vec<Identity>, StoreError> {
    let raws: Vec<RawIdentity> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SELECT_COLUMNS} FROM identities ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map([], read_raw_identity)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
      .map_err(Error::Database)?;

    raws
      .into_iter()
      .map(RawIdentity::into_identity)
      .collect::<Result<_>>()
      .map_err(StoreError::from)
  }
}
