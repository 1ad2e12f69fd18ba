//! [`SqliteWarehouse`] — the SQLite implementation of [`Warehouse`].

use std::{collections::HashSet, path::Path};

use recruit_core::{
  dimension::{Dimension, DimensionMember, FactApplication, KeyMap},
  warehouse::Warehouse,
};

use crate::{
  Error, Result,
  encode::{
    INSERT_FACT_SQL, ORPHAN_FACTS_SQL, count_sql, fact_values, insert_member_sql, member_values,
    select_key_map_sql, select_natural_keys_sql,
  },
  schema::{CONNECTION_PRAGMAS, SCHEMA},
};

// ─── Anti-join ───────────────────────────────────────────────────────────────

/// The members whose natural key is absent from `existing`, deduplicated by
/// natural key with the first occurrence kept.
pub(crate) fn anti_join(
  members: Vec<DimensionMember>,
  existing: &HashSet<String>,
) -> Vec<DimensionMember> {
  let mut seen = HashSet::new();
  members
    .into_iter()
    .filter(|m| {
      let key = m.natural_key();
      !existing.contains(&key) && seen.insert(key)
    })
    .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A star-schema warehouse backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteWarehouse {
  conn: tokio_rusqlite::Connection,
}

impl SqliteWarehouse {
  /// Open (or create) a warehouse at `path`. The schema is not touched; call
  /// [`Warehouse::ensure_schema`] before loading.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::with_connection(conn).await
  }

  /// Open an in-memory warehouse — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::with_connection(conn).await
  }

  async fn with_connection(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
      })
      .await?;
    Ok(Self { conn })
  }

  async fn count(&self, sql: String, column: &'static str) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(move |conn| Ok(conn.query_row(&sql, [], |row| row.get(0))?))
      .await?;
    usize::try_from(n).map_err(|_| Error::OutOfRange { column, value: n })
  }

  /// Number of rows currently in `dimension`.
  pub async fn count_members(&self, dimension: Dimension) -> Result<usize> {
    self.count(count_sql(dimension), dimension.table()).await
  }

  /// Number of rows in `fact_application`.
  pub async fn count_facts(&self) -> Result<usize> {
    self
      .count("SELECT COUNT(*) FROM fact_application".to_owned(), "fact_application")
      .await
  }

  /// Number of fact foreign keys that point at no dimension row. Zero after
  /// every successful load.
  pub async fn dangling_references(&self) -> Result<usize> {
    self.count(ORPHAN_FACTS_SQL.to_owned(), "fact_application").await
  }
}

// ─── Warehouse impl ──────────────────────────────────────────────────────────

impl Warehouse for SqliteWarehouse {
  type Error = Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_dimension(
    &self,
    dimension: Dimension,
    members: Vec<DimensionMember>,
  ) -> Result<usize> {
    if let Some(m) = members.iter().find(|m| m.dimension() != dimension) {
      return Err(Error::DimensionMismatch { expected: dimension, found: m.dimension() });
    }
    if members.is_empty() {
      return Ok(0);
    }

    let select_sql = select_natural_keys_sql(dimension);
    let insert_sql = insert_member_sql(dimension);

    // Read, diff and insert under one transaction so the existing-key set
    // cannot go stale between the read and the write.
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing: HashSet<String> = {
          let mut stmt = tx.prepare(&select_sql)?;
          let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<HashSet<String>>>()?;
          keys
        };

        let new_members = anti_join(members, &existing);
        {
          let mut stmt = tx.prepare(insert_sql)?;
          for member in &new_members {
            stmt.execute(rusqlite::params_from_iter(member_values(member)))?;
          }
        }

        tx.commit()?;
        Ok(new_members.len())
      })
      .await?;

    Ok(inserted)
  }

  async fn resolve_surrogate_keys(&self, dimension: Dimension) -> Result<KeyMap> {
    let sql = select_key_map_sql(dimension);

    let keys = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let map = stmt
          .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
          .collect::<rusqlite::Result<KeyMap>>()?;
        Ok(map)
      })
      .await?;

    Ok(keys)
  }

  async fn load_fact(&self, facts: Vec<FactApplication>) -> Result<usize> {
    if facts.is_empty() {
      return Ok(0);
    }

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(INSERT_FACT_SQL)?;
          for fact in &facts {
            stmt.execute(rusqlite::params_from_iter(fact_values(fact)))?;
          }
        }
        tx.commit()?;
        Ok(facts.len())
      })
      .await?;

    Ok(inserted)
  }
}
