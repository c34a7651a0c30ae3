use std::collections::BTreeMap;
use std::sync::Mutex;

use diesel::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::shared::schema::contacts;
use crate::shared::utils::DbPool;

use super::{Contact, ContactPatch, ContactReplacement, NewContact};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("contact not found")]
    NotFound,
    #[error("contact id already exists")]
    Conflict,
    #[error("DB error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("Query error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => Self::Conflict,
            other => Self::Database(other),
        }
    }
}

/// Listing knobs. The original's collection-query pipeline is an external
/// collaborator; this keeps only the thin limit/offset/search layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Store seam for contact records. One connection per call, no shared
/// cache; delete reports whether a row existed instead of failing.
pub trait ContactRepository: Send + Sync {
    fn list(&self, query: &ListQuery) -> Result<Vec<Contact>, StoreError>;
    fn get(&self, id: i64) -> Result<Contact, StoreError>;
    fn create(&self, new: NewContact) -> Result<Contact, StoreError>;
    fn replace(&self, id: i64, update: ContactReplacement) -> Result<Contact, StoreError>;
    fn patch(&self, id: i64, patch: ContactPatch) -> Result<Contact, StoreError>;
    fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

pub struct PgContactRepository {
    pool: DbPool,
}

impl PgContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for PgContactRepository {
    fn list(&self, query: &ListQuery) -> Result<Vec<Contact>, StoreError> {
        let mut conn = self.pool.get()?;
        let mut q = contacts::table.into_boxed();

        if let Some(search) = &query.search {
            let pattern = format!("%{search}%");
            q = q.filter(
                contacts::name
                    .ilike(pattern.clone())
                    .or(contacts::email.ilike(pattern)),
            );
        }
        if let Some(limit) = query.limit {
            q = q.limit(limit);
        }
        if let Some(offset) = query.offset {
            q = q.offset(offset);
        }

        Ok(q.order(contacts::id.asc()).load(&mut conn)?)
    }

    fn get(&self, id: i64) -> Result<Contact, StoreError> {
        let mut conn = self.pool.get()?;
        contacts::table
            .find(id)
            .first(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn create(&self, new: NewContact) -> Result<Contact, StoreError> {
        let mut conn = self.pool.get()?;

        if let Some(id) = new.id {
            let existing: Option<i64> = contacts::table
                .find(id)
                .select(contacts::id)
                .first(&mut conn)
                .optional()?;
            if existing.is_some() {
                return Err(StoreError::Conflict);
            }
        }

        Ok(diesel::insert_into(contacts::table)
            .values(&new)
            .get_result(&mut conn)?)
    }

    fn replace(&self, id: i64, update: ContactReplacement) -> Result<Contact, StoreError> {
        let mut conn = self.pool.get()?;
        diesel::update(contacts::table.find(id))
            .set(&update)
            .get_result(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn patch(&self, id: i64, patch: ContactPatch) -> Result<Contact, StoreError> {
        // diesel rejects empty changesets; an empty merge-patch is a no-op.
        if patch.is_empty() {
            return self.get(id);
        }

        let mut conn = self.pool.get()?;
        diesel::update(contacts::table.find(id))
            .set(&patch)
            .get_result(&mut conn)
            .optional()?
            .ok_or(StoreError::NotFound)
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(contacts::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

/// In-memory repository backing handler and integration tests; same
/// contract as the Postgres one, including explicit-id conflicts.
#[derive(Default)]
pub struct MemoryContactRepository {
    inner: Mutex<MemoryInner>,
}

struct MemoryInner {
    rows: BTreeMap<i64, Contact>,
    next_id: i64,
}

impl Default for MemoryInner {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContactRepository for MemoryContactRepository {
    fn list(&self, query: &ListQuery) -> Result<Vec<Contact>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let matches = |c: &Contact| match &query.search {
            Some(search) => {
                let needle = search.to_lowercase();
                let hit = |f: &Option<String>| {
                    f.as_deref()
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
                };
                hit(&c.name) || hit(&c.email)
            }
            None => true,
        };

        let offset = query.offset.unwrap_or(0).max(0) as usize;
        let limit = query.limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);

        Ok(inner
            .rows
            .values()
            .filter(|c| matches(c))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn get(&self, id: i64) -> Result<Contact, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn create(&self, new: NewContact) -> Result<Contact, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = match new.id {
            Some(id) => {
                if inner.rows.contains_key(&id) {
                    return Err(StoreError::Conflict);
                }
                id
            }
            None => inner.next_id,
        };
        inner.next_id = inner.next_id.max(id + 1);

        let contact = new.into_contact(id);
        inner.rows.insert(id, contact.clone());
        Ok(contact)
    }

    fn replace(&self, id: i64, update: ContactReplacement) -> Result<Contact, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let contact = inner.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        update.apply_to(contact);
        Ok(contact.clone())
    }

    fn patch(&self, id: i64, patch: ContactPatch) -> Result<Contact, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let contact = inner.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        patch.apply_to(contact);
        Ok(contact.clone())
    }

    fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.rows.remove(&id).is_some())
    }
}
