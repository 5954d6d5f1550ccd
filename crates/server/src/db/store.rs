use exemplar::Model;
use rusqlite::{Connection, TransactionBehavior};
use shared::{
    api::payloads::UserSummary,
    model::{ExerciseRecord, NewUser, UserAccount},
    types::Uuid,
};
use thiserror::Error;
use tracing::{debug, instrument};

use super::model::{Exercise, User};

/// Persistence for user accounts and their logs
pub trait UserStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every user without their log
    fn find(&self) -> Result<Vec<UserSummary>, Self::Error>;

    fn find_one(&self, id: &Uuid) -> Result<Option<UserAccount>, Self::Error>;

    fn create(&mut self, new_user: NewUser) -> Result<UserAccount, Self::Error>;

    /// Writes the account back and returns it as stored
    fn save(&mut self, account: &UserAccount) -> Result<UserAccount, Self::Error>;

    /// Adds `record` to the end of the stored log in one write, whatever else
    /// was appended since the log was read. `None` if the user doesn't exist
    fn append(
        &mut self,
        id: &Uuid,
        record: &ExerciseRecord,
    ) -> Result<Option<UserAccount>, Self::Error>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("user {id} not found")]
    MissingUser { id: Uuid },
    #[error("log of user {id} changed since it was read")]
    Conflict { id: Uuid },
}

/// A [`UserStore`] over one SQLite connection, usually a pooled one borrowed
/// inside `interact`
pub struct SqliteUserStore<'c> {
    conn: &'c mut Connection,
}

impl<'c> SqliteUserStore<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }
}

fn load_account(conn: &Connection, id: &Uuid) -> Result<Option<UserAccount>, rusqlite::Error> {
    let Some(user) = User::fetch_by_id(conn, id)? else {
        return Ok(None);
    };

    let log = Exercise::fetch_for_user(conn, id)?
        .into_iter()
        .map(ExerciseRecord::from)
        .collect();

    Ok(Some(UserAccount {
        id: user.id,
        username: user.username,
        log,
    }))
}

impl UserStore for SqliteUserStore<'_> {
    type Error = StoreError;

    fn find(&self) -> Result<Vec<UserSummary>, Self::Error> {
        let users = User::fetch_all(&*self.conn)?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    fn find_one(&self, id: &Uuid) -> Result<Option<UserAccount>, Self::Error> {
        Ok(load_account(&*self.conn, id)?)
    }

    #[instrument(skip(self))]
    fn create(&mut self, new_user: NewUser) -> Result<UserAccount, Self::Error> {
        let user = User::from(new_user);
        user.insert(&*self.conn)?;

        Ok(UserAccount {
            id: user.id,
            username: user.username,
            log: Vec::new(),
        })
    }

    /// Log entries are immutable so only the tail past what is already stored
    /// gets inserted. Rows past the end of `account.log` are removed. Fails
    /// with [`StoreError::Conflict`] if the stored entries are no longer the
    /// ones the account was read with
    #[instrument(skip(self, account), fields(id = %account.id))]
    fn save(&mut self, account: &UserAccount) -> Result<UserAccount, Self::Error> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(stored) = load_account(&tx, &account.id)? else {
            return Err(StoreError::MissingUser { id: account.id });
        };

        let shared = stored.log.len().min(account.log.len());
        if stored.log[..shared] != account.log[..shared] {
            return Err(StoreError::Conflict { id: account.id });
        }

        let user = User {
            id: account.id,
            username: account.username.clone(),
        };
        user.update(&tx)?;

        if stored.log.len() > account.log.len() {
            let removed = Exercise::delete_from(&tx, &user.id, account.log.len())?;
            debug!(removed, "Truncated stored log");
        }

        for (position, record) in account.log.iter().enumerate().skip(shared) {
            Exercise::new(user.id, position, record).insert(&tx)?;
        }

        let saved = load_account(&tx, &user.id)?.ok_or(StoreError::MissingUser { id: user.id })?;
        tx.commit()?;

        Ok(saved)
    }

    #[instrument(skip(self, record))]
    fn append(
        &mut self,
        id: &Uuid,
        record: &ExerciseRecord,
    ) -> Result<Option<UserAccount>, Self::Error> {
        let tx = self.conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        if User::fetch_by_id(&tx, id)?.is_none() {
            return Ok(None);
        }

        let position = Exercise::count_for_user(&tx, id)?;
        Exercise::new(*id, position, record).insert(&tx)?;

        let account = load_account(&tx, id)?;
        tx.commit()?;

        Ok(account)
    }
}
