use shared::{
    api::{
        payloads::{ExerciseAdded, LogQuery, NewExerciseRequest, NewUserRequest, UserLog, UserSummary},
        response_errors::UserLogError,
    },
    model::{
        DateKey, DateNormalizer, DateParsing, ExerciseRecord, LimitMode, LogFilter, NewUser,
        UserAccount, ValidateModel,
    },
    types::Uuid,
};
use tracing::{info, instrument};

use crate::db::UserStore;

/// How dates are read and logs are filtered
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSettings {
    pub date_parsing: DateParsing,
    pub date_key: DateKey,
    pub limit_mode: LimitMode,
}

/// Users and their exercise logs on top of a [`UserStore`]
pub struct UserLogService<S> {
    store: S,
    normalizer: DateNormalizer,
    filter: LogFilter,
}

impl<S: UserStore> UserLogService<S> {
    pub fn new(store: S, settings: LogSettings) -> Self {
        Self {
            store,
            normalizer: DateNormalizer::new(settings.date_parsing),
            filter: LogFilter::new(settings.date_key, settings.limit_mode),
        }
    }

    #[instrument(skip(self))]
    pub fn list_users(&self) -> Result<Vec<UserSummary>, UserLogError> {
        self.store.find().map_err(UserLogError::persistence)
    }

    #[instrument(skip(self))]
    pub fn create_user(&mut self, request: NewUserRequest) -> Result<UserSummary, UserLogError> {
        let new_user = NewUser::from(request);
        new_user.validate()?;

        let account = self.store.create(new_user).map_err(UserLogError::persistence)?;
        info!(id = %account.id, username = %account.username, "Created user");

        Ok(account.summary())
    }

    /// Appends one record to the user's log. The user has to exist before the
    /// request itself is looked at. The store appends in one write so records
    /// added concurrently for the same user are all kept
    #[instrument(skip(self))]
    pub fn add_exercise(
        &mut self,
        user_id: &str,
        request: NewExerciseRequest,
    ) -> Result<ExerciseAdded, UserLogError> {
        let account = self.find_user(user_id)?;

        let (description, duration) = request.validated()?;
        let date = self.normalizer.normalize(request.date.as_deref())?;
        let record = ExerciseRecord::new(description, duration, date);

        let saved = self
            .store
            .append(&account.id, &record)
            .map_err(UserLogError::persistence)?
            .ok_or_else(|| UserLogError::not_found(user_id))?;
        info!(id = %saved.id, count = saved.log.len(), "Added exercise");

        Ok(ExerciseAdded {
            username: saved.username,
            description: record.description,
            duration: record.duration,
            date: record.date,
            id: saved.id,
        })
    }

    #[instrument(skip(self))]
    pub fn get_log(&self, user_id: &str, query: &LogQuery) -> Result<UserLog, UserLogError> {
        let account = self.find_user(user_id)?;

        let log = if query.is_empty() {
            account.log
        } else {
            self.filter.filter(
                &account.log,
                query.from.as_deref(),
                query.to.as_deref(),
                query.limit,
            )
        };

        Ok(UserLog {
            username: account.username,
            id: account.id,
            count: log.len(),
            log,
        })
    }

    /// Ids that aren't well formed can't belong to anyone
    fn find_user(&self, user_id: &str) -> Result<UserAccount, UserLogError> {
        let Ok(id) = Uuid::parse(user_id) else {
            return Err(UserLogError::not_found(user_id));
        };

        self.store
            .find_one(&id)
            .map_err(UserLogError::persistence)?
            .ok_or_else(|| UserLogError::not_found(user_id))
    }
}
