use exemplar::Model;
use rusqlite::Connection;
use sea_query::{enum_def, Expr, Order, Query, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use shared::{
    model::{ExerciseDate, ExerciseRecord},
    types::Uuid,
};

/// One row per log entry. `position` is the entry's index in the owner's log
#[derive(Debug, Clone, PartialEq, Model)]
#[table("exercise")]
#[check("../../../migrations/002-exercise/up.sql")]
#[enum_def]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: Uuid,
    pub position: i64,
    pub description: String,
    pub duration: u32,
    pub date: ExerciseDate,
}

impl From<Exercise> for ExerciseRecord {
    fn from(exercise: Exercise) -> Self {
        ExerciseRecord::new(exercise.description, exercise.duration, exercise.date)
    }
}

impl Exercise {
    pub fn new(user_id: Uuid, position: usize, record: &ExerciseRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            position: position as i64,
            description: record.description.clone(),
            duration: record.duration,
            date: record.date,
        }
    }

    /// The user's log in order
    pub fn fetch_for_user(conn: &Connection, user_id: &Uuid) -> Result<Vec<Exercise>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Position,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .order_by(ExerciseIden::Position, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercises = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(exercises)
    }

    pub fn count_for_user(conn: &Connection, user_id: &Uuid) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::select()
            .expr(Expr::col(ExerciseIden::Id).count())
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let count: i64 = stmt.query_row(&*values.as_params(), |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Removes the entries at `position` and after
    pub fn delete_from(conn: &Connection, user_id: &Uuid, position: usize) -> Result<usize, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::UserId).eq(user_id))
            .and_where(Expr::col(ExerciseIden::Position).gte(position as i64))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;
    use shared::model::NewUser;

    use super::*;
    use crate::db::{memory_connection, model::User};

    fn record(description: &str, day: u32) -> ExerciseRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        ExerciseRecord::new(description, 30, date.into())
    }

    #[test]
    fn test_log_round_trips_in_order() {
        let conn = memory_connection();
        let user = User::from(NewUser::new(Uuid::new_v4(), "alice"));
        user.insert(&conn).unwrap();

        let log = [record("run", 3), record("swim", 1), record("row", 2)];
        for (position, entry) in log.iter().enumerate().rev() {
            Exercise::new(user.id, position, entry).insert(&conn).unwrap();
        }

        let fetched: Vec<ExerciseRecord> = Exercise::fetch_for_user(&conn, &user.id)
            .unwrap()
            .into_iter()
            .map(ExerciseRecord::from)
            .collect();
        assert_eq!(fetched, log);
        assert_eq!(Exercise::count_for_user(&conn, &user.id).unwrap(), 3);
        assert_eq!(Exercise::count_for_user(&conn, &Uuid::new_v4()).unwrap(), 0);
    }

    #[test]
    fn test_invalid_date_is_stored() {
        let conn = memory_connection();
        let user = User::from(NewUser::new(Uuid::new_v4(), "bob"));
        user.insert(&conn).unwrap();

        let entry = ExerciseRecord::new("walk", 10, ExerciseDate::Invalid);
        Exercise::new(user.id, 0, &entry).insert(&conn).unwrap();

        let fetched = Exercise::fetch_for_user(&conn, &user.id).unwrap();
        assert_eq!(fetched[0].date, ExerciseDate::Invalid);
    }

    #[test]
    fn test_delete_from_position() {
        let conn = memory_connection();
        let user = User::from(NewUser::new(Uuid::new_v4(), "carol"));
        user.insert(&conn).unwrap();
        for position in 0..4 {
            Exercise::new(user.id, position, &record("lift", 5)).insert(&conn).unwrap();
        }

        assert_eq!(Exercise::delete_from(&conn, &user.id, 2).unwrap(), 2);
        assert_eq!(Exercise::count_for_user(&conn, &user.id).unwrap(), 2);
    }

    #[test]
    fn test_requires_existing_user() {
        let conn = memory_connection();
        let orphan = Exercise::new(Uuid::new_v4(), 0, &record("run", 1));
        assert!(orphan.insert(&conn).is_err());
    }
}
