use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::actor::{Actor, NewActor, Role};
use crate::domain::errors::DomainError;
use crate::domain::ports::UserStore;
use crate::schema::users;

use super::models::{NewUserRow, UserRow};

#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserStore for DieselUserStore {
    fn create(&self, new_actor: NewActor) -> Result<Actor, DomainError> {
        let mut conn = self.pool.get()?;

        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: new_actor.name,
            email: new_actor.email,
            phone: new_actor.phone,
            password_hash: new_actor.password_hash,
            role: new_actor.role.as_str().to_string(),
            active: true,
        };

        // The unique index on email is the authority on duplicates; a
        // concurrent registration loses here, not at the pre-check.
        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .get_result(&mut conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    DomainError::DuplicateEmail
                }
                other => other.into(),
            })?;

        inserted.into_actor()
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Actor>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(UserRow::into_actor).transpose()
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Actor>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(UserRow::into_actor).transpose()
    }

    fn list_active_by_role(&self, role: Role) -> Result<Vec<Actor>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = users::table
            .filter(users::role.eq(role.as_str()))
            .filter(users::active.eq(true))
            .order(users::created_at.desc())
            .select(UserRow::as_select())
            .load(&mut conn)?;

        rows.into_iter().map(UserRow::into_actor).collect()
    }
}
