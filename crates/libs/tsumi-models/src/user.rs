use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::users::dsl::*;
use crate::store::UserStore;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}

impl NewUser {
    pub fn new(user_email: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            email: user_email.into(),
            name: user_name.into(),
        }
    }
}

impl User {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: &i64) -> _ {
        crate::schema::users::dsl::users.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_email(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(email.eq(target))
    }
}

impl UserStore for DbConnection {
    fn fetch_by_email(&self, target: &str) -> Result<Option<User>> {
        let conn = &mut self.pool.get()?;
        Ok(User::by_email(target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    fn fetch_by_id(&self, target: i64) -> Result<Option<User>> {
        let conn = &mut self.pool.get()?;
        Ok(User::by_id(&target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    fn create(&self, user: NewUser) -> Result<User> {
        let conn = &mut self.pool.get()?;

        diesel::insert_into(users)
            .values(&user)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(|err| match err {
                diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    Error::DuplicateEmail
                }
                err => Error::Diesel(err),
            })
    }
}
