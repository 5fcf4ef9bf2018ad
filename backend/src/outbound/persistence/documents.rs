//! BSON document shapes for the `users` collection.
//!
//! Document structs are internal to the persistence layer; the domain never
//! sees them. Conversion back into domain types revalidates the stored
//! fields so a corrupted record surfaces as a query error instead of a
//! panic.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserRepositoryError;
use crate::domain::{EmailAddress, NewUser, User, UserId, UserName};

/// Stored shape of a user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

impl UserDocument {
    /// Build an insertable document; the store assigns `_id`.
    pub fn from_new_user(user: &NewUser) -> Self {
        Self {
            id: None,
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
            age: user.age(),
        }
    }

    /// Convert a fetched document into a domain [`User`].
    pub fn into_domain(self) -> Result<User, UserRepositoryError> {
        let Some(object_id) = self.id else {
            return Err(UserRepositoryError::query(
                "stored user record is missing its _id",
            ));
        };
        let id = UserId::new(object_id.to_hex())
            .map_err(|err| UserRepositoryError::query(format!("stored user id invalid: {err}")))?;
        let name = UserName::new(self.name).map_err(|err| {
            UserRepositoryError::query(format!("stored user name invalid: {err}"))
        })?;
        let email = EmailAddress::new(self.email).map_err(|err| {
            UserRepositoryError::query(format!("stored user email invalid: {err}"))
        })?;
        Ok(User::new(id, name, email, self.age))
    }
}
