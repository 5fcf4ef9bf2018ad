//! MongoDB-backed [`UserRepository`] implementation.
//!
//! A thin adapter: it translates between BSON documents and domain types
//! and maps driver failures onto [`UserRepositoryError`]. No business
//! logic lives here.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::debug;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, User, UserId, UserPatch};

use super::documents::UserDocument;

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

/// Bound on server selection so an unreachable store surfaces as a prompt
/// error instead of hanging the request.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Construct the shared client and select the configured database.
///
/// Called once at startup; the returned [`Database`] handle is cheap to
/// clone and safe for concurrent use.
pub async fn connect(uri: &str, database: &str) -> mongodb::error::Result<Database> {
    let mut options = ClientOptions::parse(uri).await?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    let client = Client::with_options(options)?;
    Ok(client.database(database))
}

/// MongoDB implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Create a repository over the `users` collection of `database`.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(USERS_COLLECTION),
        }
    }
}

/// Reject identifiers that are not ObjectId hex before touching the store.
fn parse_object_id(id: &UserId) -> Result<ObjectId, UserRepositoryError> {
    ObjectId::parse_str(id.as_ref()).map_err(|_| UserRepositoryError::malformed_id(id.as_ref()))
}

/// Map driver errors onto the port error kinds.
fn map_store_error(error: &mongodb::error::Error) -> UserRepositoryError {
    use mongodb::error::ErrorKind;

    debug!(error = %error, "mongodb operation failed");
    match &*error.kind {
        ErrorKind::ServerSelection { message, .. } => {
            UserRepositoryError::unavailable(message.clone())
        }
        ErrorKind::Io(err) => UserRepositoryError::unavailable(err.to_string()),
        _ => UserRepositoryError::query(error.to_string()),
    }
}

/// Build the `$set` document from the present fields of a patch.
fn update_set(patch: &UserPatch) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name.as_ref());
    }
    if let Some(email) = &patch.email {
        set.insert("email", email.as_ref());
    }
    if let Some(age) = patch.age {
        set.insert("age", age);
    }
    set
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserRepositoryError> {
        let document = UserDocument::from_new_user(user);
        let result = self
            .collection
            .insert_one(&document)
            .await
            .map_err(|err| map_store_error(&err))?;

        let object_id = result.inserted_id.as_object_id().ok_or_else(|| {
            UserRepositoryError::query("insert acknowledged without an object id")
        })?;
        UserId::new(object_id.to_hex())
            .map_err(|err| UserRepositoryError::query(format!("assigned id invalid: {err}")))
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        // Materialise the cursor before leaving the adapter; handlers only
        // ever see a plain vector.
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|err| map_store_error(&err))?;
        let documents: Vec<UserDocument> = cursor
            .try_collect()
            .await
            .map_err(|err| map_store_error(&err))?;

        documents
            .into_iter()
            .map(UserDocument::into_domain)
            .collect()
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<(), UserRepositoryError> {
        let object_id = parse_object_id(id)?;
        let set = update_set(patch);
        // An empty `$set` is rejected by the server; the port contract
        // requires callers to filter empty patches out first.
        debug_assert!(!set.is_empty(), "empty patches must be rejected upstream");

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, doc! { "$set": set })
            .await
            .map_err(|err| map_store_error(&err))?;

        if result.matched_count == 0 {
            return Err(UserRepositoryError::not_found(id.as_ref()));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let object_id = parse_object_id(id)?;
        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|err| map_store_error(&err))?;

        if result.deleted_count == 0 {
            return Err(UserRepositoryError::not_found(id.as_ref()));
        }
        Ok(())
    }
}
