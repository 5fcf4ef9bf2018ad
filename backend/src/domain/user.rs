//! User entity and its validated field types.
//!
//! The HTTP adapter converts raw request strings into these newtypes before
//! anything touches the store, so a constructed [`User`], [`NewUser`], or
//! [`UserPatch`] is valid by construction.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Validation errors returned by the field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    InvalidEmail,
    InvalidAge,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must not contain surrounding whitespace"),
            Self::NameTooShort { min } => {
                write!(f, "name must be at least {min} characters")
            }
            Self::NameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::InvalidAge => write!(f, "age must be an integer"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned user identifier.
///
/// The domain treats the identifier as an opaque non-empty string; the
/// MongoDB adapter is the only place that knows it is an ObjectId in hex
/// form, and rejects malformed values there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Minimum allowed length for a user name.
pub const USER_NAME_MIN: usize = 2;
/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 10;

/// User name constrained to [`USER_NAME_MIN`]..=[`USER_NAME_MAX`]
/// characters (Unicode scalar values, not bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        let length = name.chars().count();
        if length < USER_NAME_MIN {
            return Err(UserValidationError::NameTooShort { min: USER_NAME_MIN });
        }
        if length > USER_NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: USER_NAME_MAX });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Syntax check only: one `@`, non-empty local part, dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validated payload for creating a user. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: UserName,
    email: EmailAddress,
    age: Option<i64>,
}

impl NewUser {
    /// Build a creation payload from validated components.
    pub fn new(name: UserName, email: EmailAddress, age: Option<i64>) -> Self {
        Self { name, email, age }
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn age(&self) -> Option<i64> {
        self.age
    }
}

/// Partial update for a user.
///
/// `None` means "leave the stored value unchanged"; the update set never
/// distinguishes an omitted field from an explicit null, matching the
/// exclude-null-on-update policy of the wire contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<UserName>,
    pub email: Option<EmailAddress>,
    pub age: Option<i64>,
}

impl UserPatch {
    /// True when no field would be applied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.age.is_none()
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `name` and `email` are always present and valid.
/// - `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    email: EmailAddress,
    age: Option<i64>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(id: UserId, name: UserName, email: EmailAddress, age: Option<i64>) -> Self {
        Self {
            id,
            name,
            email,
            age,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn age(&self) -> Option<i64> {
        self.age
    }

    /// Apply the fields present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
    }
}
