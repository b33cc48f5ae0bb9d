use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::fmt::Display;
use thiserror::Error;

pub const USER_ID_MAX_LEN: usize = 64;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct User {
    pub id: UserId,
    pub full_name: Option<String>,
    pub image_url: String,
}

/// External user identifier, such as `user_1`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The user id is invalid: {0:?}")]
pub struct InvalidUserIdError(String);

impl UserId {
    pub fn new(id: String) -> Result<Self, InvalidUserIdError> {
        if !id.is_empty() && id.chars().count() <= USER_ID_MAX_LEN {
            Ok(UserId(id))
        } else {
            Err(InvalidUserIdError(id))
        }
    }

    #[must_use]
    pub fn new_unchecked(id: &str) -> Self {
        Self::new(id.to_owned()).expect("User id was invalid.")
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for UserId {
    type Error = InvalidUserIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_owned())
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        UserId::new(inner).map_err(|err| Error::invalid_value(Unexpected::Str(&err.0), &"UserId"))
    }
}

#[cfg(test)]
mod tests {
    use crate::model::user::{USER_ID_MAX_LEN, UserId};

    #[test]
    fn user_id_bounds() {
        assert!(UserId::try_from("user_1").is_ok());
        assert!(UserId::try_from("").is_err());
        assert!(UserId::new("x".repeat(USER_ID_MAX_LEN)).is_ok());
        assert!(UserId::new("x".repeat(USER_ID_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn user_id_deserialization_validates() {
        let id: UserId = serde_json::from_str("\"user_2\"").unwrap();
        assert_eq!(id.get(), "user_2");

        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
