//! Users: people holding a balance and a postal address.

use serde::{Deserialize, Serialize};

use crate::domain::record::RecordId;
use crate::domain::resource::Resource;
use crate::domain::schema::{CollectionSchema, FieldKind, FieldSchema};

/// Maximum length of a user's name.
pub const USER_NAME_MAX_LENGTH: usize = 100;

/// Street address of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street number and name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// City name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<i64>,
}

/// Customer record.
///
/// # Examples
/// ```
/// use storefront::domain::User;
///
/// let user: User = serde_json::from_str(r#"{"name":"Ada","languages":["en"]}"#)
///     .expect("valid user");
/// assert_eq!(user.name, "Ada");
/// assert!(user.id.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Display name, at most 100 characters.
    pub name: String,
    /// Account balance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    /// Languages spoken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const ITEM: &'static str = "user";

    fn schema() -> CollectionSchema {
        CollectionSchema::new(Self::COLLECTION, "Collection of documents with details of users")
            .with_field(
                FieldSchema::new("name", FieldKind::bounded_string(USER_NAME_MAX_LENGTH))
                    .described("Name of the user"),
            )
            .with_field(FieldSchema::new("balance", FieldKind::Number).described("User account balance"))
            .with_field(
                FieldSchema::new("languages", FieldKind::array_of(FieldKind::string()))
                    .described("Languages spoken by the user"),
            )
            .with_field(
                FieldSchema::new(
                    "address",
                    FieldKind::object(vec![
                        FieldSchema::new("street", FieldKind::string()).described("Street number"),
                        FieldSchema::new("city", FieldKind::string()).described("Name of the city"),
                        FieldSchema::new("state", FieldKind::string()).described("Name of the state"),
                        FieldSchema::new("zip", FieldKind::Int64).described("The zip code"),
                    ]),
                )
                .described("Street address of the user"),
            )
            .require("name")
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}
