//! Request DTOs for the record service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings,
//! plus the field rules applied before anything reaches the store.

use serde::Deserialize;

use super::entities::{ChildPatch, NewChild, NewParent, PageWindow, ParentPatch};

/// Maximum length of parent and child names
pub const MAX_NAME_LENGTH: usize = 100;
/// Maximum length of a child's hobby
pub const MAX_HOBBY_LENGTH: usize = 100;
/// Maximum length of a parent's address
pub const MAX_ADDRESS_LENGTH: usize = 255;
/// Maximum length of an email address
pub const MAX_EMAIL_LENGTH: usize = 255;

/// Request body for POST /parents
#[derive(Debug, Clone, Deserialize)]
pub struct ParentCreate {
    pub name: String,
    pub age: i64,
    pub email: String,
    pub address: String,
}

impl ParentCreate {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        check_length("name", &self.name, MAX_NAME_LENGTH)
            .or_else(|| check_parent_age(self.age))
            .or_else(|| check_email(&self.email))
            .or_else(|| check_length("address", &self.address, MAX_ADDRESS_LENGTH))
    }

    /// Validates and converts into a store command.
    pub fn into_new(self) -> Result<NewParent, String> {
        if let Some(error_msg) = self.validate() {
            return Err(error_msg);
        }
        Ok(NewParent {
            age: to_age(self.age)?,
            name: self.name,
            email: self.email,
            address: self.address,
        })
    }
}

/// Request body for PUT /parents/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParentUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ParentUpdate {
    pub fn validate(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(|name| check_length("name", name, MAX_NAME_LENGTH))
            .or_else(|| self.age.and_then(check_parent_age))
            .or_else(|| self.email.as_deref().and_then(check_email))
            .or_else(|| {
                self.address
                    .as_deref()
                    .and_then(|address| check_length("address", address, MAX_ADDRESS_LENGTH))
            })
    }

    pub fn into_patch(self) -> Result<ParentPatch, String> {
        if let Some(error_msg) = self.validate() {
            return Err(error_msg);
        }
        Ok(ParentPatch {
            age: self.age.map(to_age).transpose()?,
            name: self.name,
            email: self.email,
            address: self.address,
        })
    }
}

/// Request body for POST /children
#[derive(Debug, Clone, Deserialize)]
pub struct ChildCreate {
    pub name: String,
    pub age: i64,
    pub hobby: String,
    pub parent_id: i64,
}

impl ChildCreate {
    pub fn validate(&self) -> Option<String> {
        check_length("name", &self.name, MAX_NAME_LENGTH)
            .or_else(|| check_child_age(self.age))
            .or_else(|| check_length("hobby", &self.hobby, MAX_HOBBY_LENGTH))
    }

    pub fn into_new(self) -> Result<NewChild, String> {
        if let Some(error_msg) = self.validate() {
            return Err(error_msg);
        }
        Ok(NewChild {
            age: to_age(self.age)?,
            name: self.name,
            hobby: self.hobby,
            parent_id: self.parent_id,
        })
    }
}

/// Request body for PUT /children/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub hobby: Option<String>,
}

impl ChildUpdate {
    pub fn validate(&self) -> Option<String> {
        self.name
            .as_deref()
            .and_then(|name| check_length("name", name, MAX_NAME_LENGTH))
            .or_else(|| self.age.and_then(check_child_age))
            .or_else(|| {
                self.hobby
                    .as_deref()
                    .and_then(|hobby| check_length("hobby", hobby, MAX_HOBBY_LENGTH))
            })
    }

    pub fn into_patch(self) -> Result<ChildPatch, String> {
        if let Some(error_msg) = self.validate() {
            return Err(error_msg);
        }
        Ok(ChildPatch {
            age: self.age.map(to_age).transpose()?,
            name: self.name,
            hobby: self.hobby,
        })
    }
}

/// Query string for the list endpoints (`?skip=0&limit=100`)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    PageWindow::DEFAULT_LIMIT
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl From<ListQuery> for PageWindow {
    fn from(query: ListQuery) -> Self {
        PageWindow::new(query.skip, query.limit)
    }
}

// == Field Rules ==

fn check_length(field: &str, value: &str, max: usize) -> Option<String> {
    if value.chars().count() > max {
        Some(format!("{} exceeds maximum length of {} characters", field, max))
    } else {
        None
    }
}

fn check_parent_age(age: i64) -> Option<String> {
    if age <= 18 {
        Some("age must be greater than 18".to_string())
    } else if age > i64::from(u8::MAX) {
        Some(format!("age must be at most {}", u8::MAX))
    } else {
        None
    }
}

fn check_child_age(age: i64) -> Option<String> {
    if !(0..=18).contains(&age) {
        Some("age must be between 0 and 18".to_string())
    } else {
        None
    }
}

fn to_age(age: i64) -> Result<u8, String> {
    u8::try_from(age).map_err(|_| format!("age {} is out of range", age))
}

fn check_email(email: &str) -> Option<String> {
    if email.len() > MAX_EMAIL_LENGTH || !is_valid_email(email) {
        Some(format!("'{}' is not a valid email address", email))
    } else {
        None
    }
}

/// Syntactic email check: one `@`, non-empty local part, dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent(age: i64, email: &str) -> ParentCreate {
        ParentCreate {
            name: "Parent 1".to_string(),
            age,
            email: email.to_string(),
            address: "Poland".to_string(),
        }
    }

    #[test]
    fn test_parent_create_deserialize() {
        let json = r#"{"name":"A","age":40,"email":"a@x.com","address":"Y"}"#;
        let req: ParentCreate = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "A");
        assert_eq!(req.age, 40);
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_parent_age_must_exceed_18() {
        assert!(parent(18, "a@x.com").validate().is_some());
        assert!(parent(19, "a@x.com").validate().is_none());
    }

    #[test]
    fn test_parent_age_upper_bound_message() {
        assert_eq!(
            parent(300, "a@x.com").validate().as_deref(),
            Some("age must be at most 255")
        );
        assert_eq!(
            parent(18, "a@x.com").validate().as_deref(),
            Some("age must be greater than 18")
        );
    }

    #[test]
    fn test_conversion_rejects_unvalidated_ages() {
        assert!(parent(300, "a@x.com").into_new().is_err());
        assert_eq!(parent(255, "a@x.com").into_new().unwrap().age, 255);

        let child = ChildUpdate {
            age: Some(-1),
            ..Default::default()
        };
        assert!(child.into_patch().is_err());

        let parent_patch = ParentUpdate {
            age: Some(1000),
            ..Default::default()
        };
        assert!(parent_patch.into_patch().is_err());
    }

    #[test]
    fn test_parent_email_rules() {
        assert!(parent(40, "not-an-email").validate().is_some());
        assert!(parent(40, "a@b").validate().is_some());
        assert!(parent(40, "a@@x.com").validate().is_some());
        assert!(parent(40, "a b@x.com").validate().is_some());
        assert!(parent(40, "user@example.com").validate().is_none());
    }

    #[test]
    fn test_parent_name_too_long() {
        let mut req = parent(40, "a@x.com");
        req.name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(req.validate().unwrap().contains("name"));
    }

    #[test]
    fn test_child_age_bounds() {
        let mut req = ChildCreate {
            name: "Child 1".to_string(),
            age: 0,
            hobby: "Drawing".to_string(),
            parent_id: 1,
        };
        assert!(req.validate().is_none());
        req.age = 18;
        assert!(req.validate().is_none());
        req.age = 19;
        assert!(req.validate().is_some());
        req.age = -1;
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_updates_validate_only_present_fields() {
        let empty = ParentUpdate::default();
        assert!(empty.validate().is_none());

        let bad_age = ParentUpdate {
            age: Some(10),
            ..Default::default()
        };
        assert!(bad_age.validate().is_some());

        let child = ChildUpdate {
            hobby: Some("h".repeat(MAX_HOBBY_LENGTH + 1)),
            ..Default::default()
        };
        assert!(child.validate().unwrap().contains("hobby"));
    }

    #[test]
    fn test_into_patch_keeps_absent_fields_none() {
        let patch = ParentUpdate {
            name: Some("New".to_string()),
            ..Default::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(patch.name.as_deref(), Some("New"));
        assert!(patch.age.is_none());
        assert!(patch.email.is_none());
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(PageWindow::from(query), PageWindow::new(0, 100));
    }
}
