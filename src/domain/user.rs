//! User domain entity and request/response types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{EMAIL_MAX_LENGTH, NAME_MAX_LENGTH, NAME_MIN_LENGTH};
use crate::validation::{Constraint, FieldValue, Rule, RuleGroup, Validate};

/// Letters (including accented), spaces, apostrophes and hyphens.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÀ-ÿ\s'-]+$").expect("valid name pattern"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
});

/// User domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User payload returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i64,
    /// User display name
    #[schema(example = "Ana García")]
    pub name: String,
    /// User email address
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// User creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// User display name
    #[schema(example = "Ana García")]
    pub name: Option<String>,
    /// User email address
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
}

static CREATE_USER_RULES: Lazy<Vec<Rule<CreateUserRequest>>> = Lazy::new(|| {
    vec![
        Rule::new(
            "name",
            Constraint::Required,
            &[RuleGroup::Basic],
            |r: &CreateUserRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "name",
            Constraint::NotBlank,
            &[RuleGroup::Basic],
            |r: &CreateUserRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "name",
            Constraint::Length {
                min: NAME_MIN_LENGTH,
                max: NAME_MAX_LENGTH,
            },
            &[RuleGroup::Create],
            |r: &CreateUserRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "name",
            Constraint::Pattern {
                regex: &NAME_RE,
                message: "may only contain letters, spaces, apostrophes and hyphens",
            },
            &[RuleGroup::Create],
            |r: &CreateUserRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "email",
            Constraint::Required,
            &[RuleGroup::Basic],
            |r: &CreateUserRequest| FieldValue::from_text(r.email.as_deref()),
        ),
        Rule::new(
            "email",
            Constraint::NotBlank,
            &[RuleGroup::Basic],
            |r: &CreateUserRequest| FieldValue::from_text(r.email.as_deref()),
        ),
        Rule::new(
            "email",
            Constraint::Pattern {
                regex: &EMAIL_RE,
                message: "must be a valid email address",
            },
            &[RuleGroup::Create],
            |r: &CreateUserRequest| FieldValue::from_text(r.email.as_deref()),
        ),
        Rule::new(
            "email",
            Constraint::Length {
                min: 0,
                max: EMAIL_MAX_LENGTH,
            },
            &[RuleGroup::Create],
            |r: &CreateUserRequest| FieldValue::from_text(r.email.as_deref()),
        ),
    ]
});

impl Validate for CreateUserRequest {
    const GROUPS: &'static [RuleGroup] = &[RuleGroup::Create];

    fn rules() -> &'static [Rule<Self>] {
        &CREATE_USER_RULES
    }
}

/// User update request. Absent fields keep their stored values.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    /// User identifier, must match the path parameter
    #[schema(example = 1)]
    pub id: Option<i64>,
    /// New display name
    #[schema(example = "Ana María García")]
    pub name: Option<String>,
    /// New email address
    #[schema(example = "ana.maria@example.com")]
    pub email: Option<String>,
}

static UPDATE_USER_RULES: Lazy<Vec<Rule<UpdateUserRequest>>> = Lazy::new(|| {
    vec![
        Rule::new(
            "id",
            Constraint::Required,
            &[RuleGroup::Update],
            |r: &UpdateUserRequest| FieldValue::from_int(r.id),
        ),
        Rule::new(
            "id",
            Constraint::Positive,
            &[RuleGroup::Update],
            |r: &UpdateUserRequest| FieldValue::from_int(r.id),
        ),
        Rule::new(
            "name",
            Constraint::Length {
                min: NAME_MIN_LENGTH,
                max: NAME_MAX_LENGTH,
            },
            &[RuleGroup::Update],
            |r: &UpdateUserRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "name",
            Constraint::Pattern {
                regex: &NAME_RE,
                message: "may only contain letters, spaces, apostrophes and hyphens",
            },
            &[RuleGroup::Update],
            |r: &UpdateUserRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "email",
            Constraint::Pattern {
                regex: &EMAIL_RE,
                message: "must be a valid email address",
            },
            &[RuleGroup::Update],
            |r: &UpdateUserRequest| FieldValue::from_text(r.email.as_deref()),
        ),
        Rule::new(
            "email",
            Constraint::Length {
                min: 0,
                max: EMAIL_MAX_LENGTH,
            },
            &[RuleGroup::Update],
            |r: &UpdateUserRequest| FieldValue::from_text(r.email.as_deref()),
        ),
    ]
});

impl Validate for UpdateUserRequest {
    const GROUPS: &'static [RuleGroup] = &[RuleGroup::Update];

    fn rules() -> &'static [Rule<Self>] {
        &UPDATE_USER_RULES
    }
}
