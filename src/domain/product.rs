//! Product domain entity and request/response types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{
    DESCRIPTION_MAX_LENGTH, NAME_MAX_LENGTH, NAME_MIN_LENGTH, PRICE_MAX_FRACTION_DIGITS,
    PRICE_MAX_INTEGER_DIGITS,
};
use crate::validation::{Constraint, FieldValue, Rule, RuleGroup, Validate};

/// Product domain entity
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product payload returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Unique product identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Product name
    #[schema(example = "Laptop")]
    pub name: String,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 999.99)]
    pub price: Decimal,
    /// Optional free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Confirmation payload for a product deletion.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProduct {
    /// Identifier of the removed product
    #[schema(example = 1)]
    pub id: i64,
    /// When the removal happened
    pub deleted_at: DateTime<Utc>,
}

/// Product creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    /// Product name
    #[schema(example = "Laptop")]
    pub name: Option<String>,
    /// Unit price, strictly positive with at most two decimal places
    #[schema(value_type = Option<f64>, example = 999.99)]
    pub price: Option<Decimal>,
    /// Optional free-text description
    #[schema(example = "14-inch ultrabook")]
    pub description: Option<String>,
}

static CREATE_PRODUCT_RULES: Lazy<Vec<Rule<CreateProductRequest>>> = Lazy::new(|| {
    vec![
        Rule::new(
            "name",
            Constraint::Required,
            &[RuleGroup::Basic],
            |r: &CreateProductRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "name",
            Constraint::NotBlank,
            &[RuleGroup::Basic],
            |r: &CreateProductRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "name",
            Constraint::Length {
                min: NAME_MIN_LENGTH,
                max: NAME_MAX_LENGTH,
            },
            &[RuleGroup::Create],
            |r: &CreateProductRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "price",
            Constraint::Required,
            &[RuleGroup::Basic],
            |r: &CreateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "price",
            Constraint::DecimalMin {
                value: Decimal::ZERO,
                inclusive: false,
            },
            &[RuleGroup::Create],
            |r: &CreateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "price",
            Constraint::DecimalMax {
                value: Decimal::new(99_999_999, 2),
                inclusive: true,
            },
            &[RuleGroup::Create],
            |r: &CreateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "price",
            Constraint::Digits {
                integer: PRICE_MAX_INTEGER_DIGITS,
                fraction: PRICE_MAX_FRACTION_DIGITS,
            },
            &[RuleGroup::Create],
            |r: &CreateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "description",
            Constraint::Length {
                min: 0,
                max: DESCRIPTION_MAX_LENGTH,
            },
            &[RuleGroup::Create],
            |r: &CreateProductRequest| FieldValue::from_text(r.description.as_deref()),
        ),
    ]
});

impl Validate for CreateProductRequest {
    const GROUPS: &'static [RuleGroup] = &[RuleGroup::Create];

    fn rules() -> &'static [Rule<Self>] {
        &CREATE_PRODUCT_RULES
    }
}

/// Product update request. Absent fields keep their stored values.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    /// Product identifier, must match the path parameter
    #[schema(example = 1)]
    pub id: Option<i64>,
    /// New product name
    #[schema(example = "Laptop Pro")]
    pub name: Option<String>,
    /// New unit price
    #[schema(value_type = Option<f64>, example = 1299.99)]
    pub price: Option<Decimal>,
    /// New description
    #[schema(example = "16-inch workstation")]
    pub description: Option<String>,
}

static UPDATE_PRODUCT_RULES: Lazy<Vec<Rule<UpdateProductRequest>>> = Lazy::new(|| {
    vec![
        Rule::new(
            "id",
            Constraint::Required,
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_int(r.id),
        ),
        Rule::new(
            "id",
            Constraint::Positive,
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_int(r.id),
        ),
        Rule::new(
            "name",
            Constraint::Length {
                min: NAME_MIN_LENGTH,
                max: NAME_MAX_LENGTH,
            },
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_text(r.name.as_deref()),
        ),
        Rule::new(
            "price",
            Constraint::DecimalMin {
                value: Decimal::ZERO,
                inclusive: false,
            },
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "price",
            Constraint::DecimalMax {
                value: Decimal::new(99_999_999, 2),
                inclusive: true,
            },
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "price",
            Constraint::Digits {
                integer: PRICE_MAX_INTEGER_DIGITS,
                fraction: PRICE_MAX_FRACTION_DIGITS,
            },
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_decimal(r.price),
        ),
        Rule::new(
            "description",
            Constraint::Length {
                min: 0,
                max: DESCRIPTION_MAX_LENGTH,
            },
            &[RuleGroup::Update],
            |r: &UpdateProductRequest| FieldValue::from_text(r.description.as_deref()),
        ),
    ]
});

impl Validate for UpdateProductRequest {
    const GROUPS: &'static [RuleGroup] = &[RuleGroup::Update];

    fn rules() -> &'static [Rule<Self>] {
        &UPDATE_PRODUCT_RULES
    }
}
