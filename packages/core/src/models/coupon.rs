//! Discount Coupons
//!
//! Coupon records, their create/patch payloads, and the read-time status
//! derivation shown in the coupon list.
//!
//! # Status Derivation
//!
//! Evaluated against a caller-supplied `now`, first match wins:
//!
//! 1. `is_active == false` → [`CouponStatus::Inactive`]
//! 2. `now > valid_until` → [`CouponStatus::Expired`]
//! 3. `used_count >= max_uses` → [`CouponStatus::UsedUp`]
//! 4. `valid_from <= now <= valid_until` (missing bounds are open) → [`CouponStatus::Active`]
//! 5. otherwise → [`CouponStatus::Scheduled`]
//!
//! # Examples
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use coursedesk_core::models::{Coupon, CouponStatus};
//!
//! let now = Utc::now();
//! let mut coupon = Coupon::new("c1", "LAUNCH", 20, 10);
//! coupon.valid_until = Some(now + Duration::days(1));
//! assert_eq!(coupon.status_at(now), CouponStatus::Active);
//!
//! coupon.used_count = 10;
//! assert_eq!(coupon.status_at(now), CouponStatus::UsedUp);
//! ```

use crate::models::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Smallest accepted discount percentage
pub const MIN_DISCOUNT: u8 = 1;
/// Largest accepted discount percentage
pub const MAX_DISCOUNT: u8 = 100;

/// Trim and upper-case a coupon code
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

fn validate_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() {
        return Err(ValidationError::missing_field("code"));
    }
    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::out_of_range(
            "code",
            "must not contain whitespace",
        ));
    }
    Ok(())
}

fn validate_discount(discount: u8) -> Result<(), ValidationError> {
    if !(MIN_DISCOUNT..=MAX_DISCOUNT).contains(&discount) {
        return Err(ValidationError::out_of_range(
            "discount",
            format!(
                "must be between {} and {}, got {}",
                MIN_DISCOUNT, MAX_DISCOUNT, discount
            ),
        ));
    }
    Ok(())
}

fn validate_max_uses(max_uses: u32) -> Result<(), ValidationError> {
    if max_uses < 1 {
        return Err(ValidationError::out_of_range(
            "maxUses",
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Reject a window whose start falls after its end
pub fn validate_window(
    valid_from: Option<DateTime<Utc>>,
    valid_until: Option<DateTime<Utc>>,
) -> Result<(), ValidationError> {
    if let (Some(from), Some(until)) = (valid_from, valid_until) {
        if from > until {
            return Err(ValidationError::invalid_window(format!(
                "validFrom {} is after validUntil {}",
                from.to_rfc3339(),
                until.to_rfc3339()
            )));
        }
    }
    Ok(())
}

/// Derived coupon classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CouponStatus {
    Inactive,
    Expired,
    UsedUp,
    Active,
    Scheduled,
}

impl std::fmt::Display for CouponStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "Inactive"),
            Self::Expired => write!(f, "Expired"),
            Self::UsedUp => write!(f, "Used Up"),
            Self::Active => write!(f, "Active"),
            Self::Scheduled => write!(f, "Scheduled"),
        }
    }
}

/// Coupon record as stored by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub code: String,
    /// Percentage off, 1 to 100
    pub discount: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: u32,
    /// Maintained by the server
    #[serde(default)]
    pub used_count: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Coupon {
    /// Active, unused coupon with an open validity window
    pub fn new(id: impl Into<String>, code: &str, discount: u8, max_uses: u32) -> Self {
        Self {
            id: id.into(),
            code: normalize_code(code),
            discount,
            valid_from: None,
            valid_until: None,
            max_uses,
            used_count: 0,
            is_active: true,
        }
    }

    /// Build the record the server would create for `input`
    pub fn from_input(id: impl Into<String>, input: CouponInput) -> Self {
        Self {
            id: id.into(),
            code: input.code,
            discount: input.discount,
            valid_from: input.valid_from,
            valid_until: input.valid_until,
            max_uses: input.max_uses,
            used_count: 0,
            is_active: input.is_active,
        }
    }

    /// Status at an explicit instant
    pub fn status_at(&self, now: DateTime<Utc>) -> CouponStatus {
        if !self.is_active {
            return CouponStatus::Inactive;
        }
        if self.valid_until.is_some_and(|until| now > until) {
            return CouponStatus::Expired;
        }
        if self.used_count >= self.max_uses {
            return CouponStatus::UsedUp;
        }
        let started = self.valid_from.map_or(true, |from| from <= now);
        let not_ended = self.valid_until.map_or(true, |until| now <= until);
        if started && not_ended {
            CouponStatus::Active
        } else {
            CouponStatus::Scheduled
        }
    }

    /// Status right now
    pub fn status(&self) -> CouponStatus {
        self.status_at(Utc::now())
    }

    pub fn remaining_uses(&self) -> u32 {
        self.max_uses.saturating_sub(self.used_count)
    }
}

/// Payload for creating a coupon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub code: String,
    pub discount: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    pub max_uses: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CouponInput {
    /// Active coupon with an open validity window
    pub fn new(code: impl Into<String>, discount: u8, max_uses: u32) -> Self {
        Self {
            code: code.into(),
            discount,
            valid_from: None,
            valid_until: None,
            max_uses,
            is_active: true,
        }
    }

    pub fn with_window(
        mut self,
        valid_from: Option<DateTime<Utc>>,
        valid_until: Option<DateTime<Utc>>,
    ) -> Self {
        self.valid_from = valid_from;
        self.valid_until = valid_until;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Upper-case the code and check every field
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        self.code = normalize_code(&self.code);
        validate_code(&self.code)?;
        validate_discount(self.discount)?;
        validate_max_uses(self.max_uses)?;
        validate_window(self.valid_from, self.valid_until)?;
        Ok(self)
    }
}

/// Deserialize helper for nullable patch fields
///
/// - Missing field → None (don't update)
/// - null → Some(None) (clear)
/// - value → Some(Some(value)) (set)
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial coupon update
///
/// The validity dates use the double-Option pattern: `None` leaves the date
/// alone, `Some(None)` clears it, `Some(Some(t))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub valid_from: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub valid_until: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CouponPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_discount(mut self, discount: u8) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_valid_until(mut self, valid_until: Option<DateTime<Utc>>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.discount.is_none()
            && self.valid_from.is_none()
            && self.valid_until.is_none()
            && self.max_uses.is_none()
            && self.is_active.is_none()
    }

    /// Normalize the code and validate every provided field
    ///
    /// The validity window can only be checked against the merged coupon; see
    /// [`CouponPatch::applied_to`].
    pub fn normalized(mut self) -> Result<Self, ValidationError> {
        if let Some(code) = self.code.as_mut() {
            *code = normalize_code(code);
            validate_code(code)?;
        }
        if let Some(discount) = self.discount {
            validate_discount(discount)?;
        }
        if let Some(max_uses) = self.max_uses {
            validate_max_uses(max_uses)?;
        }
        Ok(self)
    }

    /// Copy every provided field onto `coupon`
    pub fn apply_to(&self, coupon: &mut Coupon) {
        if let Some(code) = &self.code {
            coupon.code = code.clone();
        }
        if let Some(discount) = self.discount {
            coupon.discount = discount;
        }
        if let Some(valid_from) = self.valid_from {
            coupon.valid_from = valid_from;
        }
        if let Some(valid_until) = self.valid_until {
            coupon.valid_until = valid_until;
        }
        if let Some(max_uses) = self.max_uses {
            coupon.max_uses = max_uses;
        }
        if let Some(is_active) = self.is_active {
            coupon.is_active = is_active;
        }
    }

    /// The coupon as it would look after this patch, with its window checked
    pub fn applied_to(&self, coupon: &Coupon) -> Result<Coupon, ValidationError> {
        let mut merged = coupon.clone();
        self.apply_to(&mut merged);
        validate_window(merged.valid_from, merged.valid_until)?;
        Ok(merged)
    }
}
