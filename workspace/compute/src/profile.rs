//! Counselor profile editor.
//!
//! The editor is seeded from the counselor row of the signed-in user. Specialty
//! edits stay local until the whole form is saved with a single update.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument};
use validator::Validate;

use model::{decode_rows, decode_single, encode_row, Counselor, Filter, Query, Table, TableStore};

use crate::error::{DashboardError, Result};
use crate::panel::FormMessage;

/// Rate offered to the editor when the counselor has none stored.
pub const DEFAULT_HOURLY_RATE: i64 = 11000;

/// Ordered, duplicate-free specialty tags
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecialtySet(Vec<String>);

impl SpecialtySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set keeping the first occurrence of each tag.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for tag in tags {
            set.add(tag.as_ref());
        }
        set
    }

    /// Adds a trimmed tag. Empty or already-present input is a no-op.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|existing| existing != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Editable copy of a counselor profile
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileForm {
    pub profile_image: String,
    pub bio: String,
    pub specialties: SpecialtySet,
    pub profile_url: String,
    pub hourly_rate: Decimal,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            profile_image: String::new(),
            bio: String::new(),
            specialties: SpecialtySet::new(),
            profile_url: String::new(),
            hourly_rate: Decimal::from(DEFAULT_HOURLY_RATE),
        }
    }
}

impl ProfileForm {
    pub fn from_counselor(counselor: &Counselor) -> Self {
        Self {
            profile_image: counselor.profile_image.clone().unwrap_or_default(),
            bio: counselor.bio.clone().unwrap_or_default(),
            specialties: SpecialtySet::from_tags(&counselor.specialties),
            profile_url: counselor.profile_url.clone().unwrap_or_default(),
            hourly_rate: counselor
                .hourly_rate
                .unwrap_or_else(|| Decimal::from(DEFAULT_HOURLY_RATE)),
        }
    }

    /// The patch sent on save. Blank URLs are stored as null.
    pub fn to_update(&self) -> ProfileUpdate {
        ProfileUpdate {
            profile_image: non_blank(&self.profile_image),
            bio: self.bio.clone(),
            specialties: self.specialties.as_slice().to_vec(),
            profile_url: non_blank(&self.profile_url),
            hourly_rate: self.hourly_rate,
        }
    }
}

/// Columns written by a profile save
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ProfileUpdate {
    #[validate(url)]
    pub profile_image: Option<String>,
    pub bio: String,
    pub specialties: Vec<String>,
    #[validate(url)]
    pub profile_url: Option<String>,
    pub hourly_rate: Decimal,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Loads the counselor row owned by `user_id`.
#[instrument(skip(store))]
pub async fn load_counselor(store: &dyn TableStore, user_id: &str) -> Result<Counselor> {
    let query = Query::from(Table::Counselors).eq("user_id", user_id);
    let rows = store.select(&query).await?;
    let counselor = decode_rows::<Counselor>(Table::Counselors, rows)?
        .into_iter()
        .next()
        .ok_or_else(|| DashboardError::NotFound {
            table: Table::Counselors,
            key: user_id.to_string(),
        })?;

    debug!("Loaded counselor {} for user {}", counselor.id, user_id);
    Ok(counselor)
}

/// Saves the whole form with one update keyed by counselor id and returns
/// the stored row.
#[instrument(skip(store, form))]
pub async fn save_profile(store: &dyn TableStore, counselor_id: &str, form: &ProfileForm) -> Result<Counselor> {
    if form.hourly_rate.is_sign_negative() && !form.hourly_rate.is_zero() {
        return Err(DashboardError::Validation(
            "hourly_rate: must not be negative".to_string(),
        ));
    }

    let update = form.to_update();
    update.validate()?;

    let patch = encode_row(Table::Counselors, &update)?;
    let rows = store
        .update(Table::Counselors, &[Filter::eq("id", counselor_id)], patch)
        .await?;
    let counselor: Counselor = decode_single(Table::Counselors, rows)?;

    info!("Saved profile for counselor {}", counselor.id);
    Ok(counselor)
}

/// Message shown next to the profile form after a save attempt.
pub fn save_message(result: &Result<Counselor>) -> FormMessage {
    FormMessage::from_result(result, "Profile saved", "Failed to save profile")
}
