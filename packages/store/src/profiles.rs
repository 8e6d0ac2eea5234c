//! The inspector directory: profile lookup, partial updates and search.

use crate::error::{MarketError, Result};
use crate::kv::KvStore;
use crate::marketplace::{Marketplace, PROFILES_DOC};
use crate::models::{same_email, Availability, ContactInfo, InspectorProfile, User};

const DEFAULT_BIO: &str =
    "Professional home inspector with expertise in residential property assessments.";

/// A partial profile edit. Only `Some` fields are applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub service_areas: Option<Vec<String>>,
    pub specialties: Option<Vec<String>>,
    pub base_price: Option<u32>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub years_experience: Option<u32>,
    pub certifications: Option<Vec<String>>,
    pub image: Option<String>,
    pub insurance: Option<String>,
    pub next_available: Option<String>,
    pub response_time: Option<String>,
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl ProfileUpdate {
    fn apply(self, profile: &mut InspectorProfile) {
        if let Some(name) = self.display_name.and_then(blank_to_none) {
            profile.display_name = name;
        }
        if let Some(areas) = self.service_areas {
            profile.service_areas = clean_list(areas);
        }
        if let Some(specialties) = self.specialties {
            profile.specialties = clean_list(specialties);
        }
        if let Some(price) = self.base_price {
            profile.base_price = price;
        }
        if let Some(phone) = self.phone {
            profile.phone = blank_to_none(phone);
            if let Some(contact) = profile.contact.as_mut() {
                contact.phone = profile.phone.clone().unwrap_or_default();
            }
        }
        if let Some(location) = self.location {
            profile.location = blank_to_none(location);
        }
        if let Some(bio) = self.bio {
            profile.bio = blank_to_none(bio);
        }
        if let Some(years) = self.years_experience {
            profile.years_experience = Some(years);
        }
        if let Some(certifications) = self.certifications {
            profile.certifications = clean_list(certifications);
        }
        if let Some(image) = self.image {
            profile.image = blank_to_none(image);
        }
        if let Some(insurance) = self.insurance {
            profile.insurance = blank_to_none(insurance);
        }
        if self.next_available.is_some() || self.response_time.is_some() {
            let availability = profile.availability.get_or_insert_with(Availability::default);
            if let Some(next) = self.next_available.and_then(blank_to_none) {
                availability.next_available = next;
            }
            if let Some(response) = self.response_time.and_then(blank_to_none) {
                availability.response_time = response;
            }
        }
    }
}

/// Directory search. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileFilter {
    /// Case-insensitive text matched against name, location and service areas.
    pub query: Option<String>,
    pub service_area: Option<String>,
    pub specialty: Option<String>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl ProfileFilter {
    fn matches(&self, profile: &InspectorProfile) -> bool {
        if let Some(query) = self.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let hit = contains_ci(&profile.display_name, query)
                || profile
                    .location
                    .as_deref()
                    .is_some_and(|l| contains_ci(l, query))
                || profile.service_areas.iter().any(|a| contains_ci(a, query));
            if !hit {
                return false;
            }
        }
        if let Some(area) = self.service_area.as_deref().filter(|a| !a.is_empty()) {
            if !profile.service_areas.iter().any(|a| a.eq_ignore_ascii_case(area)) {
                return false;
            }
        }
        if let Some(specialty) = self.specialty.as_deref().filter(|s| !s.is_empty()) {
            if !profile
                .specialties
                .iter()
                .any(|s| s.eq_ignore_ascii_case(specialty))
            {
                return false;
            }
        }
        true
    }
}

impl<S: KvStore> Marketplace<S> {
    pub fn profiles(&self) -> Vec<InspectorProfile> {
        self.load_list(PROFILES_DOC)
    }

    pub(crate) fn save_profiles(&self, profiles: &[InspectorProfile]) -> Result<()> {
        self.save_list(PROFILES_DOC, profiles)
    }

    pub fn get_profile(&self, email: &str) -> Option<InspectorProfile> {
        self.profiles()
            .into_iter()
            .find(|p| same_email(&p.email, email))
    }

    /// Insert a profile, or replace the one with the same email.
    pub fn upsert_profile(&self, profile: InspectorProfile) -> Result<()> {
        let mut profiles = self.profiles();
        match profiles.iter_mut().find(|p| same_email(&p.email, &profile.email)) {
            Some(existing) => *existing = profile,
            None => profiles.push(profile),
        }
        self.save_profiles(&profiles)
    }

    pub fn update_profile(&self, email: &str, update: ProfileUpdate) -> Result<InspectorProfile> {
        self.modify_profile(email, |profile| {
            update.apply(profile);
            Ok(profile.clone())
        })
    }

    /// Apply `change` to one profile and save it if `change` succeeds.
    pub(crate) fn modify_profile<T>(
        &self,
        email: &str,
        change: impl FnOnce(&mut InspectorProfile) -> Result<T>,
    ) -> Result<T> {
        let mut profiles = self.profiles();
        let profile = profiles
            .iter_mut()
            .find(|p| same_email(&p.email, email))
            .ok_or_else(|| MarketError::ProfileNotFound(email.to_string()))?;
        let result = change(profile)?;
        self.save_profiles(&profiles)?;
        Ok(result)
    }

    /// Remove one inspector's profile. Returns whether it existed.
    pub fn remove_profile(&self, email: &str) -> Result<bool> {
        let profiles = self.profiles();
        let before = profiles.len();
        let kept: Vec<InspectorProfile> = profiles
            .into_iter()
            .filter(|p| !same_email(&p.email, email))
            .collect();
        if kept.len() == before {
            return Ok(false);
        }
        self.save_profiles(&kept)?;
        Ok(true)
    }

    /// Directory listing, sorted by display name.
    pub fn search_profiles(&self, filter: &ProfileFilter) -> Vec<InspectorProfile> {
        let mut found: Vec<InspectorProfile> = self
            .profiles()
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();
        found.sort_by_key(|p| p.display_name.to_lowercase());
        found
    }

    /// Starting profile for a newly signed-up inspector.
    pub fn default_profile_for(&self, user: &User) -> InspectorProfile {
        let defaults = &self.config().inspector_defaults;
        let display_name = user
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| user.email.split('@').next().unwrap_or_default().to_string());

        let mut profile = InspectorProfile::new(&user.email, &display_name);
        profile.service_areas = vec![defaults.service_area.clone()];
        profile.base_price = defaults.base_price;
        profile.phone = user.phone.clone();
        profile.location = Some(defaults.location.clone());
        profile.bio = Some(DEFAULT_BIO.to_string());
        profile.years_experience = Some(1);
        profile.certifications = vec!["State Licensed".to_string()];
        profile.rating = Some(5.0);
        profile.review_count = Some(0);
        profile.completed_inspections = Some(0);
        profile.verified = true;
        profile.availability = Some(Availability::default());
        profile.contact = Some(ContactInfo {
            phone: user.phone.clone().unwrap_or_default(),
            email: user.email.clone(),
            website: None,
        });
        profile.insurance = Some("$1M Professional Liability".to_string());
        profile
    }
}
