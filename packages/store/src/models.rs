//! # Domain models for accounts, requests and inspector profiles
//!
//! These are the records stored in the marketplace's JSON documents. Field
//! names serialise in camelCase (`cityZip`, `interestedInspectorEmails`, ...)
//! so the documents look the same as the ones the browser app has always
//! written to `localStorage`.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | An account: lower-cased email, demo password hash, [`Role`], optional name and phone. |
//! | [`Session`] | The single active login for this browser profile. |
//! | [`Request`] | An inspection request with embedded [`ClientContact`], [`Property`] and [`Schedule`], plus the interested-inspector set. |
//! | [`InspectorProfile`] | Public directory entry for an inspector, keyed by email, with optional [`Availability`] and its [`TimeSlot`]s. |
//!
//! ## Lenient decoding
//!
//! Stored documents may come from older builds or be edited by hand. Missing
//! fields take defaults, and the enums [`RequestStatus`], [`RequestType`] and
//! [`PropertyType`] decode any unknown value to their default variant instead
//! of failing. [`Request::normalized`] restores the interest invariants after
//! loading.

use serde::{Deserialize, Deserializer, Serialize};

use crate::marketplace::{new_id, now_timestamp};

/// Lower-case and trim an email for use as a key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Case-insensitive email comparison.
pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Read any JSON value and keep it only if it is a string.
fn lenient_tag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Inspector,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Inspector => "inspector",
        }
    }
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub password_hash: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "now_timestamp")]
    pub created_at: String,
}

impl User {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    pub fn is_inspector(&self) -> bool {
        self.role == Role::Inspector
    }

    pub fn is_client(&self) -> bool {
        self.role == Role::Client
    }
}

/// The logged-in user for this browser profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    #[serde(default = "now_timestamp")]
    pub created_at: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Open,
    Matched,
    Closed,
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient_tag(deserializer)?.as_deref() {
            Some("matched") => Self::Matched,
            Some("closed") => Self::Closed,
            _ => Self::Open,
        })
    }
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Matched => "Matched",
            Self::Closed => "Closed",
        }
    }
}

/// Whether a request is on the open board or aimed at one inspector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Targeted at a single inspector, e.g. from booking one of their slots.
    ClientRequest,
    /// Visible to every inspector.
    #[default]
    OpenRequest,
}

impl<'de> Deserialize<'de> for RequestType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient_tag(deserializer)?.as_deref() {
            Some("client_request") => Self::ClientRequest,
            _ => Self::OpenRequest,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PropertyType {
    #[default]
    House,
    Townhome,
    Condo,
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match lenient_tag(deserializer)?.as_deref() {
            Some("Townhome") => Self::Townhome,
            Some("Condo") => Self::Condo,
            _ => Self::House,
        })
    }
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [Self::House, Self::Townhome, Self::Condo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "House",
            Self::Townhome => "Townhome",
            Self::Condo => "Condo",
        }
    }

    /// Parse a form value; anything unrecognised is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Default for ClientContact {
    fn default() -> Self {
        Self {
            name: "Client".to_string(),
            email: String::new(),
            phone: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Property {
    pub address: String,
    pub city_zip: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub beds: u32,
    pub baths: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqft: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Free text: a `datetime-local` value, or `"<date> <start> - <end>"` for a booking.
    #[serde(default = "now_timestamp")]
    pub preferred_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_date: Option<String>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            preferred_date: now_timestamp(),
            alt_date: None,
        }
    }
}

/// An inspection request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default = "new_request_id")]
    pub id: String,
    #[serde(default = "now_timestamp")]
    pub created_at: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default, rename = "type")]
    pub kind: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_inspector_email: Option<String>,
    #[serde(default)]
    pub client: ClientContact,
    #[serde(default)]
    pub property: Property,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub interest_count: usize,
    #[serde(default)]
    pub interested_inspector_emails: Vec<String>,
}

pub(crate) fn new_request_id() -> String {
    new_id("req")
}

impl Request {
    /// Restore the interest invariants: the email list is a set and the
    /// count equals its length.
    pub fn normalized(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.interested_inspector_emails.len());
        for email in self.interested_inspector_emails.drain(..) {
            if !seen.iter().any(|e| same_email(e, &email)) {
                seen.push(email);
            }
        }
        self.interested_inspector_emails = seen;
        self.interest_count = self.interested_inspector_emails.len();
        self
    }

    pub fn is_interested(&self, inspector_email: &str) -> bool {
        self.interested_inspector_emails
            .iter()
            .any(|e| same_email(e, inspector_email))
    }

    pub fn is_owned_by(&self, client_email: &str) -> bool {
        same_email(&self.client.email, client_email)
    }

    pub fn is_targeted_at(&self, inspector_email: &str) -> bool {
        self.kind == RequestType::ClientRequest
            && self
                .target_inspector_email
                .as_deref()
                .is_some_and(|t| same_email(t, inspector_email))
    }

    /// Open requests an inspector may see: the open board plus requests aimed at them.
    pub fn is_visible_to(&self, inspector_email: &str) -> bool {
        self.status == RequestStatus::Open
            && match self.kind {
                RequestType::OpenRequest => true,
                RequestType::ClientRequest => self.is_targeted_at(inspector_email),
            }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// 24-hour `HH:MM`
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(default = "default_next_available")]
    pub next_available: String,
    #[serde(default = "default_response_time")]
    pub response_time: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

fn default_next_available() -> String {
    "This week".to_string()
}

fn default_response_time() -> String {
    "Within 4 hours".to_string()
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            next_available: default_next_available(),
            response_time: default_response_time(),
            time_slots: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Public directory entry for an inspector. The email is the primary key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectorProfile {
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub service_areas: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub base_price: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_inspections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
}

impl InspectorProfile {
    /// A bare profile with only the required fields set.
    pub fn new(email: &str, display_name: &str) -> Self {
        Self {
            email: normalize_email(email),
            display_name: display_name.to_string(),
            service_areas: Vec::new(),
            specialties: Vec::new(),
            base_price: 0,
            phone: None,
            location: None,
            bio: None,
            years_experience: None,
            certifications: Vec::new(),
            rating: None,
            review_count: None,
            completed_inspections: None,
            image: None,
            verified: false,
            availability: None,
            contact: None,
            insurance: None,
        }
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        self.availability
            .as_ref()
            .map(|a| a.time_slots.as_slice())
            .unwrap_or(&[])
    }
}
