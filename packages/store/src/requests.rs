//! Inspection requests: posting, editing, deleting, interest toggling and the
//! inspector-side queries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{MarketError, Result};
use crate::kv::KvStore;
use crate::marketplace::{now_timestamp, Marketplace, REQUESTS_DOC};
use crate::models::{
    new_request_id, normalize_email, ClientContact, Property, PropertyType, Request, RequestStatus,
    RequestType, Schedule,
};

/// Form data for a new request. Id, timestamps, status and interest are assigned.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRequest {
    pub kind: RequestType,
    pub target_inspector_email: Option<String>,
    pub client: ClientContact,
    pub property: Property,
    pub schedule: Schedule,
    pub budget: Option<u32>,
    pub notes: String,
}

/// The fields a client may edit on their own request.
#[derive(Clone, Debug, PartialEq)]
pub struct RequestUpdate {
    pub client: ClientContact,
    pub property: Property,
    pub schedule: Schedule,
    pub budget: Option<u32>,
    pub notes: String,
}

/// Filters for the inspector request board. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestFilter {
    /// Case-insensitive substring of the property's city/ZIP.
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    /// Only requests whose preferred date is on or after this day.
    pub earliest: Option<NaiveDate>,
}

impl RequestFilter {
    pub fn is_active(&self) -> bool {
        self.city.as_deref().is_some_and(|c| !c.trim().is_empty())
            || self.property_type.is_some()
            || self.earliest.is_some()
    }

    fn matches(&self, request: &Request) -> bool {
        if let Some(city) = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            if !request
                .property
                .city_zip
                .to_lowercase()
                .contains(&city.to_lowercase())
            {
                return false;
            }
        }
        if let Some(kind) = self.property_type {
            if request.property.kind != kind {
                return false;
            }
        }
        if let Some(earliest) = self.earliest {
            match schedule_datetime(&request.schedule.preferred_date) {
                Some(when) if when.date() >= earliest => {}
                _ => return false,
            }
        }
        true
    }
}

/// Best-effort parse of a schedule's free-text date.
///
/// Accepts RFC 3339, `datetime-local` values (`2030-01-10T09:00`) and anything
/// starting with `YYYY-MM-DD`, optionally followed by ` HH:MM` (the booking
/// format). Returns `None` for other text.
pub fn schedule_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    let date = text
        .get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())?;
    let time = text
        .get(11..16)
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
        .unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

fn validate(client: &ClientContact, property: &Property, schedule: &Schedule) -> Result<()> {
    if client.name.trim().is_empty() {
        return Err(MarketError::validation("Name is required"));
    }
    if !client.email.contains('@') {
        return Err(MarketError::validation("Valid email is required"));
    }
    if property.address.trim().is_empty() {
        return Err(MarketError::validation("Property address is required"));
    }
    if property.city_zip.trim().is_empty() {
        return Err(MarketError::validation("City and ZIP code are required"));
    }
    if schedule.preferred_date.trim().is_empty() {
        return Err(MarketError::validation("Preferred date is required"));
    }
    Ok(())
}

impl<S: KvStore> Marketplace<S> {
    /// Every request, newest first, with interest invariants restored.
    pub fn requests(&self) -> Vec<Request> {
        self.load_list::<Request>(REQUESTS_DOC)
            .into_iter()
            .map(Request::normalized)
            .collect()
    }

    pub(crate) fn save_requests(&self, requests: &[Request]) -> Result<()> {
        self.save_list(REQUESTS_DOC, requests)
    }

    pub fn get_request(&self, id: &str) -> Option<Request> {
        self.requests().into_iter().find(|r| r.id == id)
    }

    pub fn add_request(&self, new: NewRequest) -> Result<Request> {
        validate(&new.client, &new.property, &new.schedule)?;
        let target_inspector_email = match new.kind {
            RequestType::ClientRequest => {
                let target = new
                    .target_inspector_email
                    .as_deref()
                    .map(normalize_email)
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| MarketError::validation("A client request needs an inspector"))?;
                Some(target)
            }
            RequestType::OpenRequest => None,
        };

        let request = Request {
            id: new_request_id(),
            created_at: now_timestamp(),
            status: RequestStatus::Open,
            kind: new.kind,
            target_inspector_email,
            client: ClientContact {
                email: new.client.email.trim().to_string(),
                ..new.client
            },
            property: new.property,
            schedule: new.schedule,
            budget: new.budget,
            notes: new.notes,
            interest_count: 0,
            interested_inspector_emails: Vec::new(),
        };

        let mut requests = self.requests();
        requests.insert(0, request.clone());
        self.save_requests(&requests)?;
        tracing::info!(id = %request.id, kind = ?request.kind, "request posted");
        Ok(request)
    }

    /// Apply `change` to one request owned by `owner_email` and save.
    fn modify_owned_request(
        &self,
        id: &str,
        owner_email: &str,
        change: impl FnOnce(&mut Request),
    ) -> Result<Request> {
        let mut requests = self.requests();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| MarketError::RequestNotFound(id.to_string()))?;
        if !request.is_owned_by(owner_email) {
            return Err(MarketError::NotRequestOwner);
        }
        change(request);
        let updated = request.clone();
        self.save_requests(&requests)?;
        Ok(updated)
    }

    pub fn update_request(
        &self,
        id: &str,
        owner_email: &str,
        update: RequestUpdate,
    ) -> Result<Request> {
        validate(&update.client, &update.property, &update.schedule)?;
        self.modify_owned_request(id, owner_email, |request| {
            request.client = update.client;
            request.property = update.property;
            request.schedule = update.schedule;
            request.budget = update.budget;
            request.notes = update.notes;
        })
    }

    pub fn set_request_status(
        &self,
        id: &str,
        owner_email: &str,
        status: RequestStatus,
    ) -> Result<Request> {
        self.modify_owned_request(id, owner_email, |request| request.status = status)
    }

    /// Delete a request. A deleted booking frees the inspector's slot again.
    pub fn delete_request(&self, id: &str, owner_email: &str) -> Result<()> {
        let mut requests = self.requests();
        let index = requests
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| MarketError::RequestNotFound(id.to_string()))?;
        if !requests[index].is_owned_by(owner_email) {
            return Err(MarketError::NotRequestOwner);
        }
        let removed = requests.remove(index);
        self.save_requests(&requests)?;
        tracing::info!(id = %removed.id, "request deleted");
        // The request is already gone, so a failed release is not a failed delete.
        if let Err(error) = self.release_booked_slot(&removed) {
            tracing::warn!(id = %removed.id, %error, "could not release booked slot");
        }
        Ok(())
    }

    /// Add or remove an inspector from a request's interested set.
    pub fn toggle_interest(&self, request_id: &str, inspector_email: &str) -> Result<Request> {
        let email = normalize_email(inspector_email);
        if email.is_empty() {
            return Err(MarketError::validation(
                "Sign in as an inspector to express interest",
            ));
        }
        let mut requests = self.requests();
        let request = requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| MarketError::RequestNotFound(request_id.to_string()))?;

        if request.is_interested(&email) {
            request
                .interested_inspector_emails
                .retain(|e| normalize_email(e) != email);
        } else {
            request.interested_inspector_emails.push(email);
        }
        request.interest_count = request.interested_inspector_emails.len();

        let updated = request.clone();
        self.save_requests(&requests)?;
        Ok(updated)
    }

    /// Requests posted by a client, newest first.
    pub fn client_requests(&self, client_email: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.is_owned_by(client_email))
            .collect()
    }

    /// The open board: open requests of type `open_request`.
    pub fn open_requests(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.status == RequestStatus::Open && r.kind == RequestType::OpenRequest)
            .collect()
    }

    /// Open client requests aimed at one inspector.
    pub fn targeted_requests(&self, inspector_email: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.status == RequestStatus::Open && r.is_targeted_at(inspector_email))
            .collect()
    }

    pub fn my_interests(&self, inspector_email: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.is_interested(inspector_email))
            .collect()
    }

    /// What an inspector's request board shows, soonest preferred date first.
    ///
    /// Requests with an unparseable preferred date sort last.
    pub fn visible_requests(&self, inspector_email: &str, filter: &RequestFilter) -> Vec<Request> {
        let mut visible: Vec<Request> = self
            .requests()
            .into_iter()
            .filter(|r| r.is_visible_to(inspector_email))
            .filter(|r| filter.matches(r))
            .collect();
        visible.sort_by_key(|r| {
            let when = schedule_datetime(&r.schedule.preferred_date);
            (when.is_none(), when)
        });
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn market() -> Marketplace<MemoryStore> {
        Marketplace::new(MemoryStore::new())
    }

    fn new_request(client_email: &str, city_zip: &str, preferred: &str) -> NewRequest {
        NewRequest {
            kind: RequestType::OpenRequest,
            target_inspector_email: None,
            client: ClientContact {
                name: "Casey".to_string(),
                email: client_email.to_string(),
                phone: "555-0100".to_string(),
            },
            property: Property {
                address: "1 Main St".to_string(),
                city_zip: city_zip.to_string(),
                kind: PropertyType::House,
                beds: 3,
                baths: 2.0,
                sqft: Some(1800),
            },
            schedule: Schedule {
                preferred_date: preferred.to_string(),
                alt_date: None,
            },
            budget: Some(450),
            notes: "Gate code 1234".to_string(),
        }
    }

    fn update_from(request: &Request) -> RequestUpdate {
        RequestUpdate {
            client: request.client.clone(),
            property: request.property.clone(),
            schedule: request.schedule.clone(),
            budget: request.budget,
            notes: request.notes.clone(),
        }
    }

    #[test]
    fn test_add_request_prepends_and_assigns_fields() {
        let market = market();
        let first = market
            .add_request(new_request("casey@example.com", "Irvine 92618", "2030-01-10T09:00"))
            .unwrap();
        let second = market
            .add_request(new_request("casey@example.com", "Tustin 92780", "2030-01-11T09:00"))
            .unwrap();

        assert!(first.id.starts_with("req_"));
        assert_eq!(first.status, RequestStatus::Open);
        assert_eq!(first.interest_count, 0);

        let all = market.requests();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(market.get_request(&first.id).unwrap(), first);
    }

    #[test]
    fn test_add_request_validation() {
        let market = market();
        let mut missing_address = new_request("casey@example.com", "Irvine", "2030-01-10");
        missing_address.property.address = "  ".to_string();
        assert!(matches!(
            market.add_request(missing_address),
            Err(MarketError::Validation(_))
        ));

        let mut untargeted = new_request("casey@example.com", "Irvine", "2030-01-10");
        untargeted.kind = RequestType::ClientRequest;
        assert!(matches!(
            market.add_request(untargeted),
            Err(MarketError::Validation(_))
        ));

        let mut open_with_target = new_request("casey@example.com", "Irvine", "2030-01-10");
        open_with_target.target_inspector_email = Some("ava@example.com".to_string());
        let saved = market.add_request(open_with_target).unwrap();
        assert!(saved.target_inspector_email.is_none());
    }

    #[test]
    fn test_toggle_interest_keeps_count_in_sync() {
        let market = market();
        let request = market
            .add_request(new_request("casey@example.com", "Irvine", "2030-01-10"))
            .unwrap();

        let r = market.toggle_interest(&request.id, "ava@example.com").unwrap();
        assert_eq!(r.interest_count, 1);
        let r = market.toggle_interest(&request.id, "bob@example.com").unwrap();
        assert_eq!(r.interest_count, 2);

        // Toggling again with different casing removes, not duplicates
        let r = market.toggle_interest(&request.id, "AVA@example.com").unwrap();
        assert_eq!(r.interested_inspector_emails, vec!["bob@example.com"]);
        assert_eq!(r.interest_count, 1);

        assert_eq!(market.my_interests("bob@example.com").len(), 1);
        assert!(market.my_interests("ava@example.com").is_empty());

        assert!(matches!(
            market.toggle_interest("req_missing", "ava@example.com"),
            Err(MarketError::RequestNotFound(_))
        ));
        assert!(matches!(
            market.toggle_interest(&request.id, " "),
            Err(MarketError::Validation(_))
        ));
    }

    #[test]
    fn test_update_request_owner_only() {
        let market = market();
        let request = market
            .add_request(new_request("casey@example.com", "Irvine", "2030-01-10"))
            .unwrap();

        let mut update = update_from(&request);
        update.notes = "Dog on site".to_string();
        update.property.beds = 4;

        assert!(matches!(
            market.update_request(&request.id, "mallory@example.com", update.clone()),
            Err(MarketError::NotRequestOwner)
        ));

        let updated = market
            .update_request(&request.id, "Casey@example.com", update)
            .unwrap();
        assert_eq!(updated.notes, "Dog on site");
        assert_eq!(updated.property.beds, 4);
        assert_eq!(updated.id, request.id);
        assert_eq!(updated.created_at, request.created_at);
        assert_eq!(market.get_request(&request.id).unwrap(), updated);
    }

    #[test]
    fn test_interest_survives_update() {
        let market = market();
        let request = market
            .add_request(new_request("casey@example.com", "Irvine", "2030-01-10"))
            .unwrap();
        market.toggle_interest(&request.id, "ava@example.com").unwrap();

        let updated = market
            .update_request(&request.id, "casey@example.com", update_from(&request))
            .unwrap();
        assert_eq!(updated.interest_count, 1);
    }

    #[test]
    fn test_set_status_and_delete() {
        let market = market();
        let request = market
            .add_request(new_request("casey@example.com", "Irvine", "2030-01-10"))
            .unwrap();

        let closed = market
            .set_request_status(&request.id, "casey@example.com", RequestStatus::Closed)
            .unwrap();
        assert_eq!(closed.status, RequestStatus::Closed);
        assert!(market.open_requests().is_empty());

        assert!(matches!(
            market.delete_request(&request.id, "bob@example.com"),
            Err(MarketError::NotRequestOwner)
        ));
        market.delete_request(&request.id, "casey@example.com").unwrap();
        assert!(market.requests().is_empty());
        assert!(matches!(
            market.delete_request(&request.id, "casey@example.com"),
            Err(MarketError::RequestNotFound(_))
        ));
    }

    #[test]
    fn test_client_and_targeted_queries() {
        let market = market();
        market
            .add_request(new_request("casey@example.com", "Irvine", "2030-01-10"))
            .unwrap();
        market
            .add_request(new_request("dana@example.com", "Irvine", "2030-01-10"))
            .unwrap();
        let mut targeted = new_request("casey@example.com", "Irvine", "2030-01-12");
        targeted.kind = RequestType::ClientRequest;
        targeted.target_inspector_email = Some("Ava@Example.com".to_string());
        let targeted = market.add_request(targeted).unwrap();
        assert_eq!(
            targeted.target_inspector_email.as_deref(),
            Some("ava@example.com")
        );

        assert_eq!(market.client_requests("casey@example.com").len(), 2);
        assert_eq!(market.open_requests().len(), 2);
        assert_eq!(market.targeted_requests("ava@example.com").len(), 1);
        assert!(market.targeted_requests("bob@example.com").is_empty());
    }

    #[test]
    fn test_visible_requests_filter_and_sort() {
        let market = market();
        let late = market
            .add_request(new_request("a@example.com", "Irvine 92618", "2030-03-01T10:00"))
            .unwrap();
        let early = market
            .add_request(new_request("b@example.com", "irvine 92620", "2030-01-05T08:00"))
            .unwrap();
        let fuzzy = market
            .add_request(new_request("c@example.com", "Irvine", "sometime next week"))
            .unwrap();
        let mut condo = new_request("d@example.com", "Tustin 92780", "2030-02-01");
        condo.property.kind = PropertyType::Condo;
        let condo = market.add_request(condo).unwrap();

        let mut for_bob = new_request("e@example.com", "Irvine", "2030-01-01");
        for_bob.kind = RequestType::ClientRequest;
        for_bob.target_inspector_email = Some("bob@example.com".to_string());
        market.add_request(for_bob).unwrap();

        let ids = |requests: Vec<Request>| -> Vec<String> {
            requests.into_iter().map(|r| r.id).collect()
        };

        // Ava cannot see Bob's targeted request; the unparseable date sorts last
        let all = market.visible_requests("ava@example.com", &RequestFilter::default());
        assert_eq!(
            ids(all),
            vec![early.id.clone(), condo.id.clone(), late.id.clone(), fuzzy.id.clone()]
        );

        let irvine = RequestFilter {
            city: Some("IRVINE 926".to_string()),
            ..RequestFilter::default()
        };
        assert!(irvine.is_active());
        assert_eq!(
            ids(market.visible_requests("ava@example.com", &irvine)),
            vec![early.id.clone(), late.id.clone()]
        );

        let condos = RequestFilter {
            property_type: Some(PropertyType::Condo),
            ..RequestFilter::default()
        };
        assert_eq!(
            ids(market.visible_requests("ava@example.com", &condos)),
            vec![condo.id.clone()]
        );

        let from_feb = RequestFilter {
            earliest: NaiveDate::from_ymd_opt(2030, 2, 1),
            ..RequestFilter::default()
        };
        assert_eq!(
            ids(market.visible_requests("ava@example.com", &from_feb)),
            vec![condo.id, late.id]
        );

        assert_eq!(market.visible_requests("bob@example.com", &RequestFilter::default()).len(), 5);
        assert!(!RequestFilter::default().is_active());
    }

    #[test]
    fn test_schedule_datetime_formats() {
        let at = |y, m, d, h, min| {
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap()
        };
        assert_eq!(schedule_datetime("2030-01-10T09:30"), Some(at(2030, 1, 10, 9, 30)));
        assert_eq!(schedule_datetime("2030-01-10"), Some(at(2030, 1, 10, 0, 0)));
        assert_eq!(
            schedule_datetime("2030-01-10 14:00 - 16:00"),
            Some(at(2030, 1, 10, 14, 0))
        );
        assert_eq!(
            schedule_datetime("2030-01-10T09:30:00.000Z"),
            Some(at(2030, 1, 10, 9, 30))
        );
        assert_eq!(schedule_datetime("Mon Dec 30"), None);
        assert_eq!(schedule_datetime(""), None);
    }

    #[test]
    fn test_loaded_requests_are_normalized() {
        let store = MemoryStore::new();
        store
            .set(
                "inspect_now_shared_requests",
                r#"[{"id": "r1", "interestCount": 5, "interestedInspectorEmails": ["a@x.com"]}]"#,
            )
            .unwrap();
        let market = Marketplace::new(store);
        assert_eq!(market.get_request("r1").unwrap().interest_count, 1);
    }
}
