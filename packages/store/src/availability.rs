//! Inspector time slots and booking.
//!
//! Slots are entered as 12-hour times and stored as 24-hour `HH:00` strings
//! on the inspector's profile. A [`SlotTemplate`] with a [`Repeat`] expands
//! into one slot per occurrence up to an end date.
//!
//! Booking a slot marks it unavailable and posts a `client_request` targeted
//! at the inspector whose preferred date reads `"<date> <start> - <end>"`.
//! Deleting that request finds the slot again by matching the date and start
//! time inside that text.

use chrono::{Days, Months, NaiveDate};

use crate::error::{MarketError, Result};
use crate::kv::KvStore;
use crate::marketplace::{new_id, Marketplace};
use crate::models::{
    Availability, ClientContact, InspectorProfile, Property, Request, RequestType, Schedule,
    TimeSlot,
};
use crate::requests::NewRequest;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Period {
    #[default]
    Am,
    Pm,
}

impl Period {
    pub const ALL: [Period; 2] = [Self::Am, Self::Pm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// An on-the-hour 12-hour clock time, e.g. 9 AM.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotTime {
    /// 1 to 12
    pub hour: u8,
    pub period: Period,
}

impl SlotTime {
    pub fn new(hour: u8, period: Period) -> Self {
        Self { hour, period }
    }

    fn validate(&self) -> Result<()> {
        if (1..=12).contains(&self.hour) {
            Ok(())
        } else {
            Err(MarketError::validation("Hour must be between 1 and 12"))
        }
    }

    /// Hour of the day, 0 to 23.
    pub fn hour_of_day(&self) -> u8 {
        match (self.period, self.hour) {
            (Period::Am, 12) => 0,
            (Period::Am, h) => h,
            (Period::Pm, 12) => 12,
            (Period::Pm, h) => h + 12,
        }
    }

    /// Stored form, `HH:00`.
    pub fn to_24_hour(&self) -> String {
        format!("{:02}:00", self.hour_of_day())
    }
}

/// Render a stored `HH:MM` time as `h:MM AM/PM`. Unparseable input is returned as is.
pub fn format_12_hour(time: &str) -> String {
    let Some((hour, minute)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = hour.parse::<u8>() else {
        return time.to_string();
    };
    let (display, period) = match hour {
        0 => (12, Period::Am),
        1..=11 => (hour, Period::Am),
        12 => (12, Period::Pm),
        _ => (hour - 12, Period::Pm),
    };
    format!("{display}:{minute} {}", period.as_str())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Repeat {
    pub const ALL: [Repeat; 5] = [
        Self::None,
        Self::Daily,
        Self::Weekly,
        Self::Biweekly,
        Self::Monthly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Does not repeat",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Biweekly => "Every two weeks",
            Self::Monthly => "Monthly",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }

    /// The `n`th occurrence after `start`, or `None` past the calendar's range.
    fn occurrence(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Self::None => (n == 0).then_some(start),
            Self::Daily => start.checked_add_days(Days::new(u64::from(n))),
            Self::Weekly => start.checked_add_days(Days::new(7 * u64::from(n))),
            Self::Biweekly => start.checked_add_days(Days::new(14 * u64::from(n))),
            // Counted from the start so the 31st does not drift to the 28th.
            Self::Monthly => start.checked_add_months(Months::new(n)),
        }
    }
}

/// Form input for adding one or more slots.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotTemplate {
    pub date: NaiveDate,
    pub start: SlotTime,
    pub end: SlotTime,
    pub repeat: Repeat,
    /// Last date a recurring slot may fall on. Defaults to the configured horizon.
    pub until: Option<NaiveDate>,
}

impl SlotTemplate {
    /// Expand into dates, inclusive of `until`.
    pub fn dates(&self, horizon_days: u32) -> Vec<NaiveDate> {
        if self.repeat == Repeat::None {
            return vec![self.date];
        }
        let until = self.until.unwrap_or_else(|| {
            self.date
                .checked_add_days(Days::new(u64::from(horizon_days)))
                .unwrap_or(self.date)
        });
        (0..)
            .map_while(|n| self.repeat.occurrence(self.date, n))
            .take_while(|date| *date <= until)
            .collect()
    }
}

/// What the client fills in when booking a slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingDetails {
    pub client: ClientContact,
    pub property: Property,
    pub notes: String,
}

/// Preferred-date text written on a booking request.
pub fn booking_schedule_text(slot: &TimeSlot) -> String {
    format!("{} {} - {}", slot.date, slot.start_time, slot.end_time)
}

fn slots_mut(profile: &mut InspectorProfile) -> &mut Vec<TimeSlot> {
    &mut profile
        .availability
        .get_or_insert_with(Availability::default)
        .time_slots
}

impl<S: KvStore> Marketplace<S> {
    /// Expand a template and append the slots to the inspector's profile.
    pub fn add_time_slots(&self, email: &str, template: SlotTemplate) -> Result<Vec<TimeSlot>> {
        template.start.validate()?;
        template.end.validate()?;
        if template.end.hour_of_day() <= template.start.hour_of_day() {
            return Err(MarketError::validation("End time must be after start time"));
        }

        let start_time = template.start.to_24_hour();
        let end_time = template.end.to_24_hour();
        let slots: Vec<TimeSlot> = template
            .dates(self.config().availability.horizon_days)
            .into_iter()
            .map(|date| TimeSlot {
                id: new_id("slot"),
                date: date.format(DATE_FORMAT).to_string(),
                start_time: start_time.clone(),
                end_time: end_time.clone(),
                available: true,
            })
            .collect();

        self.modify_profile(email, |profile| {
            slots_mut(profile).extend(slots.iter().cloned());
            Ok(())
        })?;
        tracing::info!(%email, count = slots.len(), repeat = template.repeat.as_str(), "time slots added");
        Ok(slots)
    }

    pub fn remove_time_slot(&self, email: &str, slot_id: &str) -> Result<()> {
        self.modify_profile(email, |profile| {
            let slots = slots_mut(profile);
            let before = slots.len();
            slots.retain(|s| s.id != slot_id);
            if slots.len() == before {
                return Err(MarketError::SlotNotFound(slot_id.to_string()));
            }
            Ok(())
        })
    }

    /// Flip a slot between available and unavailable.
    pub fn toggle_slot_availability(&self, email: &str, slot_id: &str) -> Result<TimeSlot> {
        self.modify_profile(email, |profile| {
            let slot = slots_mut(profile)
                .iter_mut()
                .find(|s| s.id == slot_id)
                .ok_or_else(|| MarketError::SlotNotFound(slot_id.to_string()))?;
            slot.available = !slot.available;
            Ok(slot.clone())
        })
    }

    /// Bookable slots, soonest first.
    pub fn available_slots(&self, email: &str) -> Vec<TimeSlot> {
        let Some(profile) = self.get_profile(email) else {
            return Vec::new();
        };
        let mut slots: Vec<TimeSlot> = profile
            .time_slots()
            .iter()
            .filter(|s| s.available)
            .cloned()
            .collect();
        slots.sort_by(|a, b| (&a.date, &a.start_time).cmp(&(&b.date, &b.start_time)));
        slots
    }

    /// Book an available slot as a request targeted at its inspector.
    pub fn create_booking_from_time_slot(
        &self,
        slot_id: &str,
        inspector_email: &str,
        details: BookingDetails,
    ) -> Result<Request> {
        let profile = self
            .get_profile(inspector_email)
            .ok_or_else(|| MarketError::ProfileNotFound(inspector_email.to_string()))?;
        let slot = profile
            .time_slots()
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or_else(|| MarketError::SlotNotFound(slot_id.to_string()))?;
        if !slot.available {
            return Err(MarketError::SlotUnavailable);
        }

        let request = self.add_request(NewRequest {
            kind: RequestType::ClientRequest,
            target_inspector_email: Some(profile.email.clone()),
            client: details.client,
            property: details.property,
            schedule: Schedule {
                preferred_date: booking_schedule_text(&slot),
                alt_date: None,
            },
            budget: (profile.base_price > 0).then_some(profile.base_price),
            notes: details.notes,
        })?;

        self.modify_profile(&profile.email, |profile| {
            if let Some(slot) = slots_mut(profile).iter_mut().find(|s| s.id == slot_id) {
                slot.available = false;
            }
            Ok(())
        })?;
        tracing::info!(request = %request.id, slot = %slot_id, inspector = %profile.email, "slot booked");
        Ok(request)
    }

    /// Make the slot a deleted booking was holding available again.
    pub(crate) fn release_booked_slot(&self, request: &Request) -> Result<()> {
        if request.kind != RequestType::ClientRequest {
            return Ok(());
        }
        let Some(inspector) = request.target_inspector_email.as_deref() else {
            return Ok(());
        };
        let Some(profile) = self.get_profile(inspector) else {
            return Ok(());
        };
        let text = &request.schedule.preferred_date;
        let Some(slot_id) = profile
            .time_slots()
            .iter()
            .find(|s| !s.available && text.contains(&booking_schedule_text(s)))
            .map(|s| s.id.clone())
        else {
            return Ok(());
        };

        self.modify_profile(inspector, |profile| {
            if let Some(slot) = slots_mut(profile).iter_mut().find(|s| s.id == slot_id) {
                slot.available = true;
            }
            Ok(())
        })?;
        tracing::info!(request = %request.id, slot = %slot_id, "booked slot released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::RequestStatus;

    const INSPECTOR: &str = "ava@example.com";
    const CLIENT: &str = "casey@example.com";

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn market() -> Marketplace<MemoryStore> {
        let market = Marketplace::new(MemoryStore::new());
        let mut profile = InspectorProfile::new(INSPECTOR, "Ava");
        profile.base_price = 375;
        market.upsert_profile(profile).unwrap();
        market
    }

    fn template(start: &str, repeat: Repeat, until: Option<&str>) -> SlotTemplate {
        SlotTemplate {
            date: date(start),
            start: SlotTime::new(9, Period::Am),
            end: SlotTime::new(11, Period::Am),
            repeat,
            until: until.map(date),
        }
    }

    fn booking() -> BookingDetails {
        BookingDetails {
            client: ClientContact {
                name: "Casey".to_string(),
                email: CLIENT.to_string(),
                phone: "555-0101".to_string(),
            },
            property: Property {
                address: "1 Main St".to_string(),
                city_zip: "Irvine 92618".to_string(),
                ..Property::default()
            },
            notes: "Gate code 1234".to_string(),
        }
    }

    #[test]
    fn test_slot_time_conversion() {
        assert_eq!(SlotTime::new(12, Period::Am).to_24_hour(), "00:00");
        assert_eq!(SlotTime::new(9, Period::Am).to_24_hour(), "09:00");
        assert_eq!(SlotTime::new(12, Period::Pm).to_24_hour(), "12:00");
        assert_eq!(SlotTime::new(2, Period::Pm).to_24_hour(), "14:00");

        assert_eq!(format_12_hour("00:00"), "12:00 AM");
        assert_eq!(format_12_hour("09:00"), "9:00 AM");
        assert_eq!(format_12_hour("12:30"), "12:30 PM");
        assert_eq!(format_12_hour("14:00"), "2:00 PM");
        assert_eq!(format_12_hour("soon"), "soon");
    }

    #[test]
    fn test_template_dates() {
        assert_eq!(
            template("2030-01-01", Repeat::None, Some("2030-12-31")).dates(90),
            vec![date("2030-01-01")]
        );
        assert_eq!(
            template("2030-01-01", Repeat::Daily, Some("2030-01-03")).dates(90),
            vec![date("2030-01-01"), date("2030-01-02"), date("2030-01-03")]
        );
        assert_eq!(
            template("2030-01-01", Repeat::Biweekly, Some("2030-02-01")).dates(90),
            vec![date("2030-01-01"), date("2030-01-15"), date("2030-01-29")]
        );
        assert_eq!(
            template("2030-01-31", Repeat::Monthly, Some("2030-04-30")).dates(90),
            vec![
                date("2030-01-31"),
                date("2030-02-28"),
                date("2030-03-31"),
                date("2030-04-30")
            ]
        );
        // Weekly with the default 90 day horizon, Jan 1 through Apr 1
        assert_eq!(template("2030-01-01", Repeat::Weekly, None).dates(90).len(), 13);
        // An end date before the start yields nothing
        assert!(template("2030-01-05", Repeat::Daily, Some("2030-01-01"))
            .dates(90)
            .is_empty());
    }

    #[test]
    fn test_add_time_slots() {
        let market = market();
        let slots = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::Daily, Some("2030-01-05")))
            .unwrap();
        assert_eq!(slots.len(), 5);
        assert!(slots.iter().all(|s| s.id.starts_with("slot_") && s.available));
        assert_eq!(slots[4].date, "2030-01-05");
        assert_eq!(slots[0].start_time, "09:00");
        assert_eq!(slots[0].end_time, "11:00");

        let profile = market.get_profile(INSPECTOR).unwrap();
        assert_eq!(profile.time_slots().len(), 5);
        assert_eq!(profile.availability.unwrap().next_available, "This week");
    }

    #[test]
    fn test_add_time_slots_rejects_bad_times() {
        let market = market();
        let mut backwards = template("2030-01-01", Repeat::None, None);
        backwards.end = SlotTime::new(9, Period::Am);
        assert!(matches!(
            market.add_time_slots(INSPECTOR, backwards),
            Err(MarketError::Validation(_))
        ));

        let mut bad_hour = template("2030-01-01", Repeat::None, None);
        bad_hour.start = SlotTime::new(13, Period::Am);
        assert!(matches!(
            market.add_time_slots(INSPECTOR, bad_hour),
            Err(MarketError::Validation(_))
        ));

        assert!(matches!(
            market.add_time_slots("nobody@example.com", template("2030-01-01", Repeat::None, None)),
            Err(MarketError::ProfileNotFound(_))
        ));
        assert!(market.get_profile(INSPECTOR).unwrap().time_slots().is_empty());
    }

    #[test]
    fn test_toggle_and_remove_slot() {
        let market = market();
        let slot = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap()
            .remove(0);

        let toggled = market.toggle_slot_availability(INSPECTOR, &slot.id).unwrap();
        assert!(!toggled.available);
        assert!(market.available_slots(INSPECTOR).is_empty());
        assert!(market.toggle_slot_availability(INSPECTOR, &slot.id).unwrap().available);

        market.remove_time_slot(INSPECTOR, &slot.id).unwrap();
        assert!(matches!(
            market.remove_time_slot(INSPECTOR, &slot.id),
            Err(MarketError::SlotNotFound(_))
        ));
        assert!(matches!(
            market.toggle_slot_availability(INSPECTOR, "slot_missing"),
            Err(MarketError::SlotNotFound(_))
        ));
    }

    #[test]
    fn test_available_slots_sorted() {
        let market = market();
        market
            .add_time_slots(INSPECTOR, template("2030-02-01", Repeat::None, None))
            .unwrap();
        market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap();
        let dates: Vec<String> = market
            .available_slots(INSPECTOR)
            .into_iter()
            .map(|s| s.date)
            .collect();
        assert_eq!(dates, vec!["2030-01-01", "2030-02-01"]);
        assert!(market.available_slots("nobody@example.com").is_empty());
    }

    #[test]
    fn test_booking_marks_slot_and_targets_inspector() {
        let market = market();
        let slot = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap()
            .remove(0);

        let request = market
            .create_booking_from_time_slot(&slot.id, "AVA@example.com", booking())
            .unwrap();
        assert_eq!(request.kind, RequestType::ClientRequest);
        assert_eq!(request.target_inspector_email.as_deref(), Some(INSPECTOR));
        assert_eq!(request.schedule.preferred_date, "2030-01-01 09:00 - 11:00");
        assert_eq!(request.budget, Some(375));
        assert_eq!(request.status, RequestStatus::Open);
        assert!(market.available_slots(INSPECTOR).is_empty());
        assert_eq!(market.targeted_requests(INSPECTOR).len(), 1);

        assert!(matches!(
            market.create_booking_from_time_slot(&slot.id, INSPECTOR, booking()),
            Err(MarketError::SlotUnavailable)
        ));
        assert!(matches!(
            market.create_booking_from_time_slot("slot_missing", INSPECTOR, booking()),
            Err(MarketError::SlotNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_booking_leaves_slot_available() {
        let market = market();
        let slot = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap()
            .remove(0);
        let mut details = booking();
        details.property.address.clear();

        assert!(matches!(
            market.create_booking_from_time_slot(&slot.id, INSPECTOR, details),
            Err(MarketError::Validation(_))
        ));
        assert_eq!(market.available_slots(INSPECTOR).len(), 1);
        assert!(market.requests().is_empty());
    }

    #[test]
    fn test_deleting_booking_frees_slot() {
        let market = market();
        let slots = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::Daily, Some("2030-01-02")))
            .unwrap();
        let first = market
            .create_booking_from_time_slot(&slots[0].id, INSPECTOR, booking())
            .unwrap();
        market
            .create_booking_from_time_slot(&slots[1].id, INSPECTOR, booking())
            .unwrap();
        assert!(market.available_slots(INSPECTOR).is_empty());

        market.delete_request(&first.id, CLIENT).unwrap();
        let available = market.available_slots(INSPECTOR);
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, slots[0].id);
    }

    #[test]
    fn test_deleting_open_request_touches_no_slots() {
        let market = market();
        let slot = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap()
            .remove(0);
        market.toggle_slot_availability(INSPECTOR, &slot.id).unwrap();

        let details = booking();
        let open = market
            .add_request(NewRequest {
                kind: RequestType::OpenRequest,
                target_inspector_email: None,
                client: details.client,
                property: details.property,
                schedule: Schedule {
                    preferred_date: "2030-01-01 09:00".to_string(),
                    alt_date: None,
                },
                budget: None,
                notes: String::new(),
            })
            .unwrap();
        market.delete_request(&open.id, CLIENT).unwrap();
        assert!(market.available_slots(INSPECTOR).is_empty());
    }

    #[test]
    fn test_deleting_booking_frees_its_own_slot_when_slots_touch() {
        let market = market();
        let late = SlotTemplate {
            start: SlotTime::new(11, Period::Am),
            end: SlotTime::new(1, Period::Pm),
            ..template("2030-01-01", Repeat::None, None)
        };
        let late = market.add_time_slots(INSPECTOR, late).unwrap().remove(0);
        let early = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap()
            .remove(0);
        market
            .create_booking_from_time_slot(&late.id, INSPECTOR, booking())
            .unwrap();
        let early_booking = market
            .create_booking_from_time_slot(&early.id, INSPECTOR, booking())
            .unwrap();
        assert_eq!(early_booking.schedule.preferred_date, "2030-01-01 09:00 - 11:00");

        market.delete_request(&early_booking.id, CLIENT).unwrap();
        let available: Vec<String> = market
            .available_slots(INSPECTOR)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(available, vec![early.id]);
    }

    /// Fails profile writes on demand; everything else goes to `inner`.
    struct ProfileWritesFail {
        inner: MemoryStore,
        failing: std::rc::Rc<std::cell::Cell<bool>>,
    }

    impl KvStore for ProfileWritesFail {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            if self.failing.get() && key.ends_with(crate::marketplace::PROFILES_DOC) {
                return Err(MarketError::Storage("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_delete_succeeds_when_slot_release_cannot_be_saved() {
        let failing = std::rc::Rc::new(std::cell::Cell::new(false));
        let market = Marketplace::new(ProfileWritesFail {
            inner: MemoryStore::new(),
            failing: failing.clone(),
        });
        market
            .upsert_profile(InspectorProfile::new(INSPECTOR, "Ava"))
            .unwrap();
        let slot = market
            .add_time_slots(INSPECTOR, template("2030-01-01", Repeat::None, None))
            .unwrap()
            .remove(0);
        let request = market
            .create_booking_from_time_slot(&slot.id, INSPECTOR, booking())
            .unwrap();

        failing.set(true);
        market.delete_request(&request.id, CLIENT).unwrap();
        assert!(market.get_request(&request.id).is_none());
        assert!(market.available_slots(INSPECTOR).is_empty());
    }
}
