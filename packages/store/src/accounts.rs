//! Accounts and the session: signup, login, profile edits and account deletion.
//!
//! Deleting an account cascades into the shared documents by email and role:
//! a client's requests are removed, while an inspector is stripped from every
//! interested list, their targeted requests go back on the open board and
//! their directory profile is removed.

use chrono::{Days, Utc};

use crate::availability::{Period, Repeat, SlotTemplate, SlotTime};
use crate::error::{MarketError, Result};
use crate::kv::KvStore;
use crate::marketplace::{new_id, now_timestamp, Marketplace, SESSION_DOC, USERS_DOC};
use crate::models::{normalize_email, same_email, Request, RequestStatus, RequestType, Role, Session, User};
use crate::password::{hash_password, verify_password};

pub const DEMO_CLIENT_EMAIL: &str = "client_demo@example.com";
pub const DEMO_INSPECTOR_EMAIL: &str = "inspector_demo@example.com";

const MIN_PASSWORD_LEN: usize = 8;

/// Form data for creating an account.
#[derive(Clone, Debug, PartialEq)]
pub struct SignupData {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Editable account fields. `None` leaves a field alone; a blank string clears it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<S: KvStore> Marketplace<S> {
    pub fn users(&self) -> Vec<User> {
        self.load_list(USERS_DOC)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        self.save_list(USERS_DOC, users)
    }

    pub fn find_user_by_id(&self, id: &str) -> Option<User> {
        self.users().into_iter().find(|u| u.id == id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users()
            .into_iter()
            .find(|u| same_email(&u.email, email))
    }

    pub fn session(&self) -> Option<Session> {
        self.load_value(SESSION_DOC)
    }

    fn start_session(&self, user_id: &str) -> Result<Session> {
        let session = Session {
            user_id: user_id.to_string(),
            created_at: now_timestamp(),
        };
        self.save_value(SESSION_DOC, &session)?;
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.remove_doc(SESSION_DOC)
    }

    /// Resolve the session to a user. A session for a deleted user is cleared.
    pub fn current_user(&self) -> Option<User> {
        let session = self.session()?;
        match self.find_user_by_id(&session.user_id) {
            Some(user) => Some(user),
            None => {
                tracing::warn!(user_id = %session.user_id, "clearing session for unknown user");
                if let Err(e) = self.logout() {
                    tracing::warn!(error = %e, "failed to clear stale session");
                }
                None
            }
        }
    }

    /// Create an account and log it in. Inspectors also get a directory profile.
    pub fn signup(&self, data: SignupData) -> Result<User> {
        let email = normalize_email(&data.email);
        if email.is_empty() || !email.contains('@') {
            return Err(MarketError::validation("Please enter a valid email address"));
        }
        if data.password.len() < MIN_PASSWORD_LEN {
            return Err(MarketError::validation(
                "Password must be at least 8 characters",
            ));
        }

        let mut users = self.users();
        if users.iter().any(|u| same_email(&u.email, &email)) {
            return Err(MarketError::EmailTaken);
        }

        let user = User {
            id: new_id("usr"),
            email,
            password_hash: hash_password(&data.password),
            role: data.role,
            name: non_blank(data.name),
            phone: non_blank(data.phone),
            created_at: now_timestamp(),
        };
        users.push(user.clone());
        self.save_users(&users)?;

        if user.is_inspector() {
            self.upsert_profile(self.default_profile_for(&user))?;
        }

        self.start_session(&user.id)?;
        tracing::info!(email = %user.email, role = user.role.as_str(), "account created");
        Ok(user)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let user = self
            .find_user_by_email(email)
            .ok_or(MarketError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash) {
            return Err(MarketError::InvalidCredentials);
        }
        self.start_session(&user.id)?;
        tracing::info!(email = %user.email, "logged in");
        Ok(user)
    }

    pub fn update_user(&self, id: &str, update: UserUpdate) -> Result<User> {
        let mut users = self.users();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(MarketError::UserNotFound)?;
        if update.name.is_some() {
            user.name = non_blank(update.name);
        }
        if update.phone.is_some() {
            user.phone = non_blank(update.phone);
        }
        let updated = user.clone();
        self.save_users(&users)?;
        Ok(updated)
    }

    /// Delete a user by email (if the identifier contains `@`) or by id.
    ///
    /// Returns `Ok(false)` when there is no such user.
    pub fn delete_user(&self, identifier: &str) -> Result<bool> {
        let users = self.users();
        let by_email = identifier.contains('@');
        let Some(user) = users
            .iter()
            .find(|u| {
                if by_email {
                    same_email(&u.email, identifier)
                } else {
                    u.id == identifier
                }
            })
            .cloned()
        else {
            return Ok(false);
        };

        let kept: Vec<User> = users.into_iter().filter(|u| u.id != user.id).collect();
        self.save_users(&kept)?;

        if self.session().is_some_and(|s| s.user_id == user.id) {
            self.logout()?;
        }

        self.cascade_delete(&user.email, user.role)?;
        tracing::info!(email = %user.email, "account deleted");
        Ok(true)
    }

    /// Delete the logged-in user's account.
    pub fn delete_account(&self) -> Result<()> {
        let user = self.current_user().ok_or(MarketError::NotLoggedIn)?;
        self.delete_user(&user.id)?;
        Ok(())
    }

    fn cascade_delete(&self, email: &str, role: Role) -> Result<()> {
        let requests = self.requests();
        match role {
            Role::Client => {
                let kept: Vec<Request> = requests
                    .into_iter()
                    .filter(|r| !r.is_owned_by(email))
                    .collect();
                self.save_requests(&kept)
            }
            Role::Inspector => {
                let updated: Vec<Request> = requests
                    .into_iter()
                    .map(|mut r| {
                        r.interested_inspector_emails.retain(|e| !same_email(e, email));
                        if r.target_inspector_email
                            .as_deref()
                            .is_some_and(|t| same_email(t, email))
                        {
                            r.kind = RequestType::OpenRequest;
                            r.target_inspector_email = None;
                            if r.status == RequestStatus::Matched {
                                r.status = RequestStatus::Open;
                            }
                        }
                        r.normalized()
                    })
                    .collect();
                self.save_requests(&updated)?;
                self.remove_profile(email)?;
                Ok(())
            }
        }
    }

    /// Seed the demo client and inspector when there are no users yet.
    ///
    /// Returns whether anything was seeded.
    pub fn initialize_demo_accounts(&self) -> Result<bool> {
        if !self.config().seed.demo_accounts || !self.users().is_empty() {
            return Ok(false);
        }

        let password_hash = hash_password(&self.config().seed.demo_password);
        let demo_inspector = User {
            id: new_id("usr"),
            email: DEMO_INSPECTOR_EMAIL.to_string(),
            password_hash: password_hash.clone(),
            role: Role::Inspector,
            name: Some("Demo Inspector".to_string()),
            phone: None,
            created_at: now_timestamp(),
        };
        let demo_client = User {
            id: new_id("usr"),
            email: DEMO_CLIENT_EMAIL.to_string(),
            password_hash,
            role: Role::Client,
            name: Some("Demo Client".to_string()),
            phone: None,
            created_at: now_timestamp(),
        };
        self.save_users(&[demo_inspector.clone(), demo_client])?;

        let mut profile = self.default_profile_for(&demo_inspector);
        profile.service_areas = vec!["Irvine".to_string(), "Tustin".to_string()];
        profile.specialties = vec!["Roof".to_string(), "Foundation".to_string()];
        profile.base_price = 350;
        self.upsert_profile(profile)?;

        // A week of morning slots starting tomorrow.
        let today = Utc::now().date_naive();
        if let (Some(start), Some(until)) = (
            today.checked_add_days(Days::new(1)),
            today.checked_add_days(Days::new(7)),
        ) {
            self.add_time_slots(
                DEMO_INSPECTOR_EMAIL,
                SlotTemplate {
                    date: start,
                    start: SlotTime::new(9, Period::Am),
                    end: SlotTime::new(11, Period::Am),
                    repeat: Repeat::Daily,
                    until: Some(until),
                },
            )?;
        }

        tracing::info!("seeded demo accounts");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::models::{ClientContact, Property, Schedule};
    use crate::requests::NewRequest;

    fn market() -> Marketplace<MemoryStore> {
        Marketplace::new(MemoryStore::new())
    }

    fn signup(market: &Marketplace<MemoryStore>, email: &str, role: Role) -> User {
        market
            .signup(SignupData {
                email: email.to_string(),
                password: "password123".to_string(),
                role,
                name: Some("Test".to_string()),
                phone: None,
            })
            .unwrap()
    }

    fn open_request(client_email: &str) -> NewRequest {
        NewRequest {
            kind: RequestType::OpenRequest,
            target_inspector_email: None,
            client: ClientContact {
                name: "Casey".to_string(),
                email: client_email.to_string(),
                phone: String::new(),
            },
            property: Property {
                address: "1 Main St".to_string(),
                city_zip: "Irvine 92618".to_string(),
                ..Property::default()
            },
            schedule: Schedule {
                preferred_date: "2030-01-10T09:00".to_string(),
                alt_date: None,
            },
            budget: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_signup_logs_in_and_lowercases_email() {
        let market = market();
        let user = signup(&market, "  Casey@Example.COM ", Role::Client);
        assert_eq!(user.email, "casey@example.com");
        assert_eq!(market.current_user(), Some(user.clone()));
        assert_eq!(market.session().unwrap().user_id, user.id);
        assert_ne!(user.password_hash, "password123");
    }

    #[test]
    fn test_signup_rejects_duplicate_email_case_insensitively() {
        let market = market();
        signup(&market, "casey@example.com", Role::Client);
        let err = market
            .signup(SignupData {
                email: "CASEY@example.com".to_string(),
                password: "password123".to_string(),
                role: Role::Inspector,
                name: None,
                phone: None,
            })
            .unwrap_err();
        assert!(matches!(err, MarketError::EmailTaken));
        assert_eq!(market.users().len(), 1);
    }

    #[test]
    fn test_signup_validation() {
        let market = market();
        let bad_email = market.signup(SignupData {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            role: Role::Client,
            name: None,
            phone: None,
        });
        assert!(matches!(bad_email, Err(MarketError::Validation(_))));

        let short = market.signup(SignupData {
            email: "a@b.com".to_string(),
            password: "short".to_string(),
            role: Role::Client,
            name: None,
            phone: None,
        });
        assert!(matches!(short, Err(MarketError::Validation(_))));
        assert!(market.users().is_empty());
    }

    #[test]
    fn test_inspector_signup_creates_profile() {
        let market = market();
        let user = market
            .signup(SignupData {
                email: "ava@example.com".to_string(),
                password: "password123".to_string(),
                role: Role::Inspector,
                name: None,
                phone: Some("555-0100".to_string()),
            })
            .unwrap();
        let profile = market.get_profile(&user.email).unwrap();
        assert_eq!(profile.display_name, "ava");
        assert_eq!(profile.base_price, 400);
        assert_eq!(profile.phone.as_deref(), Some("555-0100"));
        assert!(profile.verified);
    }

    #[test]
    fn test_login_and_logout() {
        let market = market();
        let user = signup(&market, "casey@example.com", Role::Client);
        market.logout().unwrap();
        assert!(market.current_user().is_none());

        assert!(matches!(
            market.login("casey@example.com", "wrong-password"),
            Err(MarketError::InvalidCredentials)
        ));
        assert!(matches!(
            market.login("nobody@example.com", "password123"),
            Err(MarketError::InvalidCredentials)
        ));
        assert!(market.current_user().is_none());

        let logged_in = market.login("CASEY@example.com", "password123").unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(market.current_user().unwrap().id, user.id);
    }

    #[test]
    fn test_stale_session_is_cleared() {
        let store = MemoryStore::new();
        let market = Marketplace::new(store.clone());
        store
            .set("inspect_now_session", r#"{"userId": "usr_gone"}"#)
            .unwrap();
        assert!(market.current_user().is_none());
        assert!(store.get("inspect_now_session").is_none());
    }

    #[test]
    fn test_update_user() {
        let market = market();
        let user = signup(&market, "casey@example.com", Role::Client);
        let updated = market
            .update_user(
                &user.id,
                UserUpdate {
                    name: None,
                    phone: Some(" 555-0199 ".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated.name.as_deref(), Some("Test"));
        assert_eq!(updated.phone.as_deref(), Some("555-0199"));

        let cleared = market
            .update_user(
                &user.id,
                UserUpdate {
                    name: Some(String::new()),
                    phone: None,
                },
            )
            .unwrap();
        assert!(cleared.name.is_none());
        assert_eq!(market.find_user_by_id(&user.id).unwrap(), cleared);

        assert!(matches!(
            market.update_user("missing", UserUpdate::default()),
            Err(MarketError::UserNotFound)
        ));
    }

    #[test]
    fn test_delete_client_removes_their_requests_only() {
        let market = market();
        signup(&market, "other@example.com", Role::Client);
        market.add_request(open_request("other@example.com")).unwrap();
        let casey = signup(&market, "casey@example.com", Role::Client);
        market.add_request(open_request("casey@example.com")).unwrap();
        market.add_request(open_request("Casey@Example.com")).unwrap();
        assert_eq!(market.requests().len(), 3);

        assert!(market.delete_user(&casey.id).unwrap());
        let remaining = market.requests();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].client.email, "other@example.com");
        assert!(market.find_user_by_email("other@example.com").is_some());
        // Casey was logged in, so the session is gone
        assert!(market.session().is_none());
    }

    #[test]
    fn test_delete_inspector_strips_references() {
        let market = market();
        signup(&market, "ava@example.com", Role::Inspector);
        signup(&market, "bob@example.com", Role::Inspector);

        let open = market.add_request(open_request("casey@example.com")).unwrap();
        market.toggle_interest(&open.id, "ava@example.com").unwrap();
        market.toggle_interest(&open.id, "bob@example.com").unwrap();

        let mut targeted = open_request("casey@example.com");
        targeted.kind = RequestType::ClientRequest;
        targeted.target_inspector_email = Some("ava@example.com".to_string());
        let targeted = market.add_request(targeted).unwrap();
        market
            .set_request_status(&targeted.id, "casey@example.com", RequestStatus::Matched)
            .unwrap();

        // Delete by email, not the logged-in user
        assert!(market.delete_user("AVA@example.com").unwrap());

        let open = market.get_request(&open.id).unwrap();
        assert_eq!(open.interested_inspector_emails, vec!["bob@example.com"]);
        assert_eq!(open.interest_count, 1);

        let targeted = market.get_request(&targeted.id).unwrap();
        assert_eq!(targeted.kind, RequestType::OpenRequest);
        assert!(targeted.target_inspector_email.is_none());
        assert_eq!(targeted.status, RequestStatus::Open);

        assert!(market.get_profile("ava@example.com").is_none());
        assert!(market.get_profile("bob@example.com").is_some());
        // Bob is still logged in
        assert_eq!(market.current_user().unwrap().email, "bob@example.com");
    }

    #[test]
    fn test_delete_unknown_user() {
        let market = market();
        assert!(!market.delete_user("nobody@example.com").unwrap());
        assert!(!market.delete_user("usr_missing").unwrap());
    }

    #[test]
    fn test_delete_account_requires_login() {
        let market = market();
        assert!(matches!(market.delete_account(), Err(MarketError::NotLoggedIn)));

        signup(&market, "casey@example.com", Role::Client);
        market.delete_account().unwrap();
        assert!(market.users().is_empty());
        assert!(market.current_user().is_none());
    }

    #[test]
    fn test_demo_accounts_seed_once() {
        let market = market();
        assert!(market.initialize_demo_accounts().unwrap());
        assert_eq!(market.users().len(), 2);
        assert!(!market.initialize_demo_accounts().unwrap());
        assert_eq!(market.users().len(), 2);

        let inspector = market.login(DEMO_INSPECTOR_EMAIL, "DemoPass123").unwrap();
        assert!(inspector.is_inspector());
        assert!(market.login(DEMO_CLIENT_EMAIL, "DemoPass123").unwrap().is_client());

        let profile = market.get_profile(DEMO_INSPECTOR_EMAIL).unwrap();
        assert_eq!(profile.time_slots().len(), 7);
        assert!(profile.time_slots().iter().all(|s| s.start_time == "09:00"));
    }

    #[test]
    fn test_demo_seeding_can_be_disabled() {
        let market = Marketplace::with_config(
            MemoryStore::new(),
            crate::MarketConfig::default().with_demo_accounts(false),
        );
        assert!(!market.initialize_demo_accounts().unwrap());
        assert!(market.users().is_empty());
    }
}
