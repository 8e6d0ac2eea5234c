//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod repo;
pub use repo::{make_market, market_config};

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod route;
pub use route::Route;

mod navbar;
pub use navbar::Header;

mod auth;
pub use auth::{home_route, use_auth, AuthProvider, AuthState, LogoutButton};

mod sync;
pub use sync::{use_data_revision, use_market_memo, DataRevision, SyncProvider};

pub mod toast;
pub use toast::{push_toast, toast_error, toast_success, use_toasts, ToastKind, ToastProvider, Toasts};

mod role_guard;
pub use role_guard::RoleGuard;

mod request_card;
pub use request_card::{InterestButton, RequestCard};

mod profile_editor;
pub use profile_editor::ProfileEditor;

mod availability_manager;
pub use availability_manager::AvailabilityManager;

pub mod form;
