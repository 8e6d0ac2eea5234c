//! A client's own requests: edit, close or reopen, and delete.

use dioxus::prelude::*;
use marketplace::{Request, RequestStatus, RequestType, Role};

use super::{ModalOverlay, RequestDraft, RequestForm};
use crate::request_card::{format_preferred, property_summary};
use crate::{make_market, toast_error, toast_success, use_auth, use_data_revision, use_market_memo, use_toasts, RoleGuard, Route};

#[component]
pub fn MyRequests() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Client,
            MyRequestsList {}
        }
    }
}

#[component]
fn MyRequestsList() -> Element {
    let auth = use_auth();
    let email = auth().email().unwrap_or_default().to_string();
    let owner = email.clone();
    let requests = use_market_memo(move || make_market().client_requests(&owner));
    let mut editing = use_signal(|| Option::<Request>::None);
    let mut deleting = use_signal(|| Option::<Request>::None);

    let revision = use_data_revision();
    let mut toasts = use_toasts();

    let save_email = email.clone();
    let on_save = move |draft: RequestDraft| {
        let Some(request) = editing() else {
            return;
        };
        match make_market().update_request(&request.id, &save_email, draft.update()) {
            Ok(_) => {
                revision.bump();
                editing.set(None);
                toast_success(&mut toasts, "Request Updated", "Your changes have been saved.");
            }
            Err(e) => toast_error(&mut toasts, "Update Failed", &e),
        }
    };

    let delete_email = email.clone();
    let on_confirm_delete = move |_| {
        let Some(request) = deleting() else {
            return;
        };
        match make_market().delete_request(&request.id, &delete_email) {
            Ok(()) => {
                revision.bump();
                deleting.set(None);
                toast_success(&mut toasts, "Request Deleted", "The request has been removed.");
            }
            Err(e) => toast_error(&mut toasts, "Delete Failed", &e),
        }
    };

    rsx! {
        div {
            class: "page-head",
            h1 { "My Requests" }
            Link { class: "btn btn--primary", to: Route::PostRequest {}, "Post New Request" }
        }
        if requests.read().is_empty() {
            div {
                class: "card empty",
                h3 { "No Requests Yet" }
                p { "You haven't posted any inspection requests yet." }
            }
        }
        for request in requests() {
            MyRequestRow {
                key: "{request.id}",
                request: request.clone(),
                owner_email: email.clone(),
                on_edit: move |r| editing.set(Some(r)),
                on_delete: move |r| deleting.set(Some(r)),
            }
        }
        if let Some(request) = editing() {
            ModalOverlay {
                title: "Edit Request",
                on_close: move |_| editing.set(None),
                RequestForm {
                    key: "{request.id}",
                    initial: RequestDraft::from_request(&request),
                    submit_label: "Save Changes",
                    on_submit: on_save,
                    on_cancel: move |_| editing.set(None),
                }
            }
        }
        if let Some(request) = deleting() {
            ModalOverlay {
                title: "Delete Request",
                on_close: move |_| deleting.set(None),
                p { "Delete the request for {request.property.address}? This cannot be undone." }
                if request.kind == RequestType::ClientRequest {
                    p { class: "muted", "The inspector's time slot will be freed." }
                }
                div {
                    class: "form-actions",
                    button { class: "btn btn--ghost", onclick: move |_| deleting.set(None), "Cancel" }
                    button { class: "btn btn--danger", onclick: on_confirm_delete, "Delete Request" }
                }
            }
        }
    }
}

#[component]
fn MyRequestRow(
    request: Request,
    owner_email: String,
    on_edit: EventHandler<Request>,
    on_delete: EventHandler<Request>,
) -> Element {
    let revision = use_data_revision();
    let mut toasts = use_toasts();

    let next_status = match request.status {
        RequestStatus::Closed => RequestStatus::Open,
        RequestStatus::Open | RequestStatus::Matched => RequestStatus::Closed,
    };
    let status_action = if next_status == RequestStatus::Closed { "Close" } else { "Reopen" };
    let status_id = request.id.clone();
    let on_status = move |_| match make_market().set_request_status(&status_id, &owner_email, next_status) {
        Ok(updated) => {
            revision.bump();
            toast_success(&mut toasts, "Status Updated", &format!("Request is now {}", updated.status.label()));
        }
        Err(e) => toast_error(&mut toasts, "Status Update Failed", &e),
    };

    let preferred = format_preferred(&request.schedule.preferred_date);
    let property = property_summary(&request);
    let status = request.status.label();
    let target = request.target_inspector_email.clone();
    let edit_request = request.clone();
    let delete_request = request.clone();

    rsx! {
        div {
            class: "card request-row",
            div {
                h3 { "{request.property.address}, {request.property.city_zip}" }
                p { class: "muted", "{property}" }
                p { "Preferred: {preferred}" }
                if let Some(target) = target {
                    p { class: "muted", "Booked with {target}" }
                }
                if !request.notes.is_empty() {
                    p {
                        strong { "Notes: " }
                        "{request.notes}"
                    }
                }
            }
            div {
                class: "request-row__side",
                span { class: "badge", "{status}" }
                span { class: "muted", "{request.interest_count} interested" }
                div {
                    class: "form-actions",
                    button {
                        class: "btn btn--outline btn--sm",
                        onclick: move |_| on_edit.call(edit_request.clone()),
                        "Edit"
                    }
                    button { class: "btn btn--outline btn--sm", onclick: on_status, "{status_action}" }
                    button {
                        class: "btn btn--danger btn--sm",
                        onclick: move |_| on_delete.call(delete_request.clone()),
                        "Delete"
                    }
                }
            }
        }
    }
}
