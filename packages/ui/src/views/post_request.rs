use dioxus::prelude::*;
use marketplace::{NewRequest, RequestType, Role};

use super::{RequestDraft, RequestForm};
use crate::{make_market, toast_error, toast_success, use_auth, use_data_revision, use_toasts, RoleGuard, Route};

/// Post an open request that every inspector can see.
#[component]
pub fn PostRequest() -> Element {
    rsx! {
        RoleGuard {
            role: Role::Client,
            PostRequestForm {}
        }
    }
}

#[component]
fn PostRequestForm() -> Element {
    let auth = use_auth();
    let revision = use_data_revision();
    let mut toasts = use_toasts();
    let nav = use_navigator();

    let on_submit = move |draft: RequestDraft| {
        let update = draft.update();
        let new = NewRequest {
            kind: RequestType::OpenRequest,
            target_inspector_email: None,
            client: update.client,
            property: update.property,
            schedule: update.schedule,
            budget: update.budget,
            notes: update.notes,
        };
        match make_market().add_request(new) {
            Ok(_) => {
                revision.bump();
                toast_success(&mut toasts, "Request Posted", "Inspectors can now see your request.");
                nav.push(Route::Thanks {});
            }
            Err(e) => toast_error(&mut toasts, "Could not post request", &e),
        }
    };

    rsx! {
        h1 { "Post an Inspection Request" }
        p { class: "muted", "Describe the property and when you'd like it inspected. Interested inspectors will reach out." }
        div {
            class: "card",
            RequestForm {
                initial: RequestDraft::for_user(auth().user.as_ref()),
                submit_label: "Post Request",
                on_submit: on_submit,
                on_cancel: move |_| {
                    nav.push(Route::MyRequests {});
                },
            }
        }
    }
}
