mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod request_form;
pub use request_form::{RequestDraft, RequestForm};

mod landing;
pub use landing::Landing;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod inspectors;
pub use inspectors::Inspectors;

mod inspector_detail;
pub use inspector_detail::InspectorDetail;

mod post_request;
pub use post_request::PostRequest;

mod my_requests;
pub use my_requests::MyRequests;

mod requests_list;
pub use requests_list::RequestsList;

mod request_detail;
pub use request_detail::RequestDetail;

mod dashboard;
pub use dashboard::Dashboard;

mod account;
pub use account::Account;

mod status_pages;
pub use status_pages::{Forbidden, NotFound, Thanks};
