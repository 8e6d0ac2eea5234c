use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

fn main() {
    if let Err(e) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {e}");
    }
    tracing::info!("starting InspectNow web");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }
        ui::SyncProvider {
            ui::AuthProvider {
                ui::ToastProvider {
                    Router::<ui::Route> {}
                }
            }
        }
    }
}
