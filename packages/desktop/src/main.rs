use dioxus::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tracing::info!("starting InspectNow desktop");
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
