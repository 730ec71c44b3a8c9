// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Indicadores — environmental indicator generator
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::home::Home;
use pages::notification::NotificationBanner;
use pages::settings::Settings;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Indicadores starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(Shell)]
    #[route("/")]
    Home {},
    #[route("/ajustes")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(|| match AppServices::init() {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!(error = %e, "service init failed, using defaults");
            match AppServices::fallback() {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::error!(error = %e, "fallback init failed");
                    None
                }
            }
        }
    });

    let Some(svc) = svc else {
        return rsx! {
            p { style: "padding: 24px; color: #c62828;",
                "No se pudo iniciar la aplicación. Revisa los registros para más detalles."
            }
        };
    };

    // Provide services and state as context for all pages
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        Router::<Route> {}
    }
}

/// Header, navigation, and notification banner around every page.
#[component]
fn Shell() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; min-height: 100vh; font-family: system-ui, -apple-system, sans-serif; background: #f4f7f5;",

            header {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 16px 24px; background: #2e7d32; color: white;",
                div {
                    h1 { style: "margin: 0; font-size: 22px;", "Generador de Indicadores Ambientales" }
                    p { style: "margin: 4px 0 0; font-size: 13px; opacity: 0.9;",
                        "Instituto Nacional de Estadística y Geografía"
                    }
                }
                nav { style: "display: flex; gap: 16px;",
                    NavLink { to: Route::Home {}, label: "Consulta" }
                    NavLink { to: Route::Settings {}, label: "Ajustes" }
                }
            }

            NotificationBanner {}

            main { style: "flex: 1; width: 100%; max-width: 960px; margin: 0 auto; padding: 24px 16px; box-sizing: border-box;",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn NavLink(to: Route, label: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "color: white; text-decoration: none; font-size: 14px;",
            "{label}"
        }
    }
}
