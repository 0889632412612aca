//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use cityconnect::notify::NotificationState;
use cityconnect::{ApiClient, ClientConfig, TokenStore};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::route_guard::{AdminRoute, ProtectedRoute};
use crate::components::toast_host::ToastHost;
use crate::pages::{
    admin_dashboard::AdminDashboardPage, issue_detail::IssueDetailPage, login::LoginPage, my_issues::MyIssuesPage,
    profile::ProfilePage, register::RegisterPage, submit::SubmitPage,
};
use crate::state::session::SessionContext;
use crate::util::browser_storage::BrowserStorage;

/// API base baked in at build time, else the local default.
pub fn build_config(api_url: Option<&str>) -> ClientConfig {
    match api_url.map(ClientConfig::new) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            leptos::logging::warn!("ignoring CITYCONNECT_API_URL: {e}");
            ClientConfig::default()
        }
        None => ClientConfig::default(),
    }
}

/// Root application component.
///
/// Restores the session before the first render so guards never see the
/// `Unknown` state, then provides session, API, and toast contexts.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = build_config(option_env!("CITYCONNECT_API_URL"));
    let store = TokenStore::new(BrowserStorage);
    let api = ApiClient::new(&config, store.clone());
    let session = SessionContext::restore(store);
    let toasts = RwSignal::new(NotificationState::default());

    provide_context(config);
    provide_context(api);
    provide_context(session);
    provide_context(toasts);

    view! {
        <Title text="CityConnect"/>

        <Router>
            <NavBar/>
            <main class="page">
                <Routes fallback=|| view! { <p class="page-status">"Page not found."</p> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route
                        path=StaticSegment("")
                        view=|| view! { <ProtectedRoute><SubmitPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("my-issues")
                        view=|| view! { <ProtectedRoute><MyIssuesPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("issue"), ParamSegment("id"))
                        view=|| view! { <ProtectedRoute><IssueDetailPage/></ProtectedRoute> }
                    />
                    <Route
                        path=StaticSegment("admin")
                        view=|| view! { <AdminRoute><AdminDashboardPage/></AdminRoute> }
                    />
                    <Route
                        path=StaticSegment("profile")
                        view=|| view! { <ProtectedRoute><ProfilePage/></ProtectedRoute> }
                    />
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
