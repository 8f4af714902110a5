//! services/console/src/bin/console.rs
//!
//! Wires the transport adapter, session store, and route table together and
//! walks every screen once: gate first, then the screen's list controller.

use std::sync::Arc;

use campus_console_core::domain::{
    CourseGroup, Credentials, EnrollmentRequest, Student, Subject, Teacher,
};
use campus_console_core::gate::{RouteDecision, RouteGate};
use campus_console_core::list::ListController;
use campus_console_core::pagination::{plan, PageEntry};
use campus_console_core::session::{SessionState, SessionStore};
use console_lib::{
    adapters::http::{HttpApi, RestCollection, RestEntity},
    config::Config,
    error::ConsoleError,
    routes::{LOGIN_PATH, ROUTE_TABLE, UNAUTHORIZED_PATH},
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ConsoleError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Backend at {}", config.api_base_url);

    // --- 2. Build the Transport Adapter & Session Store ---
    let api = Arc::new(HttpApi::new(&config.api_base_url)?);
    let session = SessionStore::new(api.clone());

    // --- 3. Resolve the Session ---
    // Screens stay blocked until the probe settles.
    session.bootstrap().await;
    if !session.state().is_authenticated() {
        if let (Some(email), Some(password)) = (config.email.clone(), config.password.clone()) {
            info!("No active session, signing in as {email}");
            let credentials = Credentials { email, password };
            if let Err(sign_in_error) = session.login(&credentials).await {
                error!(%sign_in_error, "sign-in failed");
                return Err(sign_in_error.into());
            }
        }
    }

    // --- 4. Walk the Route Table ---
    let gate = RouteGate::new(LOGIN_PATH, UNAUTHORIZED_PATH);
    for screen in ROUTE_TABLE {
        match gate.decide(&session.state(), screen.allowed_roles) {
            RouteDecision::ShowLoading => {
                println!("\n== {} ==\n  loading...", screen.title);
            }
            RouteDecision::RedirectTo(path) => {
                println!("\n== {} ==\n  -> {path}", screen.title);
            }
            RouteDecision::Render => match screen.path {
                "/dashboard" => {
                    if let SessionState::Authenticated(user) = session.state() {
                        println!(
                            "\n== {} ==\n  Signed in as {} ({:?})",
                            screen.title, user.name, user.role
                        );
                    }
                }
                "/students" => show_collection::<Student>(screen.title, &api, &config).await,
                "/teachers" => show_collection::<Teacher>(screen.title, &api, &config).await,
                "/subjects" => show_collection::<Subject>(screen.title, &api, &config).await,
                "/course-groups" => {
                    show_collection::<CourseGroup>(screen.title, &api, &config).await
                }
                "/enrollment-requests" => {
                    show_collection::<EnrollmentRequest>(screen.title, &api, &config).await
                }
                other => warn!("no renderer registered for {other}"),
            },
        }
    }

    Ok(())
}

/// Fetches page 0 of one collection and prints its rows plus the pagination
/// strip. Read failures surface as an inline banner, never a blank screen.
async fn show_collection<E>(title: &str, api: &Arc<HttpApi>, config: &Config)
where
    E: RestEntity + Row,
{
    let source = Arc::new(RestCollection::<E>::new(api.clone()));
    let controller = ListController::new(source, config.page_size);
    controller.go_to_page(0).await;

    let state = controller.snapshot();
    println!("\n== {title} ==");
    if let Some(banner) = &state.error {
        println!("  (!) {banner}");
        return;
    }
    for item in state.visible() {
        println!("  {}", item.row());
    }
    if let Some(page) = &state.page {
        // single-page collections get no strip at all
        if page.total_pages > 1 {
            let strip = plan(page.page_index + 1, page.total_pages, config.sibling_count);
            println!("  [{}]", render_strip(&strip));
        }
        println!("  showing {} of {}", page.items.len(), page.total_elements);
    }
}

fn render_strip(entries: &[PageEntry]) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            PageEntry::Page(number) => number.to_string(),
            PageEntry::Gap => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// How one row of each collection prints on the console.
trait Row {
    fn row(&self) -> String;
}

impl Row for Student {
    fn row(&self) -> String {
        format!("{} <{}> {}", self.name, self.email, self.major)
    }
}

impl Row for Teacher {
    fn row(&self) -> String {
        format!("{} <{}> {}", self.name, self.email, self.department)
    }
}

impl Row for Subject {
    fn row(&self) -> String {
        format!("{} {} ({} cr)", self.code, self.name, self.credits)
    }
}

impl Row for CourseGroup {
    fn row(&self) -> String {
        let teacher = match self.teacher_id {
            Some(id) => id.to_string(),
            None => "unassigned".to_string(),
        };
        format!("{} capacity {} teacher {}", self.name, self.capacity, teacher)
    }
}

impl Row for EnrollmentRequest {
    fn row(&self) -> String {
        format!(
            "request {} student {} group {} {:?} ({})",
            self.id,
            self.student_id,
            self.group_id,
            self.status,
            self.created_at.format("%Y-%m-%d")
        )
    }
}
