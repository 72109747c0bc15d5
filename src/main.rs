use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fitness_onboarding::api::HttpAccountApi;
use fitness_onboarding::config::ClientConfig;
use fitness_onboarding::navigation::{Navigator, Route};
use fitness_onboarding::onboarding::{
    Alert, FIELDS, FieldSpec, OnboardingScreen, OnboardingWorkflow, SubmitOutcome, USER_ID_KEY,
};
use fitness_onboarding::store::{KeyValueStore, LibSqlStore};

/// Prints the handoff; the terminal has no screen stack.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, route: Route) {
        eprintln!("   → {}", route);
    }
}

type StdinLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    let _log_guard = init_tracing(&config);

    eprintln!("🏋️  Fitness Onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.api_base_url);
    eprintln!("   Store: {}", config.db_path.display());

    let store: Arc<dyn KeyValueStore> = Arc::new(LibSqlStore::new_local(&config.db_path).await?);
    if let Some(existing) = store.get(USER_ID_KEY).await? {
        eprintln!("   Previously onboarded user id: {}", existing);
    }
    eprintln!();

    let api = Arc::new(HttpAccountApi::new(config.api_base_url.clone()));
    let workflow = Arc::new(OnboardingWorkflow::new(
        api,
        Arc::clone(&store),
        Arc::new(TerminalNavigator),
    ));
    let mut screen = OnboardingScreen::new(workflow);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Vec<FieldSpec> = FIELDS.to_vec();

    loop {
        for spec in &pending {
            let Some(value) = prompt(&mut lines, spec).await? else {
                eprintln!("\nInput closed, nothing submitted.");
                return Ok(());
            };
            screen.enter(spec.field, value);
            if let Some(err) = screen.state().visible_error(spec.field) {
                eprintln!("   ✗ {}", err);
            }
        }

        match screen.submit().await {
            SubmitOutcome::Completed(user_id) => {
                eprintln!("✅ Registered and onboarded (user id {})", user_id);
                return Ok(());
            }
            SubmitOutcome::Blocked(errors) => {
                eprintln!("\nPlease fix the highlighted fields:");
                for (field, message) in &errors {
                    eprintln!("   ✗ {}: {}", field, message);
                }
                pending = FIELDS
                    .iter()
                    .copied()
                    .filter(|spec| errors.contains_key(&spec.field))
                    .collect();
            }
            SubmitOutcome::Ignored => {
                eprintln!("A submission is already in progress.");
            }
            SubmitOutcome::Failed(alert) => {
                show_alert(&alert);
                if let Some(message) = screen.state().error_message() {
                    eprintln!("   {}", message);
                }
                eprint!("Try again? [y/N] ");
                match lines.next_line().await? {
                    Some(answer) if answer.trim().eq_ignore_ascii_case("y") => {
                        pending = FIELDS.to_vec();
                    }
                    _ => return Ok(()),
                }
            }
        }
    }
}

async fn prompt(lines: &mut StdinLines, spec: &FieldSpec) -> anyhow::Result<Option<String>> {
    let hint = match (spec.masked, spec.numeric) {
        (true, _) => " (hidden)",
        (_, true) => " (number)",
        _ => "",
    };
    eprint!("{}{}: ", spec.placeholder, hint);
    Ok(lines.next_line().await?)
}

fn show_alert(alert: &Alert) {
    let width = alert.title.len().max(alert.message.len()) + 2;
    eprintln!();
    eprintln!("┌{}┐", "─".repeat(width));
    eprintln!("│ {:<w$} │", alert.title, w = width - 2);
    eprintln!("│ {:<w$} │", alert.message, w = width - 2);
    eprintln!("└{}┘", "─".repeat(width));
}

/// Stderr logging, plus a daily rolling file when a log directory is configured.
fn init_tracing(config: &ClientConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "onboarding.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}
