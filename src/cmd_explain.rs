//! One-shot commands that talk to a running relay.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use lucid_config::{Config, ConfigValidator};
use lucid_pipeline::{
    AnchorContext, ElementInfo, PanelView, Pipeline, Rect, RelayClient, SelectionSnapshot,
    SharedSelection, UiEvent,
};
use lucid_protocols::ExplanationMode;

/// Options for `lucid explain`.
pub(crate) struct ExplainOptions {
    pub text: String,
    pub code: bool,
    pub mode: Option<ExplanationMode>,
    pub question: Option<String>,
    pub relay_url: Option<String>,
    pub json: bool,
}

/// Snapshot for text passed on the command line. Code is anchored in a
/// `<pre>` so the classifier routes it to the terminal panel.
pub(crate) fn snapshot_for(text: &str, code: bool) -> SelectionSnapshot {
    let snapshot = SelectionSnapshot::new(text, Rect::new(0.0, 0.0, 0.0, 0.0));
    if code {
        snapshot.with_anchor(AnchorContext::new(vec![ElementInfo::new("pre", "")]))
    } else {
        snapshot
    }
}

fn relay_client(config: &Config, url: String) -> RelayClient {
    RelayClient::with_timeout(url, Duration::from_secs(config.pipeline.request_timeout_secs))
}

/// Run one selection through the pipeline and print the final panel view.
/// With a question, the terminal answer is printed after the analysis.
pub(crate) async fn handle_explain(
    mut config: Config,
    options: ExplainOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(url) = options.relay_url {
        config.pipeline.relay_url = url;
    }
    if let Some(mode) = options.mode {
        config.pipeline.mode = mode;
    }

    let client = Arc::new(relay_client(&config, config.pipeline.relay_url.clone()));
    let source = Arc::new(SharedSelection::new());
    let code = options.code || options.question.is_some();
    source.set(snapshot_for(&options.text, code));

    let mut pipeline = Pipeline::new(config.pipeline.clone(), client, source);
    let event = pipeline.read_selection();
    if pipeline.handle_selection(event).is_hidden() {
        return Err(format!(
            "Nothing to explain: text must be 1 to {} characters",
            config.pipeline.max_chars
        )
        .into());
    }

    info!(relay = %config.pipeline.relay_url, "Explain request sent");
    let view = pipeline.settle().await;
    print_view(&view, options.json)?;
    check_view(&view)?;

    if let Some(question) = options.question {
        pipeline.handle_ui(UiEvent::Ask(question));
        let answer = pipeline.settle().await;
        print_view(&answer, options.json)?;
        check_view(&answer)?;
    }
    Ok(())
}

fn check_view(view: &PanelView) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(view, PanelView::Error { .. } | PanelView::NeedsCredentials) {
        return Err("explanation failed".into());
    }
    Ok(())
}

fn print_view(view: &PanelView, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        println!("{view}");
    }
    Ok(())
}

/// Send an API key to the relay.
pub(crate) async fn handle_configure(
    config: Config,
    api_key: String,
    relay_url: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = relay_url.unwrap_or_else(|| config.pipeline.relay_url.clone());
    let client = relay_client(&config, url);
    match client.configure(&api_key).await {
        Ok(()) => {
            println!("API key accepted by {}", client.base_url());
            Ok(())
        }
        Err(e) => Err(e.user_message().into()),
    }
}

/// Validate configuration and print the findings.
pub(crate) fn handle_check_config(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if result.is_valid() {
        println!("Configuration OK");
        Ok(())
    } else {
        Err(format!("{} configuration error(s)", result.errors.len()).into())
    }
}
