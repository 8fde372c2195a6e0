use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

use srcbundle::cli::{run, Cli};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let msg = format!("{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

fn collect_events<F: FnOnce()>(f: F) -> Vec<String> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    tracing::subscriber::with_default(subscriber, f);
    let collected = events.lock().unwrap().clone();
    collected
}

#[test]
fn emits_bundle_started_even_when_run_fails() {
    let tmp = tempdir().unwrap();
    let events = collect_events(|| {
        let cli = Cli {
            roots: vec![tmp.path().join("does-not-exist")],
            output: Some(tmp.path().join("out.txt")),
            ..Cli::default()
        };
        assert!(run(cli).is_err());
    });

    assert!(
        events.iter().any(|msg| msg.contains("bundle_started")),
        "Expected a 'bundle_started' trace event, got: {:?}",
        events
    );
    assert!(events.iter().any(|msg| msg.contains("Root directory not found")));
}

#[test]
fn logs_each_project_and_file() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("App.java"), "class App {}").unwrap();

    let events = collect_events(|| {
        let cli = Cli {
            roots: vec![src.clone()],
            output: Some(tmp.path().join("out.txt")),
            compose_file: Some(tmp.path().join("docker-compose.yml")),
            ..Cli::default()
        };
        let report = run(cli).expect("run succeeds");
        assert_eq!(report.appended(), 1);
    });

    assert!(events.iter().any(|msg| msg.contains("Processing project")));
    assert!(events
        .iter()
        .any(|msg| msg.contains("Processing file") && msg.contains("App.java")));
    assert!(events.iter().any(|msg| msg.contains("compose file not found")));
    assert!(events.iter().any(|msg| msg.contains("Done! All files saved")));
}

#[test]
fn missing_root_is_reported_once() {
    let tmp = tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(src.join("App.java"), "class App {}").unwrap();

    let events = collect_events(|| {
        let cli = Cli {
            roots: vec![tmp.path().join("api"), src.clone()],
            output: Some(tmp.path().join("out.txt")),
            no_compose: true,
            ..Cli::default()
        };
        let report = run(cli).expect("run succeeds");
        assert_eq!(report.missing_roots, vec![tmp.path().join("api")]);
    });

    let warnings = events
        .iter()
        .filter(|msg| msg.contains("Root directory not found"))
        .count();
    assert_eq!(warnings, 1, "got: {:?}", events);
}
