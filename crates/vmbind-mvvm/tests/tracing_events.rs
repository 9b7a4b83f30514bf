//! Structured log events emitted by providers and views.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};
use vmbind_mvvm::{DataProvider, Person, PersonView, PersonViewModel};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Event {
    message: String,
    fields: Vec<(String, u64)>,
}

impl Event {
    fn field(&self, name: &str) -> Option<u64> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }
}

impl tracing::field::Visit for Event {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push((field.name().to_string(), value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        if let Ok(value) = u64::try_from(value) {
            self.fields.push((field.name().to_string(), value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}").trim_matches('"').to_string();
        }
    }
}

struct Capture {
    events: Arc<Mutex<Vec<Event>>>,
}

impl<S> Layer<S> for Capture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut captured = Event::default();
        event.record(&mut captured);
        self.events.lock().expect("capture lock").push(captured);
    }
}

fn capture() -> (Arc<Mutex<Vec<Event>>>, tracing::subscriber::DefaultGuard) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        events: Arc::clone(&events),
    });
    (events, tracing::subscriber::set_default(subscriber))
}

fn find(events: &Arc<Mutex<Vec<Event>>>, message: &str) -> Vec<Event> {
    events
        .lock()
        .expect("capture lock")
        .iter()
        .filter(|event| event.message == message)
        .cloned()
        .collect()
}

fn provider() -> Rc<DataProvider<Person>> {
    Rc::new(
        DataProvider::new(vec![
            Person::new("Ms", "Ada", "One"),
            Person::new("Mr", "Bo", "Two"),
        ])
        .expect("non-empty dataset"),
    )
}

#[test]
fn provider_advance_logs_from_and_to() {
    let (events, _guard) = capture();
    let provider = provider();
    let _ = provider.advance();
    let _ = provider.advance();

    let advances = find(&events, "provider.advance");
    assert_eq!(advances.len(), 2);
    assert_eq!(advances[0].field("from"), Some(0));
    assert_eq!(advances[0].field("to"), Some(1));
    assert_eq!(advances[1].field("from"), Some(1));
    assert_eq!(advances[1].field("to"), Some(0));
}

#[test]
fn view_bind_and_dispose_are_logged() {
    let (events, _guard) = capture();
    let provider = provider();
    let mut view = PersonView::new(PersonViewModel::from_provider(&provider));

    let binds = find(&events, "view.bind");
    assert_eq!(binds.len(), 1);
    assert_eq!(binds[0].field("bindings"), Some(2));

    view.on_next_pressed().expect("provider bound");
    view.dispose();
    drop(view);

    let disposals = find(&events, "view.dispose");
    assert_eq!(disposals.len(), 1, "dispose runs once even with Drop");
    assert_eq!(disposals[0].field("bindings"), Some(2));
    assert_eq!(find(&events, "provider.advance").len(), 1);
}
