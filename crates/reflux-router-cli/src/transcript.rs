use std::fmt;
use std::sync::{Arc, Mutex};

use colored::Colorize;
use reflux_router::{Action, HistoryEntry, HistorySink, Router, RoutingMode};
use serde_json::Value;

/// Something the router did to its (simulated) host
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Listen(RoutingMode),
    Action { name: String, args: Vec<Value> },
    State(Value),
    History(HistoryEntry),
    Title(String),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Listen(mode) => write!(f, "{} {:?} mode", "listen".dimmed(), mode),
            Event::Action { name, args } => {
                let args: Vec<String> = args.iter().map(Value::to_string).collect();
                write!(f, "{} {}({})", "action".green(), name.cyan(), args.join(", "))
            }
            Event::State(state) => write!(f, "{} {}", "state".yellow(), state),
            Event::History(entry) => write!(
                f,
                "{} {} {}",
                "history".magenta(),
                entry.location,
                entry.title.as_deref().unwrap_or("-")
            ),
            Event::Title(title) => write!(f, "{} {}", "title".blue(), title.bold()),
        }
    }
}

/// Ordered log of host events shared with every host capability
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Transcript {
    pub fn record(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    /// Removes and returns everything recorded so far
    pub fn drain(&self) -> Vec<Event> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }

    /// Action that records its name and arguments
    pub fn action(&self, name: &str) -> Action {
        let transcript = self.clone();
        let name = name.to_string();
        Arc::new(move |args: &[Value]| {
            transcript.record(Event::Action {
                name: name.clone(),
                args: args.to_vec(),
            })
        })
    }

    /// Router whose state applier, history and title all record here
    pub fn router(&self, record_history: bool) -> Router {
        let states = self.clone();
        let titles = self.clone();
        let router = Router::new()
            .with_state_applier(move |state: &Value| states.record(Event::State(state.clone())))
            .with_title_sink(move |title: &str| titles.record(Event::Title(title.to_string())));

        if record_history {
            router.with_history(TranscriptHistory(self.clone()))
        } else {
            router
        }
    }
}

/// History sink that records pushes and listener attachment
struct TranscriptHistory(Transcript);

impl HistorySink for TranscriptHistory {
    fn push_entry(&mut self, entry: HistoryEntry) {
        self.0.record(Event::History(entry));
    }

    fn attach_listener(&mut self, mode: RoutingMode) {
        self.0.record(Event::Listen(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reflux_router::RouteDefinition;
    use serde_json::json;

    #[test]
    fn test_transcript_records_in_order() {
        let transcript = Transcript::default();
        let mut router = transcript.router(true);
        let definition = RouteDefinition::from_action(transcript.action("show"))
            .with_args(vec![json!(1)])
            .with_title("A");
        router.define("a", definition);

        router.navigate_to("a", false);
        assert_eq!(
            transcript.drain(),
            vec![
                Event::History(HistoryEntry {
                    marker: "/a/".to_string(),
                    title: Some("A".to_string()),
                    location: "/a/".to_string(),
                }),
                Event::Action {
                    name: "show".to_string(),
                    args: vec![json!(1)],
                },
                Event::Title("A".to_string()),
            ]
        );
        assert!(transcript.drain().is_empty());
    }

    #[test]
    fn test_router_without_history() {
        let transcript = Transcript::default();
        let mut router = transcript.router(false);
        router.define_route_state("a", json!({"k": "v"}), "");

        router.navigate_to("a", false);
        assert_eq!(transcript.drain(), vec![Event::State(json!({"k": "v"}))]);
    }
}
