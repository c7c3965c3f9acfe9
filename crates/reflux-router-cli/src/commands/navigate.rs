use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use reflux_router::RouteTable;

use super::{build_router, load_table};
use crate::transcript::{Event, Transcript};

pub fn execute(
    table_path: &Path,
    location: &str,
    paths: &[String],
    record_history: bool,
) -> Result<()> {
    let table = load_table(table_path)?;
    let steps = navigate(&table, location, paths, record_history)?;

    for step in steps {
        println!("{} {}", "→".green().bold(), step.label.cyan());
        for event in &step.events {
            println!("    {event}");
        }
        println!(
            "    {} {}",
            "returned".dimmed(),
            step.title.as_deref().unwrap_or("no title")
        );
    }

    Ok(())
}

/// Events produced by one navigation
#[derive(Debug, PartialEq)]
pub struct Step {
    pub label: String,
    pub events: Vec<Event>,
    pub title: Option<String>,
}

/// Initializes routing at `location`, then navigates to each path in order
pub fn navigate(
    table: &RouteTable,
    location: &str,
    paths: &[String],
    record_history: bool,
) -> Result<Vec<Step>> {
    let transcript = Transcript::default();
    let mut router = build_router(table, &transcript, record_history)?;

    let title = router
        .initialize_routing(
            &table.routing.default_route,
            &table.routing.marker,
            Some(location),
        )
        .context("Failed to initialize routing")?;

    let mut steps = vec![Step {
        label: format!("initialize {location:?}"),
        events: transcript.drain(),
        title,
    }];

    for path in paths {
        let title = router.navigate_to(path, false);
        steps.push(Step {
            label: format!("navigate {path:?}"),
            events: transcript.drain(),
            title,
        });
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reflux_router::{HistoryEntry, RoutingMode};
    use serde_json::json;

    const TABLE: &str = r##"
[routing]
default_route = "home"
marker = "#!"

[[routes]]
path = "home"
action = "show_home"
title = "Home"

[[routes]]
pattern = "^/users/"
state = { section = "users" }
title = "Users"

[[routes]]
segments = "/users/[id]/"
action = "show_user"
args = ["id"]
title = "{title} > Profile"
"##;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_navigate_sequence() {
        let table = RouteTable::parse(TABLE).unwrap();
        let steps =
            navigate(&table, "index.html", &paths(&["users/7", "missing"]), true).unwrap();

        assert_eq!(steps.len(), 3);
        assert_eq!(
            steps[0].events,
            vec![
                Event::Listen(RoutingMode::Marker),
                Event::Action {
                    name: "show_home".to_string(),
                    args: vec![],
                },
                Event::Title("Home".to_string()),
            ]
        );
        assert_eq!(
            steps[1],
            Step {
                label: r#"navigate "users/7""#.to_string(),
                events: vec![
                    Event::History(HistoryEntry {
                        marker: "/users/7/".to_string(),
                        title: Some("Users > Profile".to_string()),
                        location: "/users/7/".to_string(),
                    }),
                    Event::State(json!({"section": "users"})),
                    Event::Action {
                        name: "show_user".to_string(),
                        args: vec![json!("id")],
                    },
                    Event::Title("Users > Profile".to_string()),
                ],
                title: Some("Users > Profile".to_string()),
            }
        );
        assert_eq!(
            steps[2].events,
            vec![Event::History(HistoryEntry {
                marker: "/missing/".to_string(),
                title: None,
                location: "/missing/".to_string(),
            })]
        );
        assert_eq!(steps[2].title, None);
    }

    #[test]
    fn test_navigate_without_history() {
        let table = RouteTable::parse(TABLE).unwrap();
        let steps = navigate(&table, "index.html#!/users", &paths(&["home"]), false).unwrap();

        assert_eq!(steps[0].title.as_deref(), Some("Users"));
        assert!(steps
            .iter()
            .flat_map(|step| &step.events)
            .all(|event| !matches!(event, Event::History(_) | Event::Listen(_))));
    }

    #[test]
    fn test_path_mode_marker_missing() {
        let mut table = RouteTable::parse(TABLE).unwrap();
        table.routing.marker = "/app".to_string();

        let err = navigate(&table, "http://site.test/", &[], true).unwrap_err();
        assert!(format!("{err:#}").contains("routing marker `/app` not found"));
    }
}
