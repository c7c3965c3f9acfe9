use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use reflux_router::RouteTable;

use super::load_table;

pub fn execute(table_path: &Path) -> Result<()> {
    let table = load_table(table_path)?;

    println!("{}", "Route table".green().bold());
    println!();
    for line in describe(&table) {
        println!("  {line}");
    }

    Ok(())
}

/// One line per table entry, in registration order
pub fn describe(table: &RouteTable) -> Vec<String> {
    let mut lines = vec![format!(
        "default route {:?}, marker {:?}",
        table.routing.default_route, table.routing.marker
    )];

    lines.extend(table.routes.iter().enumerate().map(|(idx, entry)| {
        let effect = match (&entry.action, &entry.state) {
            (Some(action), _) => format!("action {action}"),
            (None, Some(state)) => format!("state {state}"),
            (None, None) => "no effect".to_string(),
        };
        let title = entry.title.as_deref().unwrap_or("-");
        format!("#{} {} -> {} [{}]", idx + 1, entry.describe(), effect, title)
    }));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_table() {
        let table = RouteTable::parse(
            r##"
[routing]
default_route = "home"

[[routes]]
path = ["home", "index"]
action = "show_home"
title = "Home"

[[routes]]
pattern = "^/docs/"
state = { page = "docs" }
"##,
        )
        .unwrap();

        assert_eq!(
            describe(&table),
            vec![
                r##"default route "home", marker "#""##.to_string(),
                "#1 exact home index -> action show_home [Home]".to_string(),
                r##"#2 pattern ^/docs/ -> state {"page":"docs"} [-]"##.to_string(),
            ]
        );
    }
}
