//! The `actions` and `sample` commands.

use colored::Colorize;
use relay_messages::{Action, Template, resolve};
use serde_json::json;

use crate::error::Result;

/// List every protocol action, as text or as a JSON array.
pub fn run_actions(json: bool) -> Result<String> {
    if json {
        let actions: Vec<_> = Action::ALL
            .iter()
            .map(|&action| {
                let template = Template::new(action);
                json!({
                    "name": action,
                    "fields": template
                        .required_fields()
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>(),
                    "description": template.description(),
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&actions)?);
    }

    let mut out = format!("{}\n", "Protocol actions".bold());
    for action in Action::ALL {
        let fields: Vec<_> = action.body_fields().iter().map(|f| f.as_str()).collect();
        let fields = if fields.is_empty() {
            "-".to_string()
        } else {
            fields.join(", ")
        };
        out.push_str(&format!(
            "  {} {:<10} {}\n",
            format!("{:<24}", action.as_str()).cyan(),
            fields,
            action.description()
        ));
    }
    Ok(out)
}

/// Sample message for `action` with placeholder values.
pub fn run_sample(action: &str, from: &str, to: &str) -> Result<String> {
    Ok(resolve(action)?.sample(from, to))
}
