//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// Changes apply to the active profile and are saved to `path`.
pub async fn execute_config(
    args: ConfigArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    let message = match apply(args.action, config) {
        None => {
            println!("{}", formatter.format_config(config)?);
            return Ok(());
        }
        Some(message) => message,
    };

    config.save_to(path)?;
    println!("{}", formatter.success(&message));
    Ok(())
}

/// Apply a change to `config`, returning its confirmation message.
///
/// Returns `None` for read-only actions.
fn apply(action: ConfigAction, config: &mut Config) -> Option<String> {
    let profile_name = config.active_profile.clone();
    let profile = config.active_profile_mut();

    match action {
        ConfigAction::Show => None,
        ConfigAction::SetModel { model } => {
            let message = format!("Model for profile '{}' set to {}", profile_name, model);
            profile.model = Some(model);
            Some(message)
        }
        ConfigAction::SetUser { user_id } => {
            let message = format!("User for profile '{}' set to {}", profile_name, user_id);
            profile.user_id = Some(user_id);
            Some(message)
        }
        ConfigAction::SetDatabase { path } => {
            let message = format!(
                "Database for profile '{}' set to {}",
                profile_name,
                path.display()
            );
            profile.database = Some(path);
            Some(message)
        }
    }
}
