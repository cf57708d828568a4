//! `pkg-lifecycle status`: inspect what the hooks should have left behind.
//!
//! Always exits 0; problems are reported as warnings.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::status::inspect;
use crate::output::json;

/// Run the status command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let status = inspect(&app.config, app.capability, &app.manager, &app.accounts).await;

    if app.is_json() {
        let mut value = serde_json::to_value(&status)?;
        value["issues"] = serde_json::json!(status.issues());
        return json::print(&value);
    }

    app.renderer().render_status(&status);
    Ok(())
}
