use crate::api;
use crate::cli::actions::Action;
use anyhow::Result;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, db } => {
            let dsn = db.dsn()?;

            api::new(port, dsn.as_str()).await?;
        }
    }

    Ok(())
}
