use super::{AppContext, TiosaCommand};
use serde::{Deserialize, Serialize};
use tiosa::error::{Result, TiosaError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordCommand {
    /// Prompted for (twice) when absent
    pub new_password: Option<String>,
}

impl TiosaCommand for PasswordCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        let mut ctl = ctx.admin_session()?;

        let password = match &self.new_password {
            Some(p) => p.clone(),
            None => {
                let password = rpassword::prompt_password("New admin password: ")?;
                let confirm = rpassword::prompt_password("Confirm password: ")?;
                if password != confirm {
                    return Err(TiosaError::BadRequest("Passwords do not match".into()));
                }
                password
            }
        };

        ctl.update_password(&password)?;
        if let Some(message) = ctl.feedback() {
            eprintln!("{}", message);
        }
        Ok(())
    }
}
