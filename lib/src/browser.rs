use crate::error::{Result, TiosaError};

/// Open a bookmark in the system browser. Only http(s) links are handed off.
pub fn open_url(url: &str) -> Result<()> {
    if !is_web_url(url) {
        return Err(TiosaError::BadRequest(format!("not a web address: {}", url)));
    }
    log::debug!("Opening {}", url);
    open::that(url)?;
    Ok(())
}

pub fn is_web_url(url: &str) -> bool {
    let lower = url.trim().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
