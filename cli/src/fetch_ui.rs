use indicatif::{ProgressBar, ProgressStyle};
use tiosa::client::Backend;
use tiosa::controller::{BookmarkDraft, Controller};
use tiosa::error::{Result, TiosaError};
use tiosa::metadata::MetadataProvider;
use tiosa::models::WebsiteMetadata;

fn spinner(url: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Asking for metadata: {}", truncate_url(url, 60)));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

/// Metadata lookup with visual spinner feedback; the error is categorized on the spinner line
pub fn lookup_with_spinner(
    url: &str,
    provider: &dyn MetadataProvider,
) -> Result<Option<WebsiteMetadata>> {
    let spinner = spinner(url);
    let url_display = truncate_url(url, 60);

    let result = provider.lookup(url);
    match &result {
        Ok(Some(_)) => spinner.finish_with_message(format!("✓ {}", url_display)),
        Ok(None) => spinner.finish_with_message(format!("✗ {} (no metadata)", url_display)),
        Err(e) => {
            spinner.finish_with_message(format!("✗ {} ({})", url_display, categorize_error(e)))
        }
    }
    result
}

/// Fill the draft's title, description and tags while showing a spinner
pub fn autofill_with_spinner<B: Backend>(
    ctl: &Controller<B>,
    draft: &mut BookmarkDraft,
    provider: &dyn MetadataProvider,
) -> bool {
    if !draft.url.trim().starts_with("http") {
        return false;
    }
    let spinner = spinner(&draft.url);
    let url_display = truncate_url(&draft.url, 60);
    let filled = ctl.autofill(draft, provider);
    if filled {
        spinner.finish_with_message(format!("✓ {}", url_display));
    } else {
        spinner.finish_with_message(format!("✗ {} (kept form as is)", url_display));
    }
    filled
}

/// Truncate URL to at most `max_len` characters with an ellipsis
pub fn truncate_url(url: &str, max_len: usize) -> String {
    if url.chars().count() > max_len {
        let keep = max_len.saturating_sub(3);
        let head: String = url.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}

/// Short label for the spinner line
pub fn categorize_error(error: &TiosaError) -> &'static str {
    match error {
        TiosaError::Http(e) if e.is_timeout() => "timeout",
        TiosaError::Http(e) if e.is_connect() => "connection error",
        TiosaError::Http(e) => match e.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => "unauthorized",
            Some(429) => "rate limited",
            _ => "request error",
        },
        TiosaError::Api { status, .. } => match status {
            401 | 403 => "unauthorized",
            429 => "rate limited",
            _ => "provider error",
        },
        TiosaError::Config(_) => "not configured",
        TiosaError::Json(_) => "bad response",
        _ => "lookup error",
    }
}
