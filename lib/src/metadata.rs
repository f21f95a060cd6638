//! Metadata autofill: URL in, optional `{title, description, tags}` out.
//!
//! Providers never surface errors to the caller. Failures are logged and
//! reported as `None`, so the edit form simply stays as it was.

use crate::config::MetadataConfig;
use crate::error::{Result, TiosaError};
use crate::models::WebsiteMetadata;
use crate::tags::parse_tags;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use tl::ParserOptions;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const GLM_ENDPOINT: &str = "https://open.bigmodel.cn/api/paas/v4/chat/completions";
const GLM_DEFAULT_MODEL: &str = "glm-4-flash";

pub trait MetadataProvider {
    /// Provider lookup; errors are reported to [`MetadataProvider::fetch`]
    fn lookup(&self, url: &str) -> Result<Option<WebsiteMetadata>>;

    /// Silent variant used by the controller
    fn fetch(&self, url: &str) -> Option<WebsiteMetadata> {
        match self.lookup(url) {
            Ok(meta) => meta,
            Err(e) => {
                log::error!("Metadata lookup for {} failed: {}", url, e);
                None
            }
        }
    }
}

/// Provider names accepted in `metadata.provider`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Glm,
    Page,
}

impl ProviderKind {
    /// Case-insensitive; unknown names fall back to Gemini
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "glm" => ProviderKind::Glm,
            "page" => ProviderKind::Page,
            _ => ProviderKind::Gemini,
        }
    }
}

/// Build the provider named in the config
pub fn provider_from_config(config: &MetadataConfig) -> Box<dyn MetadataProvider> {
    match ProviderKind::from_name(&config.provider) {
        ProviderKind::Glm => Box::new(GlmProvider::new(config)),
        ProviderKind::Page => Box::new(PageProvider::new(&config.user_agent)),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(config)),
    }
}

fn prompt(url: &str, language: &str) -> String {
    format!(
        "Extract detailed metadata for the website {url}.\n\
         Requirements:\n\
         1. Every returned field (title, description, tags) must be written in {language}.\n\
         2. Keep the title short.\n\
         3. The description should be a helpful one or two sentence summary.\n\
         4. Tags are relevant keywords (an array).\n\
         Do not return a category; the user picks it. Return JSON only."
    )
}

pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    language: String,
}

impl GeminiProvider {
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: GEMINI_ENDPOINT.to_string(),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| GEMINI_DEFAULT_MODEL.to_string()),
            language: config.language.clone(),
        }
    }
}

impl MetadataProvider for GeminiProvider {
    fn lookup(&self, url: &str) -> Result<Option<WebsiteMetadata>> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::error!("Missing API key, cannot call Gemini");
            return Ok(None);
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt(url, &self.language) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "tags": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["title", "description", "tags"]
                }
            }
        });

        let resp = self
            .client
            .post(format!("{}/{}:generateContent", self.endpoint, self.model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TiosaError::Api {
                status: status.as_u16(),
                message: resp.text().unwrap_or_default(),
            });
        }
        let json: Value = resp.json()?;
        Ok(safe_parse(gemini_text(&json).as_deref()))
    }
}

fn gemini_text(response: &Value) -> Option<String> {
    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub struct GlmProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    language: String,
}

impl GlmProvider {
    pub fn new(config: &MetadataConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: GLM_ENDPOINT.to_string(),
            api_key: config.api_key.clone(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| GLM_DEFAULT_MODEL.to_string()),
            language: config.language.clone(),
        }
    }
}

impl MetadataProvider for GlmProvider {
    fn lookup(&self, url: &str) -> Result<Option<WebsiteMetadata>> {
        let Some(api_key) = self.api_key.as_deref() else {
            log::error!("Missing API key, cannot call GLM");
            return Ok(None);
        };

        let body = json!({
            "model": self.model,
            "stream": false,
            "messages": [
                {
                    "role": "system",
                    "content": "You are an assistant that only returns JSON matching the caller's schema."
                },
                { "role": "user", "content": prompt(url, &self.language) }
            ]
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TiosaError::Api {
                status: status.as_u16(),
                message: resp.text().unwrap_or_default(),
            });
        }
        let json: Value = resp.json()?;
        Ok(safe_parse(glm_content(&json).as_deref()))
    }
}

/// `choices[0].message.content`, re-serialized when the model returned structured content
fn glm_content(response: &Value) -> Option<String> {
    match response.pointer("/choices/0/message/content")? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Reads the page itself: `<title>` plus description and keywords meta tags
pub struct PageProvider {
    user_agent: String,
}

impl PageProvider {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
        }
    }
}

impl MetadataProvider for PageProvider {
    fn lookup(&self, url: &str) -> Result<Option<WebsiteMetadata>> {
        let client = Client::builder().user_agent(&self.user_agent).build()?;
        let resp = client.get(url).send()?;

        let status = resp.status();
        if !status.is_success() {
            let reason = match status.as_u16() {
                401 | 403 => "The website is blocking the request (check the user-agent)",
                404 => "The URL does not exist",
                429 => "Rate limited",
                500..=599 => "The website is experiencing issues",
                _ => "HTTP request failed with non-success status",
            };
            return Err(TiosaError::Api {
                status: status.as_u16(),
                message: reason.to_string(),
            });
        }

        let body = resp.text()?;
        let meta = parse_html(&body)?;
        Ok((!meta.title.is_empty()).then_some(meta))
    }
}

/// Parse HTML content and extract metadata
pub fn parse_html(html: &str) -> Result<WebsiteMetadata> {
    let dom = tl::parse(html, ParserOptions::default())?;
    let parser = dom.parser();

    let title = dom
        .query_selector("title")
        .and_then(|mut iter| iter.next())
        .and_then(|handle| handle.get(parser))
        .map(|node| node.inner_text(parser).trim().to_string())
        .unwrap_or_default();

    Ok(WebsiteMetadata {
        title,
        description: extract_meta_content(&dom, parser, "description"),
        tags: parse_tags(&extract_meta_content(&dom, parser, "keywords")),
    })
}

fn extract_meta_content(dom: &tl::VDom, parser: &tl::Parser, name: &str) -> String {
    dom.query_selector(&format!("meta[name='{}']", name))
        .and_then(|mut iter| iter.next())
        .and_then(|handle| handle.get(parser))
        .and_then(|node| {
            node.as_tag().and_then(|tag| {
                tag.attributes()
                    .get("content")
                    .flatten()
                    .map(|v| v.as_utf8_str().to_string())
            })
        })
        .unwrap_or_default()
}

/// Best-effort parse of a model reply: fenced, bare, or embedded in prose
pub fn safe_parse(text: Option<&str>) -> Option<WebsiteMetadata> {
    let raw = text?.trim();
    if raw.is_empty() {
        return None;
    }
    let raw = if raw.starts_with("```") {
        strip_code_fences(raw)
    } else {
        raw
    };

    match serde_json::from_str::<WebsiteMetadata>(raw) {
        Ok(meta) => Some(meta),
        Err(first) => match extract_first_json_object(raw) {
            Some(candidate) => match serde_json::from_str(candidate) {
                Ok(meta) => Some(meta),
                Err(e) => {
                    log::error!("Cannot parse extracted JSON object: {} ({})", e, candidate);
                    None
                }
            },
            None => {
                log::error!("Cannot parse provider JSON: {} ({})", first, raw);
                None
            }
        },
    }
}

fn strip_code_fences(s: &str) -> &str {
    let s = s.trim_start_matches("```");
    let s = match s.get(..4) {
        Some(lang) if lang.eq_ignore_ascii_case("json") => &s[4..],
        _ => s,
    };
    s.trim().trim_end_matches("```").trim()
}

/// First balanced `{...}` in `s`, ignoring braces inside string literals
pub fn extract_first_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in s[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}
