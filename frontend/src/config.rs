/// Fallback backend when neither an override nor a page origin is available.
const LOCAL_FALLBACK: &str = "http://localhost:8000";

/// Compile-time override, e.g. `MINI_CHAT_API_BASE=https://chat.example.com trunk build`.
const API_BASE_OVERRIDE: Option<&str> = option_env!("MINI_CHAT_API_BASE");

/// Backend location, resolved once in `main` and shared through context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base: String,
}

impl ApiConfig {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    /// Override, else `{origin}/api`, else the local fallback.
    pub fn resolve() -> Self {
        Self::resolve_from(API_BASE_OVERRIDE, page_origin().as_deref())
    }

    pub fn resolve_from(override_base: Option<&str>, origin: Option<&str>) -> Self {
        let non_blank = |s: &&str| !s.trim().is_empty() && *s != "null";
        if let Some(base) = override_base.filter(non_blank) {
            return Self::new(base.trim());
        }
        if let Some(origin) = origin.filter(non_blank) {
            return Self::new(format!("{}/api", origin.trim().trim_end_matches('/')));
        }
        Self::new(LOCAL_FALLBACK)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base)
    }

    pub fn analyze_image_url(&self) -> String {
        format!("{}/analyze-image", self.base)
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let cfg = ApiConfig::resolve_from(Some("https://api.example.com/"), Some("https://app.example.com"));
        assert_eq!(cfg.base(), "https://api.example.com");
        assert_eq!(cfg.chat_url(), "https://api.example.com/chat");
    }

    #[test]
    fn origin_gets_api_suffix() {
        let cfg = ApiConfig::resolve_from(None, Some("https://app.example.com"));
        assert_eq!(cfg.analyze_image_url(), "https://app.example.com/api/analyze-image");
    }

    #[test]
    fn blank_override_is_ignored() {
        let cfg = ApiConfig::resolve_from(Some("  "), Some("http://127.0.0.1:8080"));
        assert_eq!(cfg.base(), "http://127.0.0.1:8080/api");
    }

    #[test]
    fn opaque_origin_falls_back_to_localhost() {
        assert_eq!(ApiConfig::resolve_from(None, Some("null")).base(), "http://localhost:8000");
        assert_eq!(ApiConfig::resolve_from(None, None).base(), "http://localhost:8000");
    }
}
