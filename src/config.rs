use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_API_URL: &str = "http://localhost:6689";

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum StoreBackend {
    #[default]
    Remote,
    Memory,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub store: StoreBackend,
}

impl EnvConfig {
    pub fn new() -> Self {
        let mut config = Self {
            api_url: DEFAULT_API_URL.to_string(),
            store: StoreBackend::default(),
        };

        // Native builds (tests) have no `window`.
        if !cfg!(target_arch = "wasm32") {
            return config;
        }

        // Both `window.ENV.API_URL` and the older `window.ENV.api_url` are accepted.
        if let Some(url) = env_string(&["API_URL", "api_url"]) {
            config.api_url = url;
        }
        if let Some(store) = env_string(&["STORE", "store"]) {
            config.store = parse_backend(&store);
        }

        config
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_backend(raw: &str) -> StoreBackend {
    StoreBackend::from_str(raw.trim()).unwrap_or_else(|_| {
        leptos::logging::warn!("unknown STORE backend {raw:?}, using {}", StoreBackend::default());
        StoreBackend::default()
    })
}

fn env_string(keys: &[&str]) -> Option<String> {
    let env = web_sys::window()?.get("ENV")?;
    if env.is_undefined() || !env.is_object() {
        return None;
    }
    keys.iter().find_map(|key| {
        js_sys::Reflect::get(&env, &(*key).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}
