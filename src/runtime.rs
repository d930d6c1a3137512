//! Runtime environment detection
//!
//! Classifies the host into one of three rendering strategies: browser
//! (style-directive console), react-native, or terminal/server (ANSI).
//! Classification is a pure function over a snapshot of ambient globals so it
//! can be exercised directly in tests; the host snapshot is taken once per
//! process and cached, since the runtime environment does not change
//! mid-process.

use once_cell::sync::Lazy;

/// Rendering strategy selected for a Logger at construction time.
///
/// React Native carries no DOM console styling, so it shares the terminal
/// rendering branch; it stays a distinct variant because detection must
/// prefer it over the browser classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Browser,
    ReactNative,
    Terminal,
}

impl RenderMode {
    pub fn is_browser(self) -> bool {
        self == RenderMode::Browser
    }

    pub fn is_react_native(self) -> bool {
        self == RenderMode::ReactNative
    }
}

/// Snapshot of the ambient globals the classifier looks at.
///
/// On native targets every field is absent and classification falls through
/// to `Terminal`. On wasm32 the snapshot is read from the JS global object.
#[derive(Debug, Clone, Default)]
pub struct RuntimeHints {
    /// `navigator.product`, when a navigator-like global exists.
    pub navigator_product: Option<String>,
    /// A window-like global exists.
    pub has_window: bool,
    /// A document-like global exists.
    pub has_document: bool,
    /// A `__DEV__`-style development flag exists.
    pub has_dev_flag: bool,
}

impl RuntimeHints {
    /// Read the snapshot from the host runtime.
    #[cfg(target_arch = "wasm32")]
    pub fn from_host() -> Self {
        use wasm_bindgen::JsValue;

        let global = js_sys::global();
        let present = |key: &str| {
            js_sys::Reflect::get(&global, &JsValue::from_str(key))
                .map(|value| !value.is_undefined())
                .unwrap_or(false)
        };

        let navigator_product = js_sys::Reflect::get(&global, &JsValue::from_str("navigator"))
            .ok()
            .filter(|value| !value.is_undefined())
            .and_then(|nav| js_sys::Reflect::get(&nav, &JsValue::from_str("product")).ok())
            .and_then(|product| product.as_string());

        RuntimeHints {
            navigator_product,
            has_window: present("window"),
            has_document: present("document"),
            has_dev_flag: present("__DEV__"),
        }
    }

    /// Read the snapshot from the host runtime.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_host() -> Self {
        RuntimeHints::default()
    }
}

/// Classify a globals snapshot into a rendering strategy.
///
/// Heuristics run in priority order; the React Native marker wins over
/// everything else, so an engine exposing a window-like global alongside the
/// marker still classifies as react-native, never browser.
pub fn classify(hints: &RuntimeHints) -> RenderMode {
    if hints.navigator_product.as_deref() == Some("ReactNative") {
        return RenderMode::ReactNative;
    }
    if hints.has_window && !hints.has_document {
        return RenderMode::ReactNative;
    }
    if hints.has_dev_flag && !hints.has_document {
        return RenderMode::ReactNative;
    }
    if hints.has_window && hints.has_document {
        return RenderMode::Browser;
    }
    RenderMode::Terminal
}

/// Cached host classification (thread-safe, evaluated once).
static DETECTED: Lazy<RenderMode> = Lazy::new(|| classify(&RuntimeHints::from_host()));

/// The rendering strategy detected for this process.
pub fn detect() -> RenderMode {
    *DETECTED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hints_classify_as_terminal() {
        assert_eq!(classify(&RuntimeHints::default()), RenderMode::Terminal);
    }

    #[test]
    fn test_window_and_document_classify_as_browser() {
        let hints = RuntimeHints {
            has_window: true,
            has_document: true,
            ..RuntimeHints::default()
        };
        assert_eq!(classify(&hints), RenderMode::Browser);
    }

    #[test]
    fn test_react_native_marker_wins_over_window() {
        let hints = RuntimeHints {
            navigator_product: Some("ReactNative".to_string()),
            has_window: true,
            has_document: true,
            ..RuntimeHints::default()
        };
        assert_eq!(classify(&hints), RenderMode::ReactNative);
    }

    #[test]
    fn test_window_without_document_is_react_native() {
        let hints = RuntimeHints {
            has_window: true,
            ..RuntimeHints::default()
        };
        assert_eq!(classify(&hints), RenderMode::ReactNative);
    }

    #[test]
    fn test_dev_flag_without_document_is_react_native() {
        let hints = RuntimeHints {
            has_dev_flag: true,
            ..RuntimeHints::default()
        };
        assert_eq!(classify(&hints), RenderMode::ReactNative);
    }

    #[test]
    fn test_other_navigator_product_does_not_match() {
        let hints = RuntimeHints {
            navigator_product: Some("Gecko".to_string()),
            has_window: true,
            has_document: true,
            ..RuntimeHints::default()
        };
        assert_eq!(classify(&hints), RenderMode::Browser);
    }
}
