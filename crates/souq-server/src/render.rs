// crates/souq-server/src/render.rs
// ============================================================================
// Module: Page Rendering
// Description: HTML rendering over an explicit per-request render context.
// Purpose: Turn a resolved locale and bundle into storefront markup.
// Dependencies: souq-core
// ============================================================================

//! ## Overview
//! Rendering consumes the [`RenderContext`] threaded in by the handlers; no
//! ambient locale state exists anywhere in the render chain. Three documents
//! are produced: the localized storefront page, a neutral loading
//! placeholder for requests whose bundle is not yet available, and the
//! redirect shell that performs the client-side navigation replace for the
//! bare root path.
//!
//! ## Invariants
//! - Every interpolated request value is HTML-escaped.
//! - The redirect shell is only ever rendered for the literal root path, so
//!   it cannot loop.

// ============================================================================
// SECTION: Imports
// ============================================================================

use souq_core::Locale;
use souq_core::RenderContext;

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes a value for interpolation into HTML text or attributes.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Storefront Page
// ============================================================================

/// Renders the localized storefront page for a request path.
#[must_use]
pub fn page(context: &RenderContext, path: &str) -> String {
    let locale = context.locale();
    let dir = context.direction().as_str();
    let title = escape(context.message("site.title"));
    let welcome = escape(context.message("home.welcome"));
    let tagline = escape(context.message("home.tagline"));
    let products = escape(context.message("nav.products"));
    let categories = escape(context.message("nav.categories"));
    let cart = escape(context.message("nav.cart"));
    let footer = escape(context.message("footer.notice"));
    let switcher = locale_switcher(locale);
    let code = locale.as_str();
    let safe_path = escape(path);
    format!(
        "<!doctype html>\n\
         <html lang=\"{code}\" dir=\"{dir}\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body data-path=\"{safe_path}\">\n\
         <header>\n\
         <h1>{welcome}</h1>\n\
         <p>{tagline}</p>\n\
         <nav>\n\
         <a href=\"/{code}/products\">{products}</a>\n\
         <a href=\"/{code}/categories\">{categories}</a>\n\
         <a href=\"/{code}/cart\">{cart}</a>\n\
         </nav>\n\
         {switcher}\n\
         </header>\n\
         <footer>{footer}</footer>\n\
         </body>\n\
         </html>\n"
    )
}

/// Renders the localized not-found page.
#[must_use]
pub fn not_found(context: &RenderContext, path: &str) -> String {
    let locale = context.locale();
    let dir = context.direction().as_str();
    let title = escape(context.message("site.title"));
    let heading = escape(context.message("error.not_found"));
    let home = escape(context.message("error.back_home"));
    let code = locale.as_str();
    let safe_path = escape(path);
    format!(
        "<!doctype html>\n\
         <html lang=\"{code}\" dir=\"{dir}\">\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <h1>{heading}</h1>\n\
         <p><code>{safe_path}</code></p>\n\
         <a href=\"/{code}\">{home}</a>\n\
         </body>\n\
         </html>\n"
    )
}

/// Renders the neutral loading placeholder shown when no bundle could be
/// provided for the request.
#[must_use]
pub fn placeholder(locale: Locale) -> String {
    let code = locale.as_str();
    let dir = locale.direction().as_str();
    format!(
        "<!doctype html>\n\
         <html lang=\"{code}\" dir=\"{dir}\">\n\
         <head><meta charset=\"utf-8\"><title>&#8230;</title></head>\n\
         <body><main aria-busy=\"true\">&#8230;</main></body>\n\
         </html>\n"
    )
}

/// Renders the client-side navigation replace shell for the bare root path.
///
/// The original storefront performs the root redirect in the client, so the
/// shell replaces the history entry via script, with a meta refresh and a
/// plain anchor as fallbacks.
#[must_use]
pub fn redirect_shell(locale: Locale) -> String {
    let code = locale.as_str();
    format!(
        "<!doctype html>\n\
         <html lang=\"{code}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0;url=/{code}\">\n\
         <script>window.location.replace(\"/{code}\");</script>\n\
         </head>\n\
         <body><noscript><a href=\"/{code}\">/{code}</a></noscript></body>\n\
         </html>\n"
    )
}

/// Renders the locale switcher listing every registered locale.
fn locale_switcher(current: Locale) -> String {
    let mut links = String::from("<ul class=\"locales\">\n");
    for locale in souq_core::SUPPORTED_LOCALES {
        let code = locale.as_str();
        if *locale == current {
            links.push_str(&format!("<li><strong>{code}</strong></li>\n"));
        } else {
            links.push_str(&format!("<li><a href=\"/{code}\">{code}</a></li>\n"));
        }
    }
    links.push_str("</ul>");
    links
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::missing_docs_in_private_items,
        reason = "Test-only assertions."
    )]

    use std::sync::Arc;

    use souq_core::Locale;
    use souq_core::MessageBundle;
    use souq_core::RenderContext;

    use super::escape;
    use super::not_found;
    use super::page;
    use super::placeholder;
    use super::redirect_shell;

    fn context(locale: Locale, raw: &str) -> RenderContext {
        let bundle = MessageBundle::from_json_str(locale, raw).expect("bundle parses");
        RenderContext::new(locale, Arc::new(bundle), None)
    }

    #[test]
    fn page_carries_locale_language_and_direction() {
        let context = context(Locale::Ar, r#"{"home":{"welcome":"مرحباً"}}"#);
        let html = page(&context, "/ar");
        assert!(html.contains("lang=\"ar\""));
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("مرحباً"));
    }

    #[test]
    fn page_marks_missing_keys_with_the_dotted_key() {
        let context = context(Locale::En, "{}");
        let html = page(&context, "/en");
        assert!(html.contains("home.welcome"));
    }

    #[test]
    fn request_path_is_escaped() {
        let context = context(Locale::En, "{}");
        let html = not_found(&context, "/en/<script>alert(1)</script>");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn redirect_shell_targets_the_locale_prefix() {
        let html = redirect_shell(Locale::En);
        assert!(html.contains("window.location.replace(\"/en\")"));
        assert!(html.contains("url=/en"));
        assert!(html.contains("<noscript>"));
    }

    #[test]
    fn placeholder_is_neutral_and_directional() {
        let html = placeholder(Locale::Ur);
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("aria-busy"));
    }

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }
}
