//! HTML pages
//!
//! Inline templates, no template engine. Everything that came from a visitor
//! goes through [`html_escape`].

pub mod contact;

pub use contact::{contact_page, ContactPage};

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 900px;
        margin: 0 auto;
        padding: 0 20px 40px;
        background: #faf7f2;
        color: #333;
    }
    nav {
        display: flex;
        gap: 20px;
        padding: 20px 0;
        border-bottom: 2px solid #d2691e;
        margin-bottom: 30px;
    }
    nav a {
        color: #d2691e;
        text-decoration: none;
        font-weight: bold;
    }
    nav a.active {
        text-decoration: underline;
    }
    h1 {
        color: #5a3e2b;
    }
    .gallery {
        display: grid;
        grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
        gap: 20px;
    }
    .gallery figure {
        margin: 0;
        background: white;
        padding: 10px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    .gallery img {
        width: 100%;
        border-radius: 4px;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
    }
    input[type="text"],
    input[type="email"],
    input[type="date"],
    select,
    textarea {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    .invalid input,
    .invalid textarea {
        border-color: #c62828;
    }
    .radio-group label {
        display: inline;
        font-weight: normal;
        margin-right: 15px;
    }
    button {
        background: #d2691e;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
    }
    .success {
        background: #e8f5e9;
        color: #2e7d32;
        padding: 12px;
        border-radius: 4px;
    }
    .error {
        background: #ffebee;
        color: #c62828;
        padding: 12px;
        border-radius: 4px;
    }
    .notice {
        background: #fff8e1;
        color: #8d6e00;
        padding: 12px;
        border-radius: 4px;
    }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Gallery,
    Contact,
}

const NAV_ITEMS: [(NavItem, &str, &str); 3] = [
    (NavItem::Home, "/", "Úvod"),
    (NavItem::Gallery, "/kocky", "Kočky"),
    (NavItem::Contact, "/kontakt", "Kontakt"),
];

const CATS: [(&str, &str); 4] = [
    ("micka.jpg", "Micka na okně"),
    ("mourek.jpg", "Mourek po obědě"),
    ("tygr.jpg", "Tygr na lovu"),
    ("lucka.jpg", "Lucka v krabici"),
];

/// Wraps page content in the shared document shell and navigation.
pub fn layout(title: &str, active: NavItem, content: &str) -> String {
    let nav: String = NAV_ITEMS
        .iter()
        .map(|(item, href, label)| {
            let class = if *item == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{}"{}>{}</a>"#, href, class, label)
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<!DOCTYPE html>
<html lang="cs">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{styles}</style>
    <link rel="stylesheet" href="/static/css/site.css">
</head>
<body>
    <nav>
        {nav}
    </nav>
    <main>
{content}
    </main>
</body>
</html>"#,
        title = html_escape(title),
        styles = COMMON_STYLES,
        nav = nav,
        content = content,
    )
}

pub fn home_page() -> String {
    layout(
        "Úvod",
        NavItem::Home,
        r#"        <h1>Vítejte</h1>
        <p>Stránky o kočkách a pro jejich přátele.</p>
        <p>V <a href="/kocky">galerii</a> najdete naše kočky. Máte-li dotaz, napište nám
        přes <a href="/kontakt">kontaktní formulář</a>.</p>"#,
    )
}

pub fn gallery_page() -> String {
    let figures: String = CATS
        .iter()
        .map(|(file, caption)| {
            format!(
                r#"            <figure>
                <img src="/static/img/{}" alt="{}">
                <figcaption>{}</figcaption>
            </figure>"#,
                file, caption, caption
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    layout(
        "Kočky",
        NavItem::Gallery,
        &format!(
            r#"        <h1>Naše kočky</h1>
        <div class="gallery">
{}
        </div>"#,
            figures
        ),
    )
}

pub fn error_page(status: u16, message: &str) -> String {
    layout(
        "Chyba",
        NavItem::Home,
        &format!(
            r#"        <h1>Chyba {}</h1>
        <div class="error">{}</div>"#,
            status,
            html_escape(message)
        ),
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
