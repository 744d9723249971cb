use super::{html_escape, layout, NavItem};
use crate::models::FormInput;

pub const SUCCESS_MESSAGE: &str = "Děkujeme, vaše zpráva byla úspěšně odeslána.";

const COUNTRIES: [(&str, &str); 6] = [
    ("Czech Republic", "Česká republika"),
    ("Slovakia", "Slovensko"),
    ("Germany", "Německo"),
    ("Austria", "Rakousko"),
    ("Poland", "Polsko"),
    ("Other", "Jiný"),
];

const GENDERS: [(&str, &str); 3] = [("male", "Muž"), ("female", "Žena"), ("other", "Jiné")];

/// Everything the contact page shows besides the static chrome.
#[derive(Debug, Clone, Default)]
pub struct ContactPage {
    pub input: FormInput,
    pub success: bool,
    pub error_message: Option<String>,
    /// Form field names to highlight.
    pub invalid_fields: Vec<&'static str>,
    /// Non-blocking storage notice, shown in debug mode only.
    pub notice: Option<String>,
}

impl ContactPage {
    pub fn new(input: FormInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn with_success(mut self, success: bool) -> Self {
        self.success = success;
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn with_invalid_fields(mut self, fields: &[&'static str]) -> Self {
        self.invalid_fields = fields.to_vec();
        self
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    fn group_class(&self, field: &str) -> &'static str {
        if self.invalid_fields.iter().any(|f| *f == field) {
            "form-group invalid"
        } else {
            "form-group"
        }
    }
}

fn text_field(page: &ContactPage, name: &str, label: &str, kind: &str, value: &str, required: bool) -> String {
    format!(
        r#"            <div class="{class}">
                <label for="{name}">{label}</label>
                <input type="{kind}" id="{name}" name="{name}" value="{value}"{required}>
            </div>"#,
        class = page.group_class(name),
        name = name,
        label = label,
        kind = kind,
        value = html_escape(value),
        required = if required { " required" } else { "" },
    )
}

fn country_select(selected: &str) -> String {
    let mut options: Vec<String> = COUNTRIES
        .iter()
        .map(|(value, label)| {
            let attr = if *value == selected { " selected" } else { "" };
            format!(r#"<option value="{}"{}>{}</option>"#, value, attr, label)
        })
        .collect();

    if !COUNTRIES.iter().any(|(value, _)| *value == selected) {
        let escaped = html_escape(selected);
        options.push(format!(r#"<option value="{}" selected>{}</option>"#, escaped, escaped));
    }

    format!(
        r#"            <div class="form-group">
                <label for="stat">Stát</label>
                <select id="stat" name="stat">
                    {}
                </select>
            </div>"#,
        options.join("\n                    ")
    )
}

fn gender_radios(selected: &str) -> String {
    let radios: Vec<String> = GENDERS
        .iter()
        .map(|(value, label)| {
            let attr = if *value == selected { " checked" } else { "" };
            format!(
                r#"<label><input type="radio" name="pohlavi" value="{}"{}> {}</label>"#,
                value, attr, label
            )
        })
        .collect();

    format!(
        r#"            <div class="form-group radio-group">
                <span>Pohlaví</span>
                {}
            </div>"#,
        radios.join("\n                ")
    )
}

pub fn contact_page(page: &ContactPage) -> String {
    let mut banners = Vec::new();
    if page.success {
        banners.push(format!(r#"        <div class="success">{}</div>"#, SUCCESS_MESSAGE));
    }
    if let Some(error) = &page.error_message {
        banners.push(format!(r#"        <div class="error">{}</div>"#, html_escape(error)));
    }
    if let Some(notice) = &page.notice {
        banners.push(format!(r#"        <div class="notice">{}</div>"#, html_escape(notice)));
    }

    let input = &page.input;
    let content = format!(
        r#"        <h1>Kontakt</h1>
{banners}
        <form method="post" action="/kontakt">
{jmeno}
{prijmeni}
{datum}
{email}
{stat}
{pohlavi}
            <div class="{zprava_class}">
                <label for="zprava">Zpráva</label>
                <textarea id="zprava" name="zprava" rows="6" required>{zprava}</textarea>
            </div>
            <button type="submit">Odeslat</button>
        </form>"#,
        banners = banners.join("\n"),
        jmeno = text_field(page, "jmeno", "Jméno", "text", &input.given_name, true),
        prijmeni = text_field(page, "prijmeni", "Příjmení", "text", &input.surname, true),
        datum = text_field(page, "datum", "Datum narození", "date", &input.birth_date, false),
        email = text_field(page, "email", "E-mail", "email", &input.email, false),
        stat = country_select(&input.country),
        pohlavi = gender_radios(&input.gender),
        zprava_class = page.group_class("zprava"),
        zprava = html_escape(&input.message),
    );

    layout("Kontakt", NavItem::Contact, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form_has_defaults_selected() {
        let html = contact_page(&ContactPage::new(FormInput::default()));
        assert!(html.contains(r#"<option value="Czech Republic" selected>"#));
        assert!(html.contains(r#"value="male" checked"#));
        assert!(!html.contains(r#"class="success""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_success_banner() {
        let html = contact_page(&ContactPage::new(FormInput::default()).with_success(true));
        assert!(html.contains(SUCCESS_MESSAGE));
    }

    #[test]
    fn test_rejected_form_is_prefilled_and_escaped() {
        let input = FormInput {
            surname: "Nová".to_string(),
            message: "<script>alert(1)</script>".to_string(),
            country: "Slovakia".to_string(),
            gender: "female".to_string(),
            ..FormInput::default()
        };
        let page = ContactPage::new(input)
            .with_error("Chyba")
            .with_invalid_fields(&["jmeno"]);
        let html = contact_page(&page);

        assert!(html.contains(r#"name="prijmeni" value="Nová""#));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;</textarea>"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains(r#"<option value="Slovakia" selected>"#));
        assert!(html.contains(r#"value="female" checked"#));
        assert!(html.contains(r#"<div class="form-group invalid">
                <label for="jmeno">"#));
        assert!(html.contains(r#"<div class="error">Chyba</div>"#));
    }

    #[test]
    fn test_unknown_country_is_kept() {
        let input = FormInput {
            country: "Mars \"Base\"".to_string(),
            ..FormInput::default()
        };
        let html = contact_page(&ContactPage::new(input));
        assert!(html.contains(r#"<option value="Mars &quot;Base&quot;" selected>"#));
    }

    #[test]
    fn test_notice_is_shown() {
        let page = ContactPage::new(FormInput::default())
            .with_notice(Some("Data file is not valid".to_string()));
        assert!(contact_page(&page).contains(r#"<div class="notice">Data file is not valid</div>"#));
    }
}
