//! Form schemas
//!
//! Each public form is a declaration: its fields with their rules, the
//! sections they are grouped in, which sections start open, where it is
//! submitted and what happens after a successful submit. The shared
//! controllers do the rest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::error::ValidationErrors;
use super::value::{FieldValue, FormRequest};

/// The public lead-capture forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    Booking,
    CustomTour,
    Quote,
    Contact,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [Self::Booking, Self::CustomTour, Self::Quote, Self::Contact];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Booking => "booking",
            Self::CustomTour => "custom-tour",
            Self::Quote => "quote",
            Self::Contact => "contact",
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        static BOOKING: OnceLock<FormSchema> = OnceLock::new();
        static CUSTOM_TOUR: OnceLock<FormSchema> = OnceLock::new();
        static QUOTE: OnceLock<FormSchema> = OnceLock::new();
        static CONTACT: OnceLock<FormSchema> = OnceLock::new();

        match self {
            Self::Booking => BOOKING.get_or_init(booking_schema),
            Self::CustomTour => CUSTOM_TOUR.get_or_init(custom_tour_schema),
            Self::Quote => QUOTE.get_or_init(quote_schema),
            Self::Contact => CONTACT.get_or_init(contact_schema),
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input kind of a field; decides which format checks apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Phone,
    /// ISO `YYYY-MM-DD`
    Date,
    Number,
    Select,
    MultiSelect,
    Hidden,
}

/// What the host shows after a successful submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuccessBehavior {
    /// Reset the record to its defaults and keep the form open
    Reset,
    /// Replace the form with a "submitted" confirmation view
    ShowConfirmation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub section: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind, section: &'static str) -> Self {
        Self {
            name,
            label,
            kind,
            section,
            required: false,
            min: None,
            options: Vec::new(),
            default: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    fn options(mut self, options: &[&'static str]) -> Self {
        self.options = options.to_vec();
        self
    }

    fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Validate one field's value; `None` means the value is acceptable.
    pub fn check(&self, value: Option<&FieldValue>) -> Option<String> {
        let blank = value.map_or(true, FieldValue::is_blank);
        if blank {
            return self
                .required
                .then(|| format!("{} is required", self.label));
        }
        let value = value?;

        match self.kind {
            FieldKind::Number => match value.as_number() {
                None => Some(format!("{} must be a whole number", self.label)),
                Some(n) if self.min.is_some_and(|min| n < min) => Some(format!(
                    "{} must be at least {}",
                    self.label,
                    self.min.unwrap_or_default()
                )),
                Some(_) => None,
            },
            FieldKind::Email => match value.as_text() {
                Some(text) if looks_like_email(text) => None,
                _ => Some("Enter a valid email address".to_string()),
            },
            FieldKind::Date => match value.as_text() {
                Some(text) if NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_ok() => None,
                _ => Some(format!("{} must be a date (YYYY-MM-DD)", self.label)),
            },
            FieldKind::Select if !self.options.is_empty() => match value.as_text() {
                Some(text) if self.allows(text) => None,
                _ => Some(format!("Choose one of the listed options for {}", self.label)),
            },
            FieldKind::MultiSelect if !self.options.is_empty() => match value.as_list() {
                Some(items) if items.iter().all(|item| self.allows(item)) => None,
                _ => Some(format!("Choose from the listed options for {}", self.label)),
            },
            _ => None,
        }
    }
}

impl FieldSpec {
    fn allows(&self, option: &str) -> bool {
        self.options.iter().any(|o| *o == option.trim())
    }
}

fn looks_like_email(text: &str) -> bool {
    let text = text.trim();
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    match text.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
}

/// Declaration of one form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub kind: FormKind,
    pub title: &'static str,
    /// Label on the entry point that opens this form
    pub launcher_label: &'static str,
    /// Path of the submission endpoint
    pub endpoint: &'static str,
    pub sections: Vec<SectionSpec>,
    /// Sections expanded when the form opens
    pub default_open: Vec<&'static str>,
    pub fields: Vec<FieldSpec>,
    pub on_success: SuccessBehavior,
    pub success_message: &'static str,
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.id)
    }

    /// Fresh record holding every declared default
    pub fn defaults(&self) -> FormRequest {
        let mut record = FormRequest::new();
        for field in &self.fields {
            if let Some(default) = &field.default {
                record.update_field(field.name, default.clone());
            }
        }
        record
    }

    /// Copy the fields of `prefill` this form declares onto `record`.
    pub fn apply_prefill(&self, record: &mut FormRequest, prefill: &FormRequest) {
        for (name, value) in prefill.iter() {
            if self.field(name).is_some() {
                record.update_field(name, value.clone());
            }
        }
    }

    /// Validate every declared field.
    pub fn validate(&self, record: &FormRequest) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            if let Some(message) = field.check(record.get(field.name)) {
                errors.add(field.name, message);
            }
        }
        errors.into_result()
    }

    /// A section is complete when none of its fields fail validation.
    pub fn section_complete(&self, section: &str, record: &FormRequest) -> bool {
        self.fields
            .iter()
            .filter(|f| f.section == section)
            .all(|f| f.check(record.get(f.name)).is_none())
    }
}

const INTERESTS: &[&str] = &[
    "Culture & Heritage",
    "Festivals",
    "Trekking",
    "Buddhism & Meditation",
    "Photography",
    "Nature & Wildlife",
    "Food & Cuisine",
    "Wellness",
];

const DESTINATIONS: &[&str] = &[
    "Paro",
    "Thimphu",
    "Punakha",
    "Bumthang",
    "Phobjikha",
    "Trongsa",
    "Haa",
];

const BUDGETS: &[&str] = &["under-2000", "2000-4000", "4000-6000", "over-6000"];

fn booking_schema() -> FormSchema {
    use FieldKind::*;
    FormSchema {
        kind: FormKind::Booking,
        title: "Book This Tour",
        launcher_label: "Book a Tour",
        endpoint: "/api/bookings",
        sections: vec![
            SectionSpec { id: "traveler", title: "Traveler Details" },
            SectionSpec { id: "trip", title: "Trip Details" },
            SectionSpec { id: "requests", title: "Special Requests" },
        ],
        default_open: vec!["traveler", "trip"],
        fields: vec![
            FieldSpec::new("tourId", "Tour", Hidden, "trip"),
            FieldSpec::new("tourName", "Tour Name", Hidden, "trip"),
            FieldSpec::new("name", "Full Name", Text, "traveler").required(),
            FieldSpec::new("email", "Email", Email, "traveler").required(),
            FieldSpec::new("phone", "Phone", Phone, "traveler"),
            FieldSpec::new("travelDate", "Travel Date", Date, "trip").required(),
            FieldSpec::new("groupSize", "Group Size", Number, "trip")
                .required()
                .min(1)
                .default_value(1i64),
            FieldSpec::new("specialRequests", "Special Requests", LongText, "requests"),
        ],
        on_success: SuccessBehavior::ShowConfirmation,
        success_message: "Booking request sent! We'll confirm availability within 24 hours.",
    }
}

fn custom_tour_schema() -> FormSchema {
    use FieldKind::*;
    FormSchema {
        kind: FormKind::CustomTour,
        title: "Design Your Custom Tour",
        launcher_label: "Plan a Custom Tour",
        endpoint: "/api/custom-tours",
        sections: vec![
            SectionSpec { id: "personal", title: "Personal Information" },
            SectionSpec { id: "trip", title: "Trip Details" },
            SectionSpec { id: "interests", title: "Interests" },
            SectionSpec { id: "destinations", title: "Destinations" },
            SectionSpec { id: "preferences", title: "Accommodation & Budget" },
            SectionSpec { id: "special", title: "Special Requests" },
        ],
        default_open: vec!["personal", "trip"],
        fields: vec![
            FieldSpec::new("name", "Full Name", Text, "personal").required(),
            FieldSpec::new("email", "Email", Email, "personal").required(),
            FieldSpec::new("phone", "Phone", Phone, "personal"),
            FieldSpec::new("country", "Country", Text, "personal"),
            FieldSpec::new("startDate", "Start Date", Date, "trip").required(),
            FieldSpec::new("duration", "Duration (days)", Number, "trip")
                .required()
                .min(1),
            FieldSpec::new("groupSize", "Group Size", Number, "trip")
                .required()
                .min(1)
                .default_value(1i64),
            FieldSpec::new("interests", "Interests", MultiSelect, "interests")
                .options(INTERESTS)
                .default_value(Vec::<String>::new()),
            FieldSpec::new("destinations", "Destinations", MultiSelect, "destinations")
                .options(DESTINATIONS)
                .default_value(Vec::<String>::new()),
            FieldSpec::new("accommodation", "Accommodation", Select, "preferences")
                .options(&["standard", "deluxe", "luxury", "farmhouse"]),
            FieldSpec::new("budget", "Budget (USD per person)", Select, "preferences")
                .required()
                .options(BUDGETS),
            FieldSpec::new("specialRequests", "Special Requests", LongText, "special"),
        ],
        on_success: SuccessBehavior::ShowConfirmation,
        success_message: "Request received! Our travel designers will send your itinerary soon.",
    }
}

fn quote_schema() -> FormSchema {
    use FieldKind::*;
    FormSchema {
        kind: FormKind::Quote,
        title: "Request a Quote",
        launcher_label: "Get a Quote",
        endpoint: "/api/quote-requests",
        sections: vec![
            SectionSpec { id: "personal", title: "Personal Information" },
            SectionSpec { id: "trip", title: "Trip Details" },
            SectionSpec { id: "preferences", title: "Preferences" },
        ],
        default_open: vec!["personal", "trip"],
        fields: vec![
            FieldSpec::new("name", "Full Name", Text, "personal").required(),
            FieldSpec::new("email", "Email", Email, "personal").required(),
            FieldSpec::new("phone", "Phone", Phone, "personal"),
            FieldSpec::new("tourType", "Tour Type", Select, "trip").required(),
            FieldSpec::new("travelDate", "Travel Date", Date, "trip"),
            FieldSpec::new("groupSize", "Group Size", Number, "trip")
                .required()
                .min(1)
                .default_value(1i64),
            FieldSpec::new("duration", "Duration (days)", Number, "trip").min(1),
            FieldSpec::new("budget", "Budget (USD per person)", Select, "preferences")
                .options(BUDGETS),
            FieldSpec::new("message", "Message", LongText, "preferences"),
        ],
        on_success: SuccessBehavior::Reset,
        success_message: "Quote request sent! We'll reply within 24 hours.",
    }
}

fn contact_schema() -> FormSchema {
    use FieldKind::*;
    FormSchema {
        kind: FormKind::Contact,
        title: "Contact Us",
        launcher_label: "Contact Us",
        endpoint: "/api/contact-messages",
        sections: vec![SectionSpec { id: "message", title: "Your Message" }],
        default_open: vec!["message"],
        fields: vec![
            FieldSpec::new("name", "Full Name", Text, "message").required(),
            FieldSpec::new("email", "Email", Email, "message").required(),
            FieldSpec::new("subject", "Subject", Text, "message"),
            FieldSpec::new("message", "Message", LongText, "message").required(),
        ],
        on_success: SuccessBehavior::Reset,
        success_message: "Message sent! Thank you for reaching out.",
    }
}
