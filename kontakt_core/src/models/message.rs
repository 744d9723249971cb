//! Stored contact messages and the document that holds them

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::form::FormInput;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const EMAIL_PLACEHOLDER: &str = "N/A";

/// Whole data file: submitter key to that submitter's messages, oldest first.
pub type MessageStore = IndexMap<String, Vec<MessageRecord>>;

/// `"<surname> <given name>"`. People sharing a name share a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmitterKey(String);

impl SubmitterKey {
    pub fn new(surname: &str, given_name: &str) -> Self {
        Self(format!("{} {}", surname, given_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SubmitterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&FormInput> for SubmitterKey {
    fn from(input: &FormInput) -> Self {
        Self::new(&input.surname, &input.given_name)
    }
}

pub const FIELD_SUBMITTED_AT: &str = "cas_odeslani";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_BIRTH_DATE: &str = "datum_narozeni";
pub const FIELD_COUNTRY: &str = "stat";
pub const FIELD_GENDER: &str = "pohlavi";
pub const FIELD_MESSAGE: &str = "zprava";

/// One submission, kept as the JSON object it is on disk.
///
/// Files written by earlier versions of the site have no timestamp, carry
/// `null` for unset fields and may hold keys or value types this version
/// never writes. Holding the raw object means none of that is lost when the
/// file is saved again. Getters read the known fields and treat anything
/// that is not a string as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRecord(Map<String, Value>);

impl MessageRecord {
    /// Builds a record from validated input, stamped with local time.
    pub fn from_input(input: &FormInput) -> Self {
        Self::from_input_at(input, Local::now())
    }

    pub fn from_input_at(input: &FormInput, at: DateTime<Local>) -> Self {
        let email = if input.email.trim().is_empty() {
            EMAIL_PLACEHOLDER.to_string()
        } else {
            input.email.clone()
        };

        let birth_date = if input.birth_date.trim().is_empty() {
            Value::Null
        } else {
            Value::String(input.birth_date.clone())
        };

        let mut fields = Map::new();
        fields.insert(
            FIELD_SUBMITTED_AT.to_string(),
            Value::String(at.format(TIMESTAMP_FORMAT).to_string()),
        );
        fields.insert(FIELD_EMAIL.to_string(), Value::String(email));
        fields.insert(FIELD_BIRTH_DATE.to_string(), birth_date);
        fields.insert(FIELD_COUNTRY.to_string(), Value::String(input.country.clone()));
        fields.insert(FIELD_GENDER.to_string(), Value::String(input.gender.clone()));
        fields.insert(FIELD_MESSAGE.to_string(), Value::String(input.message.clone()));

        Self(fields)
    }

    /// Raw value of any field, known or not.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn text(&self, field: &str) -> &str {
        self.0.get(field).and_then(Value::as_str).unwrap_or("")
    }

    pub fn submitted_at(&self) -> &str {
        self.text(FIELD_SUBMITTED_AT)
    }

    pub fn email(&self) -> &str {
        self.text(FIELD_EMAIL)
    }

    pub fn birth_date(&self) -> Option<&str> {
        self.0.get(FIELD_BIRTH_DATE).and_then(Value::as_str)
    }

    pub fn country(&self) -> &str {
        self.text(FIELD_COUNTRY)
    }

    pub fn gender(&self) -> &str {
        self.text(FIELD_GENDER)
    }

    pub fn message(&self) -> &str {
        self.text(FIELD_MESSAGE)
    }
}

/// Adds `record` at the end of `key`'s sequence, creating it when absent.
pub fn append(store: &mut MessageStore, key: SubmitterKey, record: MessageRecord) {
    store.entry(key.into_string()).or_default().push(record);
}

/// Number of records across all keys.
pub fn record_count(store: &MessageStore) -> usize {
    store.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(given: &str, surname: &str, message: &str) -> FormInput {
        FormInput {
            given_name: given.to_string(),
            surname: surname.to_string(),
            message: message.to_string(),
            ..FormInput::default()
        }
    }

    #[test]
    fn test_submitter_key_is_surname_first() {
        let key = SubmitterKey::from(&input("Jana", "Nová", "Ahoj"));
        assert_eq!(key.as_str(), "Nová Jana");
        assert_eq!(key.to_string(), "Nová Jana");
    }

    #[test]
    fn test_record_defaults() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let record = MessageRecord::from_input_at(&input("Jana", "Nová", "Ahoj"), at);

        assert_eq!(record.submitted_at(), "2024-03-09 14:05:07");
        assert_eq!(record.email(), "N/A");
        assert_eq!(record.birth_date(), None);
        assert_eq!(record.country(), "Czech Republic");
        assert_eq!(record.gender(), "male");
        assert_eq!(record.message(), "Ahoj");
    }

    #[test]
    fn test_record_keeps_provided_values() {
        let mut form = input("Petr", "Svoboda", "Dobrý den");
        form.email = "petr@example.cz".to_string();
        form.birth_date = "1990-01-31".to_string();
        form.country = "Slovakia".to_string();
        form.gender = "female".to_string();

        let record = MessageRecord::from_input(&form);
        assert_eq!(record.email(), "petr@example.cz");
        assert_eq!(record.birth_date(), Some("1990-01-31"));
        assert_eq!(record.country(), "Slovakia");
        assert_eq!(record.gender(), "female");
    }

    #[test]
    fn test_append_preserves_order_and_groups_by_name() {
        let mut store = MessageStore::new();
        let first = MessageRecord::from_input(&input("Jana", "Nová", "první"));
        let other = MessageRecord::from_input(&input("Petr", "Svoboda", "jiný"));
        let second = MessageRecord::from_input(&input("Jana", "Nová", "druhá"));

        append(&mut store, SubmitterKey::new("Nová", "Jana"), first);
        append(&mut store, SubmitterKey::new("Svoboda", "Petr"), other);
        append(&mut store, SubmitterKey::new("Nová", "Jana"), second);

        assert_eq!(store.len(), 2);
        assert_eq!(record_count(&store), 3);
        let messages: Vec<&str> = store["Nová Jana"].iter().map(|r| r.message()).collect();
        assert_eq!(messages, vec!["první", "druhá"]);
        assert_eq!(store.keys().next().map(String::as_str), Some("Nová Jana"));
    }

    #[test]
    fn test_legacy_record_with_nulls_deserializes() {
        let json = r#"{
            "email": null,
            "datum_narozeni": null,
            "stat": null,
            "pohlavi": null,
            "zprava": "Ahoj"
        }"#;

        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.submitted_at(), "");
        assert_eq!(record.email(), "");
        assert_eq!(record.birth_date(), None);
        assert_eq!(record.message(), "Ahoj");
    }

    #[test]
    fn test_foreign_values_survive_reserialization() {
        let json = r#"{"email":5,"zprava":"číslo","odpoved":"vyřízeno"}"#;

        let record: MessageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.email(), "");
        assert_eq!(record.get("email"), Some(&Value::from(5)));
        assert_eq!(record.get(FIELD_SUBMITTED_AT), None);
        assert_eq!(serde_json::to_string(&record).unwrap(), json);
    }

    #[test]
    fn test_new_record_field_order() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let record = MessageRecord::from_input_at(&input("Jana", "Nová", "Ahoj"), at);

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"cas_odeslani":"2024-03-09 14:05:07","email":"N/A","datum_narozeni":null,"stat":"Czech Republic","pohlavi":"male","zprava":"Ahoj"}"#
        );
    }
}
