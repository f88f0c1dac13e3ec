use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A member record as exported by the admin panel.
///
/// Only the fields the duplicate scorer looks at are modelled; anything else
/// in the export is ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirth>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub membership_no: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub father_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_address",
        skip_serializing_if = "Option::is_none"
    )]
    pub postal_address: Option<AddressRecord>,
}

impl MemberRecord {
    /// Name to show in listings: the member's name, else the document id
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref())
            .or_else(|| non_empty(self.id.as_deref()))
            .unwrap_or("(unnamed)")
    }
}

/// Structured postal address. `state` and `country` are carried through
/// but not compared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub address1: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub address2: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub pincode: Option<String>,
}

/// Date of birth as it appears in exports: free text, or a document-store
/// timestamp object. Any other JSON value is kept as `Other` and never
/// yields a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateOfBirth {
    Text(String),
    Timestamp {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    Other(Value),
}

impl DateOfBirth {
    /// Calendar date of this value, ignoring time of day and offset.
    ///
    /// Text is tried as `YYYY-MM-DD`, then RFC 3339, then a naive
    /// date-time. Returns `None` for anything unparseable.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        match self {
            DateOfBirth::Text(text) => parse_date_text(text.trim()),
            DateOfBirth::Timestamp {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(*seconds, *nanoseconds).map(|dt| dt.date_naive()),
            DateOfBirth::Other(_) => None,
        }
    }
}

impl From<&str> for DateOfBirth {
    fn from(value: &str) -> Self {
        DateOfBirth::Text(value.to_string())
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    // Offset-aware: keep the date as written, not the UTC-shifted one
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    None
}

/// Text field that also accepts numbers (mobiles and pincodes are often
/// exported as integers). Any other value reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A postal address that is not an object reads as absent
fn lenient_address<'de, D>(deserializer: D) -> Result<Option<AddressRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Treats `Some("")` the same as `None`
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date() {
        let dob = DateOfBirth::from("1996-05-15");
        assert_eq!(dob.calendar_date(), Some(date(1996, 5, 15)));
    }

    #[test]
    fn test_rfc3339_keeps_written_date() {
        let dob = DateOfBirth::from("1996-05-15T23:30:00-05:00");
        assert_eq!(dob.calendar_date(), Some(date(1996, 5, 15)));
    }

    #[test]
    fn test_naive_datetime() {
        let dob = DateOfBirth::from("1996-05-15T08:00:00.000");
        assert_eq!(dob.calendar_date(), Some(date(1996, 5, 15)));
    }

    #[test]
    fn test_timestamp_uses_utc_date() {
        // 1996-05-15T00:00:00Z
        let dob = DateOfBirth::Timestamp {
            seconds: 832_118_400,
            nanoseconds: 0,
        };
        assert_eq!(dob.calendar_date(), Some(date(1996, 5, 15)));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(DateOfBirth::from("sometime in May").calendar_date(), None);
        assert_eq!(DateOfBirth::from("").calendar_date(), None);
        assert_eq!(DateOfBirth::from("1996-13-45").calendar_date(), None);
    }

    #[test]
    fn test_deserialize_camel_case_export() {
        let json = r#"{
            "id": "m-17",
            "name": "Priya Sharma",
            "dateOfBirth": "1996-05-15",
            "membershipNo": "DA-0042",
            "fatherName": "Ramesh Sharma",
            "postalAddress": { "city": "Ahmedabad", "pincode": "380001" },
            "photoUrl": "ignored"
        }"#;
        let member: MemberRecord = serde_json::from_str(json).unwrap();
        assert_eq!(member.id.as_deref(), Some("m-17"));
        assert_eq!(member.membership_no.as_deref(), Some("DA-0042"));
        assert_eq!(member.father_name.as_deref(), Some("Ramesh Sharma"));
        assert_eq!(member.date_of_birth, Some(DateOfBirth::from("1996-05-15")));
        let address = member.postal_address.unwrap();
        assert_eq!(address.city.as_deref(), Some("Ahmedabad"));
        assert!(address.address1.is_none());
    }

    #[test]
    fn test_deserialize_timestamp_dob() {
        let json = r#"{ "dateOfBirth": { "seconds": 832118400, "nanoseconds": 0 } }"#;
        let member: MemberRecord = serde_json::from_str(json).unwrap();
        assert!(matches!(
            member.date_of_birth,
            Some(DateOfBirth::Timestamp { seconds: 832_118_400, .. })
        ));
    }

    #[test]
    fn test_unexpected_dob_shape_is_kept_as_other() {
        let json = r#"[
            {"name": "A", "dateOfBirth": "1996-05-15"},
            {"name": "B", "dateOfBirth": 19960515}
        ]"#;
        let members: Vec<MemberRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(members.len(), 2);
        let text = members[0].date_of_birth.as_ref().unwrap();
        assert_eq!(text.calendar_date(), Some(date(1996, 5, 15)));

        let other = members[1].date_of_birth.as_ref().unwrap();
        assert!(matches!(other, DateOfBirth::Other(_)));
        assert_eq!(other.calendar_date(), None);
    }

    #[test]
    fn test_numeric_fields_read_as_text() {
        let json = r#"{
            "mobile": 9876543210,
            "membershipNo": 42,
            "postalAddress": { "city": "Surat", "pincode": 395003 }
        }"#;
        let member: MemberRecord = serde_json::from_str(json).unwrap();
        assert_eq!(member.mobile.as_deref(), Some("9876543210"));
        assert_eq!(member.membership_no.as_deref(), Some("42"));
        assert_eq!(
            member.postal_address.unwrap().pincode.as_deref(),
            Some("395003")
        );
    }

    #[test]
    fn test_malformed_fields_read_as_absent() {
        let json = r#"{
            "name": "Asha",
            "email": true,
            "mobile": ["9876543210"],
            "fatherName": null,
            "postalAddress": "12 Ashram Road, Surat"
        }"#;
        let member: MemberRecord = serde_json::from_str(json).unwrap();
        assert_eq!(member.name.as_deref(), Some("Asha"));
        assert!(member.email.is_none());
        assert!(member.mobile.is_none());
        assert!(member.father_name.is_none());
        assert!(member.postal_address.is_none());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut member = MemberRecord {
            id: Some("m-1".to_string()),
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(member.display_name(), "m-1");
        member.id = None;
        assert_eq!(member.display_name(), "(unnamed)");
        member.name = Some("Asha".to_string());
        assert_eq!(member.display_name(), "Asha");
    }
}
