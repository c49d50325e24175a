use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "deadline_format")]
    pub deadline: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        id: String,
        title: &str,
        parent_id: Option<String>,
        deadline: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id,
            title: title.trim().to_string(),
            parent_id,
            deadline,
            completed: false,
            completed_at: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A title is valid when it has at least one non-whitespace character.
pub fn is_valid_title(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Parse a deadline as written by users or older data files.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS[.fff]` (a space
/// may replace the `T`) and full RFC 3339 timestamps. Date-only values mean
/// midnight. An RFC 3339 offset is dropped, keeping the wall-clock time as
/// written. Fractions of a second are discarded.
pub fn parse_deadline(s: &str) -> Option<NaiveDateTime> {
    parse_wall_time(s.trim())?.with_nanosecond(0)
}

fn parse_wall_time(s: &str) -> Option<NaiveDateTime> {
    if s.is_empty() {
        return None;
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

pub fn format_deadline(dt: &NaiveDateTime) -> String {
    if dt.second() == 0 {
        dt.format("%Y-%m-%dT%H:%M").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

mod deadline_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::format_deadline(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|s| {
            let parsed = super::parse_deadline(s);
            if parsed.is_none() && !s.trim().is_empty() {
                tracing::warn!(deadline = s, "dropping unreadable deadline");
            }
            parsed
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_validation() {
        assert!(is_valid_title("Write report"));
        assert!(is_valid_title("  x "));
        assert!(!is_valid_title(""));
        assert!(!is_valid_title("   \t"));
    }

    #[test]
    fn deadline_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_deadline("2025-03-14T09:30"), Some(expected));
        assert_eq!(parse_deadline("2025-03-14 09:30:00"), Some(expected));
        assert_eq!(
            parse_deadline("2025-03-14"),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_deadline(""), None);
        assert_eq!(parse_deadline("next tuesday"), None);
        assert_eq!(format_deadline(&expected), "2025-03-14T09:30");
    }

    #[test]
    fn offset_and_fraction_keep_wall_time_in_whole_seconds() {
        let nine = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(parse_deadline("2025-06-01T09:00:00+09:00"), Some(nine));
        assert_eq!(parse_deadline("2025-06-01T09:00:00.750Z"), Some(nine));
        assert_eq!(parse_deadline("2025-06-01T09:00:00.250"), Some(nine));
        assert_eq!(parse_deadline("2025-06-01 09:00:00.999"), Some(nine));
    }

    #[test]
    fn reads_legacy_task_shape() {
        let raw = r#"{"id":"abc123","title":"Old","parentId":"","children":[],"deadline":""}"#;
        let task: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(task.parent_id, None);
        assert_eq!(task.deadline, None);
        assert!(!task.completed);
        assert_eq!(task.completed_at, None);
    }

    #[test]
    fn writes_camel_case_and_skips_absent_fields() {
        let mut task = Task::new("abc123".into(), " Draft ", Some("root01".into()), None);
        task.completed = true;
        let v = serde_json::to_value(&task).unwrap();
        assert_eq!(v["title"], "Draft");
        assert_eq!(v["parentId"], "root01");
        assert!(v.get("deadline").is_none());
        assert!(v.get("completedAt").is_none());
    }
}
