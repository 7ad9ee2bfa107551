use crate::data::persistence::Persistable;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where the navigator was left, restored on the next start.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub step: Option<String>,
}

impl Persistable for SessionState {
    fn filename() -> &'static str {
        "state.json"
    }
    fn is_json() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_session_state_persists_as_json() {
        let tmp = TempDir::new().unwrap();
        let state = SessionState {
            date: NaiveDate::from_ymd_opt(2020, 6, 17),
            step: Some("week".to_string()),
        };
        state.save_to(tmp.path()).unwrap();
        let raw = std::fs::read_to_string(tmp.path().join("state.json")).unwrap();
        assert!(raw.contains("\"2020-06-17\""));
        assert_eq!(SessionState::load_from(tmp.path()).unwrap(), state);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let state: SessionState = serde_json::from_str(r#"{"step":"month"}"#).unwrap();
        assert_eq!(state.date, None);
        assert_eq!(state.step.as_deref(), Some("month"));
    }
}
