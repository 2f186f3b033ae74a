use okta_browser::{DirectoryEntry, Login, ProfileRecord};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A user object from Okta's Users API.
/// `GET /api/v1/users` returns an array of these, `GET /api/v1/users/{id}` one.
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: Option<String>,
    pub profile: Option<Map<String, Value>>,
}

impl UserResponse {
    pub fn into_profile(self) -> ProfileRecord {
        ProfileRecord::from_json(self.profile.as_ref())
    }

    /// Users without a login fall back to their Okta id so they can still be
    /// fetched; the sentinel text goes into the label.
    pub fn to_entry(&self) -> DirectoryEntry {
        let login = ProfileRecord::from_json(self.profile.as_ref()).login;
        match (&login, &self.id) {
            (Login::Known(login), _) => {
                let entry = DirectoryEntry::new(login.clone());
                match self.display_name() {
                    Some(name) => entry.with_label(name),
                    None => entry,
                }
            }
            (_, Some(id)) => DirectoryEntry::new(id.clone()).with_label(login.list_label()),
            (_, None) => DirectoryEntry::new(login.list_label()),
        }
    }

    fn display_name(&self) -> Option<String> {
        let profile = self.profile.as_ref()?;
        let part = |key: &str| profile.get(key).and_then(Value::as_str).filter(|s| !s.is_empty());
        match (part("firstName"), part("lastName")) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(one), None) | (None, Some(one)) => Some(one.to_owned()),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user(value: Value) -> UserResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn entry_uses_login_and_display_name() {
        let u = user(json!({
            "id": "00u1",
            "profile": {"login": "alice@example.com", "firstName": "Alice", "lastName": "Liddell"}
        }));
        let entry = u.to_entry();
        assert_eq!(entry.id.as_str(), "alice@example.com");
        assert_eq!(entry.label.as_deref(), Some("Alice Liddell"));
    }

    #[test]
    fn entry_without_login_falls_back_to_okta_id() {
        let u = user(json!({"id": "00u2", "profile": {"firstName": "Nobody"}}));
        let entry = u.to_entry();
        assert_eq!(entry.id.as_str(), "00u2");
        assert_eq!(entry.label.as_deref(), Some("unknown"));
    }

    #[test]
    fn numeric_login_is_not_used_as_entry_id() {
        let u = user(json!({"id": "00u9", "profile": {"login": 42}}));
        let entry = u.to_entry();
        assert_eq!(entry.id.as_str(), "00u9");
        assert_eq!(entry.label.as_deref(), Some("unknown"));
    }

    #[test]
    fn entry_without_profile_or_id_uses_sentinel() {
        let u = user(json!({}));
        let entry = u.to_entry();
        assert_eq!(entry.id.as_str(), "profile not available");
        assert_eq!(entry.label, None);
    }

    #[test]
    fn into_profile_keeps_every_field() {
        let u = user(json!({"profile": {"login": "bob", "department": "eng", "title": null}}));
        let record = u.into_profile();
        assert_eq!(record.login, Login::Known("bob".into()));
        assert_eq!(record.fields.len(), 3);
    }
}
