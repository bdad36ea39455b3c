//! Form parameter encoding for the Reg.ru API.
//!
//! The API only accepts `application/x-www-form-urlencoded` text, so every
//! argument ends up as an ordered list of string pairs. Optional arguments are
//! left out entirely when absent: the API treats an empty field differently
//! from a missing one and only applies its defaults to the latter.

use std::fmt;

use super::types::ZoneAction;

/// Keys whose values must never be printed.
const SECRET_KEYS: &[&str] = &["password"];

/// Ordered string parameters for one API call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FormParams {
    pairs: Vec<(String, String)>,
}

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters targeting a single domain.
    pub fn for_domain(domain: &str) -> Self {
        Self::new().with("domain_name", domain)
    }

    /// Append a parameter, serializing the value with its `Display` form.
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set(key, value);
        self
    }

    /// Append a parameter only when a value is present.
    pub fn with_opt<V: fmt::Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Set a parameter, replacing the value in place if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parameter keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layer these parameters over `base`.
    ///
    /// Base keys keep their position; a key present in both takes the value
    /// from `self`. Keys only in `self` follow in their original order.
    pub fn merged_over(self, mut base: FormParams) -> FormParams {
        for (key, value) in self.pairs {
            base.set(key, value);
        }
        base
    }

    /// Encode as an `application/x-www-form-urlencoded` body.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.pairs)
    }
}

impl fmt::Debug for FormParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.pairs.iter().map(|(k, v)| {
                let shown = if SECRET_KEYS.contains(&k.as_str()) {
                    "[REDACTED]"
                } else {
                    v.as_str()
                };
                (k.as_str(), shown)
            }))
            .finish()
    }
}

/// Key of one field of the action at `index` in a bulk update.
fn action_key(index: usize, field: &str) -> String {
    format!("action_list[{index}][{field}]")
}

/// Flatten an ordered batch of zone actions into `action_list[i][field]` parameters.
///
/// Index `i` always refers to the `i`-th input action. `action`, `type`,
/// `subdomain` and `content` are emitted for every action; `priority` and
/// `ttl` only when the action carries them. Actions are neither merged nor
/// reordered, and the batch size is not checked here.
pub fn encode_action_list(domain: &str, actions: &[ZoneAction]) -> FormParams {
    actions
        .iter()
        .enumerate()
        .fold(FormParams::for_domain(domain), |params, (i, action)| {
            params
                .with(action_key(i, "action"), action.action)
                .with(action_key(i, "type"), action.record_type)
                .with(action_key(i, "subdomain"), &action.subdomain)
                .with(action_key(i, "content"), &action.content)
                .with_opt(action_key(i, "priority"), action.priority)
                .with_opt(action_key(i, "ttl"), action.ttl)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::registrar::types::{ActionKind, RecordType};

    fn action(kind: ActionKind, content: &str) -> ZoneAction {
        ZoneAction {
            action: kind,
            record_type: RecordType::A,
            subdomain: "www".to_string(),
            content: content.to_string(),
            priority: None,
            ttl: None,
        }
    }

    #[test]
    fn test_optional_values_are_omitted() {
        let params = FormParams::for_domain("example.com")
            .with_opt("ttl", None::<u32>)
            .with_opt("priority", Some(10u16));
        assert_eq!(params.len(), 2);
        assert!(!params.contains_key("ttl"));
        assert_eq!(params.get("priority"), Some("10"));
    }

    #[test]
    fn test_merged_over_keeps_base_first_and_lets_caller_override() {
        let base = FormParams::new()
            .with("username", "user")
            .with("password", "secret")
            .with("output_content_type", "plain");
        let merged = FormParams::for_domain("example.com")
            .with("output_content_type", "json")
            .merged_over(base);

        let keys: Vec<_> = merged.keys().collect();
        assert_eq!(
            keys,
            vec!["username", "password", "output_content_type", "domain_name"]
        );
        assert_eq!(merged.get("output_content_type"), Some("json"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let params = FormParams::new()
            .with("username", "user")
            .with("password", "hunter2");
        let debug = format!("{params:?}");
        assert!(debug.contains("REDACTED"));
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_encode_escapes_brackets() {
        let params = FormParams::new().with("action_list[0][action]", "add");
        assert_eq!(
            params.encode().unwrap(),
            "action_list%5B0%5D%5Baction%5D=add"
        );
    }

    #[test]
    fn test_action_list_preserves_order() {
        let actions = vec![
            action(ActionKind::Remove, "1.1.1.1"),
            action(ActionKind::Add, "2.2.2.2"),
        ];
        let params = encode_action_list("example.com", &actions);

        assert_eq!(params.get("domain_name"), Some("example.com"));
        assert_eq!(params.get("action_list[0][action]"), Some("remove"));
        assert_eq!(params.get("action_list[0][content]"), Some("1.1.1.1"));
        assert_eq!(params.get("action_list[1][action]"), Some("add"));
        assert_eq!(params.get("action_list[1][content]"), Some("2.2.2.2"));

        let keys: Vec<_> = params.keys().collect();
        let first_add = keys.iter().position(|k| *k == "action_list[1][action]");
        let first_remove = keys.iter().position(|k| *k == "action_list[0][action]");
        assert!(first_remove < first_add);
    }

    #[test]
    fn test_action_list_field_counts() {
        let mut with_extras = action(ActionKind::Add, "mx.example.com");
        with_extras.record_type = RecordType::Mx;
        with_extras.priority = Some(10);
        with_extras.ttl = Some(600);
        let actions = vec![action(ActionKind::Add, "1.2.3.4"), with_extras];

        let params = encode_action_list("example.com", &actions);
        // domain_name + 4 mandatory fields + (4 mandatory + priority + ttl)
        assert_eq!(params.len(), 1 + 4 + 6);
        assert!(!params.contains_key("action_list[0][priority]"));
        assert!(!params.contains_key("action_list[0][ttl]"));
        assert_eq!(params.get("action_list[1][type]"), Some("MX"));
        assert_eq!(params.get("action_list[1][priority]"), Some("10"));
        assert_eq!(params.get("action_list[1][ttl]"), Some("600"));
    }

    #[test]
    fn test_action_list_keeps_duplicates() {
        let actions = vec![
            action(ActionKind::Add, "1.1.1.1"),
            action(ActionKind::Add, "1.1.1.1"),
        ];
        let params = encode_action_list("example.com", &actions);
        assert_eq!(params.get("action_list[0][content]"), Some("1.1.1.1"));
        assert_eq!(params.get("action_list[1][content]"), Some("1.1.1.1"));
    }

    #[test]
    fn test_empty_action_list_only_has_domain() {
        let params = encode_action_list("example.com", &[]);
        assert_eq!(params.len(), 1);
    }
}
