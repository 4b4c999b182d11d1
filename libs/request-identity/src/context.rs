use std::collections::BTreeMap;

/// `UserInfo` describes who is making a request.
///
/// Built by the authentication stage and attached to the request extensions
/// before any authorization middleware runs. The impersonation middleware
/// replaces it wholesale when an impersonation is granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// User name as reported by authentication.
    name: String,
    /// Stable unique identifier of the user.
    uid: String,
    /// Groups the user belongs to, in the order they were asserted.
    #[serde(default)]
    groups: Vec<String>,
    /// Additional attributes; every key maps to an ordered list of values.
    #[serde(default)]
    extra: BTreeMap<String, Vec<String>>,
}

impl UserInfo {
    /// Create a new `UserInfo` builder
    #[must_use]
    pub fn builder() -> UserInfoBuilder {
        UserInfoBuilder::default()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    #[must_use]
    pub fn extra(&self) -> &BTreeMap<String, Vec<String>> {
        &self.extra
    }
}

#[derive(Default)]
pub struct UserInfoBuilder {
    name: Option<String>,
    uid: Option<String>,
    groups: Vec<String>,
    extra: BTreeMap<String, Vec<String>>,
}

impl UserInfoBuilder {
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_owned());
        self
    }

    #[must_use]
    pub fn uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.to_owned());
        self
    }

    #[must_use]
    pub fn groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    /// Append a single group, keeping insertion order.
    #[must_use]
    pub fn group(mut self, group: &str) -> Self {
        self.groups.push(group.to_owned());
        self
    }

    #[must_use]
    pub fn extra(mut self, extra: BTreeMap<String, Vec<String>>) -> Self {
        self.extra = extra;
        self
    }

    /// Build the identity. A missing `uid` falls back to the name.
    #[must_use]
    pub fn build(self) -> UserInfo {
        let name = self.name.unwrap_or_default();
        let uid = self.uid.unwrap_or_else(|| name.clone());
        UserInfo {
            name,
            uid,
            groups: self.groups,
            extra: self.extra,
        }
    }
}

/// Read the authenticated identity from request extensions, if any.
#[must_use]
pub fn current_user(extensions: &http::Extensions) -> Option<&UserInfo> {
    extensions.get::<UserInfo>()
}
