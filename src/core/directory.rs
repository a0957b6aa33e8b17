use std::collections::HashMap;

/// Resolves agent display names for aggregate views
///
/// The user records live with the persistence collaborator; the engine only
/// needs a lookup from user identifier to name.
pub trait AgentDirectory {
    /// Display name for `user_id`, if known
    fn display_name(&self, user_id: &str) -> Option<&str>;
}

impl AgentDirectory for HashMap<String, String> {
    fn display_name(&self, user_id: &str) -> Option<&str> {
        self.get(user_id).map(String::as_str)
    }
}
