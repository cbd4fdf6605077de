//! Configuration access port trait.

/// Read-only, sectioned key/value configuration.
///
/// Typed getters fall back to `default` when a key is missing or does not
/// parse; callers that must distinguish the two use `get_string`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;
}
