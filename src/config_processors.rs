use justconfig::error::ConfigError;
use justconfig::item::{MapAction, StringItem};

/// Remove quotes from configuration strings.
pub trait Unquote
where
    Self: Sized,
{
    fn unquote(self) -> Result<StringItem, ConfigError>;
}

impl Unquote for Result<StringItem, ConfigError> {
    /// Trims every value and strips one pair of matching surrounding quotes, double (`"`)
    /// or single (`'`). Values without matching quotes are kept as they are, so paths
    /// coming from environment variables need no quoting.
    fn unquote(self) -> Result<StringItem, ConfigError> {
        self?.map(|v| match strip_matching_quotes(v.trim()) {
            Some(inner) => MapAction::Replace(vec![inner.to_owned()]),
            None => MapAction::Keep,
        })
    }
}

fn strip_matching_quotes(value: &str) -> Option<&str> {
    ['"', '\''].iter().find_map(|quote| {
        if value.len() >= 2 && value.starts_with(*quote) && value.ends_with(*quote) {
            Some(&value[1..value.len() - 1])
        } else {
            None
        }
    })
}
