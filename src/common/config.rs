use super::{ConfigSnafu, Result};

/// If the value begins with an '@', read the file at the path that
/// follows it, otherwise return the value itself.
///
/// prefix names the setting in case of an error.
pub(crate) fn key_file_or_string(value: &str, prefix: &str) -> Result<String> {
    match value.strip_prefix('@') {
        Some(key_file) => {
            let contents = std::fs::read_to_string(key_file).map_err(|err| {
                ConfigSnafu {
                    message: format!("Failed to read key from {key_file}: {err}"),
                    prefix,
                }
                .build()
            })?;
            let key = contents.trim();
            if key.is_empty() {
                return ConfigSnafu {
                    message: format!("Key file {key_file} is empty"),
                    prefix,
                }
                .fail();
            }
            Ok(key.to_string())
        }
        None => Ok(value.to_string()),
    }
}
