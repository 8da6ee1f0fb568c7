use super::{InvalidAttributeSnafu, Result};

/// Parse a host boolean. Accepts the same spellings the host schema emits.
pub(crate) fn parse_bool(attribute: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => InvalidAttributeSnafu {
            attribute,
            value,
            message: "expected a boolean",
        }
        .fail(),
    }
}

pub(crate) fn parse_int(attribute: &str, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|err| {
        InvalidAttributeSnafu {
            attribute,
            value,
            message: format!("expected an integer: {err}"),
        }
        .build()
    })
}
