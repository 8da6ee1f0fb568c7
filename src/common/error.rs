use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{method} {url} failed: {source}"))]
    RequestError {
        url: String,
        method: String,
        source: Box<ureq::Error>,
    },
    #[snafu(display("{method} {url} returned {status}: {body}"))]
    StatusError {
        url: String,
        method: String,
        status: u16,
        body: String,
    },
    #[snafu(display("{message}"))]
    ResponseError { message: String },
    #[snafu(display("{message}: {source}"))]
    DecodeError {
        message: String,
        source: serde_json::Error,
    },
    #[snafu(display("Invalid value {value:?} for {attribute}: {message}"))]
    InvalidAttribute {
        attribute: String,
        value: String,
        message: String,
    },
    #[snafu(display("Invalid import ID {id:?}, expected sourceType:domainId:recordId"))]
    InvalidImportId { id: String },
    #[snafu(display("{operation} requires a record ID but none is set"))]
    MissingIdentifier { operation: String },
    #[snafu(display("{prefix}: {message}"))]
    ConfigError { message: String, prefix: String },
}

impl Error {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::StatusError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_only_for_404_status() {
        let err = StatusSnafu {
            url: "https://example.test/v1/domains/1/records/a/2",
            method: "GET",
            status: 404u16,
            body: "",
        }
        .build();
        assert!(err.is_not_found());

        let err = StatusSnafu {
            url: "https://example.test/v1/domains/1/records/a/2",
            method: "GET",
            status: 500u16,
            body: "boom",
        }
        .build();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_not_found());

        let err = ResponseSnafu { message: "404" }.build();
        assert_eq!(err.status(), None);
    }
}
