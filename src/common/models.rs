/// Transport to the DNS hosting API.
///
/// Paths are relative to the API root (`v1/...`). Implementations return the
/// raw response body and report non-2xx answers as
/// [`Error::StatusError`](super::Error::StatusError) so callers can tell a
/// 404 apart from other failures.
pub trait Client {
    fn get_by_id(&self, path: &str) -> super::Result<Vec<u8>>;
    fn save(&self, body: &serde_json::Value, path: &str) -> super::Result<Vec<u8>>;
    fn update_by_id(&self, body: &serde_json::Value, path: &str) -> super::Result<Vec<u8>>;
    fn delete_by_id(&self, path: &str) -> super::Result<()>;
}

impl<C: Client + ?Sized> Client for &C {
    fn get_by_id(&self, path: &str) -> super::Result<Vec<u8>> {
        (**self).get_by_id(path)
    }

    fn save(&self, body: &serde_json::Value, path: &str) -> super::Result<Vec<u8>> {
        (**self).save(body, path)
    }

    fn update_by_id(&self, body: &serde_json::Value, path: &str) -> super::Result<Vec<u8>> {
        (**self).update_by_id(body, path)
    }

    fn delete_by_id(&self, path: &str) -> super::Result<()> {
        (**self).delete_by_id(path)
    }
}
