use super::models::FailoverValue;

/// Order failover entries by ascending `sort_order`.
///
/// Entries sharing a `sort_order` keep their input order, the API has no
/// precedence between equal priorities.
pub fn sort_by_sort_order(mut values: Vec<FailoverValue>) -> Vec<FailoverValue> {
    // slice::sort_by_key is stable
    values.sort_by_key(|v| v.sort_order);
    values
}
