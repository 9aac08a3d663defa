//! Response envelopes.
//!
//! Every successful answer wraps its payload in `{"data": ...}`; list answers
//! add paging metadata under `meta.page`.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMeta {
    #[serde(default)]
    pub page: Option<PageMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub page_count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> ListEnvelope<T> {
    /// Total number of items across all pages, when the service reports it.
    pub fn total_count(&self) -> Option<u64> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.page.as_ref())
            .and_then(|page| page.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_with_meta() {
        let page: ListEnvelope<u32> = serde_json::from_str(
            r#"{"data": [1, 2], "meta": {"page": {"pageCount": 3, "totalCount": 5}}}"#,
        )
        .unwrap();
        assert_eq!(page.data, vec![1, 2]);
        assert_eq!(page.total_count(), Some(5));
    }

    #[test]
    fn test_list_envelope_without_meta() {
        let page: ListEnvelope<u32> = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_count(), None);
    }
}
