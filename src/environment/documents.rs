use std::collections::HashMap;

use crate::core::{DocId, Document, ensure_unique};
use crate::error::{LabError, Result};

/// Ground-truth document table shared by every click model.
#[derive(Debug, Clone)]
pub(crate) struct DocumentSet {
    documents: Vec<Document>,
    index: HashMap<DocId, usize>,
    slate_size: usize,
}

impl DocumentSet {
    pub(crate) fn new(documents: Vec<Document>, slate_size: usize) -> Result<Self> {
        if documents.is_empty() {
            return Err(LabError::Config(
                "environment requires at least one document".to_string(),
            ));
        }
        ensure_unique(documents.iter().map(Document::doc_id), "document set")?;
        if slate_size == 0 {
            return Err(LabError::Config("slate_size must be >= 1".to_string()));
        }
        if slate_size > documents.len() {
            return Err(LabError::Config(format!(
                "slate_size ({slate_size}) cannot exceed number of documents ({})",
                documents.len()
            )));
        }
        let index = documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (doc.doc_id().to_string(), i))
            .collect();
        Ok(Self {
            documents,
            index,
            slate_size,
        })
    }

    pub(crate) fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub(crate) const fn slate_size(&self) -> usize {
        self.slate_size
    }

    pub(crate) fn contains(&self, doc_id: &str) -> bool {
        self.index.contains_key(doc_id)
    }

    pub(crate) fn index_of(&self, doc_id: &str) -> Option<usize> {
        self.index.get(doc_id).copied()
    }

    pub(crate) fn doc_ids(&self) -> Vec<DocId> {
        self.documents
            .iter()
            .map(|doc| doc.doc_id().to_string())
            .collect()
    }

    /// Map a slate onto document indices.
    ///
    /// Unknown ids fail fast instead of behaving as zero-probability
    /// documents. Slates may be shorter than `slate_size` but never longer.
    pub(crate) fn resolve(&self, slate: &[String]) -> Result<Vec<usize>> {
        let missing: Vec<&str> = slate
            .iter()
            .map(String::as_str)
            .filter(|doc_id| !self.contains(doc_id))
            .collect();
        if !missing.is_empty() {
            return Err(LabError::UnknownDocument(missing.join(", ")));
        }
        if slate.is_empty() {
            return Err(LabError::InvalidSlate("slate is empty".to_string()));
        }
        if slate.len() > self.slate_size {
            return Err(LabError::InvalidSlate(format!(
                "slate has {} documents but slate_size is {}",
                slate.len(),
                self.slate_size
            )));
        }
        ensure_unique(slate.iter().map(String::as_str), "slate")
            .map_err(|err| LabError::InvalidSlate(err.to_string()))?;
        Ok(slate.iter().filter_map(|doc_id| self.index_of(doc_id)).collect())
    }

    pub(crate) fn attraction(&self, index: usize) -> f64 {
        self.documents[index].attraction()
    }

    /// Document indices by descending attraction; ties keep insertion order.
    pub(crate) fn by_attraction(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.documents.len()).collect();
        order.sort_by(|a, b| self.attraction(*b).total_cmp(&self.attraction(*a)));
        order
    }

    pub(crate) fn ids_for(&self, indices: &[usize]) -> Vec<DocId> {
        indices
            .iter()
            .map(|i| self.documents[*i].doc_id().to_string())
            .collect()
    }
}
