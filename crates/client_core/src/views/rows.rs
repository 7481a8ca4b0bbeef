//! Editable row lists of the graffiti editor.

use shared::{domain::AuthorId, protocol::AuthorRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRow {
    pub id: AuthorId,
    pub name: String,
    pub indubitable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AuthorRows {
    rows: Vec<AuthorRow>,
}

impl AuthorRows {
    pub fn new(rows: impl IntoIterator<Item = AuthorRow>) -> Self {
        let mut list = Self::default();
        for row in rows {
            list.add(row);
        }
        list
    }

    pub fn rows(&self) -> &[AuthorRow] {
        &self.rows
    }

    /// Adding an author that is already listed updates its row in place.
    pub fn add(&mut self, row: AuthorRow) {
        match self.rows.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.rows.push(row),
        }
    }

    pub fn remove(&mut self, id: AuthorId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        before != self.rows.len()
    }

    pub fn set_indubitable(&mut self, id: AuthorId, indubitable: bool) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.indubitable = indubitable;
                true
            }
            None => false,
        }
    }

    /// Request form: sorted by id, one entry per author.
    pub fn refs(&self) -> Vec<AuthorRef> {
        let mut refs: Vec<AuthorRef> = self
            .rows
            .iter()
            .map(|row| AuthorRef {
                id: row.id,
                indubitable: row.indubitable,
            })
            .collect();
        refs.sort_unstable_by_key(|r| r.id.0);
        refs.dedup_by_key(|r| r.id);
        refs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
}

impl TagList {
    pub fn new(tags: impl IntoIterator<Item = String>) -> Self {
        let mut list = Self::default();
        for tag in tags {
            list.add(&tag);
        }
        list
    }

    /// Blank and already present tags are ignored.
    pub fn add(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag.trim());
        before != self.tags.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }
}
