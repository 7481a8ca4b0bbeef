//! Ordered image thumbnails of an editor.
//!
//! Placeholders are appended while an upload batch is processing and turn
//! into confirmed thumbnails once the server assigns an id. Reordering and
//! removal only touch confirmed thumbnails and never reach the server; the
//! final order is sent with the record save.

use shared::domain::ImageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaceholderKey(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThumbnailState {
    Processing,
    Confirmed(ImageId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub key: PlaceholderKey,
    pub state: ThumbnailState,
}

impl Thumbnail {
    pub fn is_processing(&self) -> bool {
        self.state == ThumbnailState::Processing
    }

    /// Move and delete controls are enabled once the image is confirmed.
    pub fn controls_enabled(&self) -> bool {
        !self.is_processing()
    }

    pub fn image_id(&self) -> Option<&ImageId> {
        match &self.state {
            ThumbnailState::Confirmed(id) => Some(id),
            ThumbnailState::Processing => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<Thumbnail>,
    next_key: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gallery of an existing record.
    pub fn with_images(images: impl IntoIterator<Item = ImageId>) -> Self {
        let mut gallery = Self::new();
        for id in images {
            let key = gallery.next_key();
            gallery.items.push(Thumbnail {
                key,
                state: ThumbnailState::Confirmed(id),
            });
        }
        gallery
    }

    fn next_key(&mut self) -> PlaceholderKey {
        let key = PlaceholderKey(self.next_key);
        self.next_key += 1;
        key
    }

    pub fn items(&self) -> &[Thumbnail] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends `count` processing placeholders, keys returned in order.
    pub fn begin_batch(&mut self, count: usize) -> Vec<PlaceholderKey> {
        (0..count)
            .map(|_| {
                let key = self.next_key();
                self.items.push(Thumbnail {
                    key,
                    state: ThumbnailState::Processing,
                });
                key
            })
            .collect()
    }

    pub fn confirm(&mut self, key: PlaceholderKey, id: ImageId) -> bool {
        match self.items.iter_mut().find(|item| item.key == key) {
            Some(item) if item.is_processing() => {
                item.state = ThumbnailState::Confirmed(id);
                true
            }
            _ => false,
        }
    }

    /// Drops every placeholder still processing; returns how many went away.
    pub fn discard_processing(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_processing());
        before - self.items.len()
    }

    pub fn move_left(&mut self, index: usize) -> bool {
        if index == 0 || !self.movable(index) || !self.movable(index - 1) {
            return false;
        }
        self.items.swap(index - 1, index);
        true
    }

    pub fn move_right(&mut self, index: usize) -> bool {
        if !self.movable(index) || !self.movable(index + 1) {
            return false;
        }
        self.items.swap(index, index + 1);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<ImageId> {
        if !self.movable(index) {
            return None;
        }
        self.items.remove(index).image_id().cloned()
    }

    fn movable(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(Thumbnail::controls_enabled)
    }

    /// Confirmed ids in display order.
    pub fn image_ids(&self) -> Vec<ImageId> {
        self.items
            .iter()
            .filter_map(Thumbnail::image_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(gallery: &Gallery) -> Vec<String> {
        gallery.image_ids().into_iter().map(|id| id.0).collect()
    }

    #[test]
    fn batch_placeholders_confirm_in_place() {
        let mut gallery = Gallery::with_images([ImageId::new("a")]);
        let keys = gallery.begin_batch(2);
        assert_eq!(gallery.len(), 3);
        assert!(gallery.items()[1].is_processing());

        assert!(gallery.confirm(keys[1], ImageId::new("c")));
        assert!(gallery.confirm(keys[0], ImageId::new("b")));
        assert!(!gallery.confirm(keys[0], ImageId::new("again")));
        assert_eq!(ids(&gallery), ["a", "b", "c"]);
    }

    #[test]
    fn discard_keeps_confirmed_items() {
        let mut gallery = Gallery::new();
        let keys = gallery.begin_batch(3);
        gallery.confirm(keys[0], ImageId::new("x"));
        assert_eq!(gallery.discard_processing(), 2);
        assert_eq!(ids(&gallery), ["x"]);
    }

    #[test]
    fn reorder_and_remove_confirmed_thumbnails() {
        let mut gallery =
            Gallery::with_images(["a", "b", "c"].into_iter().map(ImageId::new));
        assert!(gallery.move_left(2));
        assert_eq!(ids(&gallery), ["a", "c", "b"]);
        assert!(gallery.move_right(0));
        assert_eq!(ids(&gallery), ["c", "a", "b"]);
        assert!(!gallery.move_left(0));
        assert!(!gallery.move_right(2));
        assert_eq!(gallery.remove(1), Some(ImageId::new("a")));
        assert_eq!(ids(&gallery), ["c", "b"]);
    }

    #[test]
    fn processing_thumbnails_have_no_controls() {
        let mut gallery = Gallery::with_images([ImageId::new("a")]);
        gallery.begin_batch(1);
        assert!(!gallery.move_right(0));
        assert!(!gallery.move_left(1));
        assert_eq!(gallery.remove(1), None);
        assert_eq!(gallery.len(), 2);
    }
}
