/// Click-to-enlarge viewer over the gallery cards.
///
/// The viewer only knows how many cards exist; it must be refreshed after
/// every change to the gallery so navigation covers newly appended cards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    current: Option<usize>,
}

impl Lightbox {
    pub fn refresh(&mut self, len: usize) {
        self.len = len;
        if self.current.is_some_and(|index| index >= len) {
            self.current = None;
        }
    }

    pub fn open(&mut self, index: usize) -> bool {
        if index < self.len {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn close(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    pub fn prev(&mut self) -> Option<usize> {
        self.step(self.len.saturating_sub(1))
    }

    fn step(&mut self, offset: usize) -> Option<usize> {
        let index = self.current?;
        let next = (index + offset) % self.len;
        self.current = Some(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_requires_refresh() {
        let mut lightbox = Lightbox::default();
        assert!(!lightbox.open(0));

        lightbox.refresh(15);
        assert!(lightbox.open(14));
        assert_eq!(lightbox.current(), Some(14));
        assert!(!lightbox.open(15));
        assert_eq!(lightbox.current(), Some(14));
    }

    #[test]
    fn test_navigation_wraps_around() {
        let mut lightbox = Lightbox::default();
        lightbox.refresh(3);
        lightbox.open(2);
        assert_eq!(lightbox.next(), Some(0));
        assert_eq!(lightbox.prev(), Some(2));
        assert_eq!(lightbox.prev(), Some(1));
    }

    #[test]
    fn test_refresh_extends_navigation_to_appended_cards() {
        let mut lightbox = Lightbox::default();
        lightbox.refresh(15);
        lightbox.open(14);
        lightbox.refresh(30);
        assert_eq!(lightbox.next(), Some(15));
    }

    #[test]
    fn test_refresh_to_empty_closes() {
        let mut lightbox = Lightbox::default();
        lightbox.refresh(5);
        lightbox.open(3);
        lightbox.refresh(0);
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.next(), None);
    }

    #[test]
    fn test_closed_viewer_does_not_navigate() {
        let mut lightbox = Lightbox::default();
        lightbox.refresh(4);
        assert_eq!(lightbox.next(), None);
        lightbox.open(1);
        lightbox.close();
        assert_eq!(lightbox.prev(), None);
    }
}
