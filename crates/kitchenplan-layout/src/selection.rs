//! Selected item tracking.

/// Tracks the single selected item.
///
/// `SelectionManager` is responsible for:
/// - Remembering which placed item is selected, if any
/// - Selecting the item under a press in the plan view
///
/// Selection only affects how items are styled when projected. It never
/// changes the canonical model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionManager {
    selected_uid: Option<String>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    pub fn new() -> Self {
        Self { selected_uid: None }
    }

    /// Returns the uid of the selected item.
    pub fn selected_uid(&self) -> Option<&str> {
        self.selected_uid.as_deref()
    }

    pub fn is_selected(&self, uid: &str) -> bool {
        self.selected_uid.as_deref() == Some(uid)
    }

    /// Selects `uid`, or clears the selection with `None`.
    ///
    /// # Returns
    ///
    /// `true` if the selection changed.
    pub fn select(&mut self, uid: Option<&str>) -> bool {
        if self.selected_uid.as_deref() == uid {
            return false;
        }
        self.selected_uid = uid.map(str::to_string);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_reports_changes() {
        let mut selection = SelectionManager::new();
        assert_eq!(selection.selected_uid(), None);

        assert!(selection.select(Some("a")));
        assert!(!selection.select(Some("a")));
        assert!(selection.is_selected("a"));

        assert!(selection.select(None));
        assert!(!selection.is_selected("a"));
    }
}
