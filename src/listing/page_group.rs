//! Page-group window for paginated navigation.
//!
//! Pages are zero-based internally and shown one-based. A group of `range`
//! pages is displayed at once, together with navigation affordances:
//!
//! ```text
//! [<] [1] [...] 11 12 13 14 15 [...] [>]
//! ```

/// One button of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButton {
    /// Go to the previous group.
    PrevGroup,
    /// Jump to the first page.
    First,
    /// Jump back one group.
    JumpBack(u32),
    /// A numbered page; `active` marks the displayed page.
    Page {
        /// Zero-based page index.
        index: u32,
        /// Whether this is the displayed page.
        active: bool,
    },
    /// Jump forward one group.
    JumpForward(u32),
    /// Go to the next group.
    NextGroup,
}

impl PageButton {
    /// Button label.
    pub fn label(&self) -> String {
        match self {
            PageButton::PrevGroup => "<".to_string(),
            PageButton::First => "1".to_string(),
            PageButton::JumpBack(_) | PageButton::JumpForward(_) => "...".to_string(),
            PageButton::Page { index, .. } => (u64::from(*index) + 1).to_string(),
            PageButton::NextGroup => ">".to_string(),
        }
    }
}

/// A window of `range` consecutive pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGroup {
    index: u32,
    range: u32,
}

impl PageGroup {
    /// The group containing `page`.
    pub fn containing(page: u32, range: u32) -> Self {
        let range = range.max(1);
        Self {
            index: page / range,
            range,
        }
    }

    /// Group number.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// First page of the group.
    pub fn start(&self) -> u32 {
        self.index.saturating_mul(self.range)
    }

    /// One past the last page of the group, clamped to `total_pages`.
    pub fn end(&self, total_pages: u32) -> u32 {
        self.start().saturating_add(self.range).min(total_pages)
    }

    /// Check if `page` lies inside this group's window.
    pub fn contains(&self, page: u32) -> bool {
        page / self.range == self.index
    }

    /// Target page of the previous-group button: the last page of that group.
    pub fn prev_group_target(&self) -> Option<u32> {
        self.start().checked_sub(1)
    }

    /// Target page of the next-group button: the first page of that group.
    pub fn next_group_target(&self, total_pages: u32) -> Option<u32> {
        let end = self.end(total_pages);
        (end < total_pages).then_some(end)
    }

    /// Buttons for this group with `current` marked active.
    pub fn buttons(&self, current: u32, total_pages: u32) -> Vec<PageButton> {
        let start = self.start();
        let end = self.end(total_pages);
        let range = self.range;
        let double = range.saturating_mul(2);
        let mut buttons = Vec::with_capacity(range as usize + 5);

        if start > 0 {
            buttons.push(PageButton::PrevGroup);
        }
        if start >= range {
            buttons.push(PageButton::First);
        }
        if start >= double {
            buttons.push(PageButton::JumpBack(start - range));
        }

        buttons.extend((start..end).map(|index| PageButton::Page {
            index,
            active: index == current,
        }));

        if total_pages.saturating_sub(end) >= double {
            buttons.push(PageButton::JumpForward(start.saturating_add(range)));
        }
        if end < total_pages {
            buttons.push(PageButton::NextGroup);
        }

        buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(buttons: &[PageButton]) -> Vec<u32> {
        buttons
            .iter()
            .filter_map(|b| match b {
                PageButton::Page { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_group() {
        let group = PageGroup::containing(2, 5);
        let buttons = group.buttons(2, 12);

        assert_eq!(numbered(&buttons), vec![0, 1, 2, 3, 4]);
        assert_eq!(buttons.first(), Some(&PageButton::Page { index: 0, active: false }));
        assert!(buttons.contains(&PageButton::Page { index: 2, active: true }));
        assert_eq!(buttons.last(), Some(&PageButton::NextGroup));
        assert!(!buttons.contains(&PageButton::PrevGroup));
        assert!(!buttons.contains(&PageButton::JumpForward(5)));
    }

    #[test]
    fn test_middle_group_has_all_affordances() {
        let group = PageGroup::containing(12, 5);
        let buttons = group.buttons(12, 30);

        assert_eq!(
            buttons,
            vec![
                PageButton::PrevGroup,
                PageButton::First,
                PageButton::JumpBack(5),
                PageButton::Page { index: 10, active: false },
                PageButton::Page { index: 11, active: false },
                PageButton::Page { index: 12, active: true },
                PageButton::Page { index: 13, active: false },
                PageButton::Page { index: 14, active: false },
                PageButton::JumpForward(15),
                PageButton::NextGroup,
            ]
        );
    }

    #[test]
    fn test_last_partial_group() {
        let group = PageGroup::containing(11, 5);
        let buttons = group.buttons(11, 12);

        assert_eq!(numbered(&buttons), vec![10, 11]);
        assert!(!buttons.contains(&PageButton::NextGroup));
        assert_eq!(group.next_group_target(12), None);
        assert_eq!(group.prev_group_target(), Some(9));
    }

    #[test]
    fn test_no_pages() {
        let buttons = PageGroup::containing(0, 5).buttons(0, 0);
        assert!(buttons.is_empty());
    }

    #[test]
    fn test_window_contains_current_and_is_bounded() {
        for total in 0..40u32 {
            for current in 0..total {
                let group = PageGroup::containing(current, 5);
                let buttons = group.buttons(current, total);
                let pages = numbered(&buttons);
                assert!(pages.contains(&current), "page {current} of {total}");
                assert!(pages.len() <= 5);
                assert_eq!(
                    buttons
                        .iter()
                        .filter(|b| matches!(b, PageButton::Page { active: true, .. }))
                        .count(),
                    1
                );
            }
        }
    }

    #[test]
    fn test_last_representable_page() {
        let group = PageGroup::containing(u32::MAX, 5);
        assert_eq!(group.end(u32::MAX), u32::MAX);
        assert_eq!(group.next_group_target(u32::MAX), None);

        let buttons = group.buttons(u32::MAX, u32::MAX);
        assert!(buttons.contains(&PageButton::PrevGroup));
        assert!(!buttons.contains(&PageButton::NextGroup));
        assert_eq!(
            PageButton::Page { index: u32::MAX, active: true }.label(),
            "4294967296"
        );
    }

    #[test]
    fn test_labels_are_one_based() {
        assert_eq!(PageButton::Page { index: 0, active: true }.label(), "1");
        assert_eq!(PageButton::JumpBack(5).label(), "...");
        assert_eq!(PageButton::NextGroup.label(), ">");
    }
}
