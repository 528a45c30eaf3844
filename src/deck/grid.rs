//! The slide grid: the target structure of one reconciliation pass.

/// A line consisting of exactly this token separates horizontal groups.
pub const GROUP_SEPARATOR: &str = "===";

/// A line consisting of exactly this token separates sub-slides in a group.
pub const SLIDE_SEPARATOR: &str = "--";

/// An ordered grid of slide sources: groups on the primary axis, sub-slides
/// within each group.
///
/// Every document produces at least one group containing at least one slide;
/// an empty document yields one group with one empty slide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideGrid {
    groups: Vec<Vec<String>>,
}

impl SlideGrid {
    /// Split a markdown body into its slide grid.
    ///
    /// Separators must occupy a whole line by themselves; `===` or `--`
    /// embedded in a longer line is ordinary content.
    pub fn split(content: &str) -> Self {
        let mut groups: Vec<Vec<String>> = Vec::new();
        let mut slides: Vec<String> = Vec::new();
        let mut lines: Vec<&str> = Vec::new();

        for line in content.lines() {
            if line == GROUP_SEPARATOR {
                slides.push(lines.join("\n"));
                lines.clear();
                groups.push(std::mem::take(&mut slides));
            } else if line == SLIDE_SEPARATOR {
                slides.push(lines.join("\n"));
                lines.clear();
            } else {
                lines.push(line);
            }
        }

        slides.push(lines.join("\n"));
        groups.push(slides);

        Self { groups }
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of slides in a group, or `None` when the group is absent.
    pub fn slide_count(&self, group: usize) -> Option<usize> {
        self.groups.get(group).map(Vec::len)
    }

    /// The slide source at `(group, slide)`, if present.
    pub fn get(&self, group: usize, slide: usize) -> Option<&str> {
        self.groups.get(group)?.get(slide).map(String::as_str)
    }

    /// All groups in order.
    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }
}

// =============================================================================
// Tests
// =============================================================================
