use crate::github::IssueState;

/// A label as drawn on a post: background plus readable text color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelChip {
    /// Label name, also used as the filter tag
    pub name: String,
    /// `#rrggbb`
    pub background: String,
    /// `#000000` or `#ffffff`
    pub foreground: &'static str,
}

/// Everything needed to draw one post, derived from an issue.
#[derive(Debug, Clone)]
pub struct RenderedIssue {
    pub url: String,
    pub title: String,
    pub state: IssueState,
    /// "Published on ... by ..." plus the optional comment count
    pub meta: String,
    /// Chips in the issue's own label order
    pub label_chips: Vec<LabelChip>,
    /// Rendered body, or the "No content" placeholder
    pub body_html: String,
}

/// The two post groups, in the order they appear on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Recent,
    Archive,
}

impl Section {
    pub const ALL: [Section; 2] = [Section::Recent, Section::Archive];

    pub fn title(self) -> &'static str {
        match self {
            Section::Recent => "Recent Posts",
            Section::Archive => "Archive",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::Recent => "📝",
            Section::Archive => "📁",
        }
    }

    /// Issues in this state land in this section.
    pub fn state(self) -> IssueState {
        match self {
            Section::Recent => IssueState::Open,
            Section::Archive => IssueState::Closed,
        }
    }
}

/// Fragments ready for template injection, plus counts for logging.
#[derive(Debug, Clone)]
pub struct BlogContent {
    pub tag_filters: String,
    pub blog_content: String,
    pub open: usize,
    pub closed: usize,
}
