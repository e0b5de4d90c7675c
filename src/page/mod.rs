pub mod types;

pub use types::{BlogContent, LabelChip, RenderedIssue, Section};

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

use crate::config::RepoId;
use crate::github::{Issue, IssueState};
use crate::render::{contrast_color, label_color, markdown_to_html};

/// Shown in place of a body that renders to nothing.
pub const NO_CONTENT: &str = "<em>No content</em>";

/// Compose the tag-filter and post fragments for the whole issue list.
///
/// Issues keep the order they arrive in (newest first from the API); open
/// ones go under "Recent Posts", closed ones under "Archive", and a section
/// with no issues is left out. With no issues at all the content is a single
/// "no posts yet" message pointing at the repository's new-issue page.
#[instrument(skip_all, fields(issues = issues.len(), repo = %repo))]
pub fn build(issues: &[Issue], repo: &RepoId) -> BlogContent {
    let open = issues.iter().filter(|i| i.state == IssueState::Open).count();
    let closed = issues.len() - open;
    debug!(open, closed, "partitioned issues");

    let blog_content = if issues.is_empty() {
        no_posts(repo)
    } else {
        Section::ALL
            .iter()
            .map(|&section| render_section(section, issues))
            .collect()
    };

    BlogContent {
        tag_filters: tag_filters(issues),
        blog_content,
        open,
        closed,
    }
}

/// Filter buttons for every distinct label name, sorted, after "All Posts".
pub fn tag_filters(issues: &[Issue]) -> String {
    let tags: BTreeSet<&str> = issues
        .iter()
        .flat_map(|issue| issue.labels.iter().map(|label| label.name.as_str()))
        .collect();
    debug!(tags = tags.len(), "collected filter tags");

    let mut html = String::from("<div class=\"tag-filters\">\n");
    html.push_str("  <button class=\"tag-filter active\" data-tag=\"all\">All Posts</button>\n");
    for tag in tags {
        html.push_str(&format!(
            "  <button class=\"tag-filter\" data-tag=\"{tag}\">{tag}</button>\n"
        ));
    }
    html.push_str("</div>");
    html
}

/// Derive the drawable form of one issue.
pub fn render_issue(issue: &Issue) -> RenderedIssue {
    debug!(number = issue.number, labels = issue.labels.len(), "rendering issue");
    let label_chips = issue
        .labels
        .iter()
        .map(|label| {
            let color = label_color(label.color.as_deref());
            LabelChip {
                name: label.name.clone(),
                background: format!("#{color}"),
                foreground: contrast_color(Some(color)),
            }
        })
        .collect();

    let body_html = markdown_to_html(issue.body.as_deref().unwrap_or_default());
    let body_html = if body_html.is_empty() {
        NO_CONTENT.to_string()
    } else {
        body_html
    };

    RenderedIssue {
        url: issue.html_url.clone(),
        title: issue.title.clone(),
        state: issue.state,
        meta: post_meta(issue),
        label_chips,
        body_html,
    }
}

impl RenderedIssue {
    /// The `<article>` fragment for this post.
    pub fn to_html(&self) -> String {
        let tags: Vec<&str> = self.label_chips.iter().map(|c| c.name.as_str()).collect();
        let state = self.state.as_str();

        let mut html = format!("<article class=\"blog-post\" data-tags=\"{}\">\n", tags.join(","));
        html.push_str(&format!(
            "  <h2>\n    <a href=\"{}\" target=\"_blank\" class=\"post-title\">{}</a>\n",
            self.url, self.title
        ));
        html.push_str(&format!(
            "    <span class=\"state-badge state-{state}\">{state}</span>\n  </h2>\n"
        ));
        html.push_str(&format!("  <div class=\"post-meta\">{}</div>\n", self.meta));
        if !self.label_chips.is_empty() {
            html.push_str("  <div class=\"labels\">");
            for chip in &self.label_chips {
                html.push_str(&format!(
                    "<span class=\"label\" data-tag=\"{}\" style=\"background-color: {}; color: {}\">{}</span>",
                    chip.name, chip.background, chip.foreground, chip.name
                ));
            }
            html.push_str("</div>\n");
        }
        html.push_str(&format!(
            "  <div class=\"post-content\">{}</div>\n</article>\n",
            self.body_html
        ));
        html
    }
}

/// "Published on <date> by <author>", with " • N comment(s)" when N > 0.
pub fn post_meta(issue: &Issue) -> String {
    let mut meta = format!(
        "Published on {} by {}",
        format_date(&issue.created_at),
        issue.author()
    );
    match issue.comments {
        0 => {}
        1 => meta.push_str(" • 1 comment"),
        n => meta.push_str(&format!(" • {n} comments")),
    }
    meta
}

/// Long-form UTC timestamp, e.g. "January 5, 2024, 03:45 PM UTC".
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y, %I:%M %p UTC").to_string()
}

fn render_section(section: Section, issues: &[Issue]) -> String {
    let posts: String = issues
        .iter()
        .filter(|issue| issue.state == section.state())
        .map(|issue| render_issue(issue).to_html())
        .collect();
    if posts.is_empty() {
        return String::new();
    }

    format!(
        "<section class=\"posts-section\">\n<h2 class=\"section-title\">{} {}</h2>\n{}</section>\n",
        section.icon(),
        section.title(),
        posts
    )
}

fn no_posts(repo: &RepoId) -> String {
    format!(
        "<div class=\"no-posts\">No blog posts yet. \
         <a href=\"https://github.com/{}/{}/issues/new\" target=\"_blank\">Create an issue</a> \
         to write your first post!</div>",
        repo.owner, repo.name
    )
}
