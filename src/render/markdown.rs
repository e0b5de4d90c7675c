use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::trace;

/// One substitution stage of the markdown dialect.
///
/// Every stage replaces all matches of its pattern. Stages run in the order
/// [`passes`] returns them, each on the output of the one before it.
pub struct Pass {
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl Pass {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid regex"),
            replacement,
        }
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }
}

/// The ordered stage table.
///
/// Order is load-bearing: headings are matched before `\n` becomes `<br>`
/// (they anchor on line starts), `**` is consumed before `*`, and list items
/// are wrapped only once the line breaks between them are `<br>` elements.
pub fn passes() -> &'static [Pass] {
    static PASSES: OnceLock<Vec<Pass>> = OnceLock::new();
    PASSES.get_or_init(|| {
        vec![
            Pass::new("h3", r"(?m)^### (.*)$", "<h3>${1}</h3>"),
            Pass::new("h2", r"(?m)^## (.*)$", "<h2>${1}</h2>"),
            Pass::new("h1", r"(?m)^# (.*)$", "<h1>${1}</h1>"),
            Pass::new("bold", r"\*\*(.*?)\*\*", "<strong>${1}</strong>"),
            Pass::new("italic", r"\*(.*?)\*", "<em>${1}</em>"),
            Pass::new("code_block", r"(?s)```(.*?)```", "<pre><code>${1}</code></pre>"),
            Pass::new("inline_code", r"`(.*?)`", "<code>${1}</code>"),
            Pass::new(
                "link",
                r"\[([^\]]+)\]\(([^)]+)\)",
                r#"<a href="${2}" target="_blank">${1}</a>"#,
            ),
            Pass::new("unordered_item", r"(?m)^- (.*)$", "<li>${1}</li>"),
            Pass::new("ordered_item", r"(?m)^\d+\. (.*)$", "<li>${1}</li>"),
            Pass::new("rule", r"(?m)^---$", "<hr>"),
            Pass::new("line_break", r"\n", "<br>"),
            Pass::new(
                "list_wrap",
                r"<li>.*?</li>(?:(?:\s|<br>)*<li>.*?</li>)*",
                "<ul>${0}</ul>",
            ),
        ]
    })
}

/// Render the blog's markdown dialect to an HTML fragment.
///
/// Empty input renders to an empty string; callers supply their own
/// placeholder. CRLF line endings are folded to LF first so the line-anchored
/// stages see the same text regardless of where the issue was written.
pub fn markdown_to_html(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let mut html = markdown.replace("\r\n", "\n");
    for pass in passes() {
        if let Cow::Owned(replaced) = pass.apply(&html) {
            trace!(pass = pass.name, "markdown pass matched");
            html = replaced;
        }
    }
    html
}
