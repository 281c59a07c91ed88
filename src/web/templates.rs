//! Template rendering with Tera

use anyhow::Result;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use tera::{Context, Tera};

/// Template renderer
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Create a new template renderer with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../templates/base.html")),
            ("index.html", include_str!("../templates/index.html")),
            ("results.html", include_str!("../templates/results.html")),
            ("history.html", include_str!("../templates/history.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with a Tera Context
    pub fn render_with_context(&self, template: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template, context)?)
    }
}

/// Render Markdown to HTML with tables and strikethrough enabled.
///
/// The draft comes from a model that read arbitrary web pages, so raw HTML
/// is shown as text and links or images with a script scheme point nowhere.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(Tag::Link(kind, dest, title)) => {
            Event::Start(Tag::Link(kind, safe_url(dest), title))
        }
        Event::Start(Tag::Image(kind, dest, title)) => {
            Event::Start(Tag::Image(kind, safe_url(dest), title))
        }
        other => other,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

fn safe_url(dest: CowStr<'_>) -> CowStr<'_> {
    let scheme = dest.trim_start().to_ascii_lowercase();
    if ["javascript:", "vbscript:", "data:"]
        .iter()
        .any(|s| scheme.starts_with(s))
    {
        CowStr::Borrowed("#")
    } else {
        dest
    }
}
