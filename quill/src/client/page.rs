//! Server-side rendering of the playground page.

use std::fmt::Write;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::client::api::{Generation, GenerationKind};

/// Per-tab copy.
struct TabCopy {
    tab_label: &'static str,
    title: &'static str,
    placeholder: &'static str,
    caption: &'static str,
    busy: &'static str,
}

fn copy_for(kind: GenerationKind) -> TabCopy {
    match kind {
        GenerationKind::Essay => TabCopy {
            tab_label: "📝 Essay (OpenAI)",
            title: "Generate a concise 100 word essay",
            placeholder: "e.g, AI in Pakistan",
            caption: "Uses route <code>/essay</code>. Make sure <code>OPENAI_API_KEY</code> is set on the server.",
            busy: "Thinking...",
        },
        GenerationKind::Poem => TabCopy {
            tab_label: "🎵 Poem (Groq)",
            title: "Write a playful 100 word poem",
            placeholder: "e.g., friendly robots",
            caption: "Uses route <code>/poem</code>. Make sure <code>GROQ_API_KEY</code> is set on the server.",
            busy: "Rhyming...",
        },
    }
}

/// What the active tab shows below its form.
#[derive(Debug, Clone, Default)]
pub enum TabOutcome {
    #[default]
    Idle,
    Generated(Generation),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PageView<'a> {
    pub active: GenerationKind,
    pub topic: &'a str,
    pub outcome: TabOutcome,
    pub server_url: &'a str,
    pub timeout: Duration,
}

impl<'a> PageView<'a> {
    pub fn idle(active: GenerationKind, server_url: &'a str, timeout: Duration) -> Self {
        Self {
            active,
            topic: "",
            outcome: TabOutcome::Idle,
            server_url,
            timeout,
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn render(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(concat!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        "<title>Quill Playground</title>\n",
        "<link rel=\"stylesheet\" href=\"/assets/style.css\">\n",
        "</head>\n<body>\n<main>\n",
        "<div class=\"hero\"><h1>🤖 Quill Playground</h1>",
        "<p>Essays and poems from hosted chat models</p></div>\n",
    ));

    let _ = write!(
        html,
        "<div class=\"status-row\"><span><b>Server:</b> {}</span><span><b>Timeout:</b> {}s</span></div>\n",
        escape_html(view.server_url),
        view.timeout.as_secs()
    );

    html.push_str("<nav class=\"tabs\">");
    for kind in GenerationKind::ALL {
        let class = if kind == view.active { " class=\"active\"" } else { "" };
        let _ = write!(
            html,
            "<a href=\"/?tab={}\"{}>{}</a>",
            kind.route(),
            class,
            copy_for(kind).tab_label
        );
    }
    html.push_str("</nav>\n");

    for kind in GenerationKind::ALL {
        if kind == view.active {
            render_tab(&mut html, kind, true, view.topic, &view.outcome);
        } else {
            render_tab(&mut html, kind, false, "", &TabOutcome::Idle);
        }
    }

    html.push_str(concat!(
        "<div class=\"soft-note\">Tip: set <b>SERVER_BASE_URL</b> or ",
        "<b>CLIENT_TIMEOUT_SEC</b> in your <code>.env</code> to point at another backend.</div>\n",
        "</main>\n</body>\n</html>\n",
    ));

    html
}

fn render_tab(
    html: &mut String,
    kind: GenerationKind,
    active: bool,
    topic: &str,
    outcome: &TabOutcome,
) {
    let copy = copy_for(kind);
    let route = kind.route();

    let _ = write!(
        html,
        concat!(
            "<section class=\"card\" id=\"tab-{route}\"{visibility}>\n",
            "<div class=\"section-title\">{title}</div>\n",
            "<form method=\"post\" action=\"/generate/{route}\" ",
            "onsubmit=\"this.querySelector('button').textContent='{busy}'\">\n",
            "<label for=\"{route}-topic\">Topic</label>\n",
            "<input type=\"text\" id=\"{route}-topic\" name=\"topic\" required ",
            "placeholder=\"{placeholder}\" value=\"{topic}\">\n",
            "<button type=\"submit\">Generate {label}</button>",
            "<span class=\"caption\">{caption}</span>\n",
            "</form>\n",
        ),
        route = route,
        visibility = if active { "" } else { " hidden" },
        title = copy.title,
        busy = copy.busy,
        placeholder = escape_html(copy.placeholder),
        topic = escape_html(topic),
        label = kind.label(),
        caption = copy.caption,
    );

    match outcome {
        TabOutcome::Idle => {}
        TabOutcome::Failed(message) => {
            let _ = write!(
                html,
                "<div class=\"error\" role=\"alert\">❌ {}</div>\n",
                escape_html(message)
            );
        }
        TabOutcome::Generated(generation) => {
            let _ = write!(
                html,
                concat!(
                    "<div class=\"result\">{text}</div>\n",
                    "<form class=\"download\" method=\"post\" action=\"/download/{route}\">\n",
                    "<input type=\"hidden\" name=\"topic\" value=\"{topic}\">\n",
                    "<input type=\"hidden\" name=\"text\" value=\"{encoded}\">\n",
                    "<button type=\"submit\">Download {label}</button>\n",
                    "</form>\n",
                ),
                text = escape_html(&generation.text),
                route = route,
                topic = escape_html(&generation.topic),
                encoded = STANDARD.encode(generation.text.as_bytes()),
                label = kind.label(),
            );
        }
    }

    html.push_str("</section>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation(text: &str) -> Generation {
        Generation {
            kind: GenerationKind::Poem,
            topic: "friendly robots".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_idle_page_has_both_tabs() {
        let view = PageView::idle(
            GenerationKind::Essay,
            "http://127.0.0.1:8999",
            Duration::from_secs(30),
        );
        let html = render(&view);

        assert!(html.contains("action=\"/generate/essay\""));
        assert!(html.contains("action=\"/generate/poem\""));
        assert!(html.contains("<b>Timeout:</b> 30s"));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_render_generated_result_escapes_text() {
        let mut view = PageView::idle(
            GenerationKind::Poem,
            "http://127.0.0.1:8999",
            Duration::from_secs(30),
        );
        view.topic = "friendly robots";
        view.outcome = TabOutcome::Generated(generation("Beep <boop>"));

        let html = render(&view);
        assert!(html.contains("<div class=\"result\">Beep &lt;boop&gt;</div>"));
        assert!(html.contains("action=\"/download/poem\""));
        assert!(html.contains(&STANDARD.encode("Beep <boop>")));
    }

    #[test]
    fn test_render_failure_shows_error_without_download() {
        let mut view = PageView::idle(
            GenerationKind::Essay,
            "http://127.0.0.1:8999",
            Duration::from_secs(30),
        );
        view.topic = "tea";
        view.outcome = TabOutcome::Failed("Request failed: server returned 502".to_string());

        let html = render(&view);
        assert!(html.contains("class=\"error\""));
        assert!(!html.contains("/download/essay"));
    }
}
