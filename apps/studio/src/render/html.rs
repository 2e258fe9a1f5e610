/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Minimal append-only markup writer. Text and attribute values are escaped;
/// tag names and style strings are trusted (they come from theme tables).
#[derive(Debug, Default)]
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, tag: &str, class: &str, style: &str) -> &mut Self {
        self.open_with(tag, class, style, &[])
    }

    pub fn open_with(
        &mut self,
        tag: &str,
        class: &str,
        style: &str,
        attrs: &[(&str, &str)],
    ) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(tag);
        if !class.is_empty() {
            self.attr("class", class);
        }
        if !style.is_empty() {
            self.attr("style", style);
        }
        for (name, value) in attrs {
            self.attr(name, value);
        }
        self.buf.push('>');
        self
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.buf.push(' ');
        self.buf.push_str(name);
        self.buf.push_str("=\"");
        self.buf.push_str(&escape_html(value));
        self.buf.push('"');
    }

    pub fn close(&mut self, tag: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(&escape_html(text));
        self
    }

    /// Escaped text with line breaks preserved as `<br>`.
    pub fn multiline(&mut self, text: &str) -> &mut Self {
        for (i, line) in text.trim().lines().enumerate() {
            if i > 0 {
                self.buf.push_str("<br>");
            }
            self.text(line);
        }
        self
    }

    /// `<tag class style>text</tag>`; skipped entirely when `text` is blank.
    pub fn element(&mut self, tag: &str, class: &str, style: &str, text: &str) -> &mut Self {
        if text.trim().is_empty() {
            return self;
        }
        self.open(tag, class, style).text(text).close(tag)
    }

    /// Void element such as `<img>`.
    pub fn void(&mut self, tag: &str, class: &str, style: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.open_with(tag, class, style, attrs)
    }

    pub fn raw(&mut self, markup: &str) -> &mut Self {
        self.buf.push_str(markup);
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
