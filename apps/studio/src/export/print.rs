//! Standalone printable HTML: the rendered resume (styles already inline)
//! wrapped in a document that prints backgrounds and sizes the page.

use crate::render::html::escape_html;
use crate::render::RenderedResume;
use crate::style::paper::PaperSize;

const AUTO_PRINT_SCRIPT: &str =
    "<script>window.addEventListener('load',function(){window.focus();window.print();});</script>";

/// CSS `@page` size keyword for the paper.
pub fn css_page_size(paper: PaperSize) -> &'static str {
    match paper {
        PaperSize::Short => "letter",
        PaperSize::A4 => "A4",
        PaperSize::Legal => "legal",
    }
}

pub fn print_document(
    rendered: &RenderedResume,
    paper: PaperSize,
    title: &str,
    auto_print: bool,
) -> String {
    let title = if title.trim().is_empty() {
        "Resume"
    } else {
        title.trim()
    };
    let mut out = String::with_capacity(rendered.html.len() + 1024);
    out.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    out.push_str(&format!("<title>{}</title>", escape_html(title)));
    out.push_str(&format!(
        "<style>@page{{size:{};margin:0;}}\
         html,body{{margin:0;padding:0;background:#FFFFFF;}}\
         *{{-webkit-print-color-adjust:exact;print-color-adjust:exact;}}\
         @media screen{{body{{background:#E5E7EB;}}.resume{{margin:24px auto;box-shadow:0 2px 12px rgba(0,0,0,.15);}}}}\
         </style>",
        css_page_size(paper)
    ));
    out.push_str("</head><body>");
    out.push_str(&rendered.html);
    if auto_print {
        out.push_str(AUTO_PRINT_SCRIPT);
    }
    out.push_str("</body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Resume;
    use crate::render::{render_resume, SectionVisibility};

    fn rendered() -> RenderedResume {
        let mut r = Resume::default();
        r.personal_info.name = "Jane Doe".into();
        render_resume(&r, SectionVisibility::default())
    }

    #[test]
    fn test_document_forces_background_printing() {
        let doc = print_document(&rendered(), PaperSize::A4, "CV <draft>", false);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("print-color-adjust:exact"));
        assert!(doc.contains("@page{size:A4;margin:0;}"));
        assert!(doc.contains("<title>CV &lt;draft&gt;</title>"));
        assert!(doc.contains("Jane Doe"));
        assert!(!doc.contains("window.print"));
    }

    #[test]
    fn test_auto_print_trigger() {
        let doc = print_document(&rendered(), PaperSize::Short, "", true);
        assert!(doc.contains("window.print()"));
        assert!(doc.contains("<title>Resume</title>"));
        assert!(doc.contains("size:letter"));
    }
}
