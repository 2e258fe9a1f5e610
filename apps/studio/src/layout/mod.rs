// Text measurement and flow shared by the PDF exporter and the preview
// height estimate.

pub mod flow;
pub mod font_metrics;

pub use flow::{document_runs, lay_out, paginate, FlowLayout, FlowLine, TextRun};
pub use font_metrics::{get_metrics, FontMetricTable, PdfFont};
