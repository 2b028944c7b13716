mod pdf_composer;
mod section_plan;

pub use pdf_composer::PdfComposer;
