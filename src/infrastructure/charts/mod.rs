mod plotters_renderer;

pub use plotters_renderer::PlottersRenderer;
