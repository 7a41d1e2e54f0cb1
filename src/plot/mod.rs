//! Terminal plotting of samples and fitted curves.

pub mod ascii;

pub use ascii::render_ascii_plot;
