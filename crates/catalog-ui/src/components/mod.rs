//! Small line-oriented widgets shared by the figure views.

pub mod header;
pub mod share_bar;
