pub(crate) mod canvas;
pub(crate) mod panel;
pub(crate) mod writer;
