pub(crate) mod area;
pub(crate) mod panorama;
pub(crate) mod placement;
pub(crate) mod stack;
