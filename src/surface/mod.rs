pub(crate) mod host;
pub(crate) mod overlay;
pub(crate) mod target;
