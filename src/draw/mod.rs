pub(crate) mod canvas;
pub(crate) mod effect;
pub(crate) mod shape;
