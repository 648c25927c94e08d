pub(crate) mod animator;
pub(crate) mod ease;
