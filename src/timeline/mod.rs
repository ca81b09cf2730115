pub(crate) mod builder;
pub(crate) mod layer;
pub(crate) mod slide;
pub(crate) mod spec;
