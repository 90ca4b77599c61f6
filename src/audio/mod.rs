pub(crate) mod ambient;
pub(crate) mod cue;
pub(crate) mod effects;
