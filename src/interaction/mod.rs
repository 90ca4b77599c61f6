pub(crate) mod cursor;
pub(crate) mod glitch;
pub(crate) mod magnetic;
pub(crate) mod parallax;
pub(crate) mod tilt;
