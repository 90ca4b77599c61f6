pub(crate) mod ease;
pub(crate) mod property;
pub(crate) mod spring;
pub(crate) mod timeline;
