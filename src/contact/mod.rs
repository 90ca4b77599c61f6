pub(crate) mod form;
pub(crate) mod relay;
pub(crate) mod request;
