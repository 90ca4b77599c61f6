pub(crate) mod nav;
pub(crate) mod preloader;
pub(crate) mod theme;
