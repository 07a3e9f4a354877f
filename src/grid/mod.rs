pub(crate) mod dot;
pub(crate) mod layout;
pub(crate) mod palette;
