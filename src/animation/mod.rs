pub(crate) mod ease;
pub(crate) mod lifecycle;
pub(crate) mod tween;
