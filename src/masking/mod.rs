pub(crate) mod descriptor;
pub(crate) mod distance;
pub(crate) mod evaluator;
pub(crate) mod fragment;
pub(crate) mod info;
