pub(super) mod authcode;
pub(super) mod epic;
pub(super) mod gog;
pub(super) mod itchio;
pub(super) mod origin;
pub(super) mod rockstar;
pub(super) mod steam;
pub(super) mod ubisoft;
