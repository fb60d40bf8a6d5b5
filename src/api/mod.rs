// Export submodules
pub mod conference;
pub mod media;
pub mod network_id;
