// Export submodules
pub mod envelope;
pub mod response;
pub mod version;

pub use envelope::{
    ConferenceListResponse, ConferenceResponse, MediaIdListResponse, MediaResponse,
    NetworkIdListResponse, UploadResponse,
};
pub use response::{deep_find, ApiResponse};
pub use version::ApiVersion;
