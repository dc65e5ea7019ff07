//! Upload requests

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to start a video upload for a course offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UploadRequest {
    pub offering_id: i64,
    /// University id of the professor the video is uploaded for
    #[validate(length(min = 1, message = "prof_uni cannot be empty"))]
    pub prof_uni: String,
    #[serde(rename = "videoTitle")]
    #[validate(length(min = 1, message = "videoTitle cannot be empty"))]
    pub video_title: String,
}
