use hystats_shared::Session;
use serde::Deserialize;

use crate::api::envelope::Envelope;

pub(crate) const ENDPOINT: &str = "status";

/// Representation of the `/status` response.
#[derive(Deserialize, Debug)]
pub struct StatusResponseDto {
    pub success: bool,
    pub session: Option<Session>,
    pub uuid: Option<String>,
    pub cause: Option<String>,
}

impl Envelope for StatusResponseDto {
    type Payload = Session;

    fn into_parts(self) -> (bool, Option<Session>, Option<String>) {
        (self.success, self.session, self.cause)
    }
}
