use log::debug;
use sansi_shared::{InscriptionDto, InscriptionList};

use crate::api::utils::send_json;
use crate::api::ApiClient;
use crate::error::{ClientError, Result};

impl ApiClient {
    /// `GET /api/inscriptions/mis`. Anonymous callers have no inscriptions.
    pub async fn my_inscriptions(&self) -> Result<Vec<InscriptionDto>> {
        if self.token().is_none() {
            return Ok(Vec::new());
        }
        let req = self.authenticated_get(&["api", "inscriptions", "mis"])?;
        match send_json::<InscriptionList>(req).await {
            Ok(list) => Ok(list.into_vec()),
            Err(ClientError::Api { status, .. }) if status == 403 || status == 404 => {
                debug!("No inscriptions available (HTTP {})", status);
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// The caller's inscription in one competition, if any.
    pub async fn inscription_for(&self, competition_id: &str) -> Result<Option<InscriptionDto>> {
        Ok(self
            .my_inscriptions()
            .await?
            .into_iter()
            .find(|i| i.competition_id() == Some(competition_id)))
    }
}
